use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{JobId, JobStatus, RowResult};

/// Tracking record for one CSV submission.
///
/// All mutation goes through the methods below so that `processed_rows`,
/// `results` and `progress` stay consistent and status never moves backwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub progress: u8,
    #[serde(rename = "totalPosts")]
    pub total_rows: usize,
    #[serde(rename = "processedPosts")]
    pub processed_rows: usize,
    pub current_step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<RowResult>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "completedAt", skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JobTransitionError {
    #[error("cannot move job from {from} to {to}")]
    IllegalTransition { from: JobStatus, to: JobStatus },
    #[error("job is not processing (status {0})")]
    NotProcessing(JobStatus),
    #[error("all {0} rows already recorded")]
    AllRowsRecorded(usize),
}

impl Job {
    pub fn new(total_rows: usize, created_at: DateTime<Utc>) -> Self {
        Self {
            id: JobId::new(),
            status: JobStatus::Pending,
            progress: 0,
            total_rows,
            processed_rows: 0,
            current_step: "Queued".to_string(),
            error: None,
            results: Vec::with_capacity(total_rows),
            created_at,
            finished_at: None,
        }
    }

    pub fn start(&mut self) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Processing)?;
        self.current_step = "Starting".to_string();
        Ok(())
    }

    pub fn set_step(&mut self, description: impl Into<String>) {
        self.current_step = description.into();
    }

    /// Appends the outcome of the next row and recomputes progress.
    pub fn record(&mut self, result: RowResult) -> Result<(), JobTransitionError> {
        if self.status != JobStatus::Processing {
            return Err(JobTransitionError::NotProcessing(self.status));
        }
        if self.results.len() >= self.total_rows {
            return Err(JobTransitionError::AllRowsRecorded(self.total_rows));
        }
        self.results.push(result);
        self.processed_rows = self.results.len();
        self.progress = progress_percent(self.processed_rows, self.total_rows);
        Ok(())
    }

    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Completed)?;
        self.progress = 100;
        self.current_step = "Completed".to_string();
        self.finished_at = Some(now);
        Ok(())
    }

    pub fn fail(
        &mut self,
        error: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Failed)?;
        let error = error.into();
        self.current_step = format!("Failed: {}", error);
        self.error = Some(error);
        self.finished_at = Some(now);
        Ok(())
    }

    pub fn succeeded_rows(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), JobTransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(JobTransitionError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// `round(100 * processed / total)`, with an empty job reporting 0.
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (processed.min(total) as f64 * 100.0 / total as f64).round();
    pct as u8
}
