use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{Clock, JobStore, JobStoreError};
use crate::domain::{Job, JobId};

/// Process-local job registry. Everything is lost on restart.
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
    clock: Arc<dyn Clock>,
    retention: chrono::Duration,
}

impl InMemoryJobStore {
    pub fn new(clock: Arc<dyn Clock>, retention: Duration) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            clock,
            retention: chrono::Duration::from_std(retention)
                .unwrap_or_else(|_| chrono::Duration::hours(1)),
        }
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn insert(&self, job: &Job) -> Result<(), JobStoreError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(JobStoreError::AlreadyExists(job.id));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn save(&self, job: &Job) -> Result<(), JobStoreError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id) {
            Some(stored) => {
                *stored = job.clone();
                Ok(())
            }
            None => Err(JobStoreError::NotFound(job.id)),
        }
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn sweep_expired(&self) -> Result<usize, JobStoreError> {
        let now = self.clock.now();
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| match job.finished_at {
            Some(finished) => finished + self.retention > now,
            None => true,
        });
        Ok(before - jobs.len())
    }
}
