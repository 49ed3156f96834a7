use async_trait::async_trait;

use crate::domain::{Job, JobId};

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<(), JobStoreError>;

    /// Replaces the stored snapshot of an existing job.
    async fn save(&self, job: &Job) -> Result<(), JobStoreError>;

    async fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError>;

    /// Evicts finished jobs past their retention window; returns how many went.
    async fn sweep_expired(&self) -> Result<usize, JobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("job already exists: {0}")]
    AlreadyExists(JobId),
    #[error("job not found: {0}")]
    NotFound(JobId),
}
