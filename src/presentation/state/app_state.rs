use std::sync::Arc;

use crate::application::ports::{ContentStore, JobStore, LlmClient, PhotoSearch};
use crate::application::services::JobOrchestrator;
use crate::infrastructure::auth::JwtVerifier;
use crate::presentation::config::Readiness;

pub struct AppState<L, P, S>
where
    L: LlmClient,
    P: PhotoSearch,
    S: ContentStore,
{
    pub orchestrator: Arc<JobOrchestrator<L, P, S>>,
    pub job_store: Arc<dyn JobStore>,
    pub jwt_verifier: Arc<JwtVerifier>,
    pub readiness: Readiness,
}

impl<L, P, S> Clone for AppState<L, P, S>
where
    L: LlmClient,
    P: PhotoSearch,
    S: ContentStore,
{
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            job_store: Arc::clone(&self.job_store),
            jwt_verifier: Arc::clone(&self.jwt_verifier),
            readiness: self.readiness,
        }
    }
}
