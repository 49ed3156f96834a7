use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{ContentStore, LlmClient, PhotoSearch};
use crate::presentation::config::Readiness;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub services: Readiness,
}

pub async fn readiness_handler<L, P, S>(State(state): State<AppState<L, P, S>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
    P: PhotoSearch + 'static,
    S: ContentStore + 'static,
{
    Json(ReadinessResponse {
        ready: state.readiness.is_ready(),
        services: state.readiness,
    })
}
