use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ContentStore, LlmClient, PhotoSearch};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::admin_auth::require_admin;
use crate::presentation::handlers::{
    generation_status_handler, health_handler, readiness_handler, submit_generation_handler,
};
use crate::presentation::state::AppState;

pub const GENERATE_BLOG_PATH: &str = "/api/admin/generate-blog";

pub fn create_router<L, P, S>(state: AppState<L, P, S>) -> Router
where
    L: LlmClient + 'static,
    P: PhotoSearch + 'static,
    S: ContentStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let admin_routes = Router::new()
        .route(
            GENERATE_BLOG_PATH,
            get(generation_status_handler::<L, P, S>).post(submit_generation_handler::<L, P, S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.jwt_verifier.clone(),
            require_admin,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/admin/readiness", get(readiness_handler::<L, P, S>))
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
