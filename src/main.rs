use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use blogsmith::application::ports::{Clock, JobStore, SystemClock};
use blogsmith::application::services::{JobOrchestrator, spawn_job_reaper};
use blogsmith::infrastructure::auth::JwtVerifier;
use blogsmith::infrastructure::cms::{HttpImageDownloader, SanityClient};
use blogsmith::infrastructure::llm::OpenAiClient;
use blogsmith::infrastructure::observability::{TracingConfig, init_tracing};
use blogsmith::infrastructure::persistence::InMemoryJobStore;
use blogsmith::infrastructure::photos::UnsplashClient;
use blogsmith::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging))
        .context("Failed to initialize tracing")?;

    let readiness = settings.readiness();
    if !readiness.is_ready() {
        tracing::warn!(?readiness, "Some credentials are missing; generation will fail");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let job_store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new(
        Arc::clone(&clock),
        Duration::from_secs(settings.jobs.retention_secs),
    ));

    let llm_client = Arc::new(OpenAiClient::from_settings(&settings.llm)?);
    let photo_search = Arc::new(UnsplashClient::from_settings(&settings.photos)?);
    let content_store = Arc::new(SanityClient::from_settings(&settings.cms)?);
    let image_downloader = Arc::new(HttpImageDownloader::new(Duration::from_secs(
        settings.photos.timeout_secs,
    ))?);

    let orchestrator = Arc::new(JobOrchestrator::new(
        llm_client,
        photo_search,
        content_store,
        image_downloader,
        Arc::clone(&job_store),
        Arc::clone(&clock),
    ));

    let _reaper = spawn_job_reaper(
        Arc::clone(&job_store),
        Duration::from_secs(settings.jobs.sweep_interval_secs.max(1)),
    );

    let state = AppState {
        orchestrator,
        job_store,
        jwt_verifier: Arc::new(JwtVerifier::new(settings.admin.jwt_secret.as_deref())),
        readiness,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
