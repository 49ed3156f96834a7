use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::application::ports::JobStore;

/// Periodically evicts finished jobs whose retention window has passed.
pub fn spawn_job_reaper(job_store: Arc<dyn JobStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(interval_secs = interval.as_secs(), "Job reaper started");

        loop {
            ticker.tick().await;
            match job_store.sweep_expired().await {
                Ok(0) => {}
                Ok(evicted) => tracing::info!(evicted, "Evicted expired jobs"),
                Err(e) => tracing::warn!(error = %e, "Job sweep failed"),
            }
        }
    })
}
