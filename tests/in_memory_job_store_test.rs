mod helpers;

use std::sync::Arc;
use std::time::Duration;

use blogsmith::application::ports::{JobStore, JobStoreError};
use blogsmith::application::services::spawn_job_reaper;
use blogsmith::domain::{Job, JobStatus};
use blogsmith::infrastructure::persistence::InMemoryJobStore;
use helpers::FixedClock;

fn store_with_clock() -> (Arc<FixedClock>, InMemoryJobStore) {
    let clock = Arc::new(FixedClock::at(FixedClock::default_instant()));
    let store = InMemoryJobStore::new(clock.clone(), Duration::from_secs(3600));
    (clock, store)
}

#[tokio::test]
async fn given_inserted_job_when_getting_then_returns_snapshot() {
    let (_, store) = store_with_clock();
    let job = Job::new(2, FixedClock::default_instant());

    store.insert(&job).await.unwrap();

    let stored = store.get(job.id).await.unwrap().unwrap();
    assert_eq!(stored, job);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn given_duplicate_id_when_inserting_then_rejects() {
    let (_, store) = store_with_clock();
    let job = Job::new(1, FixedClock::default_instant());
    store.insert(&job).await.unwrap();

    let result = store.insert(&job).await;

    assert!(matches!(result, Err(JobStoreError::AlreadyExists(id)) if id == job.id));
}

#[tokio::test]
async fn given_unknown_job_when_saving_then_reports_not_found() {
    let (_, store) = store_with_clock();
    let job = Job::new(1, FixedClock::default_instant());

    let result = store.save(&job).await;

    assert!(matches!(result, Err(JobStoreError::NotFound(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_saved_update_when_getting_then_sees_latest_state() {
    let (_, store) = store_with_clock();
    let mut job = Job::new(1, FixedClock::default_instant());
    store.insert(&job).await.unwrap();

    job.start().unwrap();
    store.save(&job).await.unwrap();

    let stored = store.get(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Processing);
}

#[tokio::test]
async fn given_finished_job_past_retention_when_sweeping_then_evicts_only_it() {
    let (clock, store) = store_with_clock();
    let now = FixedClock::default_instant();

    let mut finished = Job::new(1, now);
    finished.start().unwrap();
    finished.fail("boom", now).unwrap();
    let running = {
        let mut job = Job::new(1, now);
        job.start().unwrap();
        job
    };
    store.insert(&finished).await.unwrap();
    store.insert(&running).await.unwrap();

    clock.advance(chrono::Duration::minutes(59));
    assert_eq!(store.sweep_expired().await.unwrap(), 0);

    clock.advance(chrono::Duration::minutes(1));
    assert_eq!(store.sweep_expired().await.unwrap(), 1);

    assert!(store.get(finished.id).await.unwrap().is_none());
    assert!(store.get(running.id).await.unwrap().is_some());
}

#[tokio::test]
async fn given_reaper_running_when_jobs_expire_then_they_are_evicted() {
    let clock = Arc::new(FixedClock::at(FixedClock::default_instant()));
    let store = Arc::new(InMemoryJobStore::new(clock.clone(), Duration::from_secs(60)));

    let mut job = Job::new(1, FixedClock::default_instant());
    job.start().unwrap();
    job.complete(FixedClock::default_instant()).unwrap();
    store.insert(&job).await.unwrap();
    clock.advance(chrono::Duration::minutes(5));

    let reaper = spawn_job_reaper(store.clone(), Duration::from_millis(10));

    let mut evicted = false;
    for _ in 0..100 {
        if store.is_empty().await {
            evicted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    reaper.abort();

    assert!(evicted);
}
