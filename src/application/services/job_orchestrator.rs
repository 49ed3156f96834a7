use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::{
    Clock, ContentStore, ImageDownloader, JobStore, JobStoreError, LlmClient, PhotoSearch,
};
use crate::domain::{Job, JobId, JobTransitionError, PublishConfig, RowInput, RowResult};

use super::{CmsUploader, ContentGenerator, ImageFetcher};

/// Drives one job at a time per spawned task: rows are processed strictly in
/// order because author/category upserts are not safe under concurrent writers.
pub struct JobOrchestrator<L, P, S>
where
    L: LlmClient,
    P: PhotoSearch,
    S: ContentStore,
{
    content_generator: ContentGenerator<L>,
    image_fetcher: ImageFetcher<P>,
    cms_uploader: CmsUploader<S>,
    job_store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
}

impl<L, P, S> JobOrchestrator<L, P, S>
where
    L: LlmClient + 'static,
    P: PhotoSearch + 'static,
    S: ContentStore + 'static,
{
    pub fn new(
        llm_client: Arc<L>,
        photo_search: Arc<P>,
        content_store: Arc<S>,
        image_downloader: Arc<dyn ImageDownloader>,
        job_store: Arc<dyn JobStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            content_generator: ContentGenerator::new(llm_client),
            image_fetcher: ImageFetcher::new(photo_search),
            cms_uploader: CmsUploader::new(content_store, image_downloader, Arc::clone(&clock)),
            job_store,
            clock,
        }
    }

    pub fn job_store(&self) -> &Arc<dyn JobStore> {
        &self.job_store
    }

    /// Records a pending job and starts processing it in the background.
    pub async fn submit(
        self: &Arc<Self>,
        rows: Vec<RowInput>,
        config: PublishConfig,
    ) -> Result<Job, JobStoreError> {
        let job = Job::new(rows.len(), self.clock.now());
        self.job_store.insert(&job).await?;

        tracing::info!(job_id = %job.id, rows = rows.len(), "Blog generation job submitted");

        let orchestrator = Arc::clone(self);
        let snapshot = job.clone();
        tokio::spawn(async move { orchestrator.supervise(job, rows, config).await });

        Ok(snapshot)
    }

    /// Runs the job in its own task so that a panic still marks the job failed.
    async fn supervise(self: Arc<Self>, job: Job, rows: Vec<RowInput>, config: PublishConfig) {
        let job_id = job.id;
        let worker = Arc::clone(&self);
        let span = tracing::info_span!("blog_generation_job", job_id = %job_id);
        let handle =
            tokio::spawn(async move { worker.run(job, rows, config).await }.instrument(span));

        let failure = match handle.await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("processing task aborted: {}", e),
        };

        tracing::error!(job_id = %job_id, error = %failure, "Blog generation job failed");
        self.mark_failed(job_id, &failure).await;
    }

    pub async fn run(
        &self,
        mut job: Job,
        rows: Vec<RowInput>,
        config: PublishConfig,
    ) -> Result<(), JobOrchestrationError> {
        job.start()?;
        self.save(&job).await?;

        let total = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            let result = self.process_row(&mut job, index, total, row, &config).await?;
            if let Some(error) = &result.error {
                tracing::warn!(job_id = %job.id, row = index + 1, error = %error, "Row failed");
            }
            job.record(result)?;
            self.save(&job).await?;
        }

        job.complete(self.clock.now())?;
        self.save(&job).await?;

        tracing::info!(
            job_id = %job.id,
            succeeded = job.succeeded_rows(),
            total = job.total_rows,
            "Blog generation job completed"
        );
        Ok(())
    }

    async fn process_row(
        &self,
        job: &mut Job,
        index: usize,
        total: usize,
        row: RowInput,
        config: &PublishConfig,
    ) -> Result<RowResult, JobOrchestrationError> {
        let position = format!("({}/{})", index + 1, total);

        self.step(job, format!("Generating content for \"{}\" {}", row.headline, position))
            .await?;
        let content = match self.content_generator.generate(&row).await {
            Ok(content) => content,
            Err(e) => return Ok(RowResult::failed(row, e.to_string())),
        };

        self.step(job, format!("Finding image for \"{}\" {}", row.headline, position))
            .await?;
        let image = match self
            .image_fetcher
            .fetch_image(&row.headline, &row.key_points)
            .await
        {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(job_id = %job.id, row = index + 1, error = %e, "Continuing without image");
                None
            }
        };

        let asset = match &image {
            Some(image) => {
                drop(self.image_fetcher.track_download(image));
                self.step(job, format!("Uploading image for \"{}\" {}", row.headline, position))
                    .await?;
                match self.cms_uploader.upload_image(image).await {
                    Ok(asset) => Some(asset),
                    Err(e) => {
                        tracing::warn!(job_id = %job.id, row = index + 1, error = %e, "Continuing without image");
                        None
                    }
                }
            }
            None => None,
        };

        self.step(job, format!("Creating CMS document for \"{}\" {}", row.headline, position))
            .await?;
        let result = match self
            .cms_uploader
            .create_article(&row, &content, asset.as_ref(), config)
            .await
        {
            Ok(document_id) => RowResult::succeeded(row, document_id, content, image),
            Err(e) => RowResult::failed_with_content(row, e.to_string(), content, image),
        };
        Ok(result)
    }

    async fn step(&self, job: &mut Job, description: String) -> Result<(), JobOrchestrationError> {
        tracing::debug!(job_id = %job.id, step = %description, "Job step");
        job.set_step(description);
        self.save(job).await
    }

    async fn save(&self, job: &Job) -> Result<(), JobOrchestrationError> {
        self.job_store.save(job).await.map_err(JobOrchestrationError::Store)
    }

    async fn mark_failed(&self, job_id: JobId, error: &str) {
        let mut job = match self.job_store.get(job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::warn!(job_id = %job_id, "Failed job no longer in store");
                return;
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Could not load failed job");
                return;
            }
        };

        if let Err(e) = job.fail(error, self.clock.now()) {
            tracing::warn!(job_id = %job_id, error = %e, "Could not mark job failed");
            return;
        }
        if let Err(e) = self.job_store.save(&job).await {
            tracing::error!(job_id = %job_id, error = %e, "Could not persist failed job");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobOrchestrationError {
    #[error("job state: {0}")]
    Transition(#[from] JobTransitionError),
    #[error("job store: {0}")]
    Store(JobStoreError),
}
