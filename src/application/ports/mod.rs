mod clock;
mod content_store;
mod image_downloader;
mod job_store;
mod llm_client;
mod photo_search;

pub use clock::{Clock, SystemClock};
pub use content_store::{ContentStore, ContentStoreError};
pub use image_downloader::{DownloadedImage, ImageDownloadError, ImageDownloader};
pub use job_store::{JobStore, JobStoreError};
pub use llm_client::{LlmClient, LlmClientError};
pub use photo_search::{
    ContentFilter, Orientation, Photo, PhotoQuery, PhotoSearch, PhotoSearchError,
};
