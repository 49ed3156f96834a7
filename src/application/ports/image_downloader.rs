use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<DownloadedImage, ImageDownloadError>;
}

#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageDownloadError {
    #[error("download failed: {0}")]
    RequestFailed(String),
    #[error("empty image body from {0}")]
    EmptyBody(String),
}
