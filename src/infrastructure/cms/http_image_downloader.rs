use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{DownloadedImage, ImageDownloadError, ImageDownloader};

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

pub struct HttpImageDownloader {
    client: Client,
}

impl HttpImageDownloader {
    pub fn new(timeout: Duration) -> Result<Self, ImageDownloadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ImageDownloadError::RequestFailed(format!("client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageDownloader for HttpImageDownloader {
    async fn download(&self, url: &str) -> Result<DownloadedImage, ImageDownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageDownloadError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageDownloadError::RequestFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| ImageDownloadError::RequestFailed(e.to_string()))?;

        if data.is_empty() {
            return Err(ImageDownloadError::EmptyBody(url.to_string()));
        }

        tracing::debug!(bytes = data.len(), content_type = %content_type, "Downloaded image");
        Ok(DownloadedImage { data, content_type })
    }
}
