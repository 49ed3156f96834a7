use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{Photo, PhotoQuery, PhotoSearch, PhotoSearchError};
use crate::presentation::config::PhotoSettings;

pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<UnsplashPhoto>,
}

#[derive(Deserialize)]
struct UnsplashPhoto {
    id: String,
    description: Option<String>,
    alt_description: Option<String>,
    urls: PhotoUrls,
    links: PhotoLinks,
    user: PhotoUser,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Deserialize)]
struct PhotoLinks {
    download_location: String,
}

#[derive(Deserialize)]
struct PhotoUser {
    name: String,
    links: UserLinks,
}

#[derive(Deserialize)]
struct UserLinks {
    html: String,
}

impl From<UnsplashPhoto> for Photo {
    fn from(p: UnsplashPhoto) -> Self {
        Photo {
            id: p.id,
            description: p.description,
            alt_description: p.alt_description,
            regular_url: p.urls.regular,
            download_location: p.links.download_location,
            photographer_name: p.user.name,
            photographer_url: p.user.links.html,
        }
    }
}

impl UnsplashClient {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    pub fn from_settings(settings: &PhotoSettings) -> Result<Self, PhotoSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| PhotoSearchError::ApiRequestFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_key: settings.access_key.clone().unwrap_or_default(),
        })
    }

    fn authorization(&self) -> String {
        format!("Client-ID {}", self.access_key)
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PhotoSearchError> {
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PhotoSearchError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PhotoSearchError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl PhotoSearch for UnsplashClient {
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<Photo>, PhotoSearchError> {
        let per_page = query.per_page.to_string();
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .header("Authorization", self.authorization())
            .header("Accept-Version", "v1")
            .query(&[
                ("query", query.query.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", query.orientation.as_str()),
                ("content_filter", query.content_filter.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PhotoSearchError::ApiRequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| PhotoSearchError::InvalidResponse(e.to_string()))?;

        tracing::debug!(query = %query.query, results = search.results.len(), "Photo search completed");
        Ok(search.results.into_iter().map(Photo::from).collect())
    }

    async fn track_download(&self, download_location: &str) -> Result<(), PhotoSearchError> {
        let response = self
            .client
            .get(download_location)
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(|e| PhotoSearchError::ApiRequestFailed(e.to_string()))?;

        Self::check_status(response).await?;
        Ok(())
    }
}
