#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use blogsmith::application::ports::{
    Clock, ContentStore, ContentStoreError, DownloadedImage, ImageDownloadError, ImageDownloader,
    JobStore, LlmClient, LlmClientError, Photo, PhotoQuery, PhotoSearch, PhotoSearchError,
};
use blogsmith::domain::{Job, JobId, UploadedAsset};

pub const ARTICLE_JSON: &str = r###"{"title": "Five SEO Tips That Work", "content": "## Speed\n\nFast pages **rank** better.\n\n- Compress images", "metaDescription": "Practical SEO tips.", "tags": ["seo", "speed"]}"###;

pub struct MockLlmClient {
    response: String,
    fail_when_prompt_contains: Option<String>,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl MockLlmClient {
    pub fn returning(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail_when_prompt_contains: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(response: &str, marker: &str) -> Self {
        Self {
            fail_when_prompt_contains: Some(marker.to_string()),
            ..Self::returning(response)
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        if let Some(marker) = &self.fail_when_prompt_contains {
            if user_prompt.contains(marker.as_str()) {
                return Err(LlmClientError::ApiRequestFailed("upstream exploded".to_string()));
            }
        }
        Ok(self.response.clone())
    }
}

pub fn sample_photo() -> Photo {
    Photo {
        id: "photo-1".to_string(),
        description: Some("A laptop on a desk".to_string()),
        alt_description: None,
        regular_url: "https://images.example/photo-1.jpg".to_string(),
        download_location: "https://api.example/photos/photo-1/download".to_string(),
        photographer_name: "Jane Doe".to_string(),
        photographer_url: "https://example.com/@jane".to_string(),
    }
}

pub struct MockPhotoSearch {
    photos: Vec<Photo>,
    fail: bool,
    pub queries: Mutex<Vec<PhotoQuery>>,
    pub tracked: Mutex<Vec<String>>,
}

impl MockPhotoSearch {
    pub fn with_photos(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            fail: false,
            queries: Mutex::new(Vec::new()),
            tracked: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_photos(Vec::new())
        }
    }
}

#[async_trait]
impl PhotoSearch for MockPhotoSearch {
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<Photo>, PhotoSearchError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(PhotoSearchError::RateLimited);
        }
        Ok(self.photos.clone())
    }

    async fn track_download(&self, download_location: &str) -> Result<(), PhotoSearchError> {
        self.tracked
            .lock()
            .unwrap()
            .push(download_location.to_string());
        if self.fail {
            return Err(PhotoSearchError::ApiRequestFailed("tracking down".to_string()));
        }
        Ok(())
    }
}

/// Records created documents; authors and categories become findable by name/title.
#[derive(Default)]
pub struct MockContentStore {
    pub documents: Mutex<Vec<Value>>,
    pub uploads: Mutex<Vec<(String, String)>>,
    index: Mutex<HashMap<(String, String), String>>,
    pub fail_post_creation: bool,
    pub fail_uploads: bool,
}

impl MockContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_posts() -> Self {
        Self {
            fail_post_creation: true,
            ..Self::default()
        }
    }

    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, doc_type: &str, value: &str, id: &str) {
        self.index
            .lock()
            .unwrap()
            .insert((doc_type.to_string(), value.to_string()), id.to_string());
    }

    pub fn documents_of_type(&self, doc_type: &str) -> Vec<Value> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d["_type"] == doc_type)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn find_id(
        &self,
        doc_type: &str,
        _field: &str,
        value: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        Ok(self
            .index
            .lock()
            .unwrap()
            .get(&(doc_type.to_string(), value.to_string()))
            .cloned())
    }

    async fn create(&self, document: Value) -> Result<String, ContentStoreError> {
        let doc_type = document["_type"].as_str().unwrap_or_default().to_string();
        if doc_type == "post" && self.fail_post_creation {
            return Err(ContentStoreError::MutationFailed("HTTP 500".to_string()));
        }

        let mut documents = self.documents.lock().unwrap();
        let id = format!("{}-{}", doc_type, documents.len() + 1);
        let key = match doc_type.as_str() {
            "author" => document["name"].as_str().map(str::to_string),
            "category" => document["title"].as_str().map(str::to_string),
            _ => None,
        };
        if let Some(key) = key {
            self.index
                .lock()
                .unwrap()
                .insert((doc_type.clone(), key), id.clone());
        }
        documents.push(document);
        Ok(id)
    }

    async fn upload_image(
        &self,
        _data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadedAsset, ContentStoreError> {
        if self.fail_uploads {
            return Err(ContentStoreError::UploadFailed("HTTP 413".to_string()));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), content_type.to_string()));
        Ok(UploadedAsset {
            id: "image-asset-1".to_string(),
            url: "https://cdn.example/image-asset-1.jpg".to_string(),
        })
    }
}

pub struct MockImageDownloader;

#[async_trait]
impl ImageDownloader for MockImageDownloader {
    async fn download(&self, _url: &str) -> Result<DownloadedImage, ImageDownloadError> {
        Ok(DownloadedImage {
            data: Bytes::from_static(b"\x89PNG fake image"),
            content_type: "image/png".to_string(),
        })
    }
}

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn default_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Polls the store the way the admin UI does until the job finishes.
pub async fn wait_for_finished_job(store: &Arc<dyn JobStore>, id: JobId) -> Job {
    for _ in 0..200 {
        if let Some(job) = store.get(id).await.unwrap() {
            if job.status.is_terminal() {
                return job;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {} did not finish in time", id);
}

/// Serves `app` on an ephemeral port until the returned sender fires or drops.
pub async fn start_mock_server(app: axum::Router) -> (String, tokio::sync::oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}
