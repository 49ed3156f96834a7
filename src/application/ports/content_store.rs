use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::domain::UploadedAsset;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Id of the first document of `doc_type` whose `field` equals `value`.
    async fn find_id(
        &self,
        doc_type: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<String>, ContentStoreError>;

    /// Creates a document and returns its id.
    async fn create(&self, document: Value) -> Result<String, ContentStoreError>;

    async fn upload_image(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadedAsset, ContentStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("mutation failed: {0}")]
    MutationFailed(String),
    #[error("asset upload failed: {0}")]
    UploadFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
