use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ports::{ContentStore, ContentStoreError};
use crate::domain::UploadedAsset;
use crate::presentation::config::CmsSettings;

const GLOBAL_API_HOST: &str = "https://api.sanity.io";

pub struct SanityClient {
    client: Client,
    api_root: String,
    dataset: String,
    token: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    result: Option<Value>,
}

#[derive(Deserialize)]
struct MutateResponse {
    results: Vec<MutateResult>,
}

#[derive(Deserialize)]
struct MutateResult {
    id: String,
}

#[derive(Deserialize)]
struct AssetResponse {
    document: AssetDocument,
}

#[derive(Deserialize)]
struct AssetDocument {
    #[serde(rename = "_id")]
    id: String,
    url: String,
}

impl SanityClient {
    /// `base_url` is the API host, e.g. `https://<project>.api.sanity.io`.
    pub fn new(base_url: &str, api_version: &str, dataset: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            api_root: api_root(base_url, api_version),
            dataset: dataset.to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_settings(settings: &CmsSettings) -> Result<Self, ContentStoreError> {
        let base_url = match (&settings.base_url, &settings.project_id) {
            (Some(url), _) => url.clone(),
            (None, Some(project)) => format!("https://{}.api.sanity.io", project),
            (None, None) => {
                tracing::warn!("cms.project_id is not set; content store requests will fail");
                GLOBAL_API_HOST.to_string()
            }
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ContentStoreError::QueryFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            api_root: api_root(&base_url, &settings.api_version),
            dataset: settings.dataset.clone(),
            token: settings.token.clone().unwrap_or_default(),
        })
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn error_body(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        format!("HTTP {}: {}", status, body)
    }
}

fn api_root(base_url: &str, api_version: &str) -> String {
    format!(
        "{}/v{}",
        base_url.trim_end_matches('/'),
        api_version.trim_start_matches('v')
    )
}

fn is_identifier(field: &str) -> bool {
    let mut chars = field.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn find_id(
        &self,
        doc_type: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        if !is_identifier(field) {
            return Err(ContentStoreError::QueryFailed(format!(
                "invalid field name: {}",
                field
            )));
        }

        let query = format!("*[_type == $type && {} == $value][0]._id", field);
        let type_param = Value::String(doc_type.to_string()).to_string();
        let value_param = Value::String(value.to_string()).to_string();

        let response = self
            .client
            .get(format!("{}/data/query/{}", self.api_root, self.dataset))
            .header("Authorization", self.authorization())
            .query(&[
                ("query", query.as_str()),
                ("$type", type_param.as_str()),
                ("$value", value_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ContentStoreError::QueryFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentStoreError::QueryFailed(Self::error_body(response).await));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ContentStoreError::InvalidResponse(e.to_string()))?;

        match body.result {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(id)) => Ok(Some(id)),
            Some(other) => Err(ContentStoreError::InvalidResponse(format!(
                "expected document id, got {}",
                other
            ))),
        }
    }

    async fn create(&self, document: Value) -> Result<String, ContentStoreError> {
        let response = self
            .client
            .post(format!("{}/data/mutate/{}", self.api_root, self.dataset))
            .header("Authorization", self.authorization())
            .query(&[("returnIds", "true")])
            .json(&json!({ "mutations": [{ "create": document }] }))
            .send()
            .await
            .map_err(|e| ContentStoreError::MutationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentStoreError::MutationFailed(Self::error_body(response).await));
        }

        let body: MutateResponse = response
            .json()
            .await
            .map_err(|e| ContentStoreError::InvalidResponse(e.to_string()))?;

        body.results
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| ContentStoreError::InvalidResponse("no mutation results".to_string()))
    }

    async fn upload_image(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadedAsset, ContentStoreError> {
        let response = self
            .client
            .post(format!("{}/assets/images/{}", self.api_root, self.dataset))
            .header("Authorization", self.authorization())
            .header("Content-Type", content_type)
            .query(&[("filename", filename)])
            .body(data)
            .send()
            .await
            .map_err(|e| ContentStoreError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentStoreError::UploadFailed(Self::error_body(response).await));
        }

        let body: AssetResponse = response
            .json()
            .await
            .map_err(|e| ContentStoreError::InvalidResponse(e.to_string()))?;

        Ok(UploadedAsset {
            id: body.document.id,
            url: body.document.url,
        })
    }
}
