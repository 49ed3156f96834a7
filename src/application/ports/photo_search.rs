use async_trait::async_trait;

#[async_trait]
pub trait PhotoSearch: Send + Sync {
    /// Ranked results, most relevant first.
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<Photo>, PhotoSearchError>;

    /// Reports a photo as used, as required by the provider's terms.
    async fn track_download(&self, download_location: &str) -> Result<(), PhotoSearchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFilter {
    High,
}

impl ContentFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFilter::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoQuery {
    pub query: String,
    pub per_page: u8,
    pub orientation: Orientation,
    pub content_filter: ContentFilter,
}

impl PhotoQuery {
    pub fn landscape(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            per_page: 10,
            orientation: Orientation::Landscape,
            content_filter: ContentFilter::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub regular_url: String,
    pub download_location: String,
    pub photographer_name: String,
    pub photographer_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoSearchError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
