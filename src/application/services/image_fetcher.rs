use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::ports::{Photo, PhotoQuery, PhotoSearch, PhotoSearchError};
use crate::domain::FetchedImage;

const MAX_SEARCH_TERMS: usize = 5;
const QUERY_TERMS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "how", "its", "may", "new", "now", "see", "who", "did",
    "get", "let", "say", "she", "too", "use", "your", "with", "this", "that", "from", "they",
    "will", "what", "when", "where", "which", "while", "about", "into", "than", "then", "them",
    "these", "those", "their", "there", "been", "being", "more", "most", "some", "such", "only",
    "also", "just", "very", "should", "could", "would", "every", "each", "why", "tips", "ways",
    "best", "guide", "make", "makes", "need", "needs", "things", "thing", "top", "does",
];

const PRIORITY_KEYWORDS: &[&str] = &[
    "design", "web", "website", "ux", "ui", "user", "experience", "conversion", "seo",
    "business", "marketing", "brand", "branding", "digital", "ecommerce", "mobile", "growth",
    "strategy", "analytics", "content", "technology", "startup", "laptop", "office", "team",
];

pub struct ImageFetcher<P>
where
    P: PhotoSearch,
{
    photo_search: Arc<P>,
}

impl<P> ImageFetcher<P>
where
    P: PhotoSearch + 'static,
{
    pub fn new(photo_search: Arc<P>) -> Self {
        Self { photo_search }
    }

    /// Best matching landscape photo, or `None` when the search comes back empty.
    pub async fn fetch_image(
        &self,
        headline: &str,
        key_points: &str,
    ) -> Result<Option<FetchedImage>, ImageFetchError> {
        let terms = extract_search_terms(headline, key_points);
        let query = build_search_query(&terms, headline);

        tracing::debug!(query = %query, terms = ?terms, "Searching for article image");

        let photos = self
            .photo_search
            .search(&PhotoQuery::landscape(query.clone()))
            .await
            .map_err(ImageFetchError::Search)?;

        let Some(photo) = photos.into_iter().next() else {
            tracing::info!(query = %query, "No image found");
            return Ok(None);
        };

        Ok(Some(to_fetched_image(photo, headline)))
    }

    /// Fire-and-forget download report; errors are logged and dropped.
    pub fn track_download(&self, image: &FetchedImage) -> JoinHandle<()> {
        let photo_search = Arc::clone(&self.photo_search);
        let download_url = image.download_url.clone();
        let image_id = image.id.clone();

        tokio::spawn(async move {
            if let Err(e) = photo_search.track_download(&download_url).await {
                tracing::warn!(error = %e, image_id = %image_id, "Failed to track image download");
            }
        })
    }
}

/// Up to five distinctive words from the brief, domain keywords first.
pub fn extract_search_terms(headline: &str, key_points: &str) -> Vec<String> {
    let text = format!("{} {}", headline, key_points).to_lowercase();
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    let mut terms: Vec<String> = cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| seen.insert(word.to_string()))
        .map(str::to_string)
        .collect();

    terms.sort_by_key(|term| !is_priority(term));
    terms.truncate(MAX_SEARCH_TERMS);
    terms
}

pub fn build_search_query(terms: &[String], headline: &str) -> String {
    if terms.is_empty() {
        return headline.trim().to_string();
    }
    terms
        .iter()
        .take(QUERY_TERMS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_priority(term: &str) -> bool {
    PRIORITY_KEYWORDS
        .iter()
        .any(|keyword| term.contains(keyword) || keyword.contains(term))
}

fn to_fetched_image(photo: Photo, headline: &str) -> FetchedImage {
    let alt_text = [photo.description.as_deref(), photo.alt_description.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Image related to {}", headline.trim()));

    FetchedImage {
        id: photo.id,
        url: photo.regular_url,
        download_url: photo.download_location,
        alt_text,
        photographer: photo.photographer_name,
        photographer_url: photo.photographer_url,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageFetchError {
    #[error("image search failed: {0}")]
    Search(PhotoSearchError),
}
