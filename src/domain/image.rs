use serde::{Deserialize, Serialize};

/// A stock photo chosen for an article, with the attribution the provider requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedImage {
    pub id: String,
    pub url: String,
    pub download_url: String,
    pub alt_text: String,
    pub photographer: String,
    pub photographer_url: String,
}

/// An image asset stored in the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub id: String,
    pub url: String,
}
