use serde::{Deserialize, Serialize};

use super::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_description: String,
    pub tags: Vec<String>,
}

impl GeneratedContent {
    /// Builds the content with its slug derived from `title`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        meta_description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            content: content.into(),
            meta_description: meta_description.into(),
            tags,
        }
    }
}
