use serde::{Deserialize, Serialize};

/// One spreadsheet row: the brief for a single article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowInput {
    pub headline: String,
    pub key_points: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl RowInput {
    pub fn new(headline: impl Into<String>, key_points: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            key_points: key_points.into(),
            category: None,
            author_name: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_author(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = Some(author_name.into());
        self
    }
}
