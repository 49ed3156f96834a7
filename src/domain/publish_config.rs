use serde::{Deserialize, Serialize};

/// Per-submission options sent alongside the CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishConfig {
    #[serde(default)]
    pub publish_immediately: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
}
