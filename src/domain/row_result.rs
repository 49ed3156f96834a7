use serde::{Deserialize, Serialize};

use super::{FetchedImage, GeneratedContent, RowInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResult {
    pub input: RowInput,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cms_document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<GeneratedContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<FetchedImage>,
}

impl RowResult {
    pub fn succeeded(
        input: RowInput,
        cms_document_id: String,
        generated_content: GeneratedContent,
        image: Option<FetchedImage>,
    ) -> Self {
        Self {
            input,
            success: true,
            cms_document_id: Some(cms_document_id),
            error: None,
            generated_content: Some(generated_content),
            image,
        }
    }

    pub fn failed(input: RowInput, error: impl Into<String>) -> Self {
        Self {
            input,
            success: false,
            cms_document_id: None,
            error: Some(error.into()),
            generated_content: None,
            image: None,
        }
    }

    /// Content was generated but the article could not be stored.
    pub fn failed_with_content(
        input: RowInput,
        error: impl Into<String>,
        generated_content: GeneratedContent,
        image: Option<FetchedImage>,
    ) -> Self {
        Self {
            generated_content: Some(generated_content),
            image,
            ..Self::failed(input, error)
        }
    }
}
