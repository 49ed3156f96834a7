use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{GeneratedContent, RowInput};

use super::content_response_parser::parse_generated_content;

pub const BRAND_VOICE_PROMPT: &str = "You are the senior content writer for a web design and \
digital growth studio. Write in a confident, friendly and practical voice for small business \
owners and marketing leads. Prefer concrete advice over buzzwords, short paragraphs, and \
scannable structure. Use markdown: `##` and `###` headings, `-` bullet lists, numbered steps \
where order matters, and **bold** for key ideas. Link to reputable sources with [text](url) \
only when you are certain the URL exists. Aim for 900 to 1200 words and finish with a short \
call to action.\n\nAlways answer with a single JSON object and nothing else, shaped as:\n\
{\"title\": string, \"content\": string (the markdown article body, without the title), \
\"metaDescription\": string (at most 160 characters), \"tags\": string[] (3 to 5 short tags)}";

pub struct ContentGenerator<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> ContentGenerator<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    pub async fn generate(&self, row: &RowInput) -> Result<GeneratedContent, ContentGenerationError> {
        let user_prompt = build_user_prompt(row);

        let raw = self
            .llm_client
            .complete(BRAND_VOICE_PROMPT, &user_prompt)
            .await
            .map_err(ContentGenerationError::Completion)?;

        let content = parse_generated_content(&raw, row)
            .ok_or(ContentGenerationError::EmptyResponse)?;

        tracing::info!(
            title = %content.title,
            slug = %content.slug,
            chars = content.content.len(),
            "Generated article content"
        );

        Ok(content)
    }
}

pub fn build_user_prompt(row: &RowInput) -> String {
    let mut prompt = format!(
        "Write a blog post for our website.\n\nHeadline: {}\nKey points to cover: {}\n",
        row.headline, row.key_points
    );
    if let Some(category) = &row.category {
        prompt.push_str(&format!("Category: {}\n", category));
    }
    prompt.push_str(
        "\nUse the headline as a starting point for the title; you may sharpen it. \
         Cover every key point in its own section.",
    );
    prompt
}

#[derive(Debug, thiserror::Error)]
pub enum ContentGenerationError {
    #[error("content generation failed: {0}")]
    Completion(LlmClientError),
    #[error("content generation failed: empty response from text generation service")]
    EmptyResponse,
}
