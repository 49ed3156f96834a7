use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Chat-style completion: one system message, one user message, raw text back.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
