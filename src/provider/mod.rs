mod huggingface;

pub use huggingface::HuggingFaceClient;

use crate::config::SummarizerConfig;
use crate::error::ProviderError;
use async_trait::async_trait;

/// One single-turn completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, config: &SummarizerConfig) -> Self {
        Self {
            prompt: prompt.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
