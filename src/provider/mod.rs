//! Model-provider capability consumed by the summarization engine.
//!
//! A provider resolves a model identifier (`load`) and runs one generation call against it
//! (`generate`). Network protocol, weight caching and tokenization stay behind this trait. Two
//! HTTP adapters ship with the crate: Hugging Face inference (native seq2seq length parameters)
//! and a local Ollama runtime.

mod huggingface;
mod ollama;

use crate::config::{Config, SummarizerProvider};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use huggingface::HuggingFaceProvider;
pub use ollama::OllamaProvider;

/// Errors surfaced by model providers, both while loading and while generating.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider could not be reached or refused the request.
    #[error("Model provider unavailable: {0}")]
    Unavailable(String),
    /// The requested model does not exist on the provider.
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    /// The model exists but cannot serve summarization.
    #[error("Model {model} is not a summarization model (pipeline: {pipeline})")]
    Incompatible {
        /// Requested model identifier.
        model: String,
        /// Pipeline reported by the provider.
        pipeline: String,
    },
    /// Provider returned an error while generating.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
    /// Generated summary falls outside the requested bounds.
    #[error("Generated summary has {actual} words, outside the requested range {min}..={max}")]
    LengthViolation {
        /// Length of the generated summary.
        actual: usize,
        /// Requested minimum.
        min: usize,
        /// Requested maximum.
        max: usize,
    },
}

/// Model resolved by [`ModelProvider::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Identifier understood by the provider.
    pub id: String,
    /// Pipeline or family reported by the provider, when known.
    pub pipeline: Option<String>,
}

/// Parameters for a single generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Full input text; never truncated by the caller.
    pub text: &'a str,
    /// Minimum length of the generated summary, in the provider's length unit.
    pub min_length: usize,
    /// Maximum length of the generated summary, in the provider's length unit.
    pub max_length: usize,
    /// Whether the provider may sample instead of decoding deterministically.
    pub sample: bool,
}

/// Interface implemented by summarization model backends.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Short provider name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Resolve `model` and confirm it can be used for summarization.
    async fn load(&self, model: &str) -> Result<ModelInfo, ProviderError>;

    /// Generate one summary candidate for `request` with a previously loaded model.
    async fn generate(
        &self,
        model: &ModelInfo,
        request: GenerationRequest<'_>,
    ) -> Result<String, ProviderError>;
}

/// Build the provider selected by configuration.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    match config.summarizer_provider {
        SummarizerProvider::HuggingFace => Ok(Arc::new(HuggingFaceProvider::new(
            config.hf_inference_url.clone(),
            config.hf_hub_url.clone(),
            config.hf_api_token.clone(),
        )?)),
        SummarizerProvider::Ollama => Ok(Arc::new(OllamaProvider::new(config.ollama_url.clone())?)),
    }
}

pub(crate) fn http_client(user_agent: &str) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|error| {
            ProviderError::Unavailable(format!("failed to construct HTTP client: {error}"))
        })
}
