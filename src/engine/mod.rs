//! Summarization engine: model handle lifecycle and the length-bounded generation contract.
//!
//! The handle is an explicit value passed to every call, so `Loaded`/`Unloaded` is visible at
//! each call site. Failures are classified into [`SummarizationError`] and returned, never
//! raised. Input is handed to the provider whole; there is no chunking or truncation.

pub mod types;

use crate::provider::{GenerationRequest, ModelProvider};
use std::sync::Arc;

pub use types::{
    LengthConstraints, LoadedModel, Sampling, SummarizationError, SummarizerHandle, SummaryResult,
};

/// Resolve `model` through `provider`.
///
/// Never fails: a load error yields an `Unloaded` handle that carries the reason.
pub async fn initialize(provider: Arc<dyn ModelProvider>, model: &str) -> SummarizerHandle {
    tracing::info!(provider = provider.name(), model, "Loading summarization model");
    match provider.load(model).await {
        Ok(info) => {
            tracing::info!(
                provider = provider.name(),
                model = %info.id,
                pipeline = ?info.pipeline,
                "Model loaded"
            );
            SummarizerHandle::Loaded(LoadedModel {
                provider,
                model: info,
            })
        }
        Err(reason) => {
            tracing::error!(
                provider = provider.name(),
                model,
                error = %reason,
                "Failed to load summarization model"
            );
            SummarizerHandle::Unloaded {
                model: model.to_string(),
                reason,
            }
        }
    }
}

/// Summarize `text` with deterministic decoding.
pub async fn summarize(
    handle: &SummarizerHandle,
    text: &str,
    constraints: LengthConstraints,
) -> SummaryResult {
    summarize_with(handle, text, constraints, Sampling::Deterministic).await
}

/// Summarize `text` with an explicit decoding mode.
pub async fn summarize_with(
    handle: &SummarizerHandle,
    text: &str,
    constraints: LengthConstraints,
    sampling: Sampling,
) -> SummaryResult {
    let SummarizerHandle::Loaded(loaded) = handle else {
        return Err(SummarizationError::ModelNotLoaded);
    };

    if text.trim().is_empty() {
        return Err(SummarizationError::EmptyInput);
    }

    tracing::info!(
        chars = text.chars().count(),
        min_length = constraints.min_length,
        max_length = constraints.max_length,
        sampled = sampling.is_sampled(),
        "Summarizing text"
    );

    let request = GenerationRequest {
        text,
        min_length: constraints.min_length,
        max_length: constraints.max_length,
        sample: sampling.is_sampled(),
    };

    match loaded.provider.generate(&loaded.model, request).await {
        Ok(summary) => Ok(summary),
        Err(error) => {
            tracing::warn!(model = %loaded.model.id, error = %error, "Summarization failed");
            Err(SummarizationError::Invocation(error))
        }
    }
}
