//! Handle, constraint and error types for the summarization engine.

use crate::config::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use crate::provider::{ModelInfo, ModelProvider, ProviderError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a summarization call.
pub type SummaryResult = Result<String, SummarizationError>;

/// Classified summarization failures.
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// The handle is `Unloaded`; no model was invoked.
    #[error("model not loaded")]
    ModelNotLoaded,
    /// Input was empty or whitespace-only; no model was invoked.
    #[error("empty input")]
    EmptyInput,
    /// The model was invoked and failed.
    #[error("model invocation failed: {0}")]
    Invocation(#[from] ProviderError),
}

/// Bounds on the generated summary, in the provider's length unit.
///
/// `min_length <= max_length` is expected but not checked here; inconsistent pairs are passed
/// through and rejected by the provider if it cannot honor them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LengthConstraints {
    /// Minimum generated length.
    pub min_length: usize,
    /// Maximum generated length.
    pub max_length: usize,
}

impl LengthConstraints {
    /// Create constraints from explicit bounds.
    pub const fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }
}

impl Default for LengthConstraints {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH, DEFAULT_MAX_LENGTH)
    }
}

/// Decoding mode requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Greedy/fixed-seed decoding; identical input yields identical output.
    #[default]
    Deterministic,
    /// Explicit caller opt-in to sampled decoding.
    Sampled,
}

impl Sampling {
    pub(crate) fn is_sampled(self) -> bool {
        matches!(self, Self::Sampled)
    }
}

/// A model that was resolved successfully, together with the provider that serves it.
pub struct LoadedModel {
    pub(crate) provider: Arc<dyn ModelProvider>,
    pub(crate) model: ModelInfo,
}

impl LoadedModel {
    /// Model metadata reported by the provider.
    pub fn model(&self) -> &ModelInfo {
        &self.model
    }

    /// Name of the provider serving the model.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}

/// Loaded-model handle passed to every summarization call.
///
/// `Unloaded` is terminal: there is no reload path, and every call against it short-circuits.
#[derive(Debug)]
pub enum SummarizerHandle {
    /// Model resolved and ready.
    Loaded(LoadedModel),
    /// Model failed to load.
    Unloaded {
        /// Identifier that was requested.
        model: String,
        /// Why loading failed.
        reason: ProviderError,
    },
}

impl SummarizerHandle {
    /// Whether the handle can serve summarization calls.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Requested or resolved model identifier.
    pub fn model_id(&self) -> &str {
        match self {
            Self::Loaded(loaded) => &loaded.model.id,
            Self::Unloaded { model, .. } => model,
        }
    }

    /// Load failure reason, if the handle is `Unloaded`.
    pub fn load_failure(&self) -> Option<&ProviderError> {
        match self {
            Self::Loaded(_) => None,
            Self::Unloaded { reason, .. } => Some(reason),
        }
    }
}
