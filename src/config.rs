use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Default pretrained model used when `SUMMARIZER_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
/// Default Hugging Face inference endpoint (model path is appended).
pub const DEFAULT_HF_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference";
/// Default Hugging Face Hub endpoint used to resolve model metadata.
pub const DEFAULT_HF_HUB_URL: &str = "https://huggingface.co";
/// Default local Ollama runtime address.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Default lower bound on the generated summary length.
pub const DEFAULT_MIN_LENGTH: usize = 50;
/// Default upper bound on the generated summary length.
pub const DEFAULT_MAX_LENGTH: usize = 150;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Configuration was installed twice.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration for the summarizer.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend that hosts the summarization model.
    pub summarizer_provider: SummarizerProvider,
    /// Model identifier passed to the provider.
    pub summarizer_model: String,
    /// Base URL of the Hugging Face inference service.
    pub hf_inference_url: String,
    /// Base URL of the Hugging Face Hub metadata API.
    pub hf_hub_url: String,
    /// Optional bearer token for Hugging Face requests.
    pub hf_api_token: Option<String>,
    /// Base URL of the Ollama runtime.
    pub ollama_url: String,
    /// Default minimum summary length.
    pub summary_min_length: usize,
    /// Default maximum summary length.
    pub summary_max_length: usize,
    /// Optional file that receives a copy of the logs.
    pub log_file: Option<PathBuf>,
}

/// Supported model backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerProvider {
    /// Hosted Hugging Face inference for seq2seq summarization models.
    #[default]
    HuggingFace,
    /// Local Ollama runtime.
    Ollama,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summarizer_provider: SummarizerProvider::default(),
            summarizer_model: DEFAULT_MODEL.to_string(),
            hf_inference_url: DEFAULT_HF_INFERENCE_URL.to_string(),
            hf_hub_url: DEFAULT_HF_HUB_URL.to_string(),
            hf_api_token: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            summary_min_length: DEFAULT_MIN_LENGTH,
            summary_max_length: DEFAULT_MAX_LENGTH,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let number = |key: &str| -> Result<Option<usize>, ConfigError> {
            optional(key)
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
                })
                .transpose()
        };

        let defaults = Self::default();
        Ok(Self {
            summarizer_provider: optional("SUMMARIZER_PROVIDER")
                .map(|value| {
                    value
                        .parse::<SummarizerProvider>()
                        .map_err(|()| ConfigError::InvalidValue("SUMMARIZER_PROVIDER".into()))
                })
                .transpose()?
                .unwrap_or(defaults.summarizer_provider),
            summarizer_model: optional("SUMMARIZER_MODEL").unwrap_or(defaults.summarizer_model),
            hf_inference_url: optional("HF_INFERENCE_URL").unwrap_or(defaults.hf_inference_url),
            hf_hub_url: optional("HF_HUB_URL").unwrap_or(defaults.hf_hub_url),
            hf_api_token: optional("HF_API_TOKEN"),
            ollama_url: optional("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            summary_min_length: number("SUMMARY_MIN_LENGTH")?
                .unwrap_or(defaults.summary_min_length),
            summary_max_length: number("SUMMARY_MAX_LENGTH")?
                .unwrap_or(defaults.summary_max_length),
            log_file: optional("DOCSUM_LOG_FILE").map(PathBuf::from),
        })
    }
}

impl std::str::FromStr for SummarizerProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        provider = ?config.summarizer_provider,
        model = %config.summarizer_model,
        min_length = config.summary_min_length,
        max_length = config.summary_max_length,
        "Loaded configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
}
