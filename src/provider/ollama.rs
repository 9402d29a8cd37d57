//! Ollama adapter.
//!
//! Ollama has no native minimum-length parameter, so the word bounds are stated in the prompt,
//! `num_predict` caps the token budget, and the returned text is checked against the bounds.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{GenerationRequest, ModelInfo, ModelProvider, ProviderError, http_client};

/// Seed used for reproducible decoding.
const DETERMINISTIC_SEED: u64 = 42;
/// Tokens allowed per requested word.
const TOKENS_PER_WORD: usize = 2;

/// Provider backed by a local Ollama runtime.
pub struct OllamaProvider {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ShowResponse {
    #[serde(default)]
    details: Option<ShowDetails>,
}

#[derive(Debug, Deserialize)]
struct ShowDetails {
    family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    done: bool,
}

impl OllamaProvider {
    /// Construct a provider targeting the Ollama runtime at `base_url`.
    pub fn new(base_url: String) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client("docsum/ollama")?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url.trim_end_matches('/'))
    }

    fn unreachable(&self, error: reqwest::Error) -> ProviderError {
        ProviderError::Unavailable(format!(
            "failed to reach Ollama at {}: {error}",
            self.base_url
        ))
    }
}

fn build_prompt(request: &GenerationRequest<'_>) -> String {
    format!(
        "Summarize the following text as a single paragraph of at least {min} and at most {max} words. \
         Return only the summary.\n\n{text}",
        min = request.min_length,
        max = request.max_length,
        text = request.text,
    )
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn load(&self, model: &str) -> Result<ModelInfo, ProviderError> {
        let response = self
            .http
            .post(self.endpoint("show"))
            .json(&json!({ "model": model }))
            .send()
            .await
            .map_err(|error| self.unreachable(error))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::ModelNotFound(model.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(format!(
                "Ollama returned {status} for {model}: {body}"
            )));
        }

        let body: ShowResponse = response.json().await.map_err(|error| {
            ProviderError::InvalidResponse(format!("failed to decode Ollama model info: {error}"))
        })?;

        Ok(ModelInfo {
            id: model.to_string(),
            pipeline: body.details.and_then(|details| details.family),
        })
    }

    async fn generate(
        &self,
        model: &ModelInfo,
        request: GenerationRequest<'_>,
    ) -> Result<String, ProviderError> {
        let num_predict = request.max_length.saturating_mul(TOKENS_PER_WORD).max(1);
        let options = if request.sample {
            json!({ "temperature": 0.8, "num_predict": num_predict })
        } else {
            json!({ "temperature": 0.0, "seed": DETERMINISTIC_SEED, "num_predict": num_predict })
        };
        let payload = json!({
            "model": model.id,
            "prompt": build_prompt(&request),
            "stream": false,
            "options": options,
        });

        let response = self
            .http
            .post(self.endpoint("generate"))
            .json(&payload)
            .send()
            .await
            .map_err(|error| self.unreachable(error))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::ModelNotFound(model.id.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|error| {
            ProviderError::InvalidResponse(format!("failed to decode Ollama response: {error}"))
        })?;

        if !body.done {
            return Err(ProviderError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        let summary = body.response.trim().to_string();
        let words = count_words(&summary);
        if words < request.min_length || words > request.max_length {
            return Err(ProviderError::LengthViolation {
                actual: words,
                min: request.min_length,
                max: request.max_length,
            });
        }

        Ok(summary)
    }
}
