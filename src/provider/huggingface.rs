//! Hugging Face inference adapter.
//!
//! Model metadata is resolved through the Hub API; generation goes through the inference
//! endpoint, which accepts `min_length`, `max_length` and `do_sample` directly for seq2seq
//! summarization models.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{GenerationRequest, ModelInfo, ModelProvider, ProviderError, http_client};

const SUMMARIZATION_PIPELINES: [&str; 2] = ["summarization", "text2text-generation"];

/// Provider backed by the Hugging Face Hub and inference API.
pub struct HuggingFaceProvider {
    http: Client,
    inference_url: String,
    hub_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HubModel {
    id: Option<String>,
    pipeline_tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryCandidate {
    // text2text-generation models answer with `generated_text`.
    #[serde(alias = "generated_text")]
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HuggingFaceProvider {
    /// Construct a provider targeting the given inference and hub endpoints.
    pub fn new(
        inference_url: String,
        hub_url: String,
        token: Option<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client("docsum/huggingface")?,
            inference_url,
            hub_url,
            token,
        })
    }

    fn model_endpoint(&self, model: &str) -> String {
        format!("{}/api/models/{model}", self.hub_url.trim_end_matches('/'))
    }

    fn inference_endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}", self.inference_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ModelProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn load(&self, model: &str) -> Result<ModelInfo, ProviderError> {
        let response = self
            .authorize(self.http.get(self.model_endpoint(model)))
            .send()
            .await
            .map_err(|error| {
                ProviderError::Unavailable(format!(
                    "failed to reach Hugging Face Hub at {}: {error}",
                    self.hub_url
                ))
            })?;

        // The Hub answers 401 rather than 404 for unknown repositories when unauthenticated.
        // With a token, a 401 means the token or repo access is at fault.
        let status = response.status();
        if status == StatusCode::NOT_FOUND
            || (status == StatusCode::UNAUTHORIZED && self.token.is_none())
        {
            return Err(ProviderError::ModelNotFound(model.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or(body);
            return Err(ProviderError::Unavailable(format!(
                "Hugging Face Hub returned {status} for {model}: {message}"
            )));
        }

        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "Hugging Face Hub returned {status} for {model}"
            )));
        }

        let body: HubModel = response.json().await.map_err(|error| {
            ProviderError::InvalidResponse(format!("failed to decode model metadata: {error}"))
        })?;

        if let Some(pipeline) = body.pipeline_tag.as_deref() {
            if !SUMMARIZATION_PIPELINES.contains(&pipeline) {
                return Err(ProviderError::Incompatible {
                    model: model.to_string(),
                    pipeline: pipeline.to_string(),
                });
            }
        }

        Ok(ModelInfo {
            id: body.id.unwrap_or_else(|| model.to_string()),
            pipeline: body.pipeline_tag,
        })
    }

    async fn generate(
        &self,
        model: &ModelInfo,
        request: GenerationRequest<'_>,
    ) -> Result<String, ProviderError> {
        let payload = json!({
            "inputs": request.text,
            "parameters": {
                "min_length": request.min_length,
                "max_length": request.max_length,
                "do_sample": request.sample,
            },
            "options": {
                "wait_for_model": true,
            }
        });

        let response = self
            .authorize(self.http.post(self.inference_endpoint(&model.id)))
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                ProviderError::Unavailable(format!(
                    "failed to reach Hugging Face inference at {}: {error}",
                    self.inference_url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or(body);
            return Err(ProviderError::GenerationFailed(format!(
                "Hugging Face returned {status}: {message}"
            )));
        }

        let candidates: Vec<SummaryCandidate> = response.json().await.map_err(|error| {
            ProviderError::InvalidResponse(format!("failed to decode summary response: {error}"))
        })?;

        candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.summary_text)
            .ok_or_else(|| ProviderError::InvalidResponse("response contained no summaries".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };

    const MODEL: &str = "sshleifer/distilbart-cnn-12-6";

    fn provider(server: &MockServer, token: Option<&str>) -> HuggingFaceProvider {
        HuggingFaceProvider::new(
            server.base_url(),
            server.base_url(),
            token.map(str::to_string),
        )
        .expect("provider")
    }

    fn loaded() -> ModelInfo {
        ModelInfo {
            id: MODEL.into(),
            pipeline: Some("summarization".into()),
        }
    }

    #[tokio::test]
    async fn load_accepts_summarization_models() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/models/{MODEL}"));
                then.status(200).json_body(json!({
                    "id": MODEL,
                    "pipeline_tag": "summarization"
                }));
            })
            .await;

        let info = provider(&server, None).load(MODEL).await.expect("model");

        mock.assert();
        assert_eq!(info, loaded());
    }

    #[tokio::test]
    async fn load_rejects_other_pipelines() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/models/bert-base-uncased");
                then.status(200).json_body(json!({
                    "id": "bert-base-uncased",
                    "pipeline_tag": "fill-mask"
                }));
            })
            .await;

        let error = provider(&server, None)
            .load("bert-base-uncased")
            .await
            .expect_err("incompatible");

        assert!(
            matches!(error, ProviderError::Incompatible { ref pipeline, .. } if pipeline == "fill-mask")
        );
    }

    #[tokio::test]
    async fn load_reports_missing_models() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/models/nobody/nothing");
                then.status(401).json_body(json!({ "error": "Repository not found" }));
            })
            .await;

        let error = provider(&server, None)
            .load("nobody/nothing")
            .await
            .expect_err("missing");

        assert!(matches!(error, ProviderError::ModelNotFound(ref model) if model == "nobody/nothing"));
    }

    #[tokio::test]
    async fn load_keeps_hub_reason_when_token_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/api/models/{MODEL}"))
                    .header("Authorization", "Bearer hf_revoked");
                then.status(401).json_body(json!({ "error": "Invalid credentials in Authorization header" }));
            })
            .await;

        let error = provider(&server, Some("hf_revoked"))
            .load(MODEL)
            .await
            .expect_err("rejected token");

        assert!(
            matches!(
                error,
                ProviderError::Unavailable(ref message)
                    if message.contains("401") && message.contains("Invalid credentials")
            ),
            "{error:?}"
        );
    }

    #[tokio::test]
    async fn load_reports_unreachable_hub() {
        let provider = HuggingFaceProvider::new(
            "http://127.0.0.1:9".into(),
            "http://127.0.0.1:9".into(),
            None,
        )
        .expect("provider");

        let error = provider.load(MODEL).await.expect_err("unreachable");
        assert!(matches!(error, ProviderError::Unavailable(_)));
    }

    #[tokio::test]
    async fn generate_sends_length_bounds_and_returns_first_candidate() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(format!("/models/{MODEL}"))
                    .header("Authorization", "Bearer hf_test")
                    .json_body_partial(
                        r#"{"parameters": {"min_length": 20, "max_length": 60, "do_sample": false}}"#,
                    );
                then.status(200).json_body(json!([
                    { "summary_text": "First candidate." },
                    { "summary_text": "Second candidate." }
                ]));
            })
            .await;

        let summary = provider(&server, Some("hf_test"))
            .generate(
                &loaded(),
                GenerationRequest {
                    text: "Some long input text.",
                    min_length: 20,
                    max_length: 60,
                    sample: false,
                },
            )
            .await
            .expect("summary");

        mock.assert();
        assert_eq!(summary, "First candidate.");
    }

    #[tokio::test]
    async fn generate_accepts_text2text_generation_output() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/google/flan-t5-base");
                then.status(200)
                    .json_body(json!([{ "generated_text": "A short generated summary." }]));
            })
            .await;

        let model = ModelInfo {
            id: "google/flan-t5-base".into(),
            pipeline: Some("text2text-generation".into()),
        };
        let summary = provider(&server, None)
            .generate(
                &model,
                GenerationRequest {
                    text: "Some long input text.",
                    min_length: 5,
                    max_length: 40,
                    sample: false,
                },
            )
            .await
            .expect("summary");

        assert_eq!(summary, "A short generated summary.");
    }

    #[tokio::test]
    async fn generate_surfaces_provider_error_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(format!("/models/{MODEL}"));
                then.status(400).json_body(json!({
                    "error": "index out of range in self"
                }));
            })
            .await;

        let error = provider(&server, None)
            .generate(
                &loaded(),
                GenerationRequest {
                    text: "too long",
                    min_length: 50,
                    max_length: 150,
                    sample: false,
                },
            )
            .await
            .expect_err("generation error");

        assert!(matches!(
            error,
            ProviderError::GenerationFailed(ref message)
                if message.contains("400") && message.contains("index out of range")
        ));
    }

    #[tokio::test]
    async fn generate_rejects_empty_candidate_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(format!("/models/{MODEL}"));
                then.status(200).json_body(json!([]));
            })
            .await;

        let error = provider(&server, None)
            .generate(
                &loaded(),
                GenerationRequest {
                    text: "input",
                    min_length: 1,
                    max_length: 5,
                    sample: false,
                },
            )
            .await
            .expect_err("no candidates");

        assert!(matches!(error, ProviderError::InvalidResponse(_)));
    }
}
