//! Per-document run records emitted by the command-line driver.

use crate::extract::DocumentFormat;
use serde::Serialize;
use sha2::{Digest, Sha256};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Outcome of extracting and summarizing one input.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Path of the source file, or a label for inline text.
    pub source: String,
    /// Extractor used, absent for inline text or undispatchable files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DocumentFormat>,
    /// Number of characters handed to the summarizer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_chars: Option<usize>,
    /// SHA-256 of the extracted text, hex-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_sha256: Option<String>,
    /// Generated summary on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Stage that failed, when the run did not produce a summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<Stage>,
    /// Human-readable failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 timestamp of when the record was produced.
    pub generated_at: String,
}

/// Pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Text extraction from the source file.
    Extraction,
    /// Model summarization.
    Summarization,
}

impl DocumentReport {
    /// Start a report for `source`.
    pub fn new(source: impl Into<String>, format: Option<DocumentFormat>) -> Self {
        Self {
            source: source.into(),
            format,
            extracted_chars: None,
            content_sha256: None,
            summary: None,
            failed_stage: None,
            error: None,
            generated_at: now_rfc3339(),
        }
    }

    /// Record the text that will be summarized.
    pub fn with_text(mut self, text: &str) -> Self {
        self.extracted_chars = Some(text.chars().count());
        self.content_sha256 = Some(content_digest(text));
        self
    }

    /// Record a successful summary.
    pub fn succeeded(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Record a failure at `stage`.
    pub fn failed(mut self, stage: Stage, reason: impl ToString) -> Self {
        self.failed_stage = Some(stage);
        self.error = Some(reason.to_string());
        self
    }

    /// Whether the run produced a summary.
    pub fn is_success(&self) -> bool {
        self.summary.is_some() && self.error.is_none()
    }
}

/// Hex-encoded SHA-256 of `text`.
pub fn content_digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic_hex() {
        let first = content_digest("abc");
        assert_eq!(first, content_digest("abc"));
        assert_eq!(
            first,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn failure_serializes_stage_and_reason_only() {
        let report = DocumentReport::new("broken.pdf", Some(DocumentFormat::Pdf))
            .failed(Stage::Extraction, "failed to parse PDF broken.pdf: bad xref");
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["source"], "broken.pdf");
        assert_eq!(value["format"], "pdf");
        assert_eq!(value["failed_stage"], "extraction");
        assert!(value.get("summary").is_none());
        assert!(!report.is_success());
    }

    #[test]
    fn success_records_text_metrics() {
        let report = DocumentReport::new("inline", None)
            .with_text("héllo")
            .succeeded("hi".into());

        assert!(report.is_success());
        assert_eq!(report.extracted_chars, Some(5));
        assert!(report.generated_at.contains('T'));
    }
}
