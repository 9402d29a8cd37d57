//! Drives independent extract-then-summarize runs over files, directories and inline text.

use crate::engine::{self, LengthConstraints, Sampling, SummarizerHandle};
use crate::extract::{self, DocumentFormat, ExtractionError, ExtractionResult};
use crate::metrics::{MetricsSnapshot, RunMetrics};
use crate::report::{DocumentReport, Stage};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Sequential document runner sharing one model handle.
pub struct Runner<'a> {
    handle: &'a SummarizerHandle,
    constraints: LengthConstraints,
    sampling: Sampling,
    metrics: RunMetrics,
}

impl<'a> Runner<'a> {
    /// Create a runner over `handle` with fixed bounds and decoding mode.
    pub fn new(
        handle: &'a SummarizerHandle,
        constraints: LengthConstraints,
        sampling: Sampling,
    ) -> Self {
        Self {
            handle,
            constraints,
            sampling,
            metrics: RunMetrics::new(),
        }
    }

    /// Extract and summarize one file. `format` overrides extension dispatch.
    pub async fn run_file(&self, path: &Path, format: Option<DocumentFormat>) -> DocumentReport {
        let format = format.or_else(|| DocumentFormat::from_path(path));
        let report = DocumentReport::new(path.display().to_string(), format);

        match extract_with(path, format) {
            Ok(text) => {
                self.metrics.record_extraction(true);
                self.summarize_into(report, &text).await
            }
            Err(error) => {
                self.metrics.record_extraction(false);
                tracing::warn!(path = %path.display(), error = %error, "Extraction failed");
                report.failed(Stage::Extraction, error)
            }
        }
    }

    /// Summarize caller-supplied text without extraction.
    pub async fn run_text(&self, label: &str, text: &str) -> DocumentReport {
        self.summarize_into(DocumentReport::new(label, None), text)
            .await
    }

    /// Counters accumulated by this runner.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    async fn summarize_into(&self, report: DocumentReport, text: &str) -> DocumentReport {
        let report = report.with_text(text);
        match engine::summarize_with(self.handle, text, self.constraints, self.sampling).await {
            Ok(summary) => {
                self.metrics.record_summary(true);
                report.succeeded(summary)
            }
            Err(error) => {
                self.metrics.record_summary(false);
                report.failed(Stage::Summarization, error)
            }
        }
    }
}

/// Extract `path` with `format`, or report it as unsupported when no format applies.
pub fn extract_with(path: &Path, format: Option<DocumentFormat>) -> ExtractionResult {
    match format {
        Some(format) => extract::extract(path, format),
        None => Err(ExtractionError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Expand directories into the supported files they contain, sorted for stable output.
///
/// Explicit file arguments are kept as given so that unsupported files still produce a report.
/// When `format` is forced every regular file under a directory is included.
pub fn collect_inputs(paths: &[PathBuf], format: Option<DocumentFormat>) -> Vec<PathBuf> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::warn!(error = %error, "Skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|candidate| format.is_some() || DocumentFormat::from_path(candidate).is_some())
            .collect();
        found.sort();
        tracing::debug!(dir = %path.display(), files = found.len(), "Expanded directory");
        inputs.extend(found);
    }
    inputs
}
