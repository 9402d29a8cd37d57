use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing a summarization run.
#[derive(Default)]
pub struct RunMetrics {
    documents_extracted: AtomicU64,
    extraction_failures: AtomicU64,
    summaries_generated: AtomicU64,
    summarization_failures: AtomicU64,
}

impl RunMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one extraction attempt.
    pub fn record_extraction(&self, succeeded: bool) {
        let counter = if succeeded {
            &self.documents_extracted
        } else {
            &self.extraction_failures
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one summarization attempt.
    pub fn record_summary(&self, succeeded: bool) {
        let counter = if succeeded {
            &self.summaries_generated
        } else {
            &self.summarization_failures
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_extracted: self.documents_extracted.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
            summarization_failures: self.summarization_failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of run counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents whose text was extracted.
    pub documents_extracted: u64,
    /// Documents that failed extraction.
    pub extraction_failures: u64,
    /// Summaries produced by the model.
    pub summaries_generated: u64,
    /// Summarization attempts that returned a failure.
    pub summarization_failures: u64,
}

impl MetricsSnapshot {
    /// Whether any extraction or summarization failed during the run.
    pub fn has_failures(&self) -> bool {
        self.extraction_failures > 0 || self.summarization_failures > 0
    }
}
