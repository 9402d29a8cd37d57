#![deny(missing_docs)]

//! Core library for `docsum`: document text extraction and length-bounded summarization.

/// Environment-driven configuration management.
pub mod config;
/// Summarization engine and model handle.
pub mod engine;
/// Format-specific text extractors.
pub mod extract;
/// Structured logging and tracing setup.
pub mod logging;
/// Run counters.
pub mod metrics;
/// Model provider capability and HTTP adapters.
pub mod provider;
/// Serializable per-document outcomes.
pub mod report;
/// Sequential extract-then-summarize driver.
pub mod runner;
