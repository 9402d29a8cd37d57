use std::path::Path;

use super::types::{ExtractionError, ExtractionResult};
use super::{Extractor, non_empty};

/// Reads a file verbatim as UTF-8.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> ExtractionResult {
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::io(path, source))?;
        let text = String::from_utf8(bytes).map_err(|source| ExtractionError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), chars = text.chars().count(), "Read plain text");
        non_empty(path, text)
    }
}
