//! Document-to-text normalization: one extractor per format family.
//!
//! Every extractor shares the same contract (path in, [`ExtractionResult`] out) so callers can
//! treat the format as a pure dispatch key. Failures are returned as data and never escape as
//! panics.

mod docx;
mod pdf;
mod text;
pub mod types;

use std::path::Path;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;
pub use types::{DocumentFormat, ExtractionError, ExtractionResult};

/// Interface implemented by format-specific extractors.
pub trait Extractor {
    /// Extract the full text of the document at `path`.
    fn extract(&self, path: &Path) -> ExtractionResult;
}

/// Return the extractor registered for `format`.
pub fn extractor_for(format: DocumentFormat) -> &'static dyn Extractor {
    match format {
        DocumentFormat::PlainText => &PlainTextExtractor,
        DocumentFormat::Pdf => &PdfExtractor,
        DocumentFormat::Docx => &DocxExtractor,
    }
}

/// Extract `path` with the extractor chosen by the caller.
pub fn extract(path: &Path, format: DocumentFormat) -> ExtractionResult {
    tracing::info!(path = %path.display(), %format, "Extracting document");
    extractor_for(format).extract(path)
}

/// Extract `path`, dispatching on its file extension.
pub fn extract_path(path: &Path) -> ExtractionResult {
    let format =
        DocumentFormat::from_path(path).ok_or_else(|| ExtractionError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    extract(path, format)
}

pub(crate) fn non_empty(path: &Path, text: String) -> ExtractionResult {
    if text.is_empty() {
        return Err(ExtractionError::NoText {
            path: path.to_path_buf(),
        });
    }
    Ok(text)
}
