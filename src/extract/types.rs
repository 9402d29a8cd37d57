//! Shared types for the document extractors.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Outcome of a single extractor invocation: non-empty text or a typed failure.
pub type ExtractionResult = Result<String, ExtractionError>;

/// Errors surfaced by the extractors. Always scoped to one file.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// File could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File we attempted to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Plain-text file was not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Decode {
        /// File we attempted to decode.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// PDF structure could not be parsed.
    #[error("failed to parse PDF {}: {reason}", .path.display())]
    Pdf {
        /// Offending document.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
    /// PDF is encrypted and could not be opened.
    #[error("PDF {} is encrypted and cannot be read", .path.display())]
    Encrypted {
        /// Offending document.
        path: PathBuf,
    },
    /// DOCX package could not be parsed.
    #[error("failed to parse document {}: {reason}", .path.display())]
    Docx {
        /// Offending document.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
    /// Extraction succeeded but produced no text at all.
    #[error("{} contains no extractable text", .path.display())]
    NoText {
        /// Empty document.
        path: PathBuf,
    },
    /// No extractor is registered for the file.
    #[error("unsupported document format for {}", .path.display())]
    UnsupportedFormat {
        /// File that could not be dispatched.
        path: PathBuf,
    },
}

impl ExtractionError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Format family used as the extractor dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// UTF-8 plain text.
    PlainText,
    /// Page-oriented PDF.
    Pdf,
    /// Paragraph-oriented Office Open XML document.
    Docx,
}

impl DocumentFormat {
    /// Resolve the format from a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" | "text" | "md" | "log" | "csv" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Resolve the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" | "plain" => Ok(Self::PlainText),
            "pdf" => Ok(Self::Pdf),
            "docx" | "word" => Ok(Self::Docx),
            other => Err(format!("unknown document format '{other}'")),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlainText => "text",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        };
        f.write_str(name)
    }
}
