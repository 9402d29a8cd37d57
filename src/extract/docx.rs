//! Paragraph-oriented DOCX extraction backed by `docx-rs`.
//!
//! Only top-level body paragraphs are visited; tables and other block structures are skipped.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use std::path::Path;

use super::types::{ExtractionError, ExtractionResult};
use super::{Extractor, non_empty};

/// Joins each body paragraph's text with a trailing newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    fn paragraph_text(children: &[ParagraphChild], output: &mut String) {
        for child in children {
            match child {
                ParagraphChild::Run(run) => {
                    for run_child in &run.children {
                        match run_child {
                            RunChild::Text(text) => output.push_str(&text.text),
                            RunChild::Tab(_) => output.push('\t'),
                            RunChild::Break(_) => output.push('\n'),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Hyperlink(link) => Self::paragraph_text(&link.children, output),
                _ => {}
            }
        }
    }
}

impl Extractor for DocxExtractor {
    fn extract(&self, path: &Path) -> ExtractionResult {
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::io(path, source))?;
        let document = docx_rs::read_docx(&bytes).map_err(|error| ExtractionError::Docx {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let mut text = String::new();
        let mut paragraphs = 0usize;
        for child in &document.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                Self::paragraph_text(&paragraph.children, &mut text);
                text.push('\n');
                paragraphs += 1;
            }
        }

        tracing::debug!(path = %path.display(), paragraphs, "Extracted DOCX text");
        non_empty(path, text)
    }
}
