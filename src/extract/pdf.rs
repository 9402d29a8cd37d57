//! Page-oriented PDF extraction backed by `lopdf`.
//!
//! Pages are visited in page-number order and their text is concatenated without separators.
//! A page that fails to yield text contributes an empty string; only document-level failures
//! (unreadable file, corrupt structure, encryption) fail the extraction.

use lopdf::Document;
use std::path::Path;

use super::types::{ExtractionError, ExtractionResult};
use super::{Extractor, non_empty};

/// Extracts and concatenates per-page text from a PDF.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    fn load(path: &Path) -> Result<Document, ExtractionError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::io(path, source))?;
        let document = Document::load_mem(&bytes).map_err(|error| {
            let reason = error.to_string();
            let lowered = reason.to_lowercase();
            if lowered.contains("encrypt") || lowered.contains("password") {
                ExtractionError::Encrypted {
                    path: path.to_path_buf(),
                }
            } else {
                ExtractionError::Pdf {
                    path: path.to_path_buf(),
                    reason,
                }
            }
        })?;

        if document.is_encrypted() {
            return Err(ExtractionError::Encrypted {
                path: path.to_path_buf(),
            });
        }

        Ok(document)
    }
}

/// Concatenate per-page text in the given order. A failing page is logged and contributes `""`.
fn join_pages<I, F, E>(path: &Path, page_numbers: I, mut page_text: F) -> String
where
    I: IntoIterator<Item = u32>,
    F: FnMut(u32) -> Result<String, E>,
    E: std::fmt::Display,
{
    let mut text = String::new();
    for page_number in page_numbers {
        match page_text(page_number) {
            Ok(page) => text.push_str(&page),
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    page = page_number,
                    error = %error,
                    "Page yielded no text"
                );
            }
        }
    }
    text
}

impl Extractor for PdfExtractor {
    fn extract(&self, path: &Path) -> ExtractionResult {
        let document = Self::load(path)?;
        let pages = document.get_pages();

        let text = join_pages(path, pages.keys().copied(), |page_number| {
            document.extract_text(&[page_number])
        });

        tracing::debug!(
            path = %path.display(),
            pages = pages.len(),
            chars = text.chars().count(),
            "Extracted PDF text"
        );
        non_empty(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use std::io::Write;

    fn page_contents(text: Option<&str>) -> Vec<u8> {
        let operations = match text {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
            None => Vec::new(),
        };
        Content { operations }.encode().expect("encode content")
    }

    /// Build a PDF with one page per entry; `None` produces a page without any text.
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, page_contents(*page)));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf");
        bytes
    }

    fn write_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn concatenates_pages_in_order() {
        let file = write_pdf(&build_pdf(&[Some("Alpha page"), Some("Omega page")]));

        let text = PdfExtractor.extract(file.path()).expect("pdf text");
        let alpha = text.find("Alpha page").expect("first page text");
        let omega = text.find("Omega page").expect("second page text");
        assert!(alpha < omega);
    }

    #[test]
    fn pages_are_joined_without_separator() {
        let bytes = build_pdf(&[Some("Alpha page"), Some("Omega page")]);
        let file = write_pdf(&bytes);

        let document = Document::load_mem(&bytes).expect("reload pdf");
        let first = document.extract_text(&[1]).expect("page one");
        let second = document.extract_text(&[2]).expect("page two");

        let text = PdfExtractor.extract(file.path()).expect("pdf text");
        assert_eq!(text, format!("{first}{second}"));
    }

    #[test]
    fn failing_page_contributes_empty_text() {
        let text = join_pages(Path::new("report.pdf"), [1, 2, 3], |page| match page {
            2 => Err("content stream could not be decoded"),
            other => Ok(format!("page {other};")),
        });

        assert_eq!(text, "page 1;page 3;");
    }

    #[test]
    fn every_page_failing_yields_no_text() {
        let text = join_pages(Path::new("report.pdf"), [1, 2], |_| {
            Err::<String, _>("unreadable")
        });
        assert!(text.is_empty());
    }

    #[test]
    fn empty_page_does_not_abort_extraction() {
        let file = write_pdf(&build_pdf(&[Some("Before"), None, Some("After")]));

        let text = PdfExtractor.extract(file.path()).expect("pdf text");
        assert!(text.contains("Before"));
        assert!(text.contains("After"));
    }

    #[test]
    fn corrupt_pdf_is_a_parse_failure() {
        let file = write_pdf(b"\x00\x01 definitely not a portable document");

        let error = PdfExtractor.extract(file.path()).unwrap_err();
        assert!(matches!(error, ExtractionError::Pdf { .. }), "{error:?}");
    }

    #[test]
    fn pdf_without_text_reports_no_text() {
        let file = write_pdf(&build_pdf(&[None, None]));

        let error = PdfExtractor.extract(file.path()).unwrap_err();
        assert!(matches!(error, ExtractionError::NoText { .. }), "{error:?}");
    }

    #[test]
    fn missing_pdf_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let error = PdfExtractor
            .extract(&dir.path().join("missing.pdf"))
            .unwrap_err();
        assert!(matches!(error, ExtractionError::Io { .. }));
    }
}
