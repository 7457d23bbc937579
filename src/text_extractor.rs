use crate::error::AnalysisError;
use log::debug;
use lopdf::Document;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Plain text of a single page. Page numbers start at 1, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Text extraction component
///
/// Pulls per-page plain text out of a PDF byte buffer. The input is an
/// immutable slice, so the caller can pass the same buffer to the
/// highlighter afterwards; there is no stream position to rewind.
pub struct TextExtractor {
    cleanup_regex: Regex,
}

impl TextExtractor {
    pub fn new() -> Self {
        // Cleanup regex: collapses whitespace runs, which also rejoins words
        // split across line breaks in the raw page text.
        let cleanup_regex = Regex::new(r"\s+").expect("Invalid cleanup regex");

        TextExtractor { cleanup_regex }
    }

    /// Extract cleaned plain text for every page, in page order.
    ///
    /// Fails with `AnalysisError::DocumentParse` if the bytes are not a
    /// valid PDF. A page whose text cannot be decoded fails hard rather
    /// than producing a silently truncated document.
    pub fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, AnalysisError> {
        let doc = Document::load_mem(pdf_bytes)?;
        let mut pages = Vec::new();

        for (&page_number, _) in doc.get_pages().iter() {
            let raw_text =
                doc.extract_text(&[page_number])
                    .map_err(|e| AnalysisError::TextExtraction {
                        page: page_number,
                        error: e.to_string(),
                    })?;

            let text = self.cleanup_text(&raw_text);
            debug!("Extracted {} characters from page {}", text.len(), page_number);

            pages.push(PageText {
                number: page_number,
                text,
            });
        }

        Ok(pages)
    }

    fn cleanup_text(&self, text: &str) -> String {
        let normalized = self.cleanup_regex.replace_all(text, " ");
        normalized.trim().to_string()
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{single_page_pdf, two_page_pdf};

    #[test]
    fn test_extracts_page_text_in_order() {
        let extractor = TextExtractor::new();
        let bytes = two_page_pdf("First page text here.", "Second page text here.");

        let pages = extractor.extract_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 2);
        assert!(pages[0].text.contains("First page"));
        assert!(pages[1].text.contains("Second page"));
    }

    #[test]
    fn test_invalid_bytes_fail_with_parse_error() {
        let extractor = TextExtractor::new();
        let result = extractor.extract_pages(b"this is not a pdf");
        assert!(matches!(result, Err(AnalysisError::DocumentParse(_))));
    }

    #[test]
    fn test_same_buffer_is_reusable() {
        let extractor = TextExtractor::new();
        let bytes = single_page_pdf("Reusable buffer.");

        let first = extractor.extract_pages(&bytes).unwrap();
        let second = extractor.extract_pages(&bytes).unwrap();
        assert_eq!(first[0].text, second[0].text);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let extractor = TextExtractor::new();
        assert_eq!(extractor.cleanup_text("a  b\n\nc\t d "), "a b c d");
    }
}
