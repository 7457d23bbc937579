use thiserror::Error;

/// Custom error types for the paper analysis pipeline
///
/// Empty results (no keyword matches, no citations, no triage hits) are
/// valid outcomes and are never reported through this enum.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("document parse failed: {0}")]
    DocumentParse(#[from] lopdf::Error),

    #[error("text extraction failed on page {page}: {error}")]
    TextExtraction { page: u32, error: String },

    #[error("highlighting failed: {0}")]
    Highlight(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
