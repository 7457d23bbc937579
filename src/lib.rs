//! skimcore: keyword analysis, triage and highlight annotation for
//! research-paper PDFs.
//!
//! The crate is a pure in-process transformation library. The caller (a web
//! UI or CLI, out of scope here) buffers an uploaded PDF once, builds a
//! [`KeywordRegistry`] from selected taxonomy categories plus custom terms,
//! and hands both to [`PaperAnalyzer`]:
//!
//! - [`PaperAnalyzer::analyze`] returns per-category and per-keyword counts,
//!   sentence-level match context, a three-field triage summary and the
//!   document's citation markers.
//! - [`PaperAnalyzer::highlight`] returns a new PDF byte buffer with
//!   highlight annotations at the matched text locations, colored per
//!   category.
//!
//! Every call is a pure function of (document bytes, registry); nothing is
//! persisted and no state survives between invocations.

mod analyzer;
mod citations;
mod error;
mod highlighter;
mod keyword_matcher;
mod keywords;
mod sentence_segmenter;
mod text_extractor;
mod triage;

#[cfg(test)]
mod test_fixtures;

pub use analyzer::{AnalysisReport, PaperAnalyzer};
pub use citations::CitationExtractor;
pub use error::AnalysisError;
pub use highlighter::PdfHighlighter;
pub use keyword_matcher::{KeywordMatcher, MatchContext, MatchReport};
pub use keywords::{
    CATEGORY_COLORS, CUSTOM_CATEGORY, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_KEYWORDS, KeywordEntry,
    KeywordRegistry, Rgb, default_color_map,
};
pub use sentence_segmenter::SentenceSegmenter;
pub use text_extractor::{PageText, TextExtractor};
pub use triage::{
    CONCLUSION_INDICATORS, DATASET_INDICATORS, GAP_INDICATORS, NOT_DETECTED, PaperTriage,
    TriageResult,
};
