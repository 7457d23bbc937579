use std::collections::{BTreeMap, HashMap};

use log::info;
use serde::{Deserialize, Serialize};

use crate::citations::CitationExtractor;
use crate::error::AnalysisError;
use crate::highlighter::PdfHighlighter;
use crate::keyword_matcher::{KeywordMatcher, MatchContext};
use crate::keywords::{KeywordRegistry, Rgb};
use crate::text_extractor::TextExtractor;
use crate::triage::{PaperTriage, TriageResult};

/// Everything one analysis pass produces for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub category_stats: BTreeMap<String, usize>,
    pub keyword_counts: BTreeMap<String, usize>,
    pub contexts: Vec<MatchContext>,
    pub triage: TriageResult,
    pub citations: Vec<String>,
}

/// Main analyzer that orchestrates the pipeline
///
/// Stateless and reentrant: every call is a pure function of the document
/// bytes and the registry handed in. Highlighting is a second full pass over
/// the same immutable byte buffer, so callers keep one buffer and hand it to
/// both operations.
pub struct PaperAnalyzer {
    text_extractor: TextExtractor,
    keyword_matcher: KeywordMatcher,
    triage: PaperTriage,
    citation_extractor: CitationExtractor,
    highlighter: PdfHighlighter,
}

impl PaperAnalyzer {
    pub fn new() -> Self {
        PaperAnalyzer {
            text_extractor: TextExtractor::new(),
            keyword_matcher: KeywordMatcher::new(),
            triage: PaperTriage::new(),
            citation_extractor: CitationExtractor::new(),
            highlighter: PdfHighlighter::new(),
        }
    }

    /// Run extraction, matching, triage and citation extraction over one
    /// document.
    pub fn analyze(
        &self,
        pdf_bytes: &[u8],
        registry: &KeywordRegistry,
    ) -> Result<AnalysisReport, AnalysisError> {
        let pages = self.text_extractor.extract_pages(pdf_bytes)?;
        info!("Analyzing document: {} pages", pages.len());

        let match_report = self.keyword_matcher.scan(&pages, registry);

        let full_text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let triage = self.triage.triage(&full_text);
        let citations = self.citation_extractor.extract(&full_text);

        info!(
            "Analysis complete: {} matches, {} citations",
            match_report.contexts.len(),
            citations.len()
        );

        Ok(AnalysisReport {
            category_stats: match_report.category_stats,
            keyword_counts: match_report.keyword_counts,
            contexts: match_report.contexts,
            triage,
            citations,
        })
    }

    /// Produce the highlighted copy of the document.
    pub fn highlight(
        &self,
        pdf_bytes: &[u8],
        registry: &KeywordRegistry,
        colors: &HashMap<String, Rgb>,
    ) -> Result<Vec<u8>, AnalysisError> {
        self.highlighter.highlight(pdf_bytes, registry, colors)
    }
}

impl Default for PaperAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
