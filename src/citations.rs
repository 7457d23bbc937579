use std::collections::BTreeSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bracketed numeric citations: "[1]", "[12]", "[1-3]", "[1, 2, 3]".
static BRACKETED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\d+(?:-\d+)?(?:,\s*\d+(?:-\d+)?)*\]").expect("Invalid bracketed citation regex")
});

/// Author-year citations: "(Smith, 2023)", "(Jones et al., 2019)".
///
/// Lowercase surnames, multi-word names, non-Latin names and missing commas
/// are not matched. Documented limitation of the pattern, not a defect.
static AUTHOR_YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([A-Z][A-Za-z]+(?: et al\.)?, \d{4}\)").expect("Invalid author-year citation regex")
});

/// Citation marker extraction component
///
/// Applies both pattern rules independently over the raw text and unions the
/// results. Markers are deduplicated and returned sorted; no normalization
/// is applied, so textually distinct variants stay distinct.
pub struct CitationExtractor;

impl CitationExtractor {
    pub fn new() -> Self {
        CitationExtractor
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut markers = BTreeSet::new();

        for m in BRACKETED_REGEX.find_iter(text) {
            markers.insert(m.as_str().to_string());
        }
        for m in AUTHOR_YEAR_REGEX.find_iter(text) {
            markers.insert(m.as_str().to_string());
        }

        debug!("Extracted {} distinct citation markers", markers.len());
        markers.into_iter().collect()
    }
}

impl Default for CitationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_citation_forms() {
        let extractor = CitationExtractor::new();
        let found =
            extractor.extract("Recent work [1] and [12, 13] as well as (Doe, 2020) showed results.");
        // Lexicographic byte order: '2' sorts before ']'.
        assert_eq!(found, vec!["(Doe, 2020)", "[12, 13]", "[1]"]);
    }

    #[test]
    fn test_ranges_and_et_al() {
        let extractor = CitationExtractor::new();
        let found = extractor.extract("See [1-3] and (Jones et al., 2019) for background.");
        assert_eq!(found, vec!["(Jones et al., 2019)", "[1-3]"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let extractor = CitationExtractor::new();
        let found = extractor.extract("As [4] argued, and as [4] repeated.");
        assert_eq!(found, vec!["[4]"]);
    }

    #[test]
    fn test_unmatched_shapes_ignored() {
        let extractor = CitationExtractor::new();
        // Lowercase surname, missing comma, non-numeric bracket contents.
        let found = extractor.extract("(smith, 2020) and (Smith 2020) and [ref] match nothing.");
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_citations_is_valid_empty_result() {
        let extractor = CitationExtractor::new();
        assert!(extractor.extract("No markers anywhere in this text.").is_empty());
    }
}
