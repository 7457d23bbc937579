use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::keywords::KeywordRegistry;
use crate::sentence_segmenter::SentenceSegmenter;
use crate::text_extractor::PageText;

/// One recorded occurrence of one keyword inside one sentence on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    pub page: u32,
    pub sentence: String,
    pub keyword: String,
    pub category: String,
}

/// Aggregated matching output for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Per-category tallies, incremented once per sentence-keyword match.
    pub category_stats: BTreeMap<String, usize>,
    /// Per-keyword occurrence tallies across the whole document.
    pub keyword_counts: BTreeMap<String, usize>,
    /// Match records in reading order: page, then sentence, then registry
    /// order within a sentence.
    pub contexts: Vec<MatchContext>,
}

/// Keyword matching and aggregation component
///
/// Matching is case-insensitive raw substring containment: "model" matches
/// inside "models" and inside unrelated longer tokens, and a sentence with
/// two keywords of one category counts that category twice. Both are
/// documented over-counting, kept as specified behavior.
pub struct KeywordMatcher {
    segmenter: SentenceSegmenter,
}

impl KeywordMatcher {
    pub fn new() -> Self {
        KeywordMatcher {
            segmenter: SentenceSegmenter::new(),
        }
    }

    /// Scan the extracted pages against the registry.
    pub fn scan(&self, pages: &[PageText], registry: &KeywordRegistry) -> MatchReport {
        let mut report = MatchReport::default();

        for page in pages {
            for sentence in self.segmenter.segment(&page.text) {
                let lower_sentence = sentence.to_lowercase();

                for entry in registry.iter() {
                    if lower_sentence.contains(&entry.keyword) {
                        *report.category_stats.entry(entry.category.clone()).or_insert(0) += 1;
                        *report.keyword_counts.entry(entry.keyword.clone()).or_insert(0) += 1;
                        report.contexts.push(MatchContext {
                            page: page.number,
                            sentence: sentence.clone(),
                            keyword: entry.keyword.clone(),
                            category: entry.category.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            "Keyword scan complete: {} matches across {} pages",
            report.contexts.len(),
            pages.len()
        );
        report
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordRegistry;

    fn page(number: u32, text: &str) -> PageText {
        PageText {
            number,
            text: text.to_string(),
        }
    }

    fn registry(pairs: &[(&str, &str)]) -> KeywordRegistry {
        let mut registry = KeywordRegistry::new();
        for (kw, cat) in pairs {
            registry.insert(kw.to_string(), cat.to_string());
        }
        registry
    }

    #[test]
    fn test_case_insensitive_matching() {
        let matcher = KeywordMatcher::new();
        let registry = registry(&[("model", "Methodology")]);
        let pages = [page(1, "MODEL performance was strong.")];

        let report = matcher.scan(&pages, &registry);
        assert_eq!(report.category_stats["Methodology"], 1);
        assert_eq!(report.keyword_counts["model"], 1);
        assert_eq!(report.contexts.len(), 1);
        assert_eq!(report.contexts[0].keyword, "model");
        assert_eq!(report.contexts[0].page, 1);
    }

    #[test]
    fn test_category_counts_equal_context_records() {
        let matcher = KeywordMatcher::new();
        let registry = registry(&[
            ("model", "Methodology"),
            ("experiment", "Methodology"),
            ("results", "Analysis/Results"),
        ]);
        let pages = [
            page(1, "The model experiment ran. Results were strong."),
            page(2, "Another model appears here."),
        ];

        let report = matcher.scan(&pages, &registry);
        for (category, count) in &report.category_stats {
            let records = report
                .contexts
                .iter()
                .filter(|c| &c.category == category)
                .count();
            assert_eq!(records, *count);
        }
        // One sentence, two Methodology keywords: category counted twice.
        assert_eq!(report.category_stats["Methodology"], 3);
    }

    #[test]
    fn test_substring_matching_has_no_word_boundaries() {
        let matcher = KeywordMatcher::new();
        let registry = registry(&[("model", "Methodology")]);
        let pages = [page(1, "Remodeling of models happened.")];

        let report = matcher.scan(&pages, &registry);
        // One sentence, one keyword: a single match regardless of how many
        // tokens contain the substring.
        assert_eq!(report.keyword_counts["model"], 1);
    }

    #[test]
    fn test_empty_registry_yields_empty_report() {
        let matcher = KeywordMatcher::new();
        let registry = KeywordRegistry::new();
        let pages = [page(1, "Plenty of text with no registry at all.")];

        let report = matcher.scan(&pages, &registry);
        assert!(report.category_stats.is_empty());
        assert!(report.keyword_counts.is_empty());
        assert!(report.contexts.is_empty());
    }

    #[test]
    fn test_context_order_follows_registry_order() {
        let matcher = KeywordMatcher::new();
        let registry = registry(&[("survey", "Methodology"), ("evidence", "Analysis/Results")]);
        let pages = [page(1, "Evidence from the survey was strong.")];

        let report = matcher.scan(&pages, &registry);
        let keywords: Vec<_> = report.contexts.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["survey", "evidence"]);
    }
}
