use log::debug;
use serde::{Deserialize, Serialize};

use crate::sentence_segmenter::SentenceSegmenter;

/// Sentinel for a triage field with no scoring sentence.
pub const NOT_DETECTED: &str = "Not detected.";

/// Indicator terms for the "research gap" field.
pub const GAP_INDICATORS: &[&str] = &[
    "gap",
    "lack of",
    "however",
    "remains unclear",
    "remain unclear",
    "underexplored",
    "little attention",
    "few studies",
    "open question",
    "not been studied",
    "not well understood",
];

/// Indicator terms for the "dataset used" field.
pub const DATASET_INDICATORS: &[&str] = &[
    "dataset",
    "data set",
    "corpus",
    "benchmark",
    "collected",
    "sampled",
    "participants",
    "records",
    "database",
    "annotated",
];

/// Indicator terms for the "main conclusion" field.
pub const CONCLUSION_INDICATORS: &[&str] = &[
    "we conclude",
    "in conclusion",
    "in summary",
    "overall",
    "we show",
    "we demonstrate",
    "our results suggest",
    "our findings",
    "this study shows",
    "taken together",
];

/// Three-field heuristic paper summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub research_gap: String,
    pub dataset_used: String,
    pub main_conclusion: String,
}

/// Triage component: keyword-scored best-sentence selection
///
/// Runs three independent passes over the same sentence list, one per fixed
/// indicator list. The same sentence may win more than one field.
pub struct PaperTriage {
    segmenter: SentenceSegmenter,
}

/// Candidate sentences must be at least this long after trimming.
const MIN_SENTENCE_LEN: usize = 20;
/// ...and no longer than this. Filters out headings and run-on extraction noise.
const MAX_SENTENCE_LEN: usize = 500;

impl PaperTriage {
    pub fn new() -> Self {
        PaperTriage {
            segmenter: SentenceSegmenter::new(),
        }
    }

    /// Produce the triage summary for the full concatenated document text.
    pub fn triage(&self, full_text: &str) -> TriageResult {
        let sentences: Vec<String> = self
            .segmenter
            .segment(full_text)
            .into_iter()
            .filter(|s| (MIN_SENTENCE_LEN..=MAX_SENTENCE_LEN).contains(&s.chars().count()))
            .collect();

        debug!("Triage over {} candidate sentences", sentences.len());

        TriageResult {
            research_gap: best_sentence(&sentences, GAP_INDICATORS),
            dataset_used: best_sentence(&sentences, DATASET_INDICATORS),
            main_conclusion: best_sentence(&sentences, CONCLUSION_INDICATORS),
        }
    }
}

impl Default for PaperTriage {
    fn default() -> Self {
        Self::new()
    }
}

/// First sentence with the strict maximum indicator score, or the
/// "Not detected." sentinel when nothing scores above zero.
///
/// Score = number of list terms present as lowercase substrings; a term
/// appearing several times in one sentence still scores one point.
fn best_sentence(sentences: &[String], indicators: &[&str]) -> String {
    let mut best: Option<&str> = None;
    let mut best_score = 0;

    for sentence in sentences {
        let lower = sentence.to_lowercase();
        let score = indicators.iter().filter(|kw| lower.contains(*kw)).count();

        // Strict comparison: ties keep the earliest-encountered sentence.
        if score > best_score {
            best_score = score;
            best = Some(sentence);
        }
    }

    best.map(str::to_string).unwrap_or_else(|| NOT_DETECTED.to_string())
}
