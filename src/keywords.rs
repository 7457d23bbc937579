use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

/// RGB triple on a 0.0–1.0 scale, as used by PDF annotation colors.
pub type Rgb = (f32, f32, f32);

/// Fallback highlight color for categories without an assigned color.
pub const DEFAULT_HIGHLIGHT_COLOR: Rgb = (1.0, 1.0, 0.0);

/// Category label applied to user-supplied terms.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// Fixed taxonomy: category name and its keyword list.
///
/// Keywords are stored in display case and lowercased when inserted into a
/// registry.
pub const DEFAULT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Errors/Mistakes",
        &[
            "problem", "problems", "error", "errors", "mistakes", "contradict", "contradicts",
            "contradicted", "contradictory", "challenge", "challenges", "challenging", "erroneous",
            "deficit", "deficits", "limitation", "limitations", "gap", "gaps", "discrepancy",
            "discrepancies", "anomaly", "anomalies", "complexity", "complexities", "contrast",
            "sharp contrast",
        ],
    ),
    (
        "Novelty/Contribution",
        &[
            "discover", "discovers", "discovered", "discovery", "discoveries", "finding",
            "findings", "novel", "novelty", "contribute", "contributes", "contributed",
            "contribution", "contributions", "propose", "proposes", "proposed", "insight",
            "insights", "outperform", "outperforms", "outperformed", "highlight", "highlights",
            "highlighted",
        ],
    ),
    (
        "Methodology",
        &[
            "methodology", "methodologies", "algorithm", "algorithms", "framework", "frameworks",
            "model", "models", "implement", "implements", "implemented", "implementation",
            "application", "applications", "experiment", "experiments", "simulation",
            "simulation experiment", "survey", "surveys", "interview", "interviews",
            "data collection", "primary data", "qualitative", "quantitative", "KPI",
            "performance evaluation", "observation", "observations", "pragmatic", "heuristic",
        ],
    ),
    (
        "Analysis/Results",
        &[
            "verify", "verifies", "verified", "verification", "justify", "justifies", "justified",
            "justification", "evident", "evidence", "results", "validate", "validates",
            "validated", "validation", "performance", "performs", "performed", "evaluation",
            "argument", "arguments", "argues", "argued", "suggest", "suggests", "suggested",
            "implication", "implications", "hypothesis", "hypotheses", "confirmation",
            "clarifies", "clarification", "argumentative", "report", "reports", "reported",
            "aim", "aims", "goals", "outcome", "outcomes",
        ],
    ),
];

/// Highlight colors per category (RGB 0–1).
pub const CATEGORY_COLORS: &[(&str, Rgb)] = &[
    ("Errors/Mistakes", (1.0, 0.6, 0.6)),      // Light Red
    ("Novelty/Contribution", (0.6, 1.0, 0.6)), // Light Green
    ("Methodology", (0.6, 0.6, 1.0)),          // Light Blue
    ("Analysis/Results", (0.8, 0.6, 1.0)),     // Light Purple
    ("Custom", (1.0, 1.0, 0.6)),               // Light Yellow
];

/// Category color table as an owned map, for callers that need lookups.
pub fn default_color_map() -> HashMap<String, Rgb> {
    CATEGORY_COLORS
        .iter()
        .map(|(cat, rgb)| (cat.to_string(), *rgb))
        .collect()
}

/// A single keyword-to-category mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub category: String,
}

/// Ordered keyword-to-category mapping
///
/// Iteration order is insertion order, and that order is load-bearing: the
/// matcher and the highlighter walk entries in registry order, so match
/// records and annotations come out deterministically. A keyword inserted
/// twice keeps its original position but takes the later category (last
/// write wins).
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    entries: Vec<KeywordEntry>,
    index: HashMap<String, usize>,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from selected taxonomy categories plus custom terms.
    ///
    /// Selected categories not present in the fixed taxonomy are ignored.
    /// Custom keywords are trimmed and lowercased; empty or whitespace-only
    /// entries are silently filtered. Collisions overwrite silently.
    pub fn build<S: AsRef<str>>(selected_categories: &[S], custom_keywords: &[S]) -> Self {
        let mut registry = Self::new();

        for category in selected_categories {
            let category = category.as_ref();
            if let Some((name, keywords)) =
                DEFAULT_KEYWORDS.iter().find(|(name, _)| *name == category)
            {
                for kw in *keywords {
                    registry.insert(kw.to_lowercase(), (*name).to_string());
                }
            }
        }

        for kw in custom_keywords {
            let trimmed = kw.as_ref().trim();
            if !trimmed.is_empty() {
                registry.insert(trimmed.to_lowercase(), CUSTOM_CATEGORY.to_string());
            }
        }

        debug!("Built keyword registry with {} entries", registry.len());
        registry
    }

    /// Insert a mapping. The keyword must already be lowercase; `build` is
    /// the normalizing entry point.
    pub fn insert(&mut self, keyword: String, category: String) {
        match self.index.get(&keyword).copied() {
            Some(pos) => self.entries[pos].category = category,
            None => {
                self.index.insert(keyword.clone(), self.entries.len());
                self.entries.push(KeywordEntry { keyword, category });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.iter()
    }

    pub fn category_of(&self, keyword: &str) -> Option<&str> {
        self.index
            .get(keyword)
            .map(|&pos| self.entries[pos].category.as_str())
    }
}
