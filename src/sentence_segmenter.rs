use fancy_regex::Regex;
use log::debug;
use once_cell::sync::Lazy;

/// Boundary: whitespace right after '.' or '?', unless the period belongs to
/// an in-word abbreviation ("e.g.") or an initial ("J. Smith", "Dr.").
static BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?<!\w\.\w.)(?<![A-Z][a-z]\.)(?<=\.|\?)\s").expect("Invalid boundary regex")
});

/// Sentence segmentation component
///
/// Splits text into sentence-like units on punctuation heuristics. This is
/// not a grammatical parser: decimal numbers, ellipses and abbreviations
/// outside the two exempted patterns will over- or under-split. That
/// imprecision is accepted behavior, matched by the matcher and triage
/// components downstream.
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    pub fn new() -> Self {
        SentenceSegmenter
    }

    /// Split `text` into trimmed, non-empty sentence candidates.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut last = 0;

        for found in BOUNDARY_REGEX.find_iter(text) {
            // A boundary whose lookbehind evaluation errors is skipped; the
            // surrounding spans stay joined rather than losing text.
            let Ok(m) = found else { continue };
            push_trimmed(&mut sentences, &text[last..m.start()]);
            last = m.end();
        }
        push_trimmed(&mut sentences, &text[last..]);

        debug!("Segmented {} chars into {} sentences", text.len(), sentences.len());
        sentences
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_after_period_and_question_mark() {
        let segmenter = SentenceSegmenter::new();
        let sentences = segmenter.segment("Is this enough? The data says yes. More follows.");
        assert_eq!(
            sentences,
            vec!["Is this enough?", "The data says yes.", "More follows."]
        );
    }

    #[test]
    fn test_initials_and_abbreviations_do_not_split() {
        let segmenter = SentenceSegmenter::new();
        let sentences = segmenter.segment("Dr. Smith studied this. The results were clear.");
        assert_eq!(
            sentences,
            vec!["Dr. Smith studied this.", "The results were clear."]
        );

        let sentences = segmenter.segment("Some tools (e.g. parsers) help. Others do not.");
        assert_eq!(
            sentences,
            vec!["Some tools (e.g. parsers) help.", "Others do not."]
        );
    }

    #[test]
    fn test_whitespace_only_fragments_discarded() {
        let segmenter = SentenceSegmenter::new();
        assert!(segmenter.segment("   ").is_empty());
        assert!(segmenter.segment("").is_empty());
    }

    #[test]
    fn test_unterminated_text_is_one_sentence() {
        let segmenter = SentenceSegmenter::new();
        let sentences = segmenter.segment("no terminal punctuation at all");
        assert_eq!(sentences, vec!["no terminal punctuation at all"]);
    }
}
