//! Mistake classification from an edit script.

use crate::severity::SeverityPolicy;
use crate::similarity::{levenshtein_distance, SimilarityMeasure};
use crate::types::{EditOperation, EditScript, Mistake, MistakeKind, Severity, Token};

/// Inputs that shape classification besides the script itself.
pub struct ClassifyOptions<'a> {
    pub similarity: &'a dyn SimilarityMeasure,
    pub similarity_threshold: f64,
    pub policy: &'a dyn SeverityPolicy,
}

/// Turn every non-match operation into a positioned mistake.
///
/// - `Delete` becomes an Omission at the target index.
/// - `Insert` becomes an Insertion anchored to the last target word consumed
///   before it (0 if none).
/// - `Substitute` becomes a Mispronunciation when the folded words are at least
///   `similarity_threshold` similar, otherwise a Substitution.
///
/// Output is sorted by position; ties keep script order.
pub fn classify(
    script: &EditScript,
    target: &[Token],
    attempt: &[Token],
    options: &ClassifyOptions<'_>,
) -> Vec<Mistake> {
    let mut mistakes = Vec::new();
    let mut consumed = 0;

    for op in script.iter() {
        match *op {
            EditOperation::Match { .. } => consumed += 1,
            EditOperation::Substitute {
                target: t,
                attempt: a,
            } => {
                consumed += 1;
                let expected = &target[t];
                let actual = &attempt[a];
                let similarity = options
                    .similarity
                    .similarity(&expected.folded_text, &actual.folded_text);

                let (kind, severity) = if similarity >= options.similarity_threshold {
                    (MistakeKind::Mispronunciation, Severity::Minor)
                } else if levenshtein_distance(&expected.normalized_text, &actual.normalized_text)
                    <= 1
                {
                    (MistakeKind::Substitution, Severity::Minor)
                } else {
                    (MistakeKind::Substitution, Severity::Moderate)
                };

                mistakes.push(Mistake {
                    position: t,
                    attempt_position: Some(a),
                    expected_word: expected.raw_text.clone(),
                    actual_word: actual.raw_text.clone(),
                    kind,
                    severity: resolve(options.policy, expected, kind, severity),
                });
            }
            EditOperation::Delete { target: t } => {
                consumed += 1;
                let expected = &target[t];
                let kind = MistakeKind::Omission;
                mistakes.push(Mistake {
                    position: t,
                    attempt_position: None,
                    expected_word: expected.raw_text.clone(),
                    actual_word: String::new(),
                    kind,
                    severity: resolve(options.policy, expected, kind, Severity::Moderate),
                });
            }
            EditOperation::Insert { attempt: a } => {
                mistakes.push(Mistake {
                    position: insertion_anchor(consumed, target.len()),
                    attempt_position: Some(a),
                    expected_word: String::new(),
                    actual_word: attempt[a].raw_text.clone(),
                    kind: MistakeKind::Insertion,
                    severity: Severity::Minor,
                });
            }
        }
    }

    // Stable: equal positions keep script order.
    mistakes.sort_by_key(|m| m.position);
    mistakes
}

fn resolve(
    policy: &dyn SeverityPolicy,
    target: &Token,
    kind: MistakeKind,
    default: Severity,
) -> Severity {
    policy.severity_for(target, kind).unwrap_or(default)
}

/// Target index preceding an insertion point, clamped into the sequence.
fn insertion_anchor(consumed: usize, target_len: usize) -> usize {
    consumed
        .saturating_sub(1)
        .min(target_len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::align;
    use crate::normalizer::normalize;
    use crate::severity::{DefaultSeverity, KeyWords};
    use crate::similarity::{Levenshtein, SharedPrefix};
    use crate::types::MatchingMode;
    use pretty_assertions::assert_eq;

    fn run_with(
        target: &str,
        attempt: &str,
        similarity: &dyn SimilarityMeasure,
        policy: &dyn SeverityPolicy,
    ) -> Vec<Mistake> {
        let target = normalize(target);
        let attempt = normalize(attempt);
        let script = align(&target, &attempt, MatchingMode::CaseInsensitive);
        let options = ClassifyOptions {
            similarity,
            similarity_threshold: 0.6,
            policy,
        };
        classify(&script, &target, &attempt, &options)
    }

    fn run(target: &str, attempt: &str) -> Vec<Mistake> {
        run_with(target, attempt, &Levenshtein, &DefaultSeverity)
    }

    fn kinds(mistakes: &[Mistake]) -> Vec<(usize, MistakeKind)> {
        mistakes.iter().map(|m| (m.position, m.kind)).collect()
    }

    #[test]
    fn no_mistakes_for_identical_text() {
        assert!(run("Con mèo ngồi", "con mèo ngồi").is_empty());
    }

    #[test]
    fn omission_has_empty_actual_word() {
        let mistakes = run("Con mèo nhỏ", "Con mèo");
        assert_eq!(
            mistakes,
            vec![Mistake {
                position: 2,
                attempt_position: None,
                expected_word: "nhỏ".to_string(),
                actual_word: String::new(),
                kind: MistakeKind::Omission,
                severity: Severity::Moderate,
            }]
        );
    }

    #[test]
    fn tone_slip_is_mispronunciation() {
        let mistakes = run("mèo", "mẻo");
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].kind, MistakeKind::Mispronunciation);
        assert_eq!(mistakes[0].severity, Severity::Minor);
        assert_eq!(mistakes[0].expected_word, "mèo");
        assert_eq!(mistakes[0].actual_word, "mẻo");
    }

    #[test]
    fn unrelated_word_is_substitution() {
        let mistakes = run("mèo", "chó");
        assert_eq!(mistakes[0].kind, MistakeKind::Substitution);
        assert_eq!(mistakes[0].severity, Severity::Moderate);
    }

    #[test]
    fn single_character_substitution_is_minor() {
        // "a" vs "o": similarity 0, but only one character apart
        let mistakes = run("a", "o");
        assert_eq!(mistakes[0].kind, MistakeKind::Substitution);
        assert_eq!(mistakes[0].severity, Severity::Minor);
    }

    #[test]
    fn insertion_anchors_to_preceding_word() {
        let mistakes = run("the cat sat", "the big cat sat");
        assert_eq!(kinds(&mistakes), vec![(0, MistakeKind::Insertion)]);
        assert_eq!(mistakes[0].actual_word, "big");
        assert_eq!(mistakes[0].attempt_position, Some(1));
        assert_eq!(mistakes[0].severity, Severity::Minor);
    }

    #[test]
    fn insertion_at_start_and_end_is_clamped() {
        let mistakes = run("cat sat", "um cat sat down");
        assert_eq!(
            kinds(&mistakes),
            vec![(0, MistakeKind::Insertion), (1, MistakeKind::Insertion)]
        );
    }

    #[test]
    fn insertions_against_empty_target_anchor_at_zero() {
        let mistakes = run("", "xin chào");
        assert_eq!(
            kinds(&mistakes),
            vec![(0, MistakeKind::Insertion), (0, MistakeKind::Insertion)]
        );
        assert_eq!(mistakes[1].actual_word, "chào");
    }

    #[test]
    fn mistakes_are_ordered_by_position() {
        let mistakes = run("one two three four five", "one too four five six");
        let positions: Vec<usize> = mistakes.iter().map(|m| m.position).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn key_words_raise_severity() {
        let policy = KeyWords::new(["thảm"]);
        let mistakes = run_with("mèo trên thảm", "mèo trên", &Levenshtein, &policy);
        assert_eq!(mistakes[0].kind, MistakeKind::Omission);
        assert_eq!(mistakes[0].severity, Severity::Major);
    }

    #[test]
    fn policy_does_not_touch_insertions() {
        let policy = |_: &Token, _: MistakeKind| Some(Severity::Major);
        let mistakes = run_with("mèo", "mèo con", &Levenshtein, &policy);
        assert_eq!(mistakes[0].kind, MistakeKind::Insertion);
        assert_eq!(mistakes[0].severity, Severity::Minor);
    }

    #[test]
    fn measure_changes_classification() {
        // "beo" vs "meo": edit ratio 2/3, no shared prefix
        let by_edit = run_with("bèo", "mèo", &Levenshtein, &DefaultSeverity);
        let by_prefix = run_with("bèo", "mèo", &SharedPrefix, &DefaultSeverity);
        assert_eq!(by_edit[0].kind, MistakeKind::Mispronunciation);
        assert_eq!(by_prefix[0].kind, MistakeKind::Substitution);
    }
}
