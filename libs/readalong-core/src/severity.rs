//! Caller-supplied severity overrides.
//!
//! Which words are critical is a content decision, so the classifier asks a
//! [`SeverityPolicy`] instead of carrying word lists of its own.

use crate::normalizer::fold_diacritics;
use crate::types::{MistakeKind, Severity, Token};
use std::collections::HashSet;

/// Trait for severity overrides keyed on the target word.
pub trait SeverityPolicy: Send + Sync {
    /// Severity to use instead of the default for a mistake on `target`,
    /// or `None` to keep the default.
    fn severity_for(&self, target: &Token, kind: MistakeKind) -> Option<Severity>;
}

/// Keeps every default severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeverity;

impl SeverityPolicy for DefaultSeverity {
    fn severity_for(&self, _target: &Token, _kind: MistakeKind) -> Option<Severity> {
        None
    }
}

/// Marks mistakes on a fixed vocabulary as [`Severity::Major`].
///
/// Words are compared by their diacritic-folded form.
#[derive(Debug, Clone, Default)]
pub struct KeyWords {
    words: HashSet<String>,
}

impl KeyWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| fold_diacritics(w.as_ref().trim()))
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&fold_diacritics(word))
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SeverityPolicy for KeyWords {
    fn severity_for(&self, target: &Token, _kind: MistakeKind) -> Option<Severity> {
        self.words
            .contains(&target.folded_text)
            .then_some(Severity::Major)
    }
}

impl<F> SeverityPolicy for F
where
    F: Fn(&Token, MistakeKind) -> Option<Severity> + Send + Sync,
{
    fn severity_for(&self, target: &Token, kind: MistakeKind) -> Option<Severity> {
        self(target, kind)
    }
}
