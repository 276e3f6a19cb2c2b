//! The comparison pipeline behind a narrow interface.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::alignment::align;
use crate::classifier::{classify, ClassifyOptions};
use crate::error::{CompareError, ConfigError};
use crate::feedback::select_category;
use crate::normalizer::{normalize, tokens_from_words};
use crate::scoring::score;
use crate::severity::{DefaultSeverity, SeverityPolicy};
use crate::similarity::{measure_for, SimilarityMeasure};
use crate::types::{
    ComparisonConfig, ComparisonResult, ComparisonStats, EditOperation, EditScript, Mistake,
    MistakeKind, Side, Token,
};

/// Anything that can diagnose an attempt against its target text.
pub trait TextComparison: Send + Sync {
    fn compare(&self, original: &str, spoken: &str) -> Result<ComparisonResult, CompareError>;
}

/// Stateless comparison engine. Configuration is bound at construction and never
/// changes, so one engine can serve any number of concurrent callers.
pub struct ComparisonEngine {
    config: ComparisonConfig,
    similarity: Box<dyn SimilarityMeasure>,
    policy: Arc<dyn SeverityPolicy>,
}

impl std::fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("config", &self.config)
            .field("similarity", &self.similarity.name())
            .finish_non_exhaustive()
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self {
            config: ComparisonConfig::default(),
            similarity: measure_for(Default::default()),
            policy: Arc::new(DefaultSeverity),
        }
    }
}

impl ComparisonEngine {
    /// Validate `config` and build an engine with the default severity policy.
    pub fn new(config: ComparisonConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            similarity: measure_for(config.similarity),
            config,
            policy: Arc::new(DefaultSeverity),
        })
    }

    /// Replace the severity policy.
    pub fn with_policy(mut self, policy: Arc<dyn SeverityPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compare pre-split word sequences.
    ///
    /// Each word is one token, so mistake positions index `target` and
    /// `attempt` directly. Words are joined with single spaces for the result's
    /// text fields.
    pub fn compare_words<S: AsRef<str>>(
        &self,
        target: &[S],
        attempt: &[S],
    ) -> Result<ComparisonResult, CompareError> {
        self.compare_tokens(
            join_words(target),
            join_words(attempt),
            &tokens_from_words(target),
            &tokens_from_words(attempt),
        )
    }

    /// Align two texts without classifying. Useful for callers that render the
    /// script themselves.
    pub fn align_texts(&self, original: &str, spoken: &str) -> Result<EditScript, CompareError> {
        let target = normalize(original);
        let attempt = normalize(spoken);
        self.check_size(Side::Target, target.len())?;
        self.check_size(Side::Attempt, attempt.len())?;
        Ok(align(&target, &attempt, self.config.matching_mode))
    }

    fn check_size(&self, side: Side, count: usize) -> Result<(), CompareError> {
        match self.config.max_token_count {
            Some(max) if count > max => {
                warn!(%side, count, max, "comparison input exceeds token limit");
                Err(CompareError::InputTooLarge { side, count, max })
            }
            _ => Ok(()),
        }
    }
}

impl TextComparison for ComparisonEngine {
    fn compare(&self, original: &str, spoken: &str) -> Result<ComparisonResult, CompareError> {
        self.compare_tokens(
            original.to_string(),
            spoken.to_string(),
            &normalize(original),
            &normalize(spoken),
        )
    }
}

impl ComparisonEngine {
    fn compare_tokens(
        &self,
        original_text: String,
        spoken_text: String,
        target: &[Token],
        attempt: &[Token],
    ) -> Result<ComparisonResult, CompareError> {
        self.check_size(Side::Target, target.len())?;
        self.check_size(Side::Attempt, attempt.len())?;

        let script = align(target, attempt, self.config.matching_mode);
        let options = ClassifyOptions {
            similarity: self.similarity.as_ref(),
            similarity_threshold: self.config.similarity_threshold,
            policy: self.policy.as_ref(),
        };
        let mistakes = classify(&script, target, attempt, &options);
        let accuracy = score(target.len(), &mistakes, &self.config.severity_weights);
        let feedback_category = select_category(accuracy);

        let matched_words = matched_words(&script, target);
        let stats = stats(target, attempt, matched_words.len(), &mistakes);

        debug!(
            target_words = target.len(),
            attempt_words = attempt.len(),
            distance = script.distance(),
            mistakes = mistakes.len(),
            accuracy,
            category = feedback_category.as_str(),
            "compared attempt"
        );

        Ok(ComparisonResult {
            original_text,
            spoken_text,
            accuracy,
            mistakes,
            matched_words,
            feedback_category,
            feedback_message: feedback_category
                .message(self.config.feedback_language)
                .to_string(),
            stats,
        })
    }
}

fn validate(config: &ComparisonConfig) -> Result<(), ConfigError> {
    let threshold = config.similarity_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::InvalidThreshold(threshold));
    }

    let weights = &config.severity_weights;
    for (severity, value) in [
        ("minor", weights.minor),
        ("moderate", weights.moderate),
        ("major", weights.major),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidWeight { severity, value });
        }
    }

    if config.max_token_count == Some(0) {
        return Err(ConfigError::InvalidTokenLimit);
    }
    Ok(())
}

fn matched_words(script: &EditScript, target: &[Token]) -> Vec<String> {
    script
        .iter()
        .filter_map(|op| match *op {
            EditOperation::Match { target: t, .. } => Some(target[t].raw_text.clone()),
            _ => None,
        })
        .collect()
}

fn stats(
    target: &[Token],
    attempt: &[Token],
    matched: usize,
    mistakes: &[Mistake],
) -> ComparisonStats {
    let count = |kind: MistakeKind| mistakes.iter().filter(|m| m.kind == kind).count();
    ComparisonStats {
        target_words: target.len(),
        attempt_words: attempt.len(),
        matched,
        substitutions: count(MistakeKind::Substitution),
        mispronunciations: count(MistakeKind::Mispronunciation),
        omissions: count(MistakeKind::Omission),
        insertions: count(MistakeKind::Insertion),
    }
}

fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}
