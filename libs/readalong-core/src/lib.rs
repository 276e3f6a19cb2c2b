//! Core read-along library shared by the backend and any other caller.
//!
//! Provides:
//! - Text normalization into comparison tokens (case and diacritic folding)
//! - Word-level alignment (Wagner–Fischer edit script)
//! - Mistake classification with pluggable severity policies
//! - Severity-weighted accuracy scoring and feedback categories
//! - A parser for reading-passage files
//!
//! The pipeline runs Normalizer → Aligner → Classifier → Scorer → Feedback and is
//! exposed as a whole through [`ComparisonEngine`].

pub mod alignment;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod normalizer;
pub mod parser;
pub mod scoring;
pub mod severity;
pub mod similarity;
pub mod types;

pub use alignment::align;
pub use classifier::classify;
pub use engine::{ComparisonEngine, TextComparison};
pub use error::{CompareError, ConfigError, ParseError, Result};
pub use feedback::select_category;
pub use normalizer::{normalize, tokens_from_words};
pub use parser::parse;
pub use scoring::score;
pub use severity::{DefaultSeverity, KeyWords, SeverityPolicy};
pub use similarity::{measure_for, SimilarityMeasure};
pub use types::{
    ComparisonConfig, ComparisonResult, ComparisonStats, EditOperation, EditScript,
    FeedbackCategory, FeedbackLanguage, MatchingMode, Mistake, MistakeKind, Passage,
    PassageOverrides, Severity, SeverityWeights, Side, SimilarityKind, Token,
};
