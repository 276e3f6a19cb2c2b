//! Core types for the comparison pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One word of a passage or an attempt, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the original word order.
    pub index: usize,
    /// Word as written or recognized, outer punctuation removed.
    pub raw_text: String,
    /// Lowercased NFC form. Tone marks and other diacritics are kept.
    pub normalized_text: String,
    /// Lowercased form with every combining mark removed.
    pub folded_text: String,
}

impl Token {
    /// Key used for word equality under the given matching mode.
    pub fn key(&self, mode: MatchingMode) -> &str {
        match mode {
            MatchingMode::CaseInsensitive => &self.normalized_text,
            MatchingMode::DiacriticInsensitive => &self.folded_text,
        }
    }
}

/// Which input a token sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Target,
    Attempt,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => f.write_str("target"),
            Self::Attempt => f.write_str("attempt"),
        }
    }
}

/// Word equality used by the aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Case-folded, diacritics significant.
    CaseInsensitive,
    /// Case-folded and diacritic-folded. Suits handwriting, where marks get lost.
    DiacriticInsensitive,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaseInsensitive => "case_insensitive",
            Self::DiacriticInsensitive => "diacritic_insensitive",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "case_insensitive" => Some(Self::CaseInsensitive),
            "diacritic_insensitive" => Some(Self::DiacriticInsensitive),
            _ => None,
        }
    }
}

/// A single step of an alignment. Indices point into the token sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOperation {
    Match { target: usize, attempt: usize },
    Substitute { target: usize, attempt: usize },
    Delete { target: usize },
    Insert { attempt: usize },
}

impl EditOperation {
    /// Edit cost of this operation (0 for a match, 1 otherwise).
    pub fn cost(&self) -> usize {
        match self {
            Self::Match { .. } => 0,
            _ => 1,
        }
    }

    pub fn target_index(&self) -> Option<usize> {
        match *self {
            Self::Match { target, .. } | Self::Substitute { target, .. } | Self::Delete { target } => {
                Some(target)
            }
            Self::Insert { .. } => None,
        }
    }

    pub fn attempt_index(&self) -> Option<usize> {
        match *self {
            Self::Match { attempt, .. }
            | Self::Substitute { attempt, .. }
            | Self::Insert { attempt } => Some(attempt),
            Self::Delete { .. } => None,
        }
    }
}

/// Ordered edit script covering every target and attempt token exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    pub operations: Vec<EditOperation>,
}

impl EditScript {
    /// Total edit distance of the script.
    pub fn distance(&self) -> usize {
        self.operations.iter().map(EditOperation::cost).sum()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOperation> {
        self.operations.iter()
    }
}

/// Kind of divergence between target and attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeKind {
    Substitution,
    Omission,
    Insertion,
    Mispronunciation,
}

impl MistakeKind {
    /// Whether this kind accounts for a target word (everything but insertions).
    pub fn consumes_target(self) -> bool {
        !matches!(self, Self::Insertion)
    }
}

/// Weight class of a mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Penalty applied per mistake of each severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub minor: f64,
    pub moderate: f64,
    pub major: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            minor: 0.1,
            moderate: 0.3,
            major: 0.5,
        }
    }
}

impl SeverityWeights {
    pub fn weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Minor => self.minor,
            Severity::Moderate => self.moderate,
            Severity::Major => self.major,
        }
    }
}

/// A classified, positioned divergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mistake {
    /// Target index. Insertions anchor to the preceding target word.
    pub position: usize,
    /// Attempt index, absent for omissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_position: Option<usize>,
    /// Empty for insertions.
    pub expected_word: String,
    /// Empty for omissions.
    pub actual_word: String,
    pub kind: MistakeKind,
    pub severity: Severity,
}

/// Coarse accuracy bucket used to pick the tone of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

/// Language of feedback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLanguage {
    English,
    Vietnamese,
}

impl Default for FeedbackLanguage {
    fn default() -> Self {
        Self::Vietnamese
    }
}

impl FeedbackLanguage {
    /// Parse from a language code or name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "en" | "english" => Some(Self::English),
            "vi" | "vietnamese" => Some(Self::Vietnamese),
            _ => None,
        }
    }
}

/// Character similarity measure used to tell mispronunciations from substitutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityKind {
    Levenshtein,
    Prefix,
}

impl Default for SimilarityKind {
    fn default() -> Self {
        Self::Levenshtein
    }
}

impl SimilarityKind {
    /// Get the measure name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Levenshtein => "levenshtein",
            Self::Prefix => "prefix",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "levenshtein" => Some(Self::Levenshtein),
            "prefix" => Some(Self::Prefix),
            _ => None,
        }
    }
}

/// Engine configuration, bound once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub similarity_threshold: f64,
    pub severity_weights: SeverityWeights,
    /// Fail fast when either side has more tokens than this. `None` disables the guard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_count: Option<usize>,
    pub matching_mode: MatchingMode,
    pub similarity: SimilarityKind,
    pub feedback_language: FeedbackLanguage,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            severity_weights: SeverityWeights::default(),
            max_token_count: None,
            matching_mode: MatchingMode::default(),
            similarity: SimilarityKind::default(),
            feedback_language: FeedbackLanguage::default(),
        }
    }
}

impl ComparisonConfig {
    /// Merge per-passage overrides over this configuration.
    pub fn merged(&self, overrides: &PassageOverrides) -> Self {
        Self {
            similarity_threshold: overrides
                .similarity_threshold
                .unwrap_or(self.similarity_threshold),
            severity_weights: overrides.severity_weights.unwrap_or(self.severity_weights),
            max_token_count: self.max_token_count,
            matching_mode: overrides.matching_mode.unwrap_or(self.matching_mode),
            similarity: overrides.similarity.unwrap_or(self.similarity),
            feedback_language: self.feedback_language,
        }
    }
}

/// Per-passage settings (all fields optional for overrides).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassageOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_weights: Option<SeverityWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_mode: Option<MatchingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<SimilarityKind>,
}

/// Counts derived from one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub target_words: usize,
    pub attempt_words: usize,
    pub matched: usize,
    pub substitutions: usize,
    pub mispronunciations: usize,
    pub omissions: usize,
    pub insertions: usize,
}

/// Outcome of comparing an attempt with its target text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub original_text: String,
    pub spoken_text: String,
    /// Severity-weighted accuracy in `[0, 1]`.
    pub accuracy: f64,
    /// Ordered by target position.
    pub mistakes: Vec<Mistake>,
    /// Target words read correctly, in reading order.
    pub matched_words: Vec<String>,
    pub feedback_category: FeedbackCategory,
    pub feedback_message: String,
    pub stats: ComparisonStats,
}

/// Reading passage parsed from a passage file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,
    pub line_number: usize,
}

impl Passage {
    /// Overrides this passage applies over the base configuration.
    pub fn overrides(&self) -> PassageOverrides {
        PassageOverrides {
            similarity_threshold: self.similarity_threshold,
            ..Default::default()
        }
    }
}
