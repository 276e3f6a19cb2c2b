//! Character similarity measures.

pub mod levenshtein;
pub mod prefix;

use crate::types::SimilarityKind;

pub use levenshtein::{levenshtein_distance, Levenshtein};
pub use prefix::SharedPrefix;

/// Trait for word similarity heuristics.
///
/// Implementations must be deterministic and return a value in `[0, 1]`, where
/// 1.0 means identical. Two empty words are identical.
pub trait SimilarityMeasure: Send + Sync {
    /// Measure identifier.
    fn name(&self) -> &'static str;

    /// Similarity between two (already folded) words.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Get the measure for a configured kind.
pub fn measure_for(kind: SimilarityKind) -> Box<dyn SimilarityMeasure> {
    match kind {
        SimilarityKind::Levenshtein => Box::new(Levenshtein),
        SimilarityKind::Prefix => Box::new(SharedPrefix),
    }
}
