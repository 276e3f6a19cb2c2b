//! Shared-prefix similarity.

use super::SimilarityMeasure;

/// Ratio of the common prefix to the longer word, in characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedPrefix;

impl SimilarityMeasure for SharedPrefix {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }

        let shared = a
            .chars()
            .zip(b.chars())
            .take_while(|(x, y)| x == y)
            .count();
        shared as f64 / max_len as f64
    }
}
