//! Severity-weighted accuracy.

use crate::types::{Mistake, SeverityWeights};

/// Reduce classified mistakes to an accuracy in `[0, 1]`.
///
/// `base = matched / target_len`, where every non-insertion mistake removes one
/// matched word. Each mistake, insertions included, then subtracts its severity
/// weight divided by `max(target_len, 1)`. An empty target scores exactly 1.0,
/// whatever was inserted.
pub fn score(target_len: usize, mistakes: &[Mistake], weights: &SeverityWeights) -> f64 {
    if target_len == 0 {
        return 1.0;
    }

    let target_side = mistakes
        .iter()
        .filter(|m| m.kind.consumes_target())
        .count();
    let matched = target_len.saturating_sub(target_side);
    let denominator = target_len as f64;

    let base = matched as f64 / denominator;
    let penalty: f64 = mistakes.iter().map(|m| weights.weight(m.severity)).sum();

    (base - penalty / denominator).clamp(0.0, 1.0)
}
