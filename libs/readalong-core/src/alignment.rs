//! Word-level alignment between a target passage and an attempt.
//!
//! Wagner–Fischer dynamic programming with unit costs. The table is filled over
//! suffixes (`cost[i][j]` aligns `target[i..]` with `attempt[j..]`) so the edit
//! script can be read forward from the start. At each cell the first optimal
//! operation in the order Match, Substitute, Delete, Insert wins, which keeps
//! omissions at their earliest plausible position.

use crate::types::{EditOperation, EditScript, MatchingMode, Token};

/// Compute a minimum-cost edit script from `target` to `attempt`.
///
/// Every target and attempt token appears in exactly one operation, in order.
pub fn align(target: &[Token], attempt: &[Token], mode: MatchingMode) -> EditScript {
    let n = target.len();
    let m = attempt.len();
    let table = CostTable::build(target, attempt, mode);

    let mut operations = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);

    while i < n || j < m {
        let op = if i < n && j < m {
            let here = table.get(i, j);
            let same = target[i].key(mode) == attempt[j].key(mode);

            if same && here == table.get(i + 1, j + 1) {
                EditOperation::Match { target: i, attempt: j }
            } else if !same && here == table.get(i + 1, j + 1) + 1 {
                EditOperation::Substitute { target: i, attempt: j }
            } else if here == table.get(i + 1, j) + 1 {
                EditOperation::Delete { target: i }
            } else {
                EditOperation::Insert { attempt: j }
            }
        } else if i < n {
            EditOperation::Delete { target: i }
        } else {
            EditOperation::Insert { attempt: j }
        };

        match op {
            EditOperation::Match { .. } | EditOperation::Substitute { .. } => {
                i += 1;
                j += 1;
            }
            EditOperation::Delete { .. } => i += 1,
            EditOperation::Insert { .. } => j += 1,
        }
        operations.push(op);
    }

    EditScript { operations }
}

/// Suffix cost table, `(n + 1) × (m + 1)`, stored row-major.
/// Cells hold at most `n + m`.
struct CostTable {
    cols: usize,
    cells: Vec<u32>,
}

impl CostTable {
    fn build(target: &[Token], attempt: &[Token], mode: MatchingMode) -> Self {
        let n = target.len();
        let m = attempt.len();
        let cols = m + 1;
        let mut cells = vec![0u32; (n + 1) * cols];

        // Last row: only insertions remain; last column: only deletions.
        for j in 0..=m {
            cells[n * cols + j] = (m - j) as u32;
        }
        for i in 0..=n {
            cells[i * cols + m] = (n - i) as u32;
        }

        for i in (0..n).rev() {
            for j in (0..m).rev() {
                let cost = if target[i].key(mode) == attempt[j].key(mode) {
                    0
                } else {
                    1
                };
                let diagonal = cells[(i + 1) * cols + j + 1] + cost;
                let delete = cells[(i + 1) * cols + j] + 1;
                let insert = cells[i * cols + j + 1] + 1;
                cells[i * cols + j] = diagonal.min(delete).min(insert);
            }
        }

        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use pretty_assertions::assert_eq;

    fn script(target: &str, attempt: &str) -> Vec<EditOperation> {
        align(
            &normalize(target),
            &normalize(attempt),
            MatchingMode::CaseInsensitive,
        )
        .operations
    }

    use EditOperation::{Delete, Insert, Match, Substitute};

    #[test]
    fn identical_sequences_match_everywhere() {
        assert_eq!(
            script("Con mèo ngồi", "con MÈO ngồi"),
            vec![
                Match { target: 0, attempt: 0 },
                Match { target: 1, attempt: 1 },
                Match { target: 2, attempt: 2 },
            ]
        );
    }

    #[test]
    fn cost_table_corners_hold_distances() {
        let target = normalize("a b c d");
        let attempt = normalize("a x d");
        let table = CostTable::build(&target, &attempt, MatchingMode::CaseInsensitive);
        assert_eq!(table.get(0, 0), 2);
        assert_eq!(table.get(4, 0), 3);
        assert_eq!(table.get(0, 3), 4);
        assert_eq!(table.cells.len(), 5 * 4);
    }

    #[test]
    fn both_empty_is_empty_script() {
        assert!(script("", "").is_empty());
    }

    #[test]
    fn empty_attempt_deletes_everything() {
        assert_eq!(
            script("xin chào", ""),
            vec![Delete { target: 0 }, Delete { target: 1 }]
        );
    }

    #[test]
    fn empty_target_inserts_everything() {
        assert_eq!(
            script("", "xin chào"),
            vec![Insert { attempt: 0 }, Insert { attempt: 1 }]
        );
    }

    #[test]
    fn omissions_do_not_cascade() {
        let ops = script(
            "Con mèo nhỏ ngồi trên thảm xanh",
            "Con mèo ngồi trên thảm",
        );
        assert_eq!(
            ops,
            vec![
                Match { target: 0, attempt: 0 },
                Match { target: 1, attempt: 1 },
                Delete { target: 2 },
                Match { target: 3, attempt: 2 },
                Match { target: 4, attempt: 3 },
                Match { target: 5, attempt: 4 },
                Delete { target: 6 },
            ]
        );
    }

    #[test]
    fn insertion_in_the_middle() {
        assert_eq!(
            script("the cat sat", "the big cat sat"),
            vec![
                Match { target: 0, attempt: 0 },
                Insert { attempt: 1 },
                Match { target: 1, attempt: 2 },
                Match { target: 2, attempt: 3 },
            ]
        );
    }

    #[test]
    fn substitute_preferred_over_delete_insert_pair() {
        assert_eq!(
            script("a b c", "a x c"),
            vec![
                Match { target: 0, attempt: 0 },
                Substitute { target: 1, attempt: 1 },
                Match { target: 2, attempt: 2 },
            ]
        );
    }

    #[test]
    fn match_preferred_over_delete_on_repeated_word() {
        // Dropping either "the" costs the same; matching first wins the tie.
        assert_eq!(
            script("the the end", "the end"),
            vec![
                Match { target: 0, attempt: 0 },
                Delete { target: 1 },
                Match { target: 2, attempt: 1 },
            ]
        );
    }

    #[test]
    fn substitute_preferred_over_gap_on_ties() {
        // Two substitutions or a delete/insert pair both cost 2.
        assert_eq!(
            script("a b", "b c"),
            vec![
                Substitute { target: 0, attempt: 0 },
                Substitute { target: 1, attempt: 1 },
            ]
        );
    }

    #[test]
    fn leading_omission() {
        assert_eq!(
            script("a b", "b"),
            vec![Delete { target: 0 }, Match { target: 1, attempt: 0 }]
        );
    }

    #[test]
    fn tone_marks_matter_by_default() {
        assert_eq!(
            script("mèo", "mẻo"),
            vec![Substitute { target: 0, attempt: 0 }]
        );
    }

    #[test]
    fn diacritic_insensitive_mode_matches_folded_words() {
        let ops = align(
            &normalize("mèo"),
            &normalize("mẻo"),
            MatchingMode::DiacriticInsensitive,
        );
        assert_eq!(ops.operations, vec![Match { target: 0, attempt: 0 }]);
    }

    #[test]
    fn script_distance_is_minimal() {
        let ops = align(
            &normalize("kitten sat on the mat"),
            &normalize("sitting sat the mat today"),
            MatchingMode::CaseInsensitive,
        );
        assert_eq!(ops.distance(), 3);
    }
}
