//! In-memory passage library loaded from a passage file at startup.

use std::collections::BTreeMap;
use std::path::Path;

use readalong_core::{normalize, parse, Passage};

use crate::error::{ApiError, Result};
use crate::models::PassageSummary;

/// Read-only set of passages keyed by ID.
#[derive(Debug, Default)]
pub struct PassageLibrary {
    passages: BTreeMap<i64, Passage>,
}

impl PassageLibrary {
    /// Load and parse a passage file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ApiError::Internal(format!("failed to read {}: {}", path.display(), e))
        })?;
        let library = Self::from_content(&content)?;
        tracing::info!(
            path = %path.display(),
            passages = library.len(),
            "loaded passage library"
        );
        Ok(library)
    }

    /// Parse passages from file content.
    ///
    /// Passages without an ID are numbered after the highest explicit ID, in file order.
    pub fn from_content(content: &str) -> Result<Self> {
        let parsed = parse(content)?;
        let mut next_id = parsed
            .iter()
            .filter_map(|p| p.id)
            .max()
            .unwrap_or(0)
            .checked_add(1);

        let mut passages = BTreeMap::new();
        for mut passage in parsed {
            let id = match passage.id {
                Some(id) => id,
                None => {
                    let id = next_id.ok_or_else(|| {
                        ApiError::BadRequest(format!(
                            "no passage ID left for the passage at line {}",
                            passage.line_number
                        ))
                    })?;
                    next_id = id.checked_add(1);
                    tracing::debug!(id, line = passage.line_number, "assigned passage ID");
                    id
                }
            };
            passage.id = Some(id);
            passages.insert(id, passage);
        }

        Ok(Self { passages })
    }

    pub fn get(&self, id: i64) -> Result<&Passage> {
        self.passages
            .get(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Passage {} not found", id)))
    }

    pub fn summaries(&self) -> Vec<PassageSummary> {
        self.passages
            .iter()
            .map(|(id, passage)| PassageSummary {
                id: *id,
                title: passage.title.clone(),
                word_count: normalize(&passage.text).len(),
                key_word_count: passage.key_words.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}
