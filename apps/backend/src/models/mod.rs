//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from readalong-core
pub use readalong_core::types::{ComparisonConfig, ComparisonResult, Passage, PassageOverrides};

/// POST /api/compare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub original_text: String,
    pub spoken_text: String,
    /// Words whose mistakes count as major.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<PassageOverrides>,
}

/// POST /api/compare/batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCompareRequest {
    pub items: Vec<CompareRequest>,
}

/// One entry of a batch response, in request order.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Ok(Box<ComparisonResult>),
    Err { error: String, message: String },
}

#[derive(Debug, Serialize)]
pub struct BatchCompareResponse {
    pub results: Vec<BatchItem>,
}

/// POST /api/passages/:id/attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRequest {
    pub spoken_text: String,
}

/// Passage entry in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageSummary {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub word_count: usize,
    pub key_word_count: usize,
}

#[derive(Debug, Serialize)]
pub struct PassageListResponse {
    pub passages: Vec<PassageSummary>,
}

/// GET /api/settings
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub comparison: ComparisonConfig,
    pub passages_loaded: usize,
}
