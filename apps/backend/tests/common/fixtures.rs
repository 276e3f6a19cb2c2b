//! Test fixtures and factory functions for creating request bodies.

use serde_json::json;

use readalong_core::ComparisonConfig;

/// Passage file served by every test context.
pub const SAMPLE_PASSAGES: &str = "\
ID: 1
Title: Con mèo
Key: thảm
Text: Con mèo nhỏ ngồi trên thảm xanh.

ID: 2
Title: Chào hỏi
Threshold: 0.9
Text: Xin chào các bạn.
";

/// Token limit used by test contexts.
pub const TEST_MAX_TOKENS: usize = 50;

/// Comparison config used by test contexts.
pub fn comparison_config() -> ComparisonConfig {
    ComparisonConfig {
        max_token_count: Some(TEST_MAX_TOKENS),
        ..Default::default()
    }
}

/// Create a compare request body.
pub fn compare_request(original: &str, spoken: &str) -> serde_json::Value {
    json!({
        "original_text": original,
        "spoken_text": spoken,
    })
}

/// Create a compare request body with key words.
pub fn compare_request_with_key_words(
    original: &str,
    spoken: &str,
    key_words: &[&str],
) -> serde_json::Value {
    json!({
        "original_text": original,
        "spoken_text": spoken,
        "key_words": key_words,
    })
}

/// Create a batch compare request body.
pub fn batch_request(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "items": items })
}

/// Create a passage attempt request body.
pub fn attempt_request(spoken: &str) -> serde_json::Value {
    json!({ "spoken_text": spoken })
}

/// Generate a passage of `count` words.
pub fn long_text(count: usize) -> String {
    vec!["từ"; count].join(" ")
}
