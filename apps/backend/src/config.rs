//! Server configuration from environment variables.

use std::path::PathBuf;

use readalong_core::{ComparisonConfig, FeedbackLanguage, MatchingMode, SimilarityKind};
use thiserror::Error;

/// Token limit applied by the server unless `READALONG_MAX_TOKENS` says otherwise.
pub const DEFAULT_MAX_TOKENS: usize = 2000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Everything the server reads at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub passages_path: Option<PathBuf>,
    pub comparison: ComparisonConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognised variables:
    /// - HOST, PORT: listen address (default 0.0.0.0:3000)
    /// - READALONG_PASSAGES: passage file to serve
    /// - READALONG_MAX_TOKENS: per-side token limit (default 2000)
    /// - READALONG_SIMILARITY_THRESHOLD: mispronunciation threshold (default 0.6)
    /// - READALONG_MATCHING_MODE: case_insensitive | diacritic_insensitive
    /// - READALONG_SIMILARITY: levenshtein | prefix
    /// - READALONG_LANGUAGE: en | vi
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 3000, |v| v.parse().ok())?;
        let passages_path = lookup("READALONG_PASSAGES")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let defaults = ComparisonConfig::default();
        let max_tokens = parse_or(&lookup, "READALONG_MAX_TOKENS", DEFAULT_MAX_TOKENS, |v| {
            v.parse::<usize>().ok().filter(|n| *n > 0)
        })?;
        let similarity_threshold = parse_or(
            &lookup,
            "READALONG_SIMILARITY_THRESHOLD",
            defaults.similarity_threshold,
            |v| v.parse::<f64>().ok().filter(|t| (0.0..=1.0).contains(t)),
        )?;
        let matching_mode = parse_or(
            &lookup,
            "READALONG_MATCHING_MODE",
            defaults.matching_mode,
            MatchingMode::from_str,
        )?;
        let similarity = parse_or(
            &lookup,
            "READALONG_SIMILARITY",
            defaults.similarity,
            SimilarityKind::from_str,
        )?;
        let feedback_language = parse_or(
            &lookup,
            "READALONG_LANGUAGE",
            defaults.feedback_language,
            FeedbackLanguage::from_str,
        )?;

        Ok(Self {
            host,
            port,
            passages_path,
            comparison: ComparisonConfig {
                similarity_threshold,
                max_token_count: Some(max_tokens),
                matching_mode,
                similarity,
                feedback_language,
                ..defaults
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F, P>(lookup: &F, key: &'static str, default: T, parse: P) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.passages_path, None);
        assert_eq!(config.comparison.max_token_count, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(config.comparison.similarity_threshold, 0.6);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("READALONG_PASSAGES", "/data/passages.txt"),
            ("READALONG_MAX_TOKENS", "500"),
            ("READALONG_SIMILARITY_THRESHOLD", "0.75"),
            ("READALONG_MATCHING_MODE", "diacritic_insensitive"),
            ("READALONG_SIMILARITY", "prefix"),
            ("READALONG_LANGUAGE", "en"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.passages_path,
            Some(PathBuf::from("/data/passages.txt"))
        );
        assert_eq!(config.comparison.max_token_count, Some(500));
        assert_eq!(config.comparison.similarity_threshold, 0.75);
        assert_eq!(
            config.comparison.matching_mode,
            MatchingMode::DiacriticInsensitive
        );
        assert_eq!(config.comparison.similarity, SimilarityKind::Prefix);
        assert_eq!(
            config.comparison.feedback_language,
            FeedbackLanguage::English
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let err = config_from(&[("READALONG_SIMILARITY_THRESHOLD", "2")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "READALONG_SIMILARITY_THRESHOLD",
                value: "2".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_port_and_limit() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("READALONG_MAX_TOKENS", "0")]).is_err());
        assert!(config_from(&[("READALONG_LANGUAGE", "klingon")]).is_err());
    }
}
