//! Comparison service: picks an engine per request and runs it.

use std::sync::Arc;

use readalong_core::{ComparisonConfig, ComparisonEngine, KeyWords, TextComparison};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

use crate::error::{ApiError, Result};
use crate::models::{BatchItem, CompareRequest, ComparisonResult, PassageOverrides};

/// Largest batch accepted by `compare_batch`.
pub const MAX_BATCH_ITEMS: usize = 100;

/// Largest total word count, over both texts of every item, accepted in one batch.
pub const MAX_BATCH_WORDS: usize = 20_000;

/// Comparisons allowed to hold an alignment table at the same time, server-wide.
pub const MAX_CONCURRENT_COMPARISONS: usize = 4;

/// Holds the server-wide engine and builds per-request variants from it.
pub struct ComparisonService {
    config: ComparisonConfig,
    default_engine: Arc<ComparisonEngine>,
    permits: Arc<Semaphore>,
}

impl ComparisonService {
    pub fn new(config: ComparisonConfig) -> Result<Self> {
        let default_engine = Arc::new(ComparisonEngine::new(config.clone())?);
        Ok(Self {
            config,
            default_engine,
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_COMPARISONS)),
        })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Engine for a request. The shared engine is reused when nothing is overridden.
    pub fn engine_for(
        &self,
        overrides: Option<&PassageOverrides>,
        key_words: &[String],
    ) -> Result<Arc<ComparisonEngine>> {
        if overrides.is_none() && key_words.is_empty() {
            return Ok(self.default_engine.clone());
        }

        let config = match overrides {
            Some(overrides) => self.config.merged(overrides),
            None => self.config.clone(),
        };
        let mut engine = ComparisonEngine::new(config)?;
        if !key_words.is_empty() {
            engine = engine.with_policy(Arc::new(KeyWords::new(key_words)));
        }
        Ok(Arc::new(engine))
    }

    /// Run a single comparison.
    pub fn compare(&self, request: &CompareRequest) -> Result<ComparisonResult> {
        let engine = self.engine_for(request.overrides.as_ref(), &request.key_words)?;
        Ok(engine.compare(&request.original_text, &request.spoken_text)?)
    }

    /// Run a single comparison on the blocking pool, waiting for a free permit first.
    pub async fn compare_blocking(
        self: Arc<Self>,
        request: CompareRequest,
    ) -> Result<ComparisonResult> {
        let permit = self.acquire().await?;
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            self.compare(&request)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("comparison task failed: {e}")))?
    }

    /// Run many comparisons on the blocking pool, at most
    /// `MAX_CONCURRENT_COMPARISONS` at a time across the server.
    ///
    /// Failures are reported per item; results keep request order.
    pub async fn compare_batch(
        self: Arc<Self>,
        items: Vec<CompareRequest>,
    ) -> Result<Vec<BatchItem>> {
        if items.len() > MAX_BATCH_ITEMS {
            return Err(ApiError::BadRequest(format!(
                "batch has {} items, limit is {}",
                items.len(),
                MAX_BATCH_ITEMS
            )));
        }

        let words: usize = items
            .iter()
            .map(|item| word_count(&item.original_text) + word_count(&item.spoken_text))
            .sum();
        if words > MAX_BATCH_WORDS {
            return Err(ApiError::BadRequest(format!(
                "batch has {} words, limit is {}",
                words, MAX_BATCH_WORDS
            )));
        }

        let total = items.len();
        let mut tasks = JoinSet::new();
        for (index, item) in items.into_iter().enumerate() {
            let permit = self.acquire().await?;
            let service = self.clone();
            tasks.spawn_blocking(move || {
                let _permit = permit;
                (index, service.compare(&item))
            });
        }

        let mut slots: Vec<Option<BatchItem>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) =
                joined.map_err(|e| ApiError::Internal(format!("comparison task failed: {e}")))?;
            slots[index] = Some(match outcome {
                Ok(result) => BatchItem::Ok(Box::new(result)),
                Err(err) => {
                    let body = err.to_body();
                    BatchItem::Err {
                        error: body.error,
                        message: body.message,
                    }
                }
            });
        }

        tracing::debug!(items = total, "batch comparison finished");
        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(|| ApiError::Internal("missing batch result".to_string())))
            .collect()
    }

    async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        self.permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ApiError::Internal(format!("comparison limiter closed: {e}")))
    }
}

/// Upper bound on the tokens a text normalizes to.
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
