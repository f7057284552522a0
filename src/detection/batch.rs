/*!
 * Batch detection.
 *
 * Runs `detect_errors` over many pairs concurrently. Detection is CPU bound,
 * so every pair runs on tokio's blocking pool; at most
 * `max_concurrent_detections` pairs are in flight. Results come back in input
 * order.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use futures::stream::{self, StreamExt};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::errors::DetectionError;

use super::core::ErrorDetector;
use super::types::{DetectedError, DetectionContext};

/// One source/target pair of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationPair {
    /// Caller's identifier for the pair
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// Overrides the batch context for this pair
    #[serde(default)]
    pub context: Option<DetectionContext>,
}

impl TranslationPair {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: None,
            source: source.to_string(),
            target: target.to_string(),
            context: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_context(mut self, context: DetectionContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Findings for one pair of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    pub id: Option<String>,
    pub errors: Vec<DetectedError>,
}

/// Concurrent detector over many pairs
pub struct BatchDetector {
    /// The shared detector
    detector: Arc<ErrorDetector>,

    /// Maximum number of pairs analysed at once
    max_concurrent: usize,
}

impl BatchDetector {
    /// Create a batch detector using the detector's concurrency limit
    pub fn new(detector: Arc<ErrorDetector>) -> Self {
        let max_concurrent = detector.config().max_concurrent_detections;
        Self::with_concurrency(detector, max_concurrent)
    }

    pub fn with_concurrency(detector: Arc<ErrorDetector>, max_concurrent: usize) -> Self {
        Self {
            detector,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Detect errors in every pair
    pub async fn detect_batch(
        &self,
        pairs: Vec<TranslationPair>,
        context: &DetectionContext,
    ) -> Result<Vec<PairResult>, DetectionError> {
        self.detect_batch_with_progress(pairs, context, |_, _| {}).await
    }

    /// Detect errors in every pair, reporting (done, total) after each one
    pub async fn detect_batch_with_progress(
        &self,
        pairs: Vec<TranslationPair>,
        context: &DetectionContext,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Vec<PairResult>, DetectionError> {
        let total = pairs.len();
        let processed = Arc::new(AtomicUsize::new(0));
        let start_time = Instant::now();

        let results = stream::iter(pairs.into_iter().enumerate())
            .map(|(index, pair)| {
                let detector = self.detector.clone();
                let context = pair.context.clone().unwrap_or_else(|| context.clone());
                let processed = processed.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    let id = pair.id.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        detector.detect_errors(&pair.source, &pair.target, &context)
                    })
                    .await;

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);
                    debug!("Pair {} of {} analysed", index + 1, total);

                    (index, id, result)
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        // Restore input order
        let mut sorted_results = results;
        sorted_results.sort_by_key(|(index, _, _)| *index);

        let mut output = Vec::with_capacity(total);
        for (index, id, result) in sorted_results {
            match result {
                Ok(errors) => output.push(PairResult { id, errors }),
                Err(e) => {
                    error!("Detection task for pair {} failed: {}", index + 1, e);
                    return Err(DetectionError::TaskFailed(format!("pair {}: {}", index + 1, e)));
                }
            }
        }

        info!(
            "Analysed {} pairs in {:?} ({} concurrent)",
            total,
            start_time.elapsed(),
            self.max_concurrent
        );

        Ok(output)
    }
}
