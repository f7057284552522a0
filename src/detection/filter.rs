use std::cmp::Ordering;

use super::types::DetectedError;

/// Drops low-confidence findings and ranks the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFilter {
    threshold: f64,
}

impl ConfidenceFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Keep findings with `confidence >= threshold`, highest confidence first.
    /// Equal confidences keep their relative order.
    pub fn apply(&self, errors: Vec<DetectedError>) -> Vec<DetectedError> {
        let mut kept: Vec<DetectedError> = errors
            .into_iter()
            .filter(|e| e.confidence >= self.threshold)
            .collect();
        kept.sort_by(|a, b| descending(a.confidence, b.confidence));
        kept
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
