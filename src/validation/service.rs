/*!
 * Validation engine comparing detected errors with ground truth.
 *
 * A detected error matches a ground-truth error when both share `type` and
 * `category` and their confidences differ by less than the configured window.
 * Matching is one-to-one and maximal: a detected error may give up its
 * ground-truth partner when that lets another detected error be paired too.
 * Candidates are tried in order of smallest confidence gap.
 *
 * Text spans are not compared: two errors of the same type on different
 * parts of a segment can match each other.
 */

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::ValidationConfig;
use crate::detection::types::{DetectedError, ErrorCategory, Severity};

use super::distribution::ConfidenceDistribution;

/// Detection quality metrics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Matched share of the ground truth
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,

    pub true_positives: usize,
    /// Detected errors with no ground-truth partner
    pub false_positives: Vec<DetectedError>,
    /// Ground-truth errors no detection was paired with
    pub false_negatives: Vec<DetectedError>,

    /// Matched share of the ground truth, per ground-truth category
    pub category_accuracy: BTreeMap<ErrorCategory, f64>,

    /// Matched share of the ground truth, per ground-truth severity
    pub severity_accuracy: BTreeMap<Severity, f64>,

    /// Confidence histogram of the detected errors
    pub confidence_distribution: ConfidenceDistribution,
}

/// Validation engine
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a new validation engine
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Whether `detected` may be matched with `expected`
    pub fn is_match(&self, detected: &DetectedError, expected: &DetectedError) -> bool {
        detected.error_type == expected.error_type
            && detected.category == expected.category
            && (detected.confidence - expected.confidence).abs() < self.config.confidence_window
    }

    /// Pair detected errors with ground truth.
    ///
    /// Returns, for each ground-truth error, the index of its detected partner.
    pub fn pair_errors(&self, detected: &[DetectedError], ground_truth: &[DetectedError]) -> Vec<Option<usize>> {
        let candidates: Vec<Vec<usize>> = detected
            .iter()
            .map(|error| {
                let mut options: Vec<usize> = ground_truth
                    .iter()
                    .enumerate()
                    .filter(|(_, expected)| self.is_match(error, expected))
                    .map(|(i, _)| i)
                    .collect();
                options.sort_by(|a, b| {
                    let gap_a = (error.confidence - ground_truth[*a].confidence).abs();
                    let gap_b = (error.confidence - ground_truth[*b].confidence).abs();
                    gap_a.total_cmp(&gap_b)
                });
                options
            })
            .collect();

        let mut partner = vec![None; ground_truth.len()];
        for d in 0..detected.len() {
            let mut visited = vec![false; ground_truth.len()];
            augment(d, &candidates, &mut visited, &mut partner);
        }
        partner
    }

    /// Compare detected errors with ground truth
    pub fn validate(&self, detected: &[DetectedError], ground_truth: &[DetectedError]) -> ValidationResult {
        let partner = self.pair_errors(detected, ground_truth);
        let matched: Vec<bool> = partner.iter().map(Option::is_some).collect();

        let mut paired_detections = vec![false; detected.len()];
        for d in partner.iter().flatten() {
            paired_detections[*d] = true;
        }

        let true_positives = matched.iter().filter(|m| **m).count();
        let false_positives: Vec<DetectedError> = detected
            .iter()
            .zip(&paired_detections)
            .filter(|(_, paired)| !**paired)
            .map(|(error, _)| error.clone())
            .collect();
        let false_negatives: Vec<DetectedError> = ground_truth
            .iter()
            .zip(&matched)
            .filter(|(_, is_matched)| !**is_matched)
            .map(|(error, _)| error.clone())
            .collect();

        let precision = ratio(true_positives, detected.len());
        let recall = ratio(true_positives, ground_truth.len());
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        let category_accuracy = bucket_accuracy(ground_truth, &matched, |e| e.category);
        let severity_accuracy = bucket_accuracy(ground_truth, &matched, |e| e.severity);

        let confidence_distribution = ConfidenceDistribution::from_errors(
            detected,
            self.config.high_confidence_min,
            self.config.medium_confidence_min,
        );

        debug!(
            "Validation: {} TP, {} FP, {} FN (precision {:.2}, recall {:.2})",
            true_positives,
            false_positives.len(),
            false_negatives.len(),
            precision,
            recall
        );

        ValidationResult {
            accuracy: recall,
            precision,
            recall,
            f1_score,
            true_positives,
            false_positives,
            false_negatives,
            category_accuracy,
            severity_accuracy,
            confidence_distribution,
        }
    }
}

/// Try to pair detected error `d`, re-pairing earlier detections along an
/// augmenting path when its candidates are taken.
fn augment(d: usize, candidates: &[Vec<usize>], visited: &mut [bool], partner: &mut [Option<usize>]) -> bool {
    for &g in &candidates[d] {
        if visited[g] {
            continue;
        }
        visited[g] = true;

        let free = match partner[g] {
            None => true,
            Some(other) => augment(other, candidates, visited, partner),
        };
        if free {
            partner[g] = Some(d);
            return true;
        }
    }
    false
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn bucket_accuracy<K, F>(ground_truth: &[DetectedError], matched: &[bool], key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&DetectedError) -> K,
{
    let mut buckets: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for (error, is_matched) in ground_truth.iter().zip(matched) {
        let entry = buckets.entry(key(error)).or_insert((0, 0));
        entry.0 += usize::from(*is_matched);
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(k, (hits, total))| (k, ratio(hits, total)))
        .collect()
}
