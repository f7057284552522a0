/*!
 * MQM-style quality report.
 *
 * Summarises the findings of one or more pairs:
 * - Error counts per category and severity
 * - Penalty points (minor 1, major 5, critical 10)
 * - Quality score: 100 × (1 − penalty / word count), floored at 0
 */

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{DetectedError, ErrorCategory, Severity};

/// Quality summary of a set of findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub total_errors: usize,
    pub by_category: BTreeMap<ErrorCategory, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    pub penalty_points: f64,
    /// Words of source text evaluated
    pub word_count: usize,
    /// Quality score (0 - 100)
    pub score: f64,
}

impl QualityReport {
    /// Build a report from findings over `word_count` source words.
    pub fn from_errors(errors: &[DetectedError], word_count: usize) -> Self {
        let mut by_category = BTreeMap::new();
        let mut by_severity = BTreeMap::new();
        for error in errors {
            *by_category.entry(error.category).or_insert(0) += 1;
            *by_severity.entry(error.severity).or_insert(0) += 1;
        }

        let penalty_points: f64 = errors.iter().map(|e| e.severity.penalty_weight()).sum();
        let score = if word_count == 0 {
            if errors.is_empty() { 100.0 } else { 0.0 }
        } else {
            (100.0 * (1.0 - penalty_points / word_count as f64)).max(0.0)
        };

        Self {
            total_errors: errors.len(),
            by_category,
            by_severity,
            penalty_points,
            word_count,
            score,
        }
    }

    /// Check if score meets minimum threshold.
    pub fn meets_threshold(&self, threshold: f64) -> bool {
        self.score >= threshold
    }

    /// Get a grade letter (A-F) based on the score.
    pub fn grade(&self) -> char {
        match self.score {
            s if s >= 90.0 => 'A',
            s if s >= 80.0 => 'B',
            s if s >= 70.0 => 'C',
            s if s >= 60.0 => 'D',
            _ => 'F',
        }
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Quality: {:.1}% (Grade: {}) - {} errors, {:.0} penalty points over {} words",
            self.score,
            self.grade(),
            self.total_errors,
            self.penalty_points,
            self.word_count
        )
    }
}
