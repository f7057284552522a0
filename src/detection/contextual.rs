/*!
 * Contextual checks: register and grammatical complexity mismatches.
 */

use crate::app_config::DetectionThresholds;

use super::analyzer::{AFFECTED_TEXT_CHARS, AnalysisInput, PairAnalyzer, truncate_text};
use super::types::{DetectedError, ErrorCategory, Severity};

/// Compares register and grammar complexity of source and target.
pub struct ContextualAnalyzer {
    complexity_cutoff: f64,
    register_confidence: f64,
    complexity_confidence_scale: f64,
    complexity_confidence_cap: f64,
}

impl ContextualAnalyzer {
    pub fn new(thresholds: &DetectionThresholds) -> Self {
        Self {
            complexity_cutoff: thresholds.complexity_cutoff,
            register_confidence: thresholds.register_mismatch_confidence,
            complexity_confidence_scale: thresholds.complexity_confidence_scale,
            complexity_confidence_cap: thresholds.complexity_confidence_cap,
        }
    }

    pub fn check_register(&self, input: &AnalysisInput<'_>) -> Option<DetectedError> {
        let (source, target) = (input.source.register_level, input.target.register_level);
        if source == target {
            return None;
        }

        Some(
            DetectedError::new(
                "register_inconsistency",
                ErrorCategory::Style,
                Severity::Minor,
                self.register_confidence,
            )
            .with_description(format!(
                "Register shifts from {:?} in the source to {:?} in the translation",
                source, target
            ))
            .with_affected_text(truncate_text(input.target_text, AFFECTED_TEXT_CHARS))
            .with_metadata("analyzer", self.name())
            .with_metadata("source_register", format!("{:?}", source).to_lowercase())
            .with_metadata("target_register", format!("{:?}", target).to_lowercase()),
        )
    }

    pub fn check_complexity(&self, input: &AnalysisInput<'_>) -> Option<DetectedError> {
        let diff = (input.source.grammar_complexity - input.target.grammar_complexity).abs();
        if diff <= self.complexity_cutoff {
            return None;
        }

        let confidence = (diff * self.complexity_confidence_scale).min(self.complexity_confidence_cap);
        Some(
            DetectedError::new("complexity_mismatch", ErrorCategory::Style, Severity::Minor, confidence)
                .with_description(format!(
                    "Grammatical complexity differs by {:.2} between source and translation",
                    diff
                ))
                .with_affected_text(truncate_text(input.target_text, AFFECTED_TEXT_CHARS))
                .with_metadata("analyzer", self.name())
                .with_metadata("complexity_difference", diff),
        )
    }
}

impl PairAnalyzer for ContextualAnalyzer {
    fn name(&self) -> &'static str {
        "contextual"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<DetectedError> {
        self.check_register(input)
            .into_iter()
            .chain(self.check_complexity(input))
            .collect()
    }
}
