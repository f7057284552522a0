/*!
 * Semantic consistency checks between source and target.
 *
 * - Term overlap: Jaccard similarity of key-term sets
 * - Entity consistency: every source entity should reappear in the target
 * - Terminology consistency: domain terms among the source key terms
 *   should also be among the target key terms
 */

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use serde_json::json;

use crate::app_config::DetectionThresholds;

use super::analyzer::{AFFECTED_TEXT_CHARS, AnalysisInput, PairAnalyzer, truncate_text};
use super::domain::TerminologyRegistry;
use super::types::{DetectedError, ErrorCategory, Severity};

/// Jaccard similarity of two sets, in 0-1. Two empty sets are identical (1.0).
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Semantic analyzer over key terms, entities and domain terminology.
pub struct SemanticAnalyzer {
    terminology: Arc<TerminologyRegistry>,
    similarity_cutoff: f64,
    terminology_confidence: f64,
}

impl SemanticAnalyzer {
    pub fn new(terminology: Arc<TerminologyRegistry>, thresholds: &DetectionThresholds) -> Self {
        Self {
            terminology,
            similarity_cutoff: thresholds.similarity_cutoff,
            terminology_confidence: thresholds.terminology_confidence,
        }
    }

    /// Low key-term overlap.
    pub fn check_term_overlap(&self, input: &AnalysisInput<'_>) -> Option<DetectedError> {
        let similarity = jaccard_similarity(&input.source.key_term_set(), &input.target.key_term_set());
        if similarity >= self.similarity_cutoff {
            return None;
        }

        Some(
            DetectedError::new(
                "semantic_inconsistency",
                ErrorCategory::Transfer,
                Severity::Major,
                (1.0 - similarity) * 100.0,
            )
            .with_description(format!(
                "Low semantic overlap between source and target (similarity {:.2})",
                similarity
            ))
            .with_affected_text(truncate_text(input.target_text, AFFECTED_TEXT_CHARS))
            .with_metadata("analyzer", self.name())
            .with_metadata("check", "term_overlap")
            .with_metadata("similarity", similarity),
        )
    }

    /// Source entities with no same-typed counterpart in the target.
    pub fn check_entities(&self, input: &AnalysisInput<'_>) -> Vec<DetectedError> {
        input
            .source
            .entities
            .iter()
            .filter(|entity| {
                let needle = entity.text.to_lowercase();
                !input.target.entities.iter().any(|candidate| {
                    candidate.entity_type == entity.entity_type
                        && candidate.text.to_lowercase().contains(&needle)
                })
            })
            .map(|entity| {
                DetectedError::new(
                    "entity_omission",
                    ErrorCategory::Transfer,
                    Severity::Major,
                    entity.confidence * 100.0,
                )
                .with_description(format!(
                    "Named entity '{}' ({:?}) not found in translation",
                    entity.text, entity.entity_type
                ))
                .with_affected_text(entity.text.clone())
                .with_metadata("analyzer", self.name())
                .with_metadata("check", "entity_consistency")
                .with_metadata("entity", json!(entity))
            })
            .collect()
    }

    /// Domain terms among the source key terms that are missing from the target key terms.
    pub fn check_terminology(&self, input: &AnalysisInput<'_>) -> Option<DetectedError> {
        let domain = input.context.domain;
        let domain_terms = self.terminology.terms(domain)?;

        let target_terms: HashSet<&str> = input
            .target
            .key_terms
            .iter()
            .map(String::as_str)
            .filter(|t| domain_terms.contains(*t))
            .collect();

        let missing: Vec<&str> = input
            .source
            .key_terms
            .iter()
            .map(String::as_str)
            .filter(|t| domain_terms.contains(*t) && !target_terms.contains(t))
            .collect();

        if missing.is_empty() {
            return None;
        }

        Some(
            DetectedError::new(
                "terminology_inconsistency",
                ErrorCategory::Linguistic,
                Severity::Major,
                self.terminology_confidence,
            )
            .with_description(format!(
                "Inconsistent {} terminology, missing in translation: {}",
                domain,
                missing.join(", ")
            ))
            .with_affected_text(missing.join(", "))
            .with_metadata("analyzer", self.name())
            .with_metadata("check", "terminology_consistency")
            .with_metadata("missing_terms", json!(missing)),
        )
    }
}

impl PairAnalyzer for SemanticAnalyzer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<DetectedError> {
        let mut errors = Vec::new();
        errors.extend(self.check_term_overlap(input));
        errors.extend(self.check_entities(input));
        errors.extend(self.check_terminology(input));
        errors
    }
}
