/*!
 * Error pattern library and matcher.
 *
 * An `MLErrorPattern` describes a family of translation errors as a set of
 * weighted indicators over the linguistic features of a pair. The
 * `PatternMatcher` fires every applicable pattern whose summed indicator
 * weight reaches its confidence threshold.
 *
 * Patterns live in a `PatternRegistry` that is validated once at construction
 * and read-only afterwards.
 */

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::app_config::DetectionThresholds;
use crate::errors::ConfigError;

use super::analyzer::{AFFECTED_TEXT_CHARS, AnalysisInput, PairAnalyzer, truncate_text};
use super::features::{LinguisticFeatures, PosTag};
use super::semantic::jaccard_similarity;
use super::taxonomy::HierarchicalErrorPath;
use super::types::{DetectedError, Domain, ErrorCategory, Severity};

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*").unwrap());

/// Linguistic level a pattern operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Semantic,
    Syntactic,
    Pragmatic,
    Lexical,
    Morphological,
}

impl PatternType {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatternType::Semantic => ErrorCategory::Transfer,
            PatternType::Syntactic => ErrorCategory::Linguistic,
            PatternType::Pragmatic => ErrorCategory::Cultural,
            PatternType::Lexical => ErrorCategory::Linguistic,
            PatternType::Morphological => ErrorCategory::Linguistic,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            PatternType::Semantic | PatternType::Syntactic => Severity::Major,
            PatternType::Pragmatic | PatternType::Lexical | PatternType::Morphological => Severity::Minor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Semantic => "semantic",
            PatternType::Syntactic => "syntactic",
            PatternType::Pragmatic => "pragmatic",
            PatternType::Lexical => "lexical",
            PatternType::Morphological => "morphological",
        }
    }
}

/// Feature a pattern needs in the source before it is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureRequirement {
    Tokens,
    Sentences,
    KeyTerms,
    Entities,
    PosTags,
    Numerals,
}

impl FeatureRequirement {
    pub fn is_satisfied_by(&self, features: &LinguisticFeatures) -> bool {
        match self {
            FeatureRequirement::Tokens => !features.tokens.is_empty(),
            FeatureRequirement::Sentences => !features.sentences.is_empty(),
            FeatureRequirement::KeyTerms => !features.key_terms.is_empty(),
            FeatureRequirement::Entities => !features.entities.is_empty(),
            FeatureRequirement::PosTags => !features.pos_tags.is_empty(),
            FeatureRequirement::Numerals => features.pos_tags.iter().any(|(_, tag)| *tag == PosTag::Numeral),
        }
    }
}

/// Observable signal of a translation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorIndicator {
    LowSemanticOverlap,
    EntityCountMismatch,
    RegisterShift,
    ComplexityGap,
    LengthRatioOutOfRange,
    SentenceCountMismatch,
    UntranslatedText,
    NumberMismatch,
    ReadabilityGap,
}

impl ErrorIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorIndicator::LowSemanticOverlap => "low_semantic_overlap",
            ErrorIndicator::EntityCountMismatch => "entity_count_mismatch",
            ErrorIndicator::RegisterShift => "register_shift",
            ErrorIndicator::ComplexityGap => "complexity_gap",
            ErrorIndicator::LengthRatioOutOfRange => "length_ratio_out_of_range",
            ErrorIndicator::SentenceCountMismatch => "sentence_count_mismatch",
            ErrorIndicator::UntranslatedText => "untranslated_text",
            ErrorIndicator::NumberMismatch => "number_mismatch",
            ErrorIndicator::ReadabilityGap => "readability_gap",
        }
    }

    /// Whether the indicator fires for this pair.
    pub fn fires(&self, input: &AnalysisInput<'_>, thresholds: &DetectionThresholds) -> bool {
        let (source, target) = (input.source, input.target);
        match self {
            ErrorIndicator::LowSemanticOverlap => {
                jaccard_similarity(&source.key_term_set(), &target.key_term_set()) < thresholds.similarity_cutoff
            }
            ErrorIndicator::EntityCountMismatch => source.entities.len() != target.entities.len(),
            ErrorIndicator::RegisterShift => source.register_level != target.register_level,
            ErrorIndicator::ComplexityGap => {
                (source.grammar_complexity - target.grammar_complexity).abs() > thresholds.complexity_cutoff
            }
            ErrorIndicator::LengthRatioOutOfRange => {
                if source.tokens.is_empty() {
                    return false;
                }
                let ratio = target.tokens.len() as f64 / source.tokens.len() as f64;
                ratio < thresholds.length_ratio_min || ratio > thresholds.length_ratio_max
            }
            ErrorIndicator::SentenceCountMismatch => source.sentences.len() != target.sentences.len(),
            ErrorIndicator::UntranslatedText => {
                let normalized_source = normalize_for_comparison(input.source_text);
                !normalized_source.is_empty() && normalized_source == normalize_for_comparison(input.target_text)
            }
            ErrorIndicator::NumberMismatch => {
                let target_numbers = numbers(input.target_text);
                numbers(input.source_text)
                    .iter()
                    .any(|n| !target_numbers.contains(n))
            }
            ErrorIndicator::ReadabilityGap => {
                (source.readability_score - target.readability_score).abs() > thresholds.readability_gap
            }
        }
    }
}

fn normalize_for_comparison(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbers of a text with separators dropped, so "1,000" and "1.000" compare equal.
fn numbers(text: &str) -> HashSet<String> {
    NUMBER_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())
        .collect()
}

/// An indicator and the weight it contributes when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRule {
    pub indicator: ErrorIndicator,
    pub weight: f64,
}

/// MQM node a pattern reports under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqmMapping {
    pub dimension: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub leaf_category: String,
}

impl MqmMapping {
    pub fn new(dimension: &str, category: &str, subcategory: &str, leaf_category: &str) -> Self {
        Self {
            dimension: dimension.to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            leaf_category: leaf_category.to_string(),
        }
    }

    pub fn to_path(&self, domain: Domain) -> HierarchicalErrorPath {
        HierarchicalErrorPath::new(
            &self.dimension,
            &self.category,
            &self.subcategory,
            &self.leaf_category,
            domain,
        )
    }
}

/// A learned or curated error pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MLErrorPattern {
    pub pattern_id: String,
    pub pattern_type: PatternType,
    #[serde(default)]
    pub required_features: Vec<FeatureRequirement>,
    pub indicators: Vec<IndicatorRule>,
    /// Minimum match confidence, 0-1
    pub confidence_threshold: f64,
    #[serde(default)]
    pub domain_specific: bool,
    #[serde(default)]
    pub applicable_domains: Vec<Domain>,
    pub mqm_mapping: MqmMapping,
}

impl MLErrorPattern {
    pub fn applies_to(&self, domain: Domain) -> bool {
        !self.domain_specific || self.applicable_domains.contains(&domain)
    }

    pub fn requirements_met(&self, features: &LinguisticFeatures) -> bool {
        self.required_features.iter().all(|r| r.is_satisfied_by(features))
    }
}

/// Validated, immutable set of patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRegistry {
    patterns: Vec<MLErrorPattern>,
}

impl PatternRegistry {
    /// Build a registry, rejecting duplicate ids and thresholds outside 0-1.
    pub fn from_patterns(patterns: Vec<MLErrorPattern>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.pattern_id.as_str()) {
                return Err(ConfigError::DuplicatePattern(pattern.pattern_id.clone()));
            }
            if !(0.0..=1.0).contains(&pattern.confidence_threshold) {
                return Err(ConfigError::invalid(
                    "confidence_threshold",
                    format!(
                        "pattern '{}' has threshold {} outside 0-1",
                        pattern.pattern_id, pattern.confidence_threshold
                    ),
                ));
            }
            if let Some(rule) = pattern.indicators.iter().find(|r| !r.weight.is_finite() || r.weight < 0.0) {
                return Err(ConfigError::invalid(
                    "weight",
                    format!("pattern '{}' has invalid weight {}", pattern.pattern_id, rule.weight),
                ));
            }
        }
        Ok(Self { patterns })
    }

    /// Parse a JSON array of patterns.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let patterns: Vec<MLErrorPattern> = serde_json::from_str(json)?;
        Self::from_patterns(patterns)
    }

    pub fn patterns(&self) -> &[MLErrorPattern] {
        &self.patterns
    }

    pub fn get(&self, pattern_id: &str) -> Option<&MLErrorPattern> {
        self.patterns.iter().find(|p| p.pattern_id == pattern_id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The built-in pattern library.
    pub fn default_library() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::default_library()
    }
}

fn rule(indicator: ErrorIndicator, weight: f64) -> IndicatorRule {
    IndicatorRule { indicator, weight }
}

fn default_patterns() -> Vec<MLErrorPattern> {
    use ErrorIndicator::*;

    vec![
        MLErrorPattern {
            pattern_id: "semantic_drift".to_string(),
            pattern_type: PatternType::Semantic,
            required_features: vec![FeatureRequirement::KeyTerms],
            indicators: vec![
                rule(LowSemanticOverlap, 0.6),
                rule(ReadabilityGap, 0.2),
                rule(ComplexityGap, 0.2),
            ],
            confidence_threshold: 0.8,
            domain_specific: false,
            applicable_domains: Vec::new(),
            mqm_mapping: MqmMapping::new("accuracy", "mistranslation", "semantic", "meaning_shift"),
        },
        MLErrorPattern {
            pattern_id: "omitted_content".to_string(),
            pattern_type: PatternType::Semantic,
            required_features: vec![FeatureRequirement::Tokens, FeatureRequirement::Sentences],
            indicators: vec![
                rule(LengthRatioOutOfRange, 0.5),
                rule(SentenceCountMismatch, 0.3),
                rule(EntityCountMismatch, 0.3),
            ],
            confidence_threshold: 0.7,
            domain_specific: false,
            applicable_domains: Vec::new(),
            mqm_mapping: MqmMapping::new("accuracy", "omission", "content", "omitted_content"),
        },
        MLErrorPattern {
            pattern_id: "untranslated_text".to_string(),
            pattern_type: PatternType::Lexical,
            required_features: vec![FeatureRequirement::Tokens],
            indicators: vec![rule(UntranslatedText, 1.0)],
            confidence_threshold: 0.9,
            domain_specific: false,
            applicable_domains: Vec::new(),
            mqm_mapping: MqmMapping::new("accuracy", "untranslated", "text", "untranslated_segment"),
        },
        MLErrorPattern {
            pattern_id: "numeric_inconsistency".to_string(),
            pattern_type: PatternType::Lexical,
            required_features: vec![FeatureRequirement::Numerals],
            indicators: vec![rule(NumberMismatch, 1.0)],
            confidence_threshold: 0.9,
            domain_specific: false,
            applicable_domains: Vec::new(),
            mqm_mapping: MqmMapping::new("locale_convention", "number_format", "numeric_value", "number_mismatch"),
        },
        MLErrorPattern {
            pattern_id: "syntactic_restructuring".to_string(),
            pattern_type: PatternType::Syntactic,
            required_features: vec![FeatureRequirement::PosTags, FeatureRequirement::Sentences],
            indicators: vec![rule(ComplexityGap, 0.5), rule(SentenceCountMismatch, 0.4)],
            confidence_threshold: 0.8,
            domain_specific: false,
            applicable_domains: Vec::new(),
            mqm_mapping: MqmMapping::new("fluency", "grammar", "structure", "sentence_structure"),
        },
        MLErrorPattern {
            pattern_id: "register_shift".to_string(),
            pattern_type: PatternType::Pragmatic,
            required_features: vec![FeatureRequirement::Tokens],
            indicators: vec![rule(RegisterShift, 0.7), rule(ReadabilityGap, 0.3)],
            confidence_threshold: 0.7,
            domain_specific: true,
            applicable_domains: vec![Domain::Legal, Domain::Financial, Domain::Medical],
            mqm_mapping: MqmMapping::new("style", "register", "formality", "register_shift"),
        },
        MLErrorPattern {
            pattern_id: "inflection_loss".to_string(),
            pattern_type: PatternType::Morphological,
            required_features: vec![FeatureRequirement::PosTags],
            indicators: vec![rule(ComplexityGap, 0.4), rule(ReadabilityGap, 0.4)],
            confidence_threshold: 0.8,
            domain_specific: false,
            applicable_domains: Vec::new(),
            mqm_mapping: MqmMapping::new("fluency", "grammar", "morphology", "inflection"),
        },
    ]
}

/// Evaluates the registry's patterns against a pair.
pub struct PatternMatcher {
    registry: Arc<PatternRegistry>,
    thresholds: DetectionThresholds,
}

impl PatternMatcher {
    pub fn new(registry: Arc<PatternRegistry>, thresholds: DetectionThresholds) -> Self {
        Self { registry, thresholds }
    }

    /// Match one pattern; `None` when it does not apply or stays below its threshold.
    pub fn match_pattern(&self, pattern: &MLErrorPattern, input: &AnalysisInput<'_>) -> Option<DetectedError> {
        let domain = input.context.domain;
        if !pattern.applies_to(domain) || !pattern.requirements_met(input.source) {
            return None;
        }

        let fired: Vec<&IndicatorRule> = pattern
            .indicators
            .iter()
            .filter(|r| r.indicator.fires(input, &self.thresholds))
            .collect();
        let match_confidence = fired.iter().map(|r| r.weight).sum::<f64>().min(1.0);

        if fired.is_empty() || match_confidence < pattern.confidence_threshold {
            return None;
        }

        let fired_names: Vec<&str> = fired.iter().map(|r| r.indicator.as_str()).collect();
        debug!(
            "Pattern {} matched with {:.2} ({})",
            pattern.pattern_id,
            match_confidence,
            fired_names.join(", ")
        );

        Some(
            DetectedError::new(
                &pattern.pattern_id,
                pattern.pattern_type.category(),
                pattern.pattern_type.severity(),
                (match_confidence * 100.0).round(),
            )
            .with_description(format!(
                "Pattern '{}' ({}) matched: {}",
                pattern.pattern_id,
                pattern.pattern_type.as_str(),
                fired_names.join(", ")
            ))
            .with_affected_text(truncate_text(input.target_text, AFFECTED_TEXT_CHARS))
            .with_metadata("analyzer", self.name())
            .with_metadata("pattern_type", pattern.pattern_type.as_str())
            .with_metadata("fired_indicators", json!(fired_names))
            .with_metadata("mqm_mapping", json!(pattern.mqm_mapping.to_path(domain))),
        )
    }
}

impl PairAnalyzer for PatternMatcher {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<DetectedError> {
        self.registry
            .patterns()
            .iter()
            .filter_map(|pattern| self.match_pattern(pattern, input))
            .collect()
    }
}
