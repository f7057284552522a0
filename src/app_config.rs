use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::detection::patterns::MLErrorPattern;
use crate::detection::types::{DEFAULT_QUALITY_THRESHOLD, Domain};
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the detector configuration: heuristic thresholds,
/// cache and concurrency settings, validation matching, and optional
/// custom pattern/terminology data loaded once at startup.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Custom pattern library replacing the built-in one
    #[serde(default)]
    pub patterns: Option<Vec<MLErrorPattern>>,

    /// Extra terminology per domain, merged into the built-in registry
    #[serde(default)]
    pub terminology: BTreeMap<Domain, Vec<String>>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Tunable constants of the heuristic analyzers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetectionThresholds {
    /// Key-term Jaccard similarity below which overlap is considered low
    #[serde(default = "default_similarity_cutoff")]
    pub similarity_cutoff: f64,

    /// Grammar complexity difference above which texts are mismatched
    #[serde(default = "default_complexity_cutoff")]
    pub complexity_cutoff: f64,

    /// Confidence of register mismatch findings
    #[serde(default = "default_register_confidence")]
    pub register_mismatch_confidence: f64,

    /// Confidence of terminology inconsistency findings
    #[serde(default = "default_terminology_confidence")]
    pub terminology_confidence: f64,

    /// Confidence of domain terminology omission findings
    #[serde(default = "default_domain_omission_confidence")]
    pub domain_omission_confidence: f64,

    /// Confidence points per unit of complexity difference
    #[serde(default = "default_complexity_confidence_scale")]
    pub complexity_confidence_scale: f64,

    /// Upper bound for complexity mismatch confidence
    #[serde(default = "default_complexity_confidence_cap")]
    pub complexity_confidence_cap: f64,

    /// Confidence attached to heuristic named entities (0-1)
    #[serde(default = "default_entity_confidence")]
    pub entity_confidence: f64,

    /// Maximum key terms kept per text
    #[serde(default = "default_max_key_terms")]
    pub max_key_terms: usize,

    /// Minimum target/source token ratio
    #[serde(default = "default_length_ratio_min")]
    pub length_ratio_min: f64,

    /// Maximum target/source token ratio
    #[serde(default = "default_length_ratio_max")]
    pub length_ratio_max: f64,

    /// Readability difference above which texts are mismatched
    #[serde(default = "default_readability_gap")]
    pub readability_gap: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            similarity_cutoff: default_similarity_cutoff(),
            complexity_cutoff: default_complexity_cutoff(),
            register_mismatch_confidence: default_register_confidence(),
            terminology_confidence: default_terminology_confidence(),
            domain_omission_confidence: default_domain_omission_confidence(),
            complexity_confidence_scale: default_complexity_confidence_scale(),
            complexity_confidence_cap: default_complexity_confidence_cap(),
            entity_confidence: default_entity_confidence(),
            max_key_terms: default_max_key_terms(),
            length_ratio_min: default_length_ratio_min(),
            length_ratio_max: default_length_ratio_max(),
            readability_gap: default_readability_gap(),
        }
    }
}

impl DetectionThresholds {
    /// Check that every value is in its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("similarity_cutoff", self.similarity_cutoff, 0.0, 1.0)?;
        check_range("entity_confidence", self.entity_confidence, 0.0, 1.0)?;
        for (field, value) in [
            ("register_mismatch_confidence", self.register_mismatch_confidence),
            ("terminology_confidence", self.terminology_confidence),
            ("domain_omission_confidence", self.domain_omission_confidence),
            ("complexity_confidence_cap", self.complexity_confidence_cap),
        ] {
            check_range(field, value, 0.0, 100.0)?;
        }
        for (field, value) in [
            ("complexity_cutoff", self.complexity_cutoff),
            ("complexity_confidence_scale", self.complexity_confidence_scale),
            ("readability_gap", self.readability_gap),
            ("length_ratio_min", self.length_ratio_min),
        ] {
            check_range(field, value, 0.0, f64::MAX)?;
        }
        if self.length_ratio_max < self.length_ratio_min {
            return Err(ConfigError::invalid(
                "length_ratio_max",
                "must not be smaller than length_ratio_min",
            ));
        }
        if self.max_key_terms == 0 {
            return Err(ConfigError::invalid("max_key_terms", "must be at least 1"));
        }
        Ok(())
    }
}

/// Detector configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Heuristic thresholds
    #[serde(default)]
    pub thresholds: DetectionThresholds,

    /// Quality threshold used when the caller does not set one
    #[serde(default = "default_quality_threshold")]
    pub default_quality_threshold: f64,

    /// Whether to cache extracted features
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Maximum number of cached feature sets
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Maximum pairs analysed concurrently by the batch runner
    #[serde(default = "default_max_concurrent_detections")]
    pub max_concurrent_detections: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            thresholds: DetectionThresholds::default(),
            default_quality_threshold: default_quality_threshold(),
            cache_enabled: true,
            cache_capacity: default_cache_capacity(),
            max_concurrent_detections: default_max_concurrent_detections(),
        }
    }
}

/// Ground-truth validation configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Two errors match only if their confidences differ by less than this
    #[serde(default = "default_confidence_window")]
    pub confidence_window: f64,

    /// Lower bound of the high-confidence bucket
    #[serde(default = "default_high_confidence_min")]
    pub high_confidence_min: f64,

    /// Lower bound of the medium-confidence bucket
    #[serde(default = "default_medium_confidence_min")]
    pub medium_confidence_min: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            confidence_window: default_confidence_window(),
            high_confidence_min: default_high_confidence_min(),
            medium_confidence_min: default_medium_confidence_min(),
        }
    }
}

fn default_similarity_cutoff() -> f64 {
    0.6
}

fn default_complexity_cutoff() -> f64 {
    2.0
}

fn default_register_confidence() -> f64 {
    85.0
}

fn default_terminology_confidence() -> f64 {
    85.0
}

fn default_domain_omission_confidence() -> f64 {
    90.0
}

fn default_complexity_confidence_scale() -> f64 {
    20.0
}

fn default_complexity_confidence_cap() -> f64 {
    95.0
}

fn default_entity_confidence() -> f64 {
    0.8
}

fn default_max_key_terms() -> usize {
    20
}

fn default_length_ratio_min() -> f64 {
    0.5
}

fn default_length_ratio_max() -> f64 {
    2.0
}

fn default_readability_gap() -> f64 {
    30.0
}

fn default_quality_threshold() -> f64 {
    DEFAULT_QUALITY_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    1024
}

fn default_max_concurrent_detections() -> usize {
    4
}

fn default_confidence_window() -> f64 {
    20.0
}

fn default_high_confidence_min() -> f64 {
    80.0
}

fn default_medium_confidence_min() -> f64 {
    60.0
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is outside {}-{}", value, min, max)))
    }
}

impl Config {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detection.thresholds.validate()?;

        check_range(
            "default_quality_threshold",
            self.detection.default_quality_threshold,
            0.0,
            100.0,
        )?;
        if self.detection.max_concurrent_detections == 0 {
            return Err(ConfigError::invalid("max_concurrent_detections", "must be at least 1"));
        }

        check_range("confidence_window", self.validation.confidence_window, 0.0, 100.0)?;
        if self.validation.medium_confidence_min > self.validation.high_confidence_min {
            return Err(ConfigError::invalid(
                "medium_confidence_min",
                "must not exceed high_confidence_min",
            ));
        }

        Ok(())
    }
}
