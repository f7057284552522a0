/*!
 * Core data types shared by every detection stage.
 *
 * - `Domain`: subject-matter context selecting terminology and patterns
 * - `ErrorCategory` / `Severity`: classification of a finding
 * - `DetectedError`: one flagged translation issue
 * - `DetectionContext`: per-call, immutable analysis settings
 */

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConfigError;
use crate::language_utils;

/// Default minimum confidence a finding needs to be reported.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 60.0;

/// Subject-matter domain of a text pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Technical,
    Medical,
    Legal,
    Financial,
    Marketing,
    #[default]
    General,
    Literary,
}

impl Domain {
    /// All known domains.
    pub const ALL: [Domain; 7] = [
        Domain::Technical,
        Domain::Medical,
        Domain::Legal,
        Domain::Financial,
        Domain::Marketing,
        Domain::General,
        Domain::Literary,
    ];

    /// Lowercase identifier, also used in taxonomy paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Technical => "technical",
            Domain::Medical => "medical",
            Domain::Legal => "legal",
            Domain::Financial => "financial",
            Domain::Marketing => "marketing",
            Domain::General => "general",
            Domain::Literary => "literary",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Domain::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| ConfigError::invalid("domain", format!("unknown domain '{}'", s)))
    }
}

/// Top-level category of a detected error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Linguistic,
    Transfer,
    Style,
    Cultural,
    Technical,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Linguistic => "linguistic",
            ErrorCategory::Transfer => "transfer",
            ErrorCategory::Style => "style",
            ErrorCategory::Cultural => "cultural",
            ErrorCategory::Technical => "technical",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a detected error.
///
/// The built-in analyzers only ever emit `Minor` and `Major`; `Critical`
/// exists so that ground truth and external collaborators can use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }

    /// MQM penalty weight of one error of this severity.
    pub fn penalty_weight(&self) -> f64 {
        match self {
            Severity::Minor => 1.0,
            Severity::Major => 5.0,
            Severity::Critical => 10.0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A translation-quality issue flagged by one of the analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedError {
    /// Identifier, assigned by the detector once all analyzers have run
    #[serde(default)]
    pub id: String,

    /// Pattern or rule identifier
    #[serde(rename = "type")]
    pub error_type: String,

    pub category: ErrorCategory,

    pub severity: Severity,

    #[serde(default)]
    pub description: String,

    /// Heuristic certainty, 0-100
    pub confidence: f64,

    /// Snippet of the text the issue refers to
    #[serde(default, rename = "affectedText", alias = "affected_text")]
    pub affected_text: String,

    /// Analysis provenance and taxonomy enrichment
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl DetectedError {
    /// Create a new error. Confidence is clamped to 0-100.
    pub fn new(error_type: &str, category: ErrorCategory, severity: Severity, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            id: String::new(),
            error_type: error_type.to_string(),
            category,
            severity,
            description: String::new(),
            confidence,
            affected_text: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_affected_text(mut self, text: impl Into<String>) -> Self {
        self.affected_text = text.into();
        self
    }

    /// Attach one metadata entry.
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Whether the taxonomy collaborator failed for this error.
    pub fn classification_failed(&self) -> bool {
        self.metadata
            .get("classification_failed")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Settings for a single detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionContext {
    #[serde(default)]
    pub domain: Domain,

    #[serde(default)]
    pub source_language: Option<String>,

    #[serde(default)]
    pub target_language: Option<String>,

    #[serde(default)]
    pub text_type: Option<String>,

    /// Findings below this confidence are dropped
    #[serde(default = "default_quality_threshold")]
    pub quality_threshold: f64,

    #[serde(default = "default_true")]
    pub enable_semantic_analysis: bool,

    #[serde(default = "default_true")]
    pub enable_contextual_analysis: bool,
}

fn default_quality_threshold() -> f64 {
    DEFAULT_QUALITY_THRESHOLD
}

fn default_true() -> bool {
    true
}

impl Default for DetectionContext {
    fn default() -> Self {
        Self::new(Domain::General)
    }
}

impl DetectionContext {
    /// Create a context for a domain with default settings.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            source_language: None,
            target_language: None,
            text_type: None,
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            enable_semantic_analysis: true,
            enable_contextual_analysis: true,
        }
    }

    pub fn with_languages(mut self, source: &str, target: &str) -> Self {
        self.source_language = Some(source.to_string());
        self.target_language = Some(target.to_string());
        self
    }

    pub fn with_text_type(mut self, text_type: &str) -> Self {
        self.text_type = Some(text_type.to_string());
        self
    }

    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    pub fn with_semantic_analysis(mut self, enabled: bool) -> Self {
        self.enable_semantic_analysis = enabled;
        self
    }

    pub fn with_contextual_analysis(mut self, enabled: bool) -> Self {
        self.enable_contextual_analysis = enabled;
        self
    }

    /// Check language codes and threshold range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, code) in [
            ("source_language", &self.source_language),
            ("target_language", &self.target_language),
        ] {
            if let Some(code) = code {
                language_utils::validate_language_code(code)
                    .map_err(|e| ConfigError::invalid(field, e.to_string()))?;
            }
        }

        if !(0.0..=100.0).contains(&self.quality_threshold) {
            return Err(ConfigError::invalid(
                "quality_threshold",
                format!("{} is outside 0-100", self.quality_threshold),
            ));
        }

        Ok(())
    }

    /// Source language hint, dropped with a warning when it is not a valid code.
    pub fn source_language_hint(&self) -> Option<&str> {
        usable_language_hint(self.source_language.as_deref())
    }

    /// Target language hint, dropped with a warning when it is not a valid code.
    pub fn target_language_hint(&self) -> Option<&str> {
        usable_language_hint(self.target_language.as_deref())
    }
}

fn usable_language_hint(code: Option<&str>) -> Option<&str> {
    let code = code?;
    match language_utils::validate_language_code(code) {
        Ok(_) => Some(code),
        Err(e) => {
            warn!("Ignoring language hint: {}", e);
            None
        }
    }
}
