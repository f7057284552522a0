/*!
 * # transqa - Translation Quality Assurance
 *
 * A Rust library for automatic detection of translation-quality errors in
 * bilingual text pairs.
 *
 * ## Features
 *
 * - Linguistic feature extraction behind a pluggable NLP capability trait
 * - Error detection with several analyzers:
 *   - Weighted error patterns
 *   - Semantic overlap, entity and terminology consistency
 *   - Register and grammatical complexity mismatches
 *   - Domain terminology omissions
 * - Classification into the hierarchical MQM taxonomy
 * - Confidence filtering and ranking
 * - Validation against annotated ground truth (precision, recall, F1)
 * - Concurrent batch detection
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `detection`: The detection pipeline:
 *   - `detection::features`: Linguistic feature extraction
 *   - `detection::patterns`: Pattern library and matcher
 *   - `detection::semantic`, `detection::contextual`, `detection::domain`: Pair analyzers
 *   - `detection::taxonomy`: MQM classification
 *   - `detection::core`: The `ErrorDetector` engine
 *   - `detection::batch`: Concurrent batch detection
 * - `validation`: Ground-truth validation
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the library
 *
 * ## Example
 *
 * ```
 * use transqa::{DetectionContext, Domain, ErrorDetector};
 *
 * let detector = ErrorDetector::with_defaults();
 * let context = DetectionContext::new(Domain::Technical).with_languages("en", "es");
 * let errors = detector.detect_errors(
 *     "The system uses AES encryption.",
 *     "El sistema protege los datos.",
 *     &context,
 * );
 * assert!(errors.iter().any(|e| e.error_type == "domain_terminology_omission"));
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod detection;
pub mod errors;
pub mod language_utils;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use detection::{
    BatchDetector, DetectedError, DetectionContext, DetectionReport, Domain, ErrorCategory, ErrorDetector,
    ErrorDetectorBuilder, QualityReport, Severity, TranslationPair,
};
pub use errors::{AppError, ClassificationError, ConfigError, DetectionError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1};
pub use validation::{ValidationEngine, ValidationResult};
