/*!
 * Validation of detection quality against human-annotated ground truth.
 *
 * # Architecture
 *
 * - `service`: Matches detected errors to ground truth and computes
 *   precision, recall, F1 and per-bucket accuracies
 * - `distribution`: Confidence histogram of the detected errors
 *
 * Matching compares error type, category and confidence only. Text spans
 * are not taken into account.
 */

pub mod distribution;
pub mod service;

// Re-export main types
pub use distribution::ConfidenceDistribution;
pub use service::{ValidationEngine, ValidationResult};
