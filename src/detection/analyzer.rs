/*!
 * Common seam for the pair analyzers (pattern, semantic, contextual, domain).
 */

use super::features::LinguisticFeatures;
use super::types::{DetectedError, DetectionContext};

/// Everything an analyzer sees for one source/target pair.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub source_text: &'a str,
    pub target_text: &'a str,
    pub source: &'a LinguisticFeatures,
    pub target: &'a LinguisticFeatures,
    pub context: &'a DetectionContext,
}

/// A detection stage that inspects one pair and reports findings.
pub trait PairAnalyzer: Send + Sync {
    /// Name recorded as `analyzer` in each finding's metadata.
    fn name(&self) -> &'static str;

    /// Analyze one pair. Must be pure: same input, same output.
    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<DetectedError>;
}

/// Characters of target text kept in a finding's `affected_text`.
pub const AFFECTED_TEXT_CHARS: usize = 100;

/// Cut `text` to at most `max_chars` characters, adding an ellipsis when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
