/*!
 * MQM taxonomy classification.
 *
 * Every finding is sent to a `TaxonomyProvider`, which recommends a node of
 * the hierarchical MQM taxonomy (dimension → category → subcategory → leaf).
 * The recommendation is merged into the finding's metadata. A failing
 * provider call only affects the finding it was made for.
 */

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::ClassificationError;

use super::analyzer::truncate_text;
use super::types::{DetectedError, Domain};

/// Characters of source text passed to the provider.
const SOURCE_SNIPPET_CHARS: usize = 200;

/// Location of one finding in the MQM taxonomy.
///
/// `full_path` is derived from the other parts and cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PathParts")]
pub struct HierarchicalErrorPath {
    dimension: String,
    category: String,
    subcategory: String,
    leaf_category: String,
    domain: Domain,
    full_path: String,
}

#[derive(Deserialize)]
struct PathParts {
    dimension: String,
    category: String,
    #[serde(default)]
    subcategory: String,
    #[serde(default)]
    leaf_category: String,
    #[serde(default)]
    domain: Domain,
}

impl From<PathParts> for HierarchicalErrorPath {
    fn from(parts: PathParts) -> Self {
        Self::new(
            &parts.dimension,
            &parts.category,
            &parts.subcategory,
            &parts.leaf_category,
            parts.domain,
        )
    }
}

impl HierarchicalErrorPath {
    pub fn new(dimension: &str, category: &str, subcategory: &str, leaf_category: &str, domain: Domain) -> Self {
        let full_path = [dimension, category, subcategory, leaf_category, domain.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/");

        Self {
            dimension: dimension.to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            leaf_category: leaf_category.to_string(),
            domain,
            full_path,
        }
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn leaf_category(&self) -> &str {
        &self.leaf_category
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// `dimension/category/subcategory/leaf/domain`, empty parts skipped.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }
}

/// A provider's answer for one finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyRecommendation {
    pub path: HierarchicalErrorPath,
    /// Certainty of the recommendation, 0-100
    pub confidence: f64,
    pub reasoning: String,
}

/// External taxonomy classification collaborator.
pub trait TaxonomyProvider: Send + Sync {
    /// Recommend a taxonomy node for one finding
    ///
    /// # Arguments
    /// * `description` - Description of the finding
    /// * `source_text` - Snippet of the source text
    /// * `target_text` - Text the finding refers to
    /// * `domain` - Domain of the pair
    ///
    /// # Returns
    /// * `Result<TaxonomyRecommendation, ClassificationError>` - The recommended node or an error
    fn recommend_category(
        &self,
        description: &str,
        source_text: &str,
        target_text: &str,
        domain: Domain,
    ) -> Result<TaxonomyRecommendation, ClassificationError>;
}

struct KeywordRule {
    keywords: &'static [&'static str],
    path: [&'static str; 4],
    confidence: f64,
}

const MQM_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["terminology"],
        path: ["terminology", "inconsistent_with_termbase", "domain_terminology", "missing_term"],
        confidence: 90.0,
    },
    KeywordRule {
        keywords: &["entity", "omitted", "omission", "not found"],
        path: ["accuracy", "omission", "content", "omitted_content"],
        confidence: 85.0,
    },
    KeywordRule {
        keywords: &["untranslated", "identical"],
        path: ["accuracy", "untranslated", "text", "untranslated_segment"],
        confidence: 85.0,
    },
    KeywordRule {
        keywords: &["register", "formality", "tone"],
        path: ["style", "register", "formality", "register_shift"],
        confidence: 80.0,
    },
    KeywordRule {
        keywords: &["number", "numeric", "currency", "date"],
        path: ["locale_convention", "number_format", "numeric_value", "number_mismatch"],
        confidence: 80.0,
    },
    KeywordRule {
        keywords: &["complexity", "grammar", "grammatical", "syntactic", "inflection"],
        path: ["fluency", "grammar", "structure", "complexity_shift"],
        confidence: 75.0,
    },
    KeywordRule {
        keywords: &["semantic", "overlap", "meaning", "mistranslation", "drift"],
        path: ["accuracy", "mistranslation", "semantic", "meaning_shift"],
        confidence: 80.0,
    },
];

const FALLBACK_PATH: [&str; 4] = ["accuracy", "other", "general", "unclassified"];
const FALLBACK_CONFIDENCE: f64 = 50.0;

/// Built-in provider mapping description keywords to MQM nodes.
///
/// The keyword mentioned earliest in the description wins; rule order only
/// breaks ties at the same position.
#[derive(Debug, Clone, Copy, Default)]
pub struct MqmTaxonomy;

impl TaxonomyProvider for MqmTaxonomy {
    fn recommend_category(
        &self,
        description: &str,
        _source_text: &str,
        _target_text: &str,
        domain: Domain,
    ) -> Result<TaxonomyRecommendation, ClassificationError> {
        let lowered = description.to_lowercase();
        let matched = MQM_RULES
            .iter()
            .enumerate()
            .flat_map(|(order, rule)| {
                let lowered = &lowered;
                rule.keywords
                    .iter()
                    .filter_map(move |keyword| lowered.find(keyword).map(|at| (at, order, rule, *keyword)))
            })
            .min_by_key(|(at, order, _, _)| (*at, *order))
            .map(|(_, _, rule, keyword)| (rule, keyword));

        let recommendation = match matched {
            Some((rule, keyword)) => {
                let [dimension, category, subcategory, leaf] = rule.path;
                TaxonomyRecommendation {
                    path: HierarchicalErrorPath::new(dimension, category, subcategory, leaf, domain),
                    confidence: rule.confidence,
                    reasoning: format!("Description mentions '{}'", keyword),
                }
            }
            None => {
                let [dimension, category, subcategory, leaf] = FALLBACK_PATH;
                TaxonomyRecommendation {
                    path: HierarchicalErrorPath::new(dimension, category, subcategory, leaf, domain),
                    confidence: FALLBACK_CONFIDENCE,
                    reasoning: "No keyword rule matched".to_string(),
                }
            }
        };

        Ok(recommendation)
    }
}

/// Enriches findings with taxonomy recommendations.
#[derive(Clone)]
pub struct TaxonomyClassifier {
    provider: Arc<dyn TaxonomyProvider>,
}

impl TaxonomyClassifier {
    pub fn new(provider: Arc<dyn TaxonomyProvider>) -> Self {
        Self { provider }
    }

    /// Classify every finding in place.
    ///
    /// Only `metadata` is touched. A failed call marks its finding with
    /// `classification_failed` and `classification_error`.
    pub fn classify(&self, errors: &mut [DetectedError], source_text: &str, domain: Domain) {
        let snippet = truncate_text(source_text, SOURCE_SNIPPET_CHARS);

        for error in errors.iter_mut() {
            match self.provider.recommend_category(
                &error.description,
                &snippet,
                &error.affected_text,
                domain,
            ) {
                Ok(recommendation) => {
                    debug!(
                        "Classified {} as {}",
                        error.error_type,
                        recommendation.path.full_path()
                    );
                    error.metadata.insert("hierarchical_path".to_string(), json!(recommendation.path));
                    error
                        .metadata
                        .insert("classification_confidence".to_string(), json!(recommendation.confidence));
                    error
                        .metadata
                        .insert("classification_reasoning".to_string(), json!(recommendation.reasoning));
                }
                Err(e) => {
                    warn!("Taxonomy classification failed for {}: {}", error.error_type, e);
                    error.metadata.insert("classification_failed".to_string(), json!(true));
                    error.metadata.insert("classification_error".to_string(), json!(e.to_string()));
                }
            }
        }
    }
}

impl Default for TaxonomyClassifier {
    fn default() -> Self {
        Self::new(Arc::new(MqmTaxonomy))
    }
}
