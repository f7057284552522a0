/*!
 * Translation error detection.
 *
 * This module contains the detection pipeline:
 * - Linguistic feature extraction (`features`)
 * - Pattern, semantic, contextual and domain analyzers
 * - Taxonomy classification (`taxonomy`)
 * - Confidence filtering and ranking (`filter`)
 * - The `ErrorDetector` engine and its concurrent `BatchDetector`
 */

pub mod analyzer;
pub mod batch;
pub mod cache;
pub mod contextual;
pub mod core;
pub mod domain;
pub mod features;
pub mod filter;
pub mod patterns;
pub mod report;
pub mod semantic;
pub mod taxonomy;
pub mod types;

pub use analyzer::{AnalysisInput, PairAnalyzer};
pub use batch::{BatchDetector, PairResult, TranslationPair};
pub use cache::FeatureCache;
pub use contextual::ContextualAnalyzer;
pub use self::core::{DetectionReport, ErrorDetector, ErrorDetectorBuilder};
pub use domain::{DomainSpecificAnalyzer, TerminologyRegistry};
pub use features::{FeatureExtractor, HeuristicAnalyzer, LinguisticAnalyzer, LinguisticFeatures};
pub use filter::ConfidenceFilter;
pub use patterns::{MLErrorPattern, PatternMatcher, PatternRegistry, PatternType};
pub use report::QualityReport;
pub use semantic::{SemanticAnalyzer, jaccard_similarity};
pub use taxonomy::{HierarchicalErrorPath, MqmTaxonomy, TaxonomyClassifier, TaxonomyProvider, TaxonomyRecommendation};
pub use types::{DetectedError, DetectionContext, Domain, ErrorCategory, Severity};
