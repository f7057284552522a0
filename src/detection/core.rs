/*!
 * Top-level error detection engine.
 *
 * `ErrorDetector` wires the pipeline together:
 * feature extraction → pattern / semantic / contextual / domain analysis →
 * id assignment → taxonomy classification → confidence filtering.
 *
 * Everything the detector depends on is injected through
 * `ErrorDetectorBuilder` and is immutable once built, so one detector can be
 * shared across threads.
 */

use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;
use uuid::Uuid;

use crate::app_config::{Config, DetectionConfig};
use crate::errors::ConfigError;

use super::analyzer::{AnalysisInput, PairAnalyzer};
use super::cache::FeatureCache;
use super::contextual::ContextualAnalyzer;
use super::domain::{DomainSpecificAnalyzer, TerminologyRegistry};
use super::features::{FeatureExtractor, HeuristicAnalyzer, LinguisticAnalyzer, LinguisticFeatures};
use super::filter::ConfidenceFilter;
use super::patterns::{PatternMatcher, PatternRegistry};
use super::semantic::SemanticAnalyzer;
use super::taxonomy::{MqmTaxonomy, TaxonomyClassifier, TaxonomyProvider};
use super::types::{DetectedError, DetectionContext};

/// Findings of one pair together with the features they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub errors: Vec<DetectedError>,
    pub source_features: LinguisticFeatures,
    pub target_features: LinguisticFeatures,
}

/// Translation error detector.
pub struct ErrorDetector {
    extractor: FeatureExtractor,
    cache: Option<FeatureCache>,
    pattern_matcher: PatternMatcher,
    semantic: SemanticAnalyzer,
    contextual: ContextualAnalyzer,
    domain: DomainSpecificAnalyzer,
    classifier: TaxonomyClassifier,
    patterns: Arc<PatternRegistry>,
    terminology: Arc<TerminologyRegistry>,
    config: DetectionConfig,
}

impl ErrorDetector {
    pub fn builder() -> ErrorDetectorBuilder {
        ErrorDetectorBuilder::new()
    }

    /// Detector with the built-in patterns, terminology and taxonomy.
    pub fn with_defaults() -> Self {
        let config = DetectionConfig::default();
        let patterns = Arc::new(PatternRegistry::default_library());
        let terminology = Arc::new(TerminologyRegistry::builtin());
        let analyzer: Arc<dyn LinguisticAnalyzer> =
            Arc::new(HeuristicAnalyzer::new(config.thresholds.entity_confidence));

        Self::assemble(config, patterns, terminology, analyzer, Arc::new(MqmTaxonomy))
    }

    fn assemble(
        config: DetectionConfig,
        patterns: Arc<PatternRegistry>,
        terminology: Arc<TerminologyRegistry>,
        analyzer: Arc<dyn LinguisticAnalyzer>,
        taxonomy: Arc<dyn TaxonomyProvider>,
    ) -> Self {
        let thresholds = &config.thresholds;
        Self {
            extractor: FeatureExtractor::new(analyzer, thresholds.max_key_terms),
            cache: config.cache_enabled.then(|| FeatureCache::new(config.cache_capacity)),
            pattern_matcher: PatternMatcher::new(patterns.clone(), thresholds.clone()),
            semantic: SemanticAnalyzer::new(terminology.clone(), thresholds),
            contextual: ContextualAnalyzer::new(thresholds),
            domain: DomainSpecificAnalyzer::new(terminology.clone(), thresholds.domain_omission_confidence),
            classifier: TaxonomyClassifier::new(taxonomy),
            patterns,
            terminology,
            config,
        }
    }

    /// Detect translation errors in a source/target pair.
    ///
    /// Never fails: empty or degenerate input yields no findings. The result
    /// only holds findings with `confidence >= context.quality_threshold`,
    /// highest confidence first.
    pub fn detect_errors(&self, source: &str, target: &str, context: &DetectionContext) -> Vec<DetectedError> {
        self.analyze(source, target, context).errors
    }

    /// Like `detect_errors`, also returning the extracted features.
    pub fn analyze(&self, source: &str, target: &str, context: &DetectionContext) -> DetectionReport {
        let source_features = self.features(source, context.source_language_hint());
        let target_features = self.features(target, context.target_language_hint());

        let input = AnalysisInput {
            source_text: source,
            target_text: target,
            source: &source_features,
            target: &target_features,
            context,
        };

        let mut errors = Vec::new();
        self.run(&self.pattern_matcher, &input, &mut errors);
        if context.enable_semantic_analysis {
            self.run(&self.semantic, &input, &mut errors);
        }
        if context.enable_contextual_analysis {
            self.run(&self.contextual, &input, &mut errors);
        }
        self.run(&self.domain, &input, &mut errors);

        assign_ids(&mut errors, source, target);
        self.classifier.classify(&mut errors, source, context.domain);

        let found = errors.len();
        let errors = ConfidenceFilter::new(context.quality_threshold).apply(errors);
        info!(
            "Detected {} errors ({} below threshold {}) in {} pair",
            errors.len(),
            found - errors.len(),
            context.quality_threshold,
            context.domain
        );

        DetectionReport {
            errors,
            source_features: Arc::unwrap_or_clone(source_features),
            target_features: Arc::unwrap_or_clone(target_features),
        }
    }

    fn run(&self, analyzer: &dyn PairAnalyzer, input: &AnalysisInput<'_>, errors: &mut Vec<DetectedError>) {
        let found = analyzer.analyze(input);
        debug!("Analyzer '{}' reported {} findings", analyzer.name(), found.len());
        errors.extend(found);
    }

    /// Extract features, going through the cache when enabled.
    pub fn features(&self, text: &str, language: Option<&str>) -> Arc<LinguisticFeatures> {
        match &self.cache {
            Some(cache) => cache.get_or_insert_with(text, language, || self.extractor.extract(text, language)),
            None => Arc::new(self.extractor.extract(text, language)),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn terminology(&self) -> &TerminologyRegistry {
        &self.terminology
    }

    /// Feature cache statistics (hits, misses, hit rate), if caching is enabled.
    pub fn cache_stats(&self) -> Option<(usize, usize, f64)> {
        self.cache.as_ref().map(FeatureCache::stats)
    }
}

impl Default for ErrorDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Deterministic ids: the same pair always yields the same ids.
fn assign_ids(errors: &mut [DetectedError], source: &str, target: &str) {
    for (index, error) in errors.iter_mut().enumerate() {
        let name = format!("{}\u{1f}{}\u{1f}{}\u{1f}{}", source, target, index, error.error_type);
        error.id = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string();
    }
}

/// Builder for `ErrorDetector`.
#[derive(Default)]
pub struct ErrorDetectorBuilder {
    config: Config,
    patterns: Option<PatternRegistry>,
    terminology: Option<TerminologyRegistry>,
    analyzer: Option<Arc<dyn LinguisticAnalyzer>>,
    taxonomy: Option<Arc<dyn TaxonomyProvider>>,
    cache_enabled: Option<bool>,
}

impl ErrorDetectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given configuration, including its custom patterns and terminology.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the pattern library.
    pub fn with_patterns(mut self, patterns: PatternRegistry) -> Self {
        self.patterns = Some(patterns);
        self
    }

    /// Replace the built-in terminology registry.
    pub fn with_terminology(mut self, terminology: TerminologyRegistry) -> Self {
        self.terminology = Some(terminology);
        self
    }

    /// Plug in another NLP backend.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Plug in another taxonomy provider.
    pub fn with_taxonomy(mut self, taxonomy: Arc<dyn TaxonomyProvider>) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Override the configured cache switch.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ErrorDetector, ConfigError> {
        self.config.validate()?;

        let Config {
            detection: mut detection_config,
            patterns: configured_patterns,
            terminology: extra_terms,
            ..
        } = self.config;

        if let Some(enabled) = self.cache_enabled {
            detection_config.cache_enabled = enabled;
        }

        let patterns = match (self.patterns, configured_patterns) {
            (Some(registry), _) => registry,
            (None, Some(patterns)) => PatternRegistry::from_patterns(patterns)?,
            (None, None) => PatternRegistry::default_library(),
        };

        let terminology = extra_terms.into_iter().fold(
            self.terminology.unwrap_or_else(TerminologyRegistry::builtin),
            |registry, (domain, terms)| registry.with_terms(domain, terms),
        );

        let analyzer = self.analyzer.unwrap_or_else(|| {
            Arc::new(HeuristicAnalyzer::new(detection_config.thresholds.entity_confidence))
        });
        let taxonomy = self.taxonomy.unwrap_or_else(|| Arc::new(MqmTaxonomy));

        debug!(
            "Building detector with {} patterns, cache {}",
            patterns.len(),
            if detection_config.cache_enabled { "on" } else { "off" }
        );

        Ok(ErrorDetector::assemble(
            detection_config,
            Arc::new(patterns),
            Arc::new(terminology),
            analyzer,
            taxonomy,
        ))
    }
}
