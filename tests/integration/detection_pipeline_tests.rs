/*!
 * End-to-end tests for the detection pipeline
 */

use std::sync::Arc;

use transqa::app_config::Config;
use transqa::detection::patterns::{ErrorIndicator, IndicatorRule, MLErrorPattern, MqmMapping, PatternType};
use transqa::detection::{PatternRegistry, TerminologyRegistry};
use transqa::{DetectionContext, Domain, ErrorDetector, QualityReport, Severity};

use crate::common::mock_taxonomy::FailingTaxonomy;
use crate::common;

fn analyzer_of(error: &transqa::DetectedError) -> &str {
    error.metadata["analyzer"].as_str().unwrap_or("")
}

#[test]
fn test_detectErrors_withDroppedTechnicalTerms_shouldReportDomainOmission() {
    let detector = ErrorDetector::with_defaults();
    let errors = detector.detect_errors(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &common::technical_context(),
    );

    let omission = errors
        .iter()
        .find(|e| e.error_type == "domain_terminology_omission")
        .unwrap();
    assert_eq!(omission.severity, Severity::Major);
    assert_eq!(omission.confidence, 90.0);
    assert_eq!(omission.affected_text, "aes, encryption");
    assert_eq!(
        omission.metadata["hierarchical_path"]["full_path"],
        "terminology/inconsistent_with_termbase/domain_terminology/missing_term/technical"
    );
    assert!(errors.iter().all(|e| !e.id.is_empty()));
}

#[test]
fn test_detectErrors_withInformalTarget_shouldReportRegisterInconsistency() {
    let detector = ErrorDetector::with_defaults();
    let errors = detector.detect_errors(
        common::NEUTRAL_SOURCE,
        common::INFORMAL_TARGET,
        &DetectionContext::new(Domain::General),
    );

    let register = errors
        .iter()
        .find(|e| e.error_type == "register_inconsistency")
        .unwrap();
    assert_eq!(register.severity, Severity::Minor);
    assert_eq!(register.confidence, 85.0);
}

#[test]
fn test_analyze_withEmptyTexts_shouldReturnNothing() {
    let detector = ErrorDetector::with_defaults();
    let report = detector.analyze("", "", &common::technical_context());

    assert!(report.errors.is_empty());
    assert!(report.source_features.is_empty());
    assert!(report.target_features.is_empty());
    assert_eq!(report.source_features.grammar_complexity, 0.0);
    assert_eq!(report.target_features.readability_score, 0.0);
}

#[test]
fn test_detectErrors_shouldHonourQualityThreshold() {
    let detector = ErrorDetector::with_defaults();
    let unfiltered = detector.detect_errors(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &common::technical_context().with_quality_threshold(0.0),
    );

    for threshold in [0.0, 50.0, 85.0, 90.0, 100.0] {
        let context = common::technical_context().with_quality_threshold(threshold);
        let errors = detector.detect_errors(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);

        assert!(errors.iter().all(|e| e.confidence >= threshold));
        let expected = unfiltered.iter().filter(|e| e.confidence >= threshold).count();
        assert_eq!(errors.len(), expected, "threshold {}", threshold);
    }
}

#[test]
fn test_detectErrors_shouldSortByConfidenceDescending() {
    let detector = ErrorDetector::with_defaults();
    let errors = detector.detect_errors(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &common::technical_context().with_quality_threshold(0.0),
    );

    assert!(errors.len() > 1);
    assert!(errors.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn test_detectErrors_shouldBeDeterministicAcrossDetectors() {
    let context = common::technical_context();
    let first = ErrorDetector::with_defaults().detect_errors(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &context,
    );
    let second = ErrorDetector::builder().with_cache(false).build().unwrap().detect_errors(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &context,
    );

    assert_eq!(first, second);
}

#[test]
fn test_detectErrors_withAnalysisFlagsDisabled_shouldSkipAnalyzers() {
    let detector = ErrorDetector::with_defaults();
    let context = DetectionContext::new(Domain::Technical)
        .with_languages("en", "es")
        .with_semantic_analysis(false)
        .with_contextual_analysis(false)
        .with_quality_threshold(0.0);

    let errors = detector.detect_errors(common::TECHNICAL_SOURCE, common::INFORMAL_TARGET, &context);

    assert!(errors.iter().all(|e| analyzer_of(e) != "semantic"));
    assert!(errors.iter().all(|e| analyzer_of(e) != "contextual"));
    assert!(errors.iter().any(|e| analyzer_of(e) == "domain"));
}

#[test]
fn test_detectErrors_withFailingTaxonomy_shouldStillReportErrors() {
    let detector = ErrorDetector::builder()
        .with_taxonomy(Arc::new(FailingTaxonomy::new("terminology")))
        .build()
        .unwrap();

    let errors = detector.detect_errors(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &common::technical_context(),
    );

    let omission = errors
        .iter()
        .find(|e| e.error_type == "domain_terminology_omission")
        .unwrap();
    assert!(omission.classification_failed());
    assert_eq!(omission.confidence, 90.0);
    assert!(
        errors
            .iter()
            .filter(|e| !e.description.to_lowercase().contains("terminology"))
            .all(|e| !e.classification_failed())
    );
}

#[test]
fn test_builder_withConfiguredPatterns_shouldReplaceLibrary() {
    let mut config = Config::default();
    config.patterns = Some(vec![MLErrorPattern {
        pattern_id: "echo".to_string(),
        pattern_type: PatternType::Lexical,
        required_features: Vec::new(),
        indicators: vec![IndicatorRule {
            indicator: ErrorIndicator::UntranslatedText,
            weight: 1.0,
        }],
        confidence_threshold: 0.5,
        domain_specific: false,
        applicable_domains: Vec::new(),
        mqm_mapping: MqmMapping::new("accuracy", "untranslated", "", ""),
    }]);

    let detector = ErrorDetector::builder().with_config(config).build().unwrap();
    let text = "Save your changes before closing.";
    let errors = detector.detect_errors(text, text, &DetectionContext::default());

    assert_eq!(detector.patterns().len(), 1);
    assert!(errors.iter().any(|e| e.error_type == "echo"));
    assert!(errors.iter().all(|e| e.error_type != "untranslated_text"));
}

#[test]
fn test_builder_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.detection.thresholds.similarity_cutoff = 3.0;

    assert!(ErrorDetector::builder().with_config(config).build().is_err());
    assert!(
        ErrorDetector::builder()
            .with_patterns(PatternRegistry::default_library())
            .with_terminology(TerminologyRegistry::empty())
            .build()
            .is_ok()
    );
}

#[test]
fn test_builder_withExtraTerminology_shouldFlagCustomTerms() {
    let mut config = Config::default();
    config.terminology.insert(Domain::Literary, vec!["sonnet".to_string()]);
    let detector = ErrorDetector::builder().with_config(config).build().unwrap();

    let errors = detector.detect_errors(
        "She wrote a sonnet for him.",
        "Ella le escribió un poema.",
        &DetectionContext::new(Domain::Literary).with_languages("en", "es"),
    );

    assert!(
        errors
            .iter()
            .any(|e| e.error_type == "domain_terminology_omission" && e.affected_text == "sonnet")
    );
}

#[test]
fn test_detector_cache_shouldServeRepeatedTexts() {
    let detector = ErrorDetector::with_defaults();
    let context = common::technical_context();

    detector.detect_errors(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);
    detector.detect_errors(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);

    let (hits, misses, _) = detector.cache_stats().unwrap();
    assert_eq!((hits, misses), (2, 2));
}

#[test]
fn test_qualityReport_fromDetectedErrors_shouldPenaliseMajorErrors() {
    let detector = ErrorDetector::with_defaults();
    let report = detector.analyze(
        common::TECHNICAL_SOURCE,
        common::TECHNICAL_TARGET_WITHOUT_TERMS,
        &common::technical_context(),
    );

    let quality = QualityReport::from_errors(&report.errors, report.source_features.tokens.len());

    assert_eq!(quality.total_errors, report.errors.len());
    assert!(quality.score < 100.0);
    assert!(!quality.meets_threshold(90.0));
}
