/*!
 * Tests for the semantic, contextual and domain analyzers
 */

use std::sync::Arc;

use transqa::app_config::DetectionThresholds;
use transqa::detection::features::EntityType;
use transqa::detection::{
    AnalysisInput, ContextualAnalyzer, DomainSpecificAnalyzer, LinguisticFeatures, PairAnalyzer, SemanticAnalyzer,
    TerminologyRegistry,
};
use transqa::{DetectionContext, Domain, ErrorCategory, Severity};

use crate::common::{self, PairFeatures};

fn semantic_analyzer() -> SemanticAnalyzer {
    SemanticAnalyzer::new(Arc::new(TerminologyRegistry::builtin()), &DetectionThresholds::default())
}

fn complexity_features(grammar_complexity: f64) -> LinguisticFeatures {
    LinguisticFeatures {
        grammar_complexity,
        ..Default::default()
    }
}

#[test]
fn test_semantic_withDroppedTerminology_shouldFlagOverlapAndTerminology() {
    let context = common::technical_context();
    let pair = PairFeatures::extract(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);
    let input = pair.input(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);
    let analyzer = semantic_analyzer();

    let overlap = analyzer.check_term_overlap(&input).unwrap();
    assert_eq!(overlap.error_type, "semantic_inconsistency");
    assert_eq!(overlap.category, ErrorCategory::Transfer);
    assert_eq!(overlap.confidence, 100.0);

    let terminology = analyzer.check_terminology(&input).unwrap();
    assert_eq!(terminology.error_type, "terminology_inconsistency");
    assert_eq!(terminology.category, ErrorCategory::Linguistic);
    assert_eq!(terminology.confidence, 85.0);
    assert_eq!(terminology.metadata["missing_terms"], serde_json::json!(["aes", "encryption"]));
}

#[test]
fn test_semantic_withIdenticalText_shouldFindNoInconsistency() {
    let context = DetectionContext::new(Domain::Technical);
    let text = "The server encrypts the database with AES encryption.";
    let pair = PairFeatures::extract(text, text, &context);

    assert!(semantic_analyzer().analyze(&pair.input(text, text, &context)).is_empty());
}

#[test]
fn test_semantic_withMissingEntities_shouldFlagEachOmission() {
    let context = DetectionContext::new(Domain::General).with_languages("en", "es");
    let source = "Maria Lopez visited the office in London yesterday.";
    let target = "Visitó la oficina ayer.";
    let pair = PairFeatures::extract(source, target, &context);

    let omissions = semantic_analyzer().check_entities(&pair.input(source, target, &context));

    assert_eq!(omissions.len(), 2);
    assert!(omissions.iter().all(|e| e.error_type == "entity_omission"));
    assert!(omissions.iter().all(|e| e.confidence == 80.0));
    assert_eq!(omissions[0].affected_text, "Maria Lopez");
    assert_eq!(omissions[1].affected_text, "London");
}

#[test]
fn test_semantic_withKeptEntities_shouldNotFlagOmission() {
    let context = DetectionContext::new(Domain::General).with_languages("en", "es");
    let source = "Maria Lopez visited the office in London yesterday.";
    let target = "Maria Lopez visitó la oficina en London ayer.";
    let pair = PairFeatures::extract(source, target, &context);

    let analyzer = semantic_analyzer();
    let input = pair.input(source, target, &context);
    assert!(pair.target.entities.iter().any(|e| e.entity_type == EntityType::Place));
    assert!(analyzer.check_entities(&input).is_empty());
}

#[test]
fn test_semantic_withDomainWithoutTerms_shouldSkipTerminology() {
    let context = DetectionContext::new(Domain::Literary);
    let pair = PairFeatures::extract(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);
    let input = pair.input(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);

    assert!(semantic_analyzer().check_terminology(&input).is_none());
}

#[test]
fn test_contextual_withRegisterShift_shouldFlagMinorStyleError() {
    let context = DetectionContext::default();
    let pair = PairFeatures::extract(common::NEUTRAL_SOURCE, common::INFORMAL_TARGET, &context);
    let analyzer = ContextualAnalyzer::new(&DetectionThresholds::default());

    let error = analyzer
        .check_register(&pair.input(common::NEUTRAL_SOURCE, common::INFORMAL_TARGET, &context))
        .unwrap();

    assert_eq!(error.error_type, "register_inconsistency");
    assert_eq!(error.category, ErrorCategory::Style);
    assert_eq!(error.severity, Severity::Minor);
    assert_eq!(error.confidence, 85.0);
    assert_eq!(error.metadata["source_register"], "neutral");
    assert_eq!(error.metadata["target_register"], "informal");
}

#[test]
fn test_contextual_checkComplexity_shouldScaleAndCapConfidence() {
    let context = DetectionContext::default();
    let analyzer = ContextualAnalyzer::new(&DetectionThresholds::default());
    let input = |source: &LinguisticFeatures, target: &LinguisticFeatures| {
        analyzer.check_complexity(&AnalysisInput {
            source_text: "s",
            target_text: "t",
            source,
            target,
            context: &context,
        })
    };

    let simple = complexity_features(0.5);
    let moderate = complexity_features(3.0);
    let extreme = complexity_features(12.0);

    assert_eq!(input(&moderate, &simple).unwrap().confidence, 50.0);
    assert_eq!(input(&simple, &extreme).unwrap().confidence, 95.0);
    assert!(input(&simple, &complexity_features(2.5)).is_none());
}

#[test]
fn test_domain_withMissingTerms_shouldReportThemInSourceOrder() {
    let context = common::technical_context();
    let pair = PairFeatures::extract(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);
    let analyzer = DomainSpecificAnalyzer::new(Arc::new(TerminologyRegistry::builtin()), 90.0);

    let errors = analyzer.analyze(&pair.input(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, "domain_terminology_omission");
    assert_eq!(errors[0].severity, Severity::Major);
    assert_eq!(errors[0].confidence, 90.0);
    assert!(errors[0].description.contains("aes, encryption"));
    assert_eq!(errors[0].metadata["domain"], "technical");
}

#[test]
fn test_domain_withMultiWordTerm_shouldMatchPhrase() {
    let registry = TerminologyRegistry::empty().with_terms(Domain::Financial, ["Cash Flow"]);
    let context = DetectionContext::new(Domain::Financial);
    let source = "Operating cash flow improved this quarter.";
    let target = "Operating results improved this quarter.";
    let pair = PairFeatures::extract(source, target, &context);

    let errors = DomainSpecificAnalyzer::new(Arc::new(registry), 90.0).analyze(&pair.input(source, target, &context));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].affected_text, "cash flow");
}

#[test]
fn test_contextual_withLongTarget_shouldKeepSnippetOnly() {
    let context = DetectionContext::default();
    let analyzer = ContextualAnalyzer::new(&DetectionThresholds::default());
    let target_text = "palabra ".repeat(40);
    let (source, target) = (complexity_features(0.5), complexity_features(12.0));

    let error = analyzer
        .check_complexity(&AnalysisInput {
            source_text: "s",
            target_text: &target_text,
            source: &source,
            target: &target,
            context: &context,
        })
        .unwrap();

    assert!(error.affected_text.ends_with("..."));
    assert_eq!(error.affected_text.chars().count(), 103);
    assert!(target_text.starts_with(error.affected_text.trim_end_matches("...")));
}

#[test]
fn test_domain_withUnregisteredDomain_shouldEmitNothing() {
    let context = DetectionContext::new(Domain::Literary);
    let pair = PairFeatures::extract(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context);
    let analyzer = DomainSpecificAnalyzer::new(Arc::new(TerminologyRegistry::builtin()), 90.0);

    assert!(
        analyzer
            .analyze(&pair.input(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS, &context))
            .is_empty()
    );
}

#[test]
fn test_terminologyRegistry_fromJson_shouldNormalizeTerms() {
    let registry = TerminologyRegistry::from_json(r#"{"legal": ["  Force   Majeure ", "TORT"]}"#).unwrap();
    let terms = registry.terms(Domain::Legal).unwrap();

    assert!(terms.contains("force majeure"));
    assert!(terms.contains("tort"));
    assert!(TerminologyRegistry::from_json(r#"{"astrology": []}"#).is_err());
}
