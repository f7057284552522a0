/*!
 * Tests for taxonomy classification
 */

use std::sync::Arc;

use transqa::detection::{MqmTaxonomy, TaxonomyClassifier, TaxonomyProvider};
use transqa::{DetectedError, Domain, ErrorCategory, Severity};

use crate::common::mock_taxonomy::{FailingTaxonomy, FixedTaxonomy};

fn finding(error_type: &str, description: &str) -> DetectedError {
    DetectedError::new(error_type, ErrorCategory::Transfer, Severity::Major, 80.0)
        .with_description(description)
        .with_affected_text("target")
        .with_metadata("analyzer", "test")
}

#[test]
fn test_mqmTaxonomy_shouldMapKeywordsToNodes() {
    let cases = [
        ("Inconsistent technical terminology", "terminology/inconsistent_with_termbase/domain_terminology/missing_term/general"),
        ("Named entity 'Paris' not found", "accuracy/omission/content/omitted_content/general"),
        ("Register shifts from Neutral to Informal", "style/register/formality/register_shift/general"),
        ("Low semantic overlap", "accuracy/mistranslation/semantic/meaning_shift/general"),
        (
            "Pattern 'semantic_drift' (semantic) matched: low_semantic_overlap, complexity_gap",
            "accuracy/mistranslation/semantic/meaning_shift/general",
        ),
        (
            "Pattern 'syntactic_restructuring' (syntactic) matched: low_semantic_overlap",
            "fluency/grammar/structure/complexity_shift/general",
        ),
        ("Something unexpected", "accuracy/other/general/unclassified/general"),
    ];

    for (description, expected) in cases {
        let recommendation = MqmTaxonomy
            .recommend_category(description, "", "", Domain::General)
            .unwrap();
        assert_eq!(recommendation.path.full_path(), expected, "for '{}'", description);
    }
}

#[test]
fn test_mqmTaxonomy_fallback_shouldHaveLowConfidence() {
    let recommendation = MqmTaxonomy
        .recommend_category("zzz", "", "", Domain::Legal)
        .unwrap();

    assert_eq!(recommendation.confidence, 50.0);
    assert_eq!(recommendation.path.domain(), Domain::Legal);
}

#[test]
fn test_classifier_onSuccess_shouldOnlyAddMetadata() {
    let classifier = TaxonomyClassifier::new(Arc::new(FixedTaxonomy));
    let original = finding("semantic_inconsistency", "Low semantic overlap");
    let mut errors = vec![original.clone()];

    classifier.classify(&mut errors, "source text", Domain::Technical);

    let classified = &errors[0];
    assert_eq!(classified.error_type, original.error_type);
    assert_eq!(classified.category, original.category);
    assert_eq!(classified.severity, original.severity);
    assert_eq!(classified.confidence, original.confidence);
    assert_eq!(classified.description, original.description);
    assert_eq!(classified.metadata["analyzer"], "test");
    assert_eq!(
        classified.metadata["hierarchical_path"]["full_path"],
        "accuracy/mistranslation/fixed/node/technical"
    );
    assert_eq!(classified.metadata["hierarchical_path"]["domain"], "technical");
    assert_eq!(classified.metadata["classification_confidence"], 99.0);
    assert_eq!(classified.metadata["classification_reasoning"], "fixed");
    assert!(!classified.classification_failed());
}

#[test]
fn test_classifier_onFailure_shouldIsolateFailedFinding() {
    let provider = Arc::new(FailingTaxonomy::new("entity"));
    let classifier = TaxonomyClassifier::new(provider.clone());
    let mut errors = vec![
        finding("entity_omission", "Named entity 'London' not found in translation"),
        finding("semantic_inconsistency", "Low semantic overlap"),
    ];

    classifier.classify(&mut errors, "source", Domain::General);

    assert_eq!(provider.call_count(), 2);
    assert!(errors[0].classification_failed());
    assert!(
        errors[0].metadata["classification_error"]
            .as_str()
            .unwrap()
            .contains("mock outage")
    );
    assert!(!errors[0].metadata.contains_key("hierarchical_path"));

    assert!(!errors[1].classification_failed());
    assert!(errors[1].metadata.contains_key("hierarchical_path"));
}

#[test]
fn test_classifier_withNoFindings_shouldNotCallProvider() {
    let provider = Arc::new(FailingTaxonomy::new("anything"));
    let classifier = TaxonomyClassifier::new(provider.clone());

    classifier.classify(&mut [], "source", Domain::General);

    assert_eq!(provider.call_count(), 0);
}
