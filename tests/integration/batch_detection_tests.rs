/*!
 * Tests for concurrent batch detection
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use transqa::{BatchDetector, DetectionContext, Domain, ErrorDetector, TranslationPair};

use crate::common;

fn sample_pairs() -> Vec<TranslationPair> {
    vec![
        TranslationPair::new(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS).with_id("technical"),
        TranslationPair::new(common::NEUTRAL_SOURCE, common::INFORMAL_TARGET).with_id("register"),
        TranslationPair::new("", "").with_id("empty"),
        TranslationPair::new("Take 2 tablets every 8 hours.", "Tome 2 comprimidos cada 6 horas."),
        TranslationPair::new("Click Save.", "Click Save."),
    ]
}

#[tokio::test]
async fn test_detectBatch_shouldPreserveInputOrder() {
    let batch = BatchDetector::with_concurrency(Arc::new(ErrorDetector::with_defaults()), 3);

    let results = batch
        .detect_batch(sample_pairs(), &common::technical_context())
        .await
        .unwrap();

    let ids: Vec<Option<&str>> = results.iter().map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("technical"), Some("register"), Some("empty"), None, None]);
    assert!(results[2].errors.is_empty());
}

#[tokio::test]
async fn test_detectBatch_shouldMatchSequentialDetection() {
    let detector = Arc::new(ErrorDetector::with_defaults());
    let context = DetectionContext::new(Domain::Medical).with_languages("en", "es");
    let pairs = sample_pairs();

    let expected: Vec<_> = pairs
        .iter()
        .map(|p| detector.detect_errors(&p.source, &p.target, &context))
        .collect();

    let results = BatchDetector::with_concurrency(detector.clone(), 4)
        .detect_batch(pairs, &context)
        .await
        .unwrap();

    let actual: Vec<_> = results.into_iter().map(|r| r.errors).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_detectBatchWithProgress_shouldReportEveryPair() {
    let batch = BatchDetector::new(Arc::new(ErrorDetector::with_defaults()));
    let calls = Arc::new(AtomicUsize::new(0));
    let last_total = Arc::new(AtomicUsize::new(0));

    let callback_calls = calls.clone();
    let callback_total = last_total.clone();
    let results = batch
        .detect_batch_with_progress(sample_pairs(), &DetectionContext::default(), move |done, total| {
            assert!(done <= total);
            callback_calls.fetch_add(1, Ordering::SeqCst);
            callback_total.store(total, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(last_total.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_detectBatch_withPairContext_shouldOverrideBatchContext() {
    let batch = BatchDetector::new(Arc::new(ErrorDetector::with_defaults()));
    let pairs = vec![
        TranslationPair::new(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS),
        TranslationPair::new(common::TECHNICAL_SOURCE, common::TECHNICAL_TARGET_WITHOUT_TERMS)
            .with_context(common::technical_context()),
    ];

    let results = batch
        .detect_batch(pairs, &DetectionContext::new(Domain::Literary))
        .await
        .unwrap();

    let has_omission = |errors: &[transqa::DetectedError]| {
        errors.iter().any(|e| e.error_type == "domain_terminology_omission")
    };
    assert!(!has_omission(&results[0].errors));
    assert!(has_omission(&results[1].errors));
}

#[tokio::test]
async fn test_detectBatch_withNoPairs_shouldReturnEmpty() {
    let batch = BatchDetector::with_concurrency(Arc::new(ErrorDetector::with_defaults()), 0);

    assert_eq!(batch.max_concurrent(), 1);
    assert!(batch.detect_batch(Vec::new(), &DetectionContext::default()).await.unwrap().is_empty());
}
