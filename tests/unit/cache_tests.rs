/*!
 * Tests for feature cache functionality
 */

use std::sync::Arc;

use transqa::detection::{FeatureCache, FeatureExtractor, LinguisticFeatures};

#[test]
fn test_cache_store_thenGet_shouldReturnSameFeatures() {
    let cache = FeatureCache::new(16);
    let features = Arc::new(FeatureExtractor::with_defaults().extract("Hello world.", Some("en")));
    cache.store("Hello world.", Some("en"), features.clone());

    let cached = cache.get("Hello world.", Some("en")).unwrap();
    assert!(Arc::ptr_eq(&cached, &features));
}

#[test]
fn test_cache_get_withDifferentLanguage_shouldMiss() {
    let cache = FeatureCache::new(16);
    cache.store("Hello", Some("en"), Arc::new(LinguisticFeatures::default()));

    assert!(cache.get("Hello", Some("de")).is_none());
    assert!(cache.get("Hello", None).is_none());
}

#[test]
fn test_cache_getOrInsertWith_shouldExtractOnlyOnce() {
    let cache = FeatureCache::new(16);
    let mut extractions = 0;

    for _ in 0..3 {
        cache.get_or_insert_with("Same text", None, || {
            extractions += 1;
            LinguisticFeatures::default()
        });
    }

    assert_eq!(extractions, 1);
    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!((hits, misses), (2, 1));
    assert!((hit_rate - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_cache_clear_shouldResetEntriesAndStats() {
    let cache = FeatureCache::new(16);
    cache.store("a", None, Arc::new(LinguisticFeatures::default()));
    let _ = cache.get("a", None);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats(), (0, 0, 0.0));
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache = FeatureCache::new(16);
    let clone = cache.clone();
    clone.store("shared", None, Arc::new(LinguisticFeatures::default()));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.capacity(), 16);
}
