/*!
 * Feature caching.
 *
 * Feature extraction is a pure function of (text, language hint), so results
 * can be shared between calls and between the source and target of
 * different pairs. The cache is keyed by a SHA-256 hash of both.
 */

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use super::analyzer::truncate_text;
use super::features::LinguisticFeatures;

/// Cache of extracted features with hit/miss statistics
pub struct FeatureCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<String, Arc<LinguisticFeatures>>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Maximum number of entries; new entries are not stored once reached
    capacity: usize,
}

impl FeatureCache {
    /// Create a new feature cache
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            capacity,
        }
    }

    /// Hash of text and language hint
    pub fn cache_key(text: &str, language: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(language.unwrap_or("").as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Get features from the cache
    pub fn get(&self, text: &str, language: Option<&str>) -> Option<Arc<LinguisticFeatures>> {
        let key = Self::cache_key(text, language);
        let cached = self.cache.read().get(&key).cloned();

        match &cached {
            Some(_) => {
                *self.hits.write() += 1;
                debug!("Feature cache hit for '{}'", truncate_text(text, 30));
            }
            None => {
                *self.misses.write() += 1;
                debug!("Feature cache miss for '{}'", truncate_text(text, 30));
            }
        }

        cached
    }

    /// Store features in the cache
    pub fn store(&self, text: &str, language: Option<&str>, features: Arc<LinguisticFeatures>) {
        let key = Self::cache_key(text, language);
        let mut cache = self.cache.write();

        if cache.len() >= self.capacity && !cache.contains_key(&key) {
            debug!("Feature cache full ({} entries), not storing", cache.len());
            return;
        }

        cache.insert(key, features);
    }

    /// Return cached features or extract and store them
    pub fn get_or_insert_with<F>(&self, text: &str, language: Option<&str>, extract: F) -> Arc<LinguisticFeatures>
    where
        F: FnOnce() -> LinguisticFeatures,
    {
        if let Some(features) = self.get(text, language) {
            return features;
        }

        let features = Arc::new(extract());
        self.store(text, language, features.clone());
        features
    }

    /// Get cache statistics (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Feature cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Clone for FeatureCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            capacity: self.capacity,
        }
    }
}
