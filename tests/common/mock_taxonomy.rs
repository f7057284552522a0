/*!
 * Mock taxonomy providers for testing
 *
 * These implement the TaxonomyProvider trait with predetermined behaviour so
 * classification failure handling can be exercised.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use transqa::detection::{HierarchicalErrorPath, MqmTaxonomy, TaxonomyProvider, TaxonomyRecommendation};
use transqa::{ClassificationError, Domain};

/// Provider failing for descriptions containing a marker, delegating otherwise
#[derive(Debug)]
pub struct FailingTaxonomy {
    fail_on: String,
    calls: AtomicUsize,
}

impl FailingTaxonomy {
    pub fn new(fail_on: &str) -> Self {
        Self {
            fail_on: fail_on.to_lowercase(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TaxonomyProvider for FailingTaxonomy {
    fn recommend_category(
        &self,
        description: &str,
        source_text: &str,
        target_text: &str,
        domain: Domain,
    ) -> Result<TaxonomyRecommendation, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if description.to_lowercase().contains(&self.fail_on) {
            return Err(ClassificationError::Unavailable("mock outage".to_string()));
        }
        MqmTaxonomy.recommend_category(description, source_text, target_text, domain)
    }
}

/// Provider always answering with the same node
#[derive(Debug)]
pub struct FixedTaxonomy;

impl TaxonomyProvider for FixedTaxonomy {
    fn recommend_category(
        &self,
        _description: &str,
        _source_text: &str,
        _target_text: &str,
        domain: Domain,
    ) -> Result<TaxonomyRecommendation, ClassificationError> {
        Ok(TaxonomyRecommendation {
            path: HierarchicalErrorPath::new("accuracy", "mistranslation", "fixed", "node", domain),
            confidence: 99.0,
            reasoning: "fixed".to_string(),
        })
    }
}
