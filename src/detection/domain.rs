/*!
 * Domain-specific terminology checks.
 *
 * `TerminologyRegistry` maps each domain to a curated set of terms. It is
 * built once (built-in sets, builder additions or JSON) and only read
 * afterwards. `DomainSpecificAnalyzer` flags domain terms that appear in the
 * source but not in the target. A domain without terms yields no findings.
 */

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use log::debug;
use serde_json::json;

use crate::errors::ConfigError;

use super::analyzer::{AnalysisInput, PairAnalyzer};
use super::types::{DetectedError, Domain, ErrorCategory, Severity};

/// Immutable per-domain terminology sets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerminologyRegistry {
    sets: BTreeMap<Domain, BTreeSet<String>>,
}

impl TerminologyRegistry {
    /// Registry without any terminology.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the curated built-in sets.
    pub fn builtin() -> Self {
        Self::empty()
            .with_terms(
                Domain::Technical,
                [
                    "api", "algorithm", "encryption", "aes", "rsa", "server", "database",
                    "protocol", "firewall", "bandwidth", "latency", "software", "hardware",
                    "interface", "authentication", "cache", "compiler", "kernel", "router",
                    "cpu", "ssl", "tls", "http", "json", "sdk", "machine learning",
                ],
            )
            .with_terms(
                Domain::Medical,
                [
                    "diagnosis", "symptom", "symptoms", "dosage", "patient", "prescription",
                    "surgery", "chronic", "acute", "antibiotic", "vaccine", "clinical",
                    "therapy", "mg", "contraindication", "blood pressure",
                ],
            )
            .with_terms(
                Domain::Legal,
                [
                    "contract", "liability", "plaintiff", "defendant", "jurisdiction", "clause",
                    "indemnity", "statute", "warranty", "arbitration", "tort", "hereby",
                    "pursuant", "breach", "force majeure",
                ],
            )
            .with_terms(
                Domain::Financial,
                [
                    "revenue", "dividend", "equity", "asset", "assets", "liability", "interest",
                    "portfolio", "audit", "fiscal", "ebitda", "depreciation", "invoice",
                    "capital", "cash flow",
                ],
            )
            .with_terms(
                Domain::Marketing,
                [
                    "brand", "campaign", "conversion", "engagement", "audience", "seo", "roi",
                    "funnel", "lead", "influencer", "retargeting", "call to action",
                ],
            )
            .with_terms(Domain::General, std::iter::empty::<&str>())
    }

    /// Add terms to a domain. Terms are trimmed and lowercased.
    pub fn with_terms<I, S>(mut self, domain: Domain, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.sets.entry(domain).or_default();
        set.extend(
            terms
                .into_iter()
                .map(|t| normalize_term(t.as_ref()))
                .filter(|t| !t.is_empty()),
        );
        self
    }

    /// Parse `{"technical": ["api", ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<Domain, Vec<String>> = serde_json::from_str(json)?;
        Ok(raw
            .into_iter()
            .fold(Self::empty(), |registry, (domain, terms)| registry.with_terms(domain, terms)))
    }

    /// Terms registered for a domain, if any.
    pub fn terms(&self, domain: Domain) -> Option<&BTreeSet<String>> {
        self.sets.get(&domain)
    }

    /// Whether the domain has at least one term.
    pub fn has_terms(&self, domain: Domain) -> bool {
        self.terms(domain).is_some_and(|t| !t.is_empty())
    }

    /// Domain terms occurring in `tokens` (lowercased), in order of first occurrence.
    pub fn find_terms(&self, domain: Domain, tokens: &[String]) -> Vec<String> {
        let Some(terms) = self.terms(domain) else {
            return Vec::new();
        };

        let phrases: Vec<(&String, Vec<&str>)> = terms
            .iter()
            .map(|term| (term, term.split_whitespace().collect()))
            .collect();

        let mut found: Vec<String> = Vec::new();
        for start in 0..tokens.len() {
            for (term, words) in &phrases {
                let end = start + words.len();
                let matches = end <= tokens.len()
                    && tokens[start..end].iter().zip(words).all(|(t, w)| t.as_str() == *w);
                if matches && !found.contains(*term) {
                    found.push((*term).clone());
                }
            }
        }
        found
    }
}

fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase a token list for terminology lookups.
pub fn lowercase_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| t.to_lowercase()).collect()
}

/// Flags domain terms present in the source and absent from the target.
pub struct DomainSpecificAnalyzer {
    registry: Arc<TerminologyRegistry>,
    confidence: f64,
}

impl DomainSpecificAnalyzer {
    pub fn new(registry: Arc<TerminologyRegistry>, confidence: f64) -> Self {
        Self {
            registry,
            confidence,
        }
    }
}

impl PairAnalyzer for DomainSpecificAnalyzer {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<DetectedError> {
        let domain = input.context.domain;
        if !self.registry.has_terms(domain) {
            debug!("No terminology registered for domain '{}', skipping", domain);
            return Vec::new();
        }

        let source_terms = self
            .registry
            .find_terms(domain, &lowercase_tokens(&input.source.tokens));
        let target_terms: HashSet<String> = self
            .registry
            .find_terms(domain, &lowercase_tokens(&input.target.tokens))
            .into_iter()
            .collect();

        let missing: Vec<String> = source_terms
            .into_iter()
            .filter(|t| !target_terms.contains(t))
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }

        vec![
            DetectedError::new(
                "domain_terminology_omission",
                ErrorCategory::Linguistic,
                Severity::Major,
                self.confidence,
            )
            .with_description(format!(
                "{} terminology missing from translation: {}",
                domain,
                missing.join(", ")
            ))
            .with_affected_text(missing.join(", "))
            .with_metadata("analyzer", self.name())
            .with_metadata("domain", domain.as_str())
            .with_metadata("missing_terms", json!(missing)),
        ]
    }
}
