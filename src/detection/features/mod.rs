/*!
 * Linguistic feature extraction.
 *
 * `FeatureExtractor` turns one text into `LinguisticFeatures`: tokens,
 * sentences, POS tags, named entities, register, semantic field, grammar
 * complexity, readability and key terms. The NLP-heavy parts sit behind the
 * `LinguisticAnalyzer` trait so any toolkit can be plugged in; the crate ships
 * the regex/lexicon based `HeuristicAnalyzer`.
 *
 * Extraction is deterministic and never fails: empty or degenerate text yields
 * `LinguisticFeatures::default()`.
 */

pub mod heuristic;
pub mod lexicon;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use heuristic::HeuristicAnalyzer;

/// Maximum number of key terms kept per text.
pub const DEFAULT_MAX_KEY_TERMS: usize = 20;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Numeral,
    Unknown,
}

/// Type of a named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Place,
    Organization,
}

/// A named entity found in a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Heuristic confidence in 0-1
    pub confidence: f64,
}

/// Register (formality) of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegisterLevel {
    Formal,
    Informal,
    #[default]
    Neutral,
}

/// Dominant semantic field of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SemanticField {
    Technical,
    Business,
    Academic,
    #[default]
    General,
}

/// Linguistic features of one text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinguisticFeatures {
    pub tokens: Vec<String>,
    pub sentences: Vec<String>,
    pub pos_tags: Vec<(String, PosTag)>,
    pub entities: Vec<NamedEntity>,
    pub register_level: RegisterLevel,
    pub semantic_field: SemanticField,
    pub grammar_complexity: f64,
    pub readability_score: f64,
    pub key_terms: Vec<String>,
}

impl LinguisticFeatures {
    /// Whether the text contained no words.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Average number of tokens per sentence.
    pub fn avg_sentence_length(&self) -> f64 {
        if self.sentences.is_empty() {
            0.0
        } else {
            self.tokens.len() as f64 / self.sentences.len() as f64
        }
    }

    /// Key terms as a set, for overlap computations.
    pub fn key_term_set(&self) -> HashSet<&str> {
        self.key_terms.iter().map(String::as_str).collect()
    }
}

/// NLP capability needed by the extractor.
pub trait LinguisticAnalyzer: Send + Sync {
    /// Split text into word tokens, in order.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Split text into sentences, in order.
    fn segment_sentences(&self, text: &str) -> Vec<String>;

    /// Tag the words of one sentence.
    fn tag(&self, sentence: &str) -> Vec<(String, PosTag)>;

    /// Find named entities across the sentences of a text.
    fn extract_entities(&self, sentences: &[String]) -> Vec<NamedEntity>;
}

/// Extracts `LinguisticFeatures` using a pluggable analyzer.
#[derive(Clone)]
pub struct FeatureExtractor {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    max_key_terms: usize,
}

impl FeatureExtractor {
    pub fn new(analyzer: Arc<dyn LinguisticAnalyzer>, max_key_terms: usize) -> Self {
        Self {
            analyzer,
            max_key_terms,
        }
    }

    /// Extractor backed by the heuristic analyzer.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(HeuristicAnalyzer::default()), DEFAULT_MAX_KEY_TERMS)
    }

    /// Extract features from `text`, using `language` (ISO 639 code) as a lexicon hint.
    pub fn extract(&self, text: &str, language: Option<&str>) -> LinguisticFeatures {
        if text.trim().is_empty() {
            return LinguisticFeatures::default();
        }

        let language = lexicon::lexicon_language(language);
        let language = language.as_deref();

        let tokens = self.analyzer.tokenize(text);
        if tokens.is_empty() {
            return LinguisticFeatures::default();
        }

        let sentences = self.analyzer.segment_sentences(text);
        let pos_tags: Vec<(String, PosTag)> = sentences
            .iter()
            .flat_map(|sentence| self.analyzer.tag(sentence))
            .collect();
        let entities = self.analyzer.extract_entities(&sentences);
        let key_terms = extract_key_terms(&tokens, language, self.max_key_terms);

        let mut features = LinguisticFeatures {
            register_level: detect_register(&tokens, language),
            semantic_field: detect_semantic_field(&key_terms),
            tokens,
            sentences,
            pos_tags,
            entities,
            key_terms,
            ..Default::default()
        };
        features.grammar_complexity = grammar_complexity(&features);
        features.readability_score = readability_score(&features);
        features
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Lowercased, stopword-free, de-duplicated tokens in first-seen order.
pub fn extract_key_terms(tokens: &[String], language: Option<&str>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| t.chars().any(char::is_alphabetic))
        .filter(|t| !lexicon::is_stopword(t, language))
        .filter(|t| seen.insert(t.clone()))
        .take(limit)
        .collect()
}

/// Majority of formal vs informal markers; ties are neutral.
pub fn detect_register(tokens: &[String], language: Option<&str>) -> RegisterLevel {
    let (formal, informal) = tokens.iter().fold((0usize, 0usize), |(f, i), token| {
        let lower = token.to_lowercase();
        (
            f + usize::from(lexicon::is_formal_marker(&lower, language)),
            i + usize::from(lexicon::is_informal_marker(&lower, language)),
        )
    });

    match formal.cmp(&informal) {
        std::cmp::Ordering::Greater => RegisterLevel::Formal,
        std::cmp::Ordering::Less => RegisterLevel::Informal,
        std::cmp::Ordering::Equal => RegisterLevel::Neutral,
    }
}

/// Field with the most keyword hits among the key terms.
pub fn detect_semantic_field(key_terms: &[String]) -> SemanticField {
    let score = |keywords: &HashSet<&'static str>| {
        key_terms
            .iter()
            .filter(|t| keywords.contains(t.as_str()))
            .count()
    };

    let candidates = [
        (SemanticField::Technical, score(&*lexicon::TECHNICAL_KEYWORDS)),
        (SemanticField::Business, score(&*lexicon::BUSINESS_KEYWORDS)),
        (SemanticField::Academic, score(&*lexicon::ACADEMIC_KEYWORDS)),
    ];

    let mut best = (SemanticField::General, 0);
    for (field, hits) in candidates {
        if hits > best.1 {
            best = (field, hits);
        }
    }
    best.0
}

/// `unique POS tags / 10 + average sentence length / 50`.
pub fn grammar_complexity(features: &LinguisticFeatures) -> f64 {
    let unique_tags: HashSet<PosTag> = features.pos_tags.iter().map(|(_, tag)| *tag).collect();
    unique_tags.len() as f64 / 10.0 + features.avg_sentence_length() / 50.0
}

/// Simplified Flesch reading ease; 0 for text without words.
pub fn readability_score(features: &LinguisticFeatures) -> f64 {
    if features.tokens.is_empty() {
        return 0.0;
    }

    let syllables: usize = features.tokens.iter().map(|t| count_syllables(t)).sum();
    let avg_syllables = syllables as f64 / features.tokens.len() as f64;

    206.835 - 1.015 * features.avg_sentence_length() - 84.6 * avg_syllables
}

/// Number of vowel clusters in a word, at least one.
pub fn count_syllables(word: &str) -> usize {
    const VOWELS: &str = "aeiouyàáâäãåèéêëìíîïòóôöõùúûüýÿæœ";

    let mut clusters = 0;
    let mut in_cluster = false;
    for c in word.to_lowercase().chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !in_cluster {
            clusters += 1;
        }
        in_cluster = is_vowel;
    }
    clusters.max(1)
}
