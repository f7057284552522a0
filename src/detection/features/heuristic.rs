/*!
 * Rule-based implementation of the `LinguisticAnalyzer` capability.
 *
 * Tokenization and sentence segmentation are regex driven. POS tags come from
 * closed-class word lists plus suffix rules, and named entities from
 * capitalisation runs with honorific, suffix and gazetteer cues. None of it
 * is calibrated; it is a baseline any real NLP backend can replace.
 */

use regex::Regex;

use super::lexicon::{
    AUXILIARIES, CONJUNCTIONS, DETERMINERS, GAZETTEER, HONORIFICS, LOCATIVE_PREPOSITIONS,
    ORGANIZATION_SUFFIXES, PREPOSITIONS, PRONOUNS,
};
use super::{EntityType, LinguisticAnalyzer, NamedEntity, PosTag};

/// Default confidence attached to every heuristic entity.
pub const DEFAULT_ENTITY_CONFIDENCE: f64 = 0.8;

/// Heuristic analyzer with no external model.
#[derive(Debug, Clone)]
pub struct HeuristicAnalyzer {
    word_pattern: Regex,
    sentence_end_pattern: Regex,
    entity_confidence: f64,
}

impl HeuristicAnalyzer {
    /// Create an analyzer that attaches `entity_confidence` to each entity.
    pub fn new(entity_confidence: f64) -> Self {
        Self {
            // Letters/digits, allowing inner apostrophes and hyphens
            word_pattern: Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").unwrap(),
            sentence_end_pattern: Regex::new(r"[.!?…]+").unwrap(),
            entity_confidence: entity_confidence.clamp(0.0, 1.0),
        }
    }

    fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> {
        self.word_pattern.find_iter(text).map(|m| m.as_str())
    }

    /// A terminator ends a sentence unless it closes an abbreviation or an initial.
    fn is_sentence_boundary(&self, text: &str, start: usize, end: usize) -> bool {
        let followed_by_break = text[end..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace);
        if !followed_by_break {
            return false;
        }

        if &text[start..end] != "." {
            return true;
        }

        let previous_word = self.words(&text[..start]).last().unwrap_or("");
        let abbreviation = is_honorific(previous_word);
        let initial = previous_word.chars().count() == 1
            && previous_word.chars().all(char::is_uppercase)
            && text[..start].ends_with(previous_word);
        !(abbreviation || initial)
    }

    fn tag_word(&self, word: &str, position: usize) -> PosTag {
        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if word.chars().all(|c| c.is_numeric()) {
            return PosTag::Numeral;
        }
        if DETERMINERS.contains(lower) {
            return PosTag::Determiner;
        }
        if PRONOUNS.contains(lower) {
            return PosTag::Pronoun;
        }
        if AUXILIARIES.contains(lower) {
            return PosTag::Auxiliary;
        }
        if PREPOSITIONS.contains(lower) {
            return PosTag::Preposition;
        }
        if CONJUNCTIONS.contains(lower) {
            return PosTag::Conjunction;
        }
        if position > 0 && word.chars().next().is_some_and(char::is_uppercase) {
            return PosTag::ProperNoun;
        }
        if !word.chars().any(char::is_alphabetic) {
            return PosTag::Unknown;
        }

        match lower {
            w if w.ends_with("ly") && w.len() > 4 => PosTag::Adverb,
            w if ["tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship"]
                .iter()
                .any(|s| w.ends_with(s)) =>
            {
                PosTag::Noun
            }
            w if ["ous", "ful", "able", "ible", "ive", "al", "less", "ic"]
                .iter()
                .any(|s| w.ends_with(s)) =>
            {
                PosTag::Adjective
            }
            w if ["ed", "ing", "ize", "ise", "ate", "ify"]
                .iter()
                .any(|s| w.ends_with(s)) && w.len() > 4 =>
            {
                PosTag::Verb
            }
            _ => PosTag::Noun,
        }
    }

    fn classify_run(&self, run: &[&str], previous: Option<&str>, at_sentence_start: bool) -> Option<NamedEntity> {
        let (first, rest) = run.split_first()?;
        if is_honorific(first) {
            if rest.is_empty() {
                return None;
            }
            return Some(self.entity(&rest.join(" "), EntityType::Person));
        }

        let text = run.join(" ");
        let lower = text.to_lowercase();
        let last_lower = run.last().map(|w| w.to_lowercase()).unwrap_or_default();

        if run.len() > 1 && ORGANIZATION_SUFFIXES.contains(last_lower.as_str()) {
            return Some(self.entity(&text, EntityType::Organization));
        }
        if GAZETTEER.contains(lower.as_str()) {
            return Some(self.entity(&text, EntityType::Place));
        }
        if previous.is_some_and(|p| LOCATIVE_PREPOSITIONS.contains(p.to_lowercase().as_str())) {
            return Some(self.entity(&text, EntityType::Place));
        }
        if at_sentence_start && run.len() == 1 {
            return None;
        }
        Some(self.entity(&text, EntityType::Person))
    }

    fn entity(&self, text: &str, entity_type: EntityType) -> NamedEntity {
        NamedEntity {
            text: text.to_string(),
            entity_type,
            confidence: self.entity_confidence,
        }
    }
}

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_CONFIDENCE)
    }
}

fn is_honorific(word: &str) -> bool {
    HONORIFICS.contains(word.to_lowercase().as_str())
}

/// Capitalised word that is neither an acronym nor the pronoun "I".
fn is_name_like(word: &str) -> bool {
    let mut chars = word.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    let acronym = word.chars().count() > 1 && word.chars().all(|c| !c.is_lowercase());
    starts_upper && !acronym && word != "I"
}

impl LinguisticAnalyzer for HeuristicAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.words(text).map(str::to_string).collect()
    }

    fn segment_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in self.sentence_end_pattern.find_iter(text) {
            if self.is_sentence_boundary(text, m.start(), m.end()) {
                sentences.push(&text[start..m.end()]);
                start = m.end();
            }
        }
        sentences.push(&text[start..]);

        sentences
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .map(str::to_string)
            .collect()
    }

    fn tag(&self, sentence: &str) -> Vec<(String, PosTag)> {
        self.words(sentence)
            .enumerate()
            .map(|(i, word)| (word.to_string(), self.tag_word(word, i)))
            .collect()
    }

    fn extract_entities(&self, sentences: &[String]) -> Vec<NamedEntity> {
        let mut entities: Vec<NamedEntity> = Vec::new();

        for sentence in sentences {
            let words: Vec<&str> = self.words(sentence).collect();
            let mut i = 0;
            while i < words.len() {
                if !is_name_like(words[i]) {
                    i += 1;
                    continue;
                }
                // An honorific always opens a new run
                let mut j = i + 1;
                while j < words.len() && is_name_like(words[j]) && !is_honorific(words[j]) {
                    j += 1;
                }

                let previous = if i > 0 { Some(words[i - 1]) } else { None };
                if let Some(entity) = self.classify_run(&words[i..j], previous, i == 0) {
                    let seen = entities
                        .iter()
                        .any(|e| e.text == entity.text && e.entity_type == entity.entity_type);
                    if !seen {
                        entities.push(entity);
                    }
                }
                i = j;
            }
        }

        entities
    }
}
