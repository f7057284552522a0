/*!
 * Fixed word lists used by the heuristic feature extractor.
 *
 * Stopwords and register markers are keyed by ISO 639-1 code. English lists
 * are always consulted; the hinted language adds its own list on top.
 */

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::language_utils;

/// Language whose lists are always consulted.
pub const BASE_LANGUAGE: &str = "en";

type WordSet = HashSet<&'static str>;

fn set(words: &[&'static str]) -> WordSet {
    words.iter().copied().collect()
}

static STOPWORDS: LazyLock<HashMap<&'static str, WordSet>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "en",
        set(&[
            "a", "an", "the", "and", "or", "but", "if", "then", "else", "of", "in", "on", "at",
            "to", "for", "from", "by", "with", "about", "as", "into", "through", "over", "under",
            "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have",
            "has", "had", "will", "would", "can", "could", "should", "may", "might", "must",
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
            "your", "his", "its", "our", "their", "this", "that", "these", "those", "there",
            "here", "what", "which", "who", "whom", "when", "where", "why", "how", "not", "no",
            "so", "too", "very", "just", "all", "any", "some", "each", "also", "than", "up",
            "out", "off", "again", "only", "own", "same", "such", "both", "more", "most",
        ]),
    );
    m.insert(
        "es",
        set(&[
            "el", "la", "los", "las", "un", "una", "unos", "unas", "y", "o", "pero", "de", "del",
            "en", "a", "al", "por", "para", "con", "sin", "que", "es", "son", "fue", "ser",
            "está", "están", "se", "su", "sus", "lo", "le", "les", "mi", "tu", "yo", "él",
            "ella", "nosotros", "ellos", "este", "esta", "ese", "esa", "muy", "más", "no",
        ]),
    );
    m.insert(
        "fr",
        set(&[
            "le", "la", "les", "un", "une", "des", "du", "de", "et", "ou", "mais", "en", "à",
            "au", "aux", "par", "pour", "avec", "sans", "que", "qui", "est", "sont", "été",
            "être", "se", "sa", "son", "ses", "ce", "cette", "ces", "il", "elle", "nous",
            "vous", "ils", "elles", "je", "tu", "ne", "pas", "plus", "très", "dans", "sur",
        ]),
    );
    m.insert(
        "de",
        set(&[
            "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem", "und",
            "oder", "aber", "in", "im", "an", "am", "auf", "zu", "zum", "zur", "von", "vom",
            "mit", "für", "ist", "sind", "war", "sein", "wird", "werden", "ich", "du", "er",
            "sie", "es", "wir", "ihr", "nicht", "kein", "sehr", "auch", "dass", "als",
        ]),
    );
    m
});

static FORMAL_MARKERS: LazyLock<HashMap<&'static str, WordSet>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "en",
        set(&[
            "therefore", "furthermore", "moreover", "hereby", "pursuant", "regarding",
            "consequently", "nevertheless", "shall", "accordingly", "thus", "hence", "whereas",
            "herein", "notwithstanding", "sincerely", "respectfully", "kindly", "thereof",
            "aforementioned", "henceforth", "additionally",
        ]),
    );
    m.insert(
        "es",
        set(&["usted", "ustedes", "atentamente", "asimismo", "estimado", "cordialmente"]),
    );
    m.insert(
        "fr",
        set(&["veuillez", "néanmoins", "toutefois", "cordialement", "ainsi", "dorénavant", "madame", "monsieur"]),
    );
    m.insert(
        "de",
        set(&["hochachtungsvoll", "bezüglich", "diesbezüglich", "folglich", "jedoch", "gemäß", "geehrte"]),
    );
    m
});

static INFORMAL_MARKERS: LazyLock<HashMap<&'static str, WordSet>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "en",
        set(&[
            "gonna", "wanna", "gotta", "kinda", "sorta", "yeah", "yep", "nope", "hey", "yo",
            "dude", "guys", "lol", "omg", "btw", "cool", "awesome", "stuff", "ok", "okay",
            "ain't", "y'all", "buddy", "folks", "super", "totally", "crazy", "bro",
        ]),
    );
    m.insert("es", set(&["vale", "guay", "tío", "tía", "mola", "chaval", "oye", "pues"]));
    m.insert("fr", set(&["ouais", "mec", "truc", "sympa", "bouquin", "boulot", "salut", "trop"]));
    m.insert("de", set(&["krass", "geil", "kumpel", "hallo", "naja", "quatsch", "echt"]));
    m
});

pub static TECHNICAL_KEYWORDS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "software", "hardware", "system", "server", "database", "network", "protocol",
        "algorithm", "encryption", "api", "interface", "configuration", "install", "module",
        "data", "code", "application", "device", "cloud", "security", "compile", "debug",
        "function", "memory", "processor",
    ])
});

pub static BUSINESS_KEYWORDS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "market", "customer", "revenue", "profit", "sales", "strategy", "management",
        "company", "business", "client", "investment", "budget", "growth", "product",
        "service", "contract", "partner", "stakeholder", "quarter", "brand",
    ])
});

pub static ACADEMIC_KEYWORDS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "research", "study", "analysis", "theory", "hypothesis", "methodology", "evidence",
        "literature", "experiment", "findings", "conclusion", "thesis", "journal", "academic",
        "university", "scholar", "empirical", "framework", "dissertation", "abstract",
    ])
});

pub static DETERMINERS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&["a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no"])
});

pub static PRONOUNS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "mine", "yours", "ours", "theirs", "who", "whom",
        "which", "what",
    ])
});

pub static PREPOSITIONS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "in", "on", "at", "to", "for", "from", "by", "with", "about", "into", "through",
        "over", "under", "between", "after", "before", "during", "without", "of", "against",
    ])
});

pub static CONJUNCTIONS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&["and", "or", "but", "nor", "so", "yet", "because", "although", "while", "if", "unless", "whereas"])
});

pub static AUXILIARIES: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have",
        "has", "had", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
    ])
});

pub static HONORIFICS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&["mr", "mrs", "ms", "dr", "prof", "sir", "madam", "herr", "frau", "señor", "señora", "monsieur", "madame"])
});

pub static ORGANIZATION_SUFFIXES: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "inc", "corp", "corporation", "ltd", "llc", "gmbh", "ag", "sa", "plc", "company",
        "university", "institute", "bank", "group", "foundation", "association", "agency",
    ])
});

pub static LOCATIVE_PREPOSITIONS: LazyLock<WordSet> = LazyLock::new(|| {
    set(&["in", "at", "from", "to", "near", "en", "à", "aus", "nach", "desde"])
});

pub static GAZETTEER: LazyLock<WordSet> = LazyLock::new(|| {
    set(&[
        "london", "paris", "berlin", "madrid", "rome", "tokyo", "beijing", "moscow", "new york",
        "washington", "europe", "asia", "africa", "america", "germany", "france", "spain",
        "italy", "china", "japan", "canada", "mexico", "brazil", "india", "california", "texas",
    ])
});

/// Resolve a language hint to the key used by the lexicon tables.
pub fn lexicon_language(language: Option<&str>) -> Option<String> {
    language
        .and_then(|code| language_utils::normalize_to_part1(code).ok())
        .filter(|code| STOPWORDS.contains_key(code.as_str()))
}

fn lookup(table: &HashMap<&'static str, WordSet>, word: &str, language: Option<&str>) -> bool {
    let in_base = table.get(BASE_LANGUAGE).is_some_and(|s| s.contains(word));
    in_base
        || language
            .filter(|lang| *lang != BASE_LANGUAGE)
            .and_then(|lang| table.get(lang))
            .is_some_and(|s| s.contains(word))
}

/// Whether a lowercased word is a stopword.
pub fn is_stopword(word: &str, language: Option<&str>) -> bool {
    lookup(&STOPWORDS, word, language)
}

/// Whether a lowercased word marks formal register.
pub fn is_formal_marker(word: &str, language: Option<&str>) -> bool {
    lookup(&FORMAL_MARKERS, word, language)
}

/// Whether a lowercased word marks informal register.
pub fn is_informal_marker(word: &str, language: Option<&str>) -> bool {
    lookup(&INFORMAL_MARKERS, word, language)
}
