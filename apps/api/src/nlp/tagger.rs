//! Rule-based tokenizer and part-of-speech tagger.
//!
//! Closed-class words come from a fixed lexicon. Open-class words are tagged from
//! capitalization, the previous token, a small verb/adjective lexicon, and suffix
//! shape. Anything left over is a noun, which is also the most common tag in job
//! descriptions and resumes.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::nlp::lemma::lemmatize;
use crate::nlp::stopwords::is_stop_word;
use crate::nlp::{LanguagePipeline, Pos, Token};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}_]+|[^\s\p{L}\p{M}\p{N}_]").expect("token pattern is valid")
});

const PUNCTUATION: &str = ".,;:!?'\"()[]{}-/\\\u{2013}\u{2014}\u{2018}\u{2019}\u{201C}\u{201D}\u{2026}\u{2022}";

/// Tokens after which the next word starts a new sentence or list item.
const SENTENCE_BREAKS: &[&str] = &[".", "!", "?", ":", ";", "|", "*", "\u{2022}"];

const CLOSED_CLASS: &[(Pos, &[&str])] = &[
    (
        Pos::Det,
        &[
            "a", "all", "an", "another", "any", "both", "each", "either", "every", "neither",
            "no", "some", "such", "that", "the", "these", "this", "those",
        ],
    ),
    (
        Pos::Pron,
        &[
            "anyone", "anything", "everyone", "everything", "he", "her", "hers", "him", "his",
            "i", "it", "its", "me", "mine", "my", "myself", "nobody", "nothing", "our", "ours",
            "she", "someone", "something", "their", "theirs", "them", "they", "us", "we",
            "what", "which", "who", "whom", "whose", "you", "your", "yours", "yourself",
        ],
    ),
    (
        Pos::Adp,
        &[
            "about", "above", "across", "after", "against", "along", "among", "around", "at",
            "before", "behind", "below", "between", "beyond", "by", "down", "during", "for",
            "from", "in", "into", "of", "off", "on", "onto", "out", "over", "per", "through",
            "toward", "towards", "under", "up", "upon", "via", "with", "within", "without",
        ],
    ),
    (Pos::Cconj, &["and", "but", "nor", "or", "yet"]),
    (
        Pos::Sconj,
        &[
            "although", "because", "if", "since", "than", "though", "unless", "whereas",
            "whether", "while",
        ],
    ),
    (
        Pos::Aux,
        &[
            "am", "are", "be", "been", "being", "can", "could", "did", "do", "does", "had",
            "has", "have", "having", "is", "may", "might", "must", "shall", "should", "was",
            "were", "will", "would",
        ],
    ),
    (Pos::Part, &["not", "to"]),
    (
        Pos::Adv,
        &[
            "again", "almost", "already", "also", "always", "even", "here", "however", "just",
            "never", "now", "often", "only", "quite", "rather", "really", "still", "then",
            "there", "therefore", "too", "very", "well",
        ],
    ),
    (
        Pos::Num,
        &[
            "eight", "eleven", "five", "four", "hundred", "million", "nine", "one", "seven",
            "six", "ten", "thousand", "three", "twelve", "twenty", "two",
        ],
    ),
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const VERB_LEXICON: &[&str] = &[
    "achieve", "analyze", "apply", "architect", "automate", "build", "collaborate",
    "communicate", "comply", "contribute", "coordinate", "create", "debug", "define",
    "deliver", "deploy", "design", "develop", "drive", "enable", "ensure", "grow", "handle",
    "help", "hire", "implement", "improve", "integrate", "join", "know", "launch", "lead",
    "learn", "maintain", "manage", "mentor", "migrate", "monitor", "need", "optimize", "own",
    "partner", "plan", "prefer", "provide", "reduce", "rely", "report", "require", "research",
    "review", "scale", "seek", "ship", "solve", "support", "test", "understand", "use",
    "work", "write",
];

const ADJECTIVE_LEXICON: &[&str] = &[
    "agile", "best", "better", "clean", "clear", "competitive", "complex", "current", "daily",
    "deep", "early", "efficient", "excellent", "familiar", "fast", "friendly", "good",
    "great", "high", "hybrid", "independent", "junior", "key", "large", "likely", "low",
    "main", "modern", "monthly", "new", "open", "proficient", "quarterly", "quick", "recent",
    "relevant", "remote", "senior", "small", "solid", "strong", "weekly", "yearly",
];

/// Nouns that look like adverbs or gerunds.
const NOUN_LEXICON: &[&str] = &[
    "accounting", "anomaly", "assembly", "banking", "building", "caching", "computing",
    "engineering", "family", "funding", "hosting", "learning", "logging", "marketing",
    "messaging", "mining", "modeling", "modelling", "monitoring", "networking", "onboarding",
    "pricing", "processing", "programming", "reasoning", "recruiting", "reporting", "routing",
    "scheduling", "scripting", "staffing", "string", "supply", "testing", "thing", "training",
    "understanding", "writing",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "able", "ible", "ful", "ous", "less", "ical", "ional", "ive", "ic", "ish",
];

/// Deterministic rule-based pipeline. Build once at startup and share behind an `Arc`.
pub struct RuleBasedPipeline {
    closed_class: HashMap<&'static str, Pos>,
    verbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    nouns: HashSet<&'static str>,
}

impl RuleBasedPipeline {
    pub fn new() -> Self {
        let mut closed_class = HashMap::new();
        for (pos, words) in CLOSED_CLASS {
            for word in *words {
                closed_class.entry(*word).or_insert(*pos);
            }
        }

        Self {
            closed_class,
            verbs: VERB_LEXICON.iter().copied().collect(),
            adjectives: ADJECTIVE_LEXICON.iter().copied().collect(),
            nouns: NOUN_LEXICON.iter().copied().collect(),
        }
    }

    fn tag(&self, surface: &str, prev: Option<&str>, sentence_start: bool) -> Pos {
        let first = match surface.chars().next() {
            Some(c) => c,
            None => return Pos::Sym,
        };

        if !first.is_alphanumeric() && first != '_' {
            return if PUNCTUATION.contains(first) {
                Pos::Punct
            } else {
                Pos::Sym
            };
        }

        if surface.chars().all(char::is_numeric) {
            return Pos::Num;
        }

        let lower = surface.to_lowercase();
        if let Some(pos) = self.closed_class.get(lower.as_str()) {
            return *pos;
        }

        let all_caps = surface.chars().count() >= 2
            && surface.chars().any(char::is_alphabetic)
            && surface
                .chars()
                .all(|c| !c.is_alphabetic() || c.is_uppercase());
        if all_caps || (first.is_uppercase() && !sentence_start) {
            return Pos::Propn;
        }

        let prev_lower = prev.map(str::to_lowercase);
        self.tag_open_class(&lower, prev_lower.as_deref())
    }

    fn tag_open_class(&self, lower: &str, prev: Option<&str>) -> Pos {
        let after_determiner =
            prev.is_some_and(|p| self.closed_class.get(p) == Some(&Pos::Det) || p.ends_with("'s"));
        let after_infinitive = prev.is_some_and(|p| p == "to" || MODALS.contains(&p));

        if self.nouns.contains(lower) {
            return Pos::Noun;
        }
        if self.adjectives.contains(lower) {
            return Pos::Adj;
        }
        if self.verbs.contains(lower) {
            return if after_determiner { Pos::Noun } else { Pos::Verb };
        }
        if after_infinitive {
            return Pos::Verb;
        }

        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ly") {
            return Pos::Adv;
        }
        if len > 5 && lower.ends_with("ing") {
            return if after_determiner { Pos::Noun } else { Pos::Verb };
        }
        if len > 4 && lower.ends_with("ed") && !(len <= 5 && lower.ends_with("eed")) {
            return Pos::Verb;
        }
        if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return Pos::Adj;
        }

        Pos::Noun
    }
}

impl Default for RuleBasedPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePipeline for RuleBasedPipeline {
    fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut prev_end = 0;

        for m in TOKEN_RE.find_iter(text) {
            let surface = m.as_str();
            let prev = tokens.last().map(|t| t.text.as_str());
            let sentence_start = match prev {
                None => true,
                Some(p) => SENTENCE_BREAKS.contains(&p) || text[prev_end..m.start()].contains('\n'),
            };

            let pos = self.tag(surface, prev, sentence_start);
            tokens.push(Token {
                text: surface.to_string(),
                lemma: lemmatize(surface, pos),
                pos,
                is_stop: is_stop_word(surface),
                is_alpha: surface.chars().all(char::is_alphabetic),
            });
            prev_end = m.end();
        }

        tokens
    }
}
