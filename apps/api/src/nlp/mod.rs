//! Language pipeline: tokenization, stop-word flags, part-of-speech tags and lemmas.
//!
//! The keyword extractor and the lexical similarity backend both consume the
//! `LanguagePipeline` trait, so the tagger behind it can be replaced without
//! touching either caller. `AppState` carries one shared `Arc<dyn LanguagePipeline>`
//! built at startup.

pub mod lemma;
pub mod stopwords;
pub mod tagger;

pub use tagger::RuleBasedPipeline;

/// Universal part-of-speech tags (the subset the tagger can emit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Propn,
    Verb,
    Adj,
    Adv,
    Aux,
    Adp,
    Det,
    Pron,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
    Sym,
}

impl Pos {
    /// Open-class tags that carry the content of a job description.
    pub fn is_content(self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn | Pos::Verb | Pos::Adj)
    }
}

/// A single analyzed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    /// Base form. Case follows the surface text for proper nouns.
    pub lemma: String,
    pub pos: Pos,
    pub is_stop: bool,
    pub is_alpha: bool,
}

/// Linguistic analysis of free text. Implementations must be deterministic.
pub trait LanguagePipeline: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<Token>;
}
