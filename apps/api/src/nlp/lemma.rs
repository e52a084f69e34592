//! Rule-based English lemmatizer.
//!
//! Irregular forms come from small lookup tables; everything else goes through
//! suffix rules keyed on the part-of-speech tag. Proper nouns keep their case.

use crate::nlp::Pos;

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("selves", "self"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("vertices", "vertex"),
    ("wives", "wife"),
    ("women", "woman"),
];

const INVARIANT_NOUNS: &[&str] = &[
    "devops",
    "economics",
    "jenkins",
    "kubernetes",
    "mathematics",
    "news",
    "pandas",
    "physics",
    "series",
    "species",
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("became", "become"),
    ("began", "begin"),
    ("begun", "begin"),
    ("been", "be"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("built", "build"),
    ("caught", "catch"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("did", "do"),
    ("does", "do"),
    ("done", "do"),
    ("driven", "drive"),
    ("drove", "drive"),
    ("felt", "feel"),
    ("found", "find"),
    ("gave", "give"),
    ("given", "give"),
    ("goes", "go"),
    ("gone", "go"),
    ("got", "get"),
    ("gotten", "get"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("had", "have"),
    ("has", "have"),
    ("held", "hold"),
    ("is", "be"),
    ("kept", "keep"),
    ("knew", "know"),
    ("known", "know"),
    ("led", "lead"),
    ("left", "leave"),
    ("made", "make"),
    ("met", "meet"),
    ("paid", "pay"),
    ("ran", "run"),
    ("said", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("sent", "send"),
    ("sought", "seek"),
    ("spent", "spend"),
    ("stood", "stand"),
    ("taken", "take"),
    ("taught", "teach"),
    ("thought", "think"),
    ("told", "tell"),
    ("took", "take"),
    ("understood", "understand"),
    ("was", "be"),
    ("were", "be"),
    ("won", "win"),
    ("wrote", "write"),
    ("written", "write"),
];

/// Verb stems that lose a silent final "e" before -ing/-ed and fail the generic rules.
const SILENT_E_STEMS: &[&str] = &[
    "achiev", "advis", "analyz", "captur", "chang", "clos", "comput", "configur", "continu",
    "declar", "driv", "enhanc", "ensur", "experienc", "figur", "hous", "improv", "includ",
    "influenc", "introduc", "issu", "leverag", "manag", "merg", "mov", "pars", "prepar",
    "produc", "propos", "provid", "pursu", "reduc", "releas", "requir", "resolv", "revis",
    "scal", "secur", "serv", "shar", "solv", "stor", "structur", "supervis", "us", "valu",
    "writ",
];

/// Returns the base form of `text` for the given tag.
pub fn lemmatize(text: &str, pos: Pos) -> String {
    match pos {
        Pos::Propn => proper_noun_lemma(text),
        Pos::Noun => noun_lemma(&text.to_lowercase()),
        Pos::Verb | Pos::Aux => verb_lemma(&text.to_lowercase()),
        _ => text.to_lowercase(),
    }
}

/// Acronym plurals ("APIs", "SDKs") drop the trailing "s"; other proper nouns are kept verbatim.
fn proper_noun_lemma(text: &str) -> String {
    if let Some(stem) = text.strip_suffix('s') {
        if stem.chars().count() >= 2 && stem.chars().all(|c| c.is_uppercase()) {
            return stem.to_string();
        }
    }
    text.to_string()
}

fn noun_lemma(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_NOUNS.iter().find(|(form, _)| *form == word) {
        return lemma.to_string();
    }
    if INVARIANT_NOUNS.contains(&word) || word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    if ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word.to_string();
    }
    if ["xes", "ches", "shes", "zzes"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 2].to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

fn verb_lemma(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_VERBS.iter().find(|(form, _)| *form == word) {
        return lemma.to_string();
    }
    let len = word.len();
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
            return format!("{stem}y");
        }
    }
    if len > 5 {
        if let Some(stem) = word.strip_suffix("ing") {
            return restore_stem(stem);
        }
    }
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ed") {
            return restore_stem(stem);
        }
    }
    if ["sses", "xes", "ches", "shes", "zzes"].iter().any(|s| word.ends_with(s)) {
        return word[..len - 2].to_string();
    }
    if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..len - 1].to_string();
    }
    word.to_string()
}

/// Undoes consonant doubling and restores silent "e" after stripping -ing/-ed.
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    if n > 3 {
        let (a, b) = (chars[n - 2], chars[n - 1]);
        if a == b && is_consonant(b) && !matches!(b, 'l' | 's' | 'z' | 'f') {
            return chars[..n - 1].iter().collect();
        }
    }

    if SILENT_E_STEMS.contains(&stem)
        || stem.ends_with("at")
        || stem.ends_with("bl")
        || stem.ends_with("iz")
        || is_short_cvc(&chars)
    {
        return format!("{stem}e");
    }

    stem.to_string()
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Three-letter consonant-vowel-consonant stems ("mak", "cod", "hir") take a final "e".
fn is_short_cvc(chars: &[char]) -> bool {
    if chars.len() != 3 {
        return false;
    }
    is_consonant(chars[0])
        && !is_consonant(chars[1])
        && is_consonant(chars[2])
        && !matches!(chars[2], 'w' | 'x' | 'y')
}
