use std::collections::HashSet;

use crate::nlp::LanguagePipeline;

/// Lemmas shorter than this many characters are never keywords.
const MIN_KEYWORD_CHARS: usize = 3;

/// Extracts up to `limit` unique keywords from a job description, in first-seen order.
///
/// Keeps alphabetic, non-stop content tokens (noun, proper noun, verb, adjective)
/// and emits their lowercased lemma.
pub fn extract_keywords(
    pipeline: &dyn LanguagePipeline,
    job_description: &str,
    limit: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in pipeline.analyze(job_description) {
        if keywords.len() >= limit {
            break;
        }
        if token.is_stop
            || !token.is_alpha
            || token.lemma.chars().count() < MIN_KEYWORD_CHARS
            || !token.pos.is_content()
        {
            continue;
        }
        let keyword = token.lemma.to_lowercase();
        if seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }

    keywords
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatch {
    pub matched: Vec<String>,
    pub missed: Vec<String>,
}

/// Partitions `keywords` by raw substring containment in the lowercased text.
/// Partial-word hits count ("api" matches "apis").
pub fn match_keywords(text: &str, keywords: &[String]) -> KeywordMatch {
    let haystack = text.to_lowercase();
    let (matched, missed) = keywords
        .iter()
        .cloned()
        .partition(|keyword| haystack.contains(keyword.as_str()));
    KeywordMatch { matched, missed }
}
