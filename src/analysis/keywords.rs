use std::collections::HashSet;

use crate::article::Article;
use crate::text::capitalized_tokens;

pub const MAX_KEYWORDS: usize = 15;
const DOMINANT_KEYWORDS: usize = 10;

/// Top dominant terms followed by capitalized entity-like words from member
/// titles, deduplicated case-insensitively.
pub fn extract_keywords(members: &[Article], dominant_terms: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keywords = Vec::new();

    let entities = members.iter().flat_map(|a| capitalized_tokens(&a.title));
    let candidates = dominant_terms
        .iter()
        .take(DOMINANT_KEYWORDS)
        .cloned()
        .chain(entities);

    for candidate in candidates {
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
        if seen.insert(candidate.to_lowercase()) {
            keywords.push(candidate);
        }
    }

    keywords
}
