use crate::article::Article;
use crate::text::split_sentences;

use super::title::most_recent;

const MAX_SUMMARY_SENTENCES: usize = 5;
const MAX_SUMMARY_CHARS: usize = 500;
const MIN_SUMMARY_CHARS: usize = 100;

/// Extractive topic summary built from member titles and summary sentences.
///
/// Sentences are ranked by how many dominant terms they mention, with a small
/// bonus for brevity. Selection stops at five sentences or once more than 500
/// characters are collected. A result under 100 characters is replaced by the
/// most recent member's own summary.
pub fn build_summary(members: &[Article], dominant_terms: &[String]) -> String {
    let mut sentences: Vec<String> = Vec::new();
    for article in members {
        if !article.title.trim().is_empty() {
            sentences.push(article.title.trim().to_string());
        }
        sentences.extend(split_sentences(&article.summary));
    }

    let lowered_terms: Vec<String> = dominant_terms.iter().map(|t| t.to_lowercase()).collect();
    let mut scored: Vec<(f64, &String)> = sentences
        .iter()
        .map(|sentence| (sentence_score(sentence, &lowered_terms), sentence))
        .collect();
    // Stable: equal scores keep their original order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut selected: Vec<&str> = Vec::new();
    let mut total_length = 0;
    for (_, sentence) in scored {
        if total_length > MAX_SUMMARY_CHARS || selected.len() >= MAX_SUMMARY_SENTENCES {
            break;
        }
        if !selected.contains(&sentence.as_str()) {
            selected.push(sentence);
            total_length += sentence.chars().count();
        }
    }

    let summary = selected.join(" ");
    if summary.chars().count() < MIN_SUMMARY_CHARS {
        if let Some(article) = most_recent(members) {
            if !article.summary.trim().is_empty() {
                return article.summary.trim().to_string();
            }
        }
    }
    summary
}

fn sentence_score(sentence: &str, lowered_terms: &[String]) -> f64 {
    let lower = sentence.to_lowercase();
    let term_hits = lowered_terms.iter().filter(|t| lower.contains(t.as_str())).count();
    let words = sentence.split_whitespace().count();
    term_hits as f64 + 1.0 / (words as f64 + 10.0)
}
