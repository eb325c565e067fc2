use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::article::Article;
use crate::text::tokenize;

pub const FALLBACK_TITLE: &str = "Latest Technology Trends and Developments";

lazy_static! {
    // Trailing source attributions such as " - TechCrunch" or " | The Verge".
    static ref SOURCE_SUFFIX: Regex =
        Regex::new(r"\s+[-–|]\s+\w+(\s+\w+)?$").expect("valid source suffix pattern");
}

/// Strips a trailing " - Source" style attribution from a headline.
pub fn clean_title(title: &str) -> String {
    SOURCE_SUFFIX.replace(title.trim(), "").trim().to_string()
}

/// The most recently published member; undated members only win when no
/// member carries a usable timestamp.
pub fn most_recent(members: &[Article]) -> Option<&Article> {
    let mut best: Option<(&Article, chrono::DateTime<chrono::Utc>)> = None;
    for article in members {
        if let Some(published) = article.published_datetime() {
            match best {
                Some((_, current)) if published <= current => {}
                _ => best = Some((article, published)),
            }
        }
    }
    best.map(|(article, _)| article).or_else(|| members.first())
}

/// Suggests a headline for a topic.
///
/// The most recent member's cleaned title is used when it is between 15 and
/// 99 characters and shares vocabulary with the dominant terms; otherwise the
/// top four dominant terms are combined.
pub fn suggest_title(members: &[Article], dominant_terms: &[String]) -> String {
    if let Some(article) = most_recent(members) {
        let cleaned = clean_title(&article.title);
        let length = cleaned.chars().count();
        if (15..100).contains(&length) && overlaps_terms(&cleaned, dominant_terms) {
            return cleaned;
        }
    }

    if dominant_terms.is_empty() {
        return FALLBACK_TITLE.to_string();
    }

    let terms: Vec<String> = dominant_terms.iter().take(4).map(|t| title_case(t)).collect();
    format!("Trending in Tech: {}", terms.join(", "))
}

/// Without dominant terms there is nothing to contradict the headline.
fn overlaps_terms(title: &str, dominant_terms: &[String]) -> bool {
    if dominant_terms.is_empty() {
        return true;
    }
    let terms: HashSet<String> = dominant_terms.iter().map(|t| t.to_lowercase()).collect();
    tokenize(title).iter().any(|token| terms.contains(token))
}

fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn terms(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(
            clean_title("Chipmakers race to 2nm - TechCrunch"),
            "Chipmakers race to 2nm"
        );
        assert_eq!(clean_title("Apple unveils Vision | The Verge"), "Apple unveils Vision");
        assert_eq!(clean_title("No attribution here"), "No attribution here");
    }

    #[test]
    fn test_prefers_most_recent_member_title() {
        let now = Utc::now();
        let members = vec![
            Article::new("Older quantum chip story", "u1", "A", "")
                .with_published_at(now - Duration::days(2)),
            Article::new("Quantum chip hits new record - Wired", "u2", "B", "")
                .with_published_at(now),
            Article::new("Undated quantum chip story", "u3", "C", ""),
        ];
        let title = suggest_title(&members, &terms(&["quantum", "chip"]));
        assert_eq!(title, "Quantum chip hits new record");
    }

    #[test]
    fn test_synthesizes_from_terms_when_title_unrelated() {
        let members = vec![Article::new("Weekly newsletter roundup", "u1", "A", "")];
        let title = suggest_title(
            &members,
            &terms(&["battery", "lithium", "solid state", "cars", "grid"]),
        );
        assert_eq!(title, "Trending in Tech: Battery, Lithium, Solid State, Cars");
    }

    #[test]
    fn test_short_title_falls_back() {
        let members = vec![Article::new("AI news", "u1", "A", "")];
        assert_eq!(suggest_title(&members, &[]), FALLBACK_TITLE);
        assert_eq!(suggest_title(&members, &terms(&["ai"])), "Trending in Tech: Ai");
    }

    #[test]
    fn test_most_recent_without_dates_is_first() {
        let members = vec![
            Article::new("First", "u1", "A", ""),
            Article::new("Second", "u2", "A", ""),
        ];
        assert_eq!(most_recent(&members).map(|a| a.url.as_str()), Some("u1"));
        assert!(most_recent(&[]).is_none());
    }
}
