use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::topic::{Polarity, Topic};

pub const DEFAULT_INDUSTRY: &str = "Technology";
pub const FALLBACK_PRIMARY_KEYWORD: &str = "Technology Trends";
const MAX_SECONDARY_ASPECTS: usize = 4;
const MAX_TAG_KEYWORDS: usize = 10;

const INDUSTRIES: &[(&str, &[&str])] = &[
    (
        "AI",
        &["artificial intelligence", "machine learning", "neural network", "deep learning"],
    ),
    (
        "Cloud Computing",
        &["cloud", "aws", "azure", "google cloud", "saas", "paas", "iaas"],
    ),
    (
        "Cybersecurity",
        &["security", "cyber", "hack", "breach", "encryption", "firewall"],
    ),
    (
        "Blockchain",
        &["blockchain", "crypto", "bitcoin", "ethereum", "token", "defi", "nft"],
    ),
    (
        "IoT",
        &["iot", "internet of things", "connected device", "smart home", "sensor"],
    ),
    (
        "Mobile Technology",
        &["mobile", "smartphone", "app", "android", "ios", "5g"],
    ),
    (
        "Software Development",
        &["software", "development", "programming", "code", "api", "sdk"],
    ),
    (
        "Data Science",
        &["data science", "big data", "analytics", "visualization", "database"],
    ),
];

const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "airths_codex",
        &["analysis", "future", "prediction", "opinion", "perspective"],
    ),
    (
        "technology_ai",
        &["ai", "machine learning", "artificial intelligence", "automation", "algorithm"],
    ),
    (
        "creative_explorations",
        &["design", "creative", "art", "innovation", "imagination"],
    ),
    (
        "workflows_automation",
        &["workflow", "productivity", "automation", "tools", "software"],
    ),
];

lazy_static! {
    // Long capitalized words usable as an aspect when a topic has no spare keywords.
    static ref ASPECT_WORD: Regex =
        Regex::new(r"\b[A-Za-z][a-z]{5,}\b").expect("valid aspect pattern");
    static ref CAPITALIZED_WORD: Regex =
        Regex::new(r"\b[A-Z][a-z]+\b").expect("valid capitalized pattern");
}

/// Lowercased text padded with single spaces so phrases match on word boundaries.
pub struct MatchText(String);

impl MatchText {
    pub fn new(text: &str) -> Self {
        let words: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        MatchText(format!(" {} ", words.join(" ")))
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.0.contains(&format!(" {} ", term))
    }

    /// Number of `terms` present.
    pub fn hits(&self, terms: &[&str]) -> usize {
        terms.iter().filter(|term| self.contains_term(term)).count()
    }
}

/// Keywords, dominant terms and summary of a topic, for classification.
pub fn classification_text(topic: &Topic) -> MatchText {
    MatchText::new(&format!(
        "{} {} {}",
        topic.keywords.join(" "),
        topic.dominant_terms.join(" "),
        topic.summary
    ))
}

/// Label with the most term hits; the earliest entry wins ties. `None` without any hit.
fn best_match(table: &[(&'static str, &[&str])], text: &MatchText) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;
    for (label, terms) in table {
        let hits = text.hits(terms);
        let better = match best {
            Some((_, current)) => hits > current,
            None => hits > 0,
        };
        if better {
            best = Some((*label, hits));
        }
    }
    best.map(|(label, _)| label)
}

pub fn infer_industry(text: &MatchText) -> &'static str {
    best_match(INDUSTRIES, text).unwrap_or(DEFAULT_INDUSTRY)
}

pub fn select_category(text: &MatchText, default_category: &str) -> String {
    best_match(CATEGORIES, text)
        .map(str::to_string)
        .unwrap_or_else(|| default_category.to_string())
}

pub fn primary_keyword(topic: &Topic) -> String {
    if let Some(keyword) = topic.keywords.first() {
        return keyword.clone();
    }
    if let Some(term) = topic.dominant_terms.first() {
        return term.clone();
    }
    CAPITALIZED_WORD
        .find(&topic.suggested_title)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_PRIMARY_KEYWORD.to_string())
}

/// Up to four further keywords or dominant terms, distinct from the primary
/// keyword and each other (case-insensitive). Falls back to long words from
/// member titles.
pub fn secondary_aspects(topic: &Topic, primary: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::from([primary.to_lowercase()]);
    let mut aspects = Vec::new();

    let candidates = topic
        .keywords
        .iter()
        .skip(1)
        .chain(topic.dominant_terms.iter().skip(1));
    for candidate in candidates {
        if aspects.len() >= MAX_SECONDARY_ASPECTS {
            break;
        }
        if seen.insert(candidate.to_lowercase()) {
            aspects.push(candidate.clone());
        }
    }

    if aspects.is_empty() {
        for article in topic.member_articles.iter().take(3) {
            let fresh = ASPECT_WORD
                .find_iter(&article.title)
                .map(|m| m.as_str())
                .find(|word| !seen.contains(&word.to_lowercase()));
            if let Some(word) = fresh {
                seen.insert(word.to_lowercase());
                aspects.push(word.to_string());
            }
        }
    }

    aspects
}

/// Topic keywords, then dominant terms up to ten, a sentiment tag for
/// non-neutral topics and the industry; exact duplicates removed.
pub fn build_tags(topic: &Topic, industry: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for keyword in topic.keywords.iter().take(MAX_TAG_KEYWORDS) {
        push_unique(&mut tags, keyword.clone());
    }
    for term in &topic.dominant_terms {
        if tags.len() >= MAX_TAG_KEYWORDS {
            break;
        }
        push_unique(&mut tags, term.clone());
    }
    if topic.sentiment.overall != Polarity::Neutral {
        push_unique(&mut tags, format!("{} tech trends", topic.sentiment.overall));
    }
    if !industry.is_empty() {
        push_unique(&mut tags, industry.to_string());
    }

    tags
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}
