//! Input article record and tolerant timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw news article as supplied by an article source.
///
/// `url` is the identity of an article: two records with the same `url`
/// are the same article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    /// Publication time as delivered by the source, parsed lazily.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_hint: Option<String>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            published_at: None,
            summary: summary.into(),
            content: String::new(),
            category_hint: None,
        }
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at.to_rfc3339());
        self
    }

    /// The text used for clustering: `title + " " + summary`.
    pub fn cluster_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }

    /// The text used for sentiment scoring: `title + ". " + summary`.
    pub fn sentiment_text(&self) -> String {
        format!("{}. {}", self.title, self.summary)
    }

    /// Parsed publication time, `None` when missing or unparseable.
    pub fn published_datetime(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_date)
    }
}

/// Parse a date string in the formats news sources commonly emit.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    // Try RFC3339, accepting a trailing "Z"
    if let Ok(date) = DateTime::parse_from_rfc3339(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // Try RFC2822 (RSS pubDate)
    if let Ok(date) = DateTime::parse_from_rfc2822(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // ISO 8601 with numeric offset
    if let Ok(date) = DateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(date.with_timezone(&Utc));
    }

    // Naive timestamps are taken as UTC
    for format in &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive.and_utc());
        }
    }

    for format in &["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_formats() {
        let date = parse_date("2025-03-14T09:30:00Z").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 3, 14));
        assert_eq!(date.hour(), 9);

        let date = parse_date("Fri, 14 Mar 2025 09:30:00 +0100").unwrap();
        assert_eq!(date.hour(), 8);

        let date = parse_date("2025-03-14 09:30:00").unwrap();
        assert_eq!(date.minute(), 30);

        let date = parse_date("2025-03-14").unwrap();
        assert_eq!(date.hour(), 0);

        let date = parse_date("2025-03-14T09:30:00.250").unwrap();
        assert_eq!(date.second(), 0);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("   ").is_none());
        assert!(parse_date("last tuesday").is_none());
    }

    #[test]
    fn test_article_deserializes_partial_records() {
        let json = r#"{"title": "Chip shortage eases", "url": "https://example.com/a"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Chip shortage eases");
        assert!(article.summary.is_empty());
        assert!(article.published_datetime().is_none());
    }

    #[test]
    fn test_texts() {
        let article = Article::new("Title", "u", "s", "Summary here");
        assert_eq!(article.cluster_text(), "Title Summary here");
        assert_eq!(article.sentiment_text(), "Title. Summary here");
    }
}
