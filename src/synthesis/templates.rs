use serde::{Deserialize, Serialize};
use std::fmt;

use crate::topic::{Polarity, Topic};

/// Prose skeleton of one article style.
#[derive(Debug)]
pub struct ArticleTemplate {
    pub intro: &'static str,
    pub conclusion: &'static str,
    pub call_to_action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    NewsRoundup,
    DeepDive,
    Analysis,
}

const NEWS_ROUNDUP: ArticleTemplate = ArticleTemplate {
    intro: "The world of {{primary_keyword}} continues to evolve at a rapid pace. In this article, we explore the latest developments and what they mean for the future.",
    conclusion: "As we've seen, the landscape of {{primary_keyword}} is constantly changing. Stay tuned as we continue to monitor these developments and their implications for the industry.",
    call_to_action: "What's your take on these recent developments in {{primary_keyword}}? Share your thoughts in the comments below!",
};

const DEEP_DIVE: ArticleTemplate = ArticleTemplate {
    intro: "{{primary_keyword}} is transforming how we think about technology and its role in society. Let's explore the nuances and implications of these recent developments.",
    conclusion: "The evolution of {{primary_keyword}} represents a significant shift in our technological landscape. By understanding these developments, we can better prepare for what lies ahead.",
    call_to_action: "How do you see {{primary_keyword}} affecting your industry or daily life? Join the conversation below!",
};

const ANALYSIS: ArticleTemplate = ArticleTemplate {
    intro: "Recent developments in {{primary_keyword}} have sparked important conversations about where technology is headed. In this analysis, we break down the key points and their significance.",
    conclusion: "While it's impossible to predict exactly how {{primary_keyword}} will evolve, the trends we're seeing suggest a fascinating path forward. The implications for technology, business, and society are profound.",
    call_to_action: "What aspects of {{primary_keyword}} are you most excited or concerned about? Let us know in the comments!",
};

pub const TITLE_FORMATS: [&str; 5] = [
    "{{primary_keyword}}: {{secondary_aspect}} Explained",
    "The Ultimate Guide to {{primary_keyword}} in {{current_year}}",
    "How {{primary_keyword}} is Changing {{related_industry}}",
    "{{number}} Ways {{primary_keyword}} is Revolutionizing Technology",
    "The Future of {{primary_keyword}}: Trends and Predictions",
];

pub const META_DESCRIPTION_FORMATS: [&str; 3] = [
    "Discover the latest developments in {{primary_keyword}} and how they're shaping the future of technology. Learn about {{secondary_aspect}} and more in our comprehensive analysis.",
    "Explore how {{primary_keyword}} is transforming {{related_industry}} with innovative approaches to {{secondary_aspect}}. Stay ahead with our expert insights.",
    "Looking to understand {{primary_keyword}}? Our analysis covers {{secondary_aspect}} and provides actionable insights for navigating this evolving landscape.",
];

pub const HEADING_PATTERNS: [&str; 6] = [
    "The Rise of {{primary_keyword}}",
    "Understanding {{secondary_aspect}}",
    "Key Developments in {{primary_keyword}}",
    "How {{primary_keyword}} Impacts {{related_industry}}",
    "Expert Opinions on {{primary_keyword}}",
    "The Future of {{secondary_aspect}}",
];

/// Numerals offered to list-style titles.
pub const TITLE_NUMBERS: [&str; 3] = ["5", "7", "10"];

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::NewsRoundup => "news_roundup",
            TemplateKind::DeepDive => "deep_dive",
            TemplateKind::Analysis => "analysis",
        }
    }

    pub fn template(&self) -> &'static ArticleTemplate {
        match self {
            TemplateKind::NewsRoundup => &NEWS_ROUNDUP,
            TemplateKind::DeepDive => &DEEP_DIVE,
            TemplateKind::Analysis => &ANALYSIS,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the article style from the topic's shape.
pub fn select_template(topic: &Topic) -> TemplateKind {
    if topic.member_count() >= 10 {
        TemplateKind::NewsRoundup
    } else if topic.sentiment.overall != Polarity::Neutral || topic.relevance_score > 0.7 {
        TemplateKind::Analysis
    } else {
        TemplateKind::DeepDive
    }
}

/// Values substituted into `{{placeholder}}` slots.
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    pub primary_keyword: &'a str,
    pub secondary_aspect: &'a str,
    pub related_industry: &'a str,
    pub current_year: i32,
    pub number: &'a str,
}

impl Placeholders<'_> {
    pub fn fill(&self, template: &str) -> String {
        template
            .replace("{{primary_keyword}}", self.primary_keyword)
            .replace("{{secondary_aspect}}", self.secondary_aspect)
            .replace("{{related_industry}}", self.related_industry)
            .replace("{{current_year}}", &self.current_year.to_string())
            .replace("{{number}}", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::topic::SentimentSummary;

    fn topic(members: usize, overall: Polarity, relevance_score: f64) -> Topic {
        let member_articles: Vec<Article> = (0..members)
            .map(|i| Article::new("t", format!("u{i}"), "s", ""))
            .collect();
        Topic {
            id: 0,
            article_count: member_articles.len(),
            member_articles,
            dominant_terms: Vec::new(),
            sentiment: SentimentSummary {
                overall,
                ..SentimentSummary::default()
            },
            relevance_score,
            suggested_title: String::new(),
            keywords: Vec::new(),
            summary: String::new(),
            undated_members: 0,
        }
    }

    #[test]
    fn test_select_template() {
        assert_eq!(
            select_template(&topic(10, Polarity::Neutral, 0.5)),
            TemplateKind::NewsRoundup
        );
        assert_eq!(
            select_template(&topic(4, Polarity::Negative, 0.5)),
            TemplateKind::Analysis
        );
        assert_eq!(
            select_template(&topic(4, Polarity::Neutral, 0.71)),
            TemplateKind::Analysis
        );
        assert_eq!(
            select_template(&topic(4, Polarity::Neutral, 0.7)),
            TemplateKind::DeepDive
        );
    }

    #[test]
    fn test_fill_placeholders() {
        let values = Placeholders {
            primary_keyword: "Edge AI",
            secondary_aspect: "latency",
            related_industry: "IoT",
            current_year: 2025,
            number: "7",
        };
        assert_eq!(
            values.fill(TITLE_FORMATS[1]),
            "The Ultimate Guide to Edge AI in 2025"
        );
        assert_eq!(
            values.fill(TITLE_FORMATS[3]),
            "7 Ways Edge AI is Revolutionizing Technology"
        );
        assert!(!values.fill(HEADING_PATTERNS[3]).contains("{{"));
    }

    #[test]
    fn test_template_kind_serializes_snake_case() {
        let json = serde_json::to_string(&TemplateKind::NewsRoundup).unwrap();
        assert_eq!(json, "\"news_roundup\"");
        assert_eq!(TemplateKind::DeepDive.to_string(), "deep_dive");
    }
}
