use serde::{Deserialize, Serialize};
use std::fmt;

use crate::article::Article;

/// A cluster as produced by the clusterer: members and characteristic terms only.
#[derive(Debug, Clone, Serialize)]
pub struct TopicSkeleton {
    pub id: usize,
    pub member_articles: Vec<Article>,
    pub dominant_terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// Classifies an average compound score.
    pub fn from_compound(compound: f64) -> Self {
        if compound > 0.05 {
            Polarity::Positive
        } else if compound < -0.05 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment averaged over a topic's members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub overall: Polarity,
}

impl Default for SentimentSummary {
    fn default() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 0.0,
            overall: Polarity::Neutral,
        }
    }
}

/// A fully analyzed topic.
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: usize,
    pub member_articles: Vec<Article>,
    pub article_count: usize,
    pub dominant_terms: Vec<String>,
    pub sentiment: SentimentSummary,
    pub relevance_score: f64,
    pub suggested_title: String,
    pub keywords: Vec<String>,
    pub summary: String,
    /// Members whose timestamp was missing or unparseable and counted as "now".
    #[serde(skip_serializing_if = "is_zero")]
    pub undated_members: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl Topic {
    pub fn member_count(&self) -> usize {
        self.member_articles.len()
    }
}
