use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::synthesis::TemplateKind;
use crate::topic::{Polarity, Topic};

const SOURCE_TOPIC_KEYWORDS: usize = 5;

/// How a section body was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionProvenance {
    /// Written by the language model.
    Generated,
    /// Assembled from member summaries.
    Extractive,
    /// No members were assigned to the section.
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTopicRef {
    pub id: usize,
    pub suggested_title: String,
    pub keywords: Vec<String>,
    pub article_count: usize,
    pub sentiment: Polarity,
}

impl From<&Topic> for SourceTopicRef {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            suggested_title: topic.suggested_title.clone(),
            keywords: topic
                .keywords
                .iter()
                .take(SOURCE_TOPIC_KEYWORDS)
                .cloned()
                .collect(),
            article_count: topic.member_count(),
            sentiment: topic.sentiment.overall,
        }
    }
}

/// A synthesized article draft, one per retained topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub content: String,
    pub meta_description: String,
    /// Tags.
    pub keywords: Vec<String>,
    pub category: String,
    pub template_used: TemplateKind,
    pub source_topic: SourceTopicRef,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<SectionProvenance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ArticleRecord {
    /// True when any section fell back from the language model.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}
