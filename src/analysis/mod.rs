//! Per-topic enrichment: sentiment, relevance, title, keywords and summary.

pub mod keywords;
pub mod relevance;
pub mod summary;
pub mod title;

pub use keywords::extract_keywords;
pub use relevance::{relevance_breakdown, RelevanceBreakdown};
pub use summary::build_summary;
pub use title::{clean_title, suggest_title, FALLBACK_TITLE};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::article::Article;
use crate::config::PipelineConfig;
use crate::sentiment::polarity_scores;
use crate::topic::{Polarity, SentimentSummary, Topic, TopicSkeleton};
use crate::TARGET_PIPELINE;

/// Enriches a skeleton into a full topic. `now` anchors recency scoring.
pub fn analyze(skeleton: TopicSkeleton, config: &PipelineConfig, now: DateTime<Utc>) -> Topic {
    let TopicSkeleton {
        id,
        member_articles,
        dominant_terms,
    } = skeleton;

    let sentiment = aggregate_sentiment(&member_articles);
    let breakdown = relevance_breakdown(&member_articles, &sentiment, config, now);
    if breakdown.undated > 0 {
        debug!(
            target: TARGET_PIPELINE,
            "Topic {}: {} of {} articles lack a usable timestamp, treated as current",
            id,
            breakdown.undated,
            member_articles.len()
        );
    }
    let relevance_score = breakdown.score(config);

    let suggested_title = suggest_title(&member_articles, &dominant_terms);
    let keywords = extract_keywords(&member_articles, &dominant_terms);
    let summary = build_summary(&member_articles, &dominant_terms);

    debug!(
        target: TARGET_PIPELINE,
        "Topic {} '{}': {} articles, relevance {:.3}, sentiment {}",
        id,
        suggested_title,
        member_articles.len(),
        relevance_score,
        sentiment.overall
    );

    Topic {
        id,
        article_count: member_articles.len(),
        member_articles,
        dominant_terms,
        sentiment,
        relevance_score,
        suggested_title,
        keywords,
        summary,
        undated_members: breakdown.undated,
    }
}

/// Averages polarity scores of every member's "title. summary" text.
pub fn aggregate_sentiment(members: &[Article]) -> SentimentSummary {
    if members.is_empty() {
        return SentimentSummary::default();
    }

    let mut totals = [0.0; 4];
    for article in members {
        let scores = polarity_scores(&article.sentiment_text());
        totals[0] += scores.compound;
        totals[1] += scores.positive;
        totals[2] += scores.negative;
        totals[3] += scores.neutral;
    }

    let count = members.len() as f64;
    let compound = totals[0] / count;
    SentimentSummary {
        compound,
        positive: totals[1] / count,
        negative: totals[2] / count,
        neutral: totals[3] / count,
        overall: Polarity::from_compound(compound),
    }
}
