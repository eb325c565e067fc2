use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::article::Article;
use crate::config::PipelineConfig;
use crate::topic::SentimentSummary;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The four normalized sub-scores behind a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceBreakdown {
    pub count: f64,
    pub sentiment: f64,
    pub recency: f64,
    pub diversity: f64,
    /// Members whose timestamp was missing or unparseable.
    pub undated: usize,
}

impl RelevanceBreakdown {
    /// Weighted blend of the sub-scores, clamped to `[0, 1]`.
    pub fn score(&self, config: &PipelineConfig) -> f64 {
        let weights = &config.relevance_weights;
        let blended = weights.count * self.count
            + weights.sentiment * self.sentiment
            + weights.recency * self.recency
            + weights.diversity * self.diversity;
        blended.clamp(0.0, 1.0)
    }
}

pub fn relevance_breakdown(
    members: &[Article],
    sentiment: &SentimentSummary,
    config: &PipelineConfig,
    now: DateTime<Utc>,
) -> RelevanceBreakdown {
    let count = (members.len() as f64 / config.max_articles_per_topic as f64).min(1.0);
    let sentiment_intensity = sentiment.compound.abs().min(1.0);

    let mut undated = 0;
    let mut days_old_sum = 0.0;
    for article in members {
        let published = article.published_datetime().unwrap_or_else(|| {
            undated += 1;
            now
        });
        // Timestamps in the future count as brand new
        let days_old = ((now - published).num_seconds() as f64 / SECONDS_PER_DAY).max(0.0);
        days_old_sum += days_old;
    }
    let recency = if members.is_empty() {
        0.0
    } else {
        let average_days_old = days_old_sum / members.len() as f64;
        1.0 - (average_days_old / config.recency_window_days).min(1.0)
    };

    let sources: HashSet<&str> = members.iter().map(|a| a.source.trim()).collect();
    let diversity = (sources.len() as f64 / config.diversity_saturation as f64).min(1.0);

    RelevanceBreakdown {
        count,
        sentiment: sentiment_intensity,
        recency,
        diversity,
        undated,
    }
}
