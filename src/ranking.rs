use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::topic::Topic;
use crate::TARGET_PIPELINE;

/// Keeps topics at or above the relevance threshold, most relevant first,
/// truncated to `max_topics`. Equal scores keep their incoming order.
pub fn filter_and_rank(topics: Vec<Topic>, config: &PipelineConfig) -> Vec<Topic> {
    let total = topics.len();
    let mut relevant: Vec<Topic> = topics
        .into_iter()
        .filter(|topic| {
            let keep = topic.relevance_score >= config.min_topic_relevance;
            if !keep {
                debug!(
                    target: TARGET_PIPELINE,
                    "Filtering topic {} with relevance {:.3}", topic.id, topic.relevance_score
                );
            }
            keep
        })
        .collect();

    relevant.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    relevant.truncate(config.max_topics);

    info!(
        target: TARGET_PIPELINE,
        "Ranked {} of {} topics (threshold {:.2})",
        relevant.len(),
        total,
        config.min_topic_relevance
    );
    relevant
}
