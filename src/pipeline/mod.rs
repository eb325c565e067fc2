//! End-to-end batch processing: dedupe, cluster, analyze, rank, synthesize.

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::analyze;
use crate::article::Article;
use crate::config::PipelineConfig;
use crate::dedup::dedupe;
use crate::llm::TextCompleter;
use crate::ranking::filter_and_rank;
use crate::record::ArticleRecord;
use crate::synthesis::ArticleSynthesizer;
use crate::topic::Topic;
use crate::vector::cluster;
use crate::TARGET_PIPELINE;

#[cfg(test)]
mod tests;

/// Ranked topics and one article record per topic, in the same order.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub topics: Vec<Topic>,
    pub articles: Vec<ArticleRecord>,
}

pub struct Pipeline {
    config: PipelineConfig,
    synthesizer: ArticleSynthesizer,
}

impl Pipeline {
    /// Validates `config` once; every later stage trusts it.
    pub fn new(config: PipelineConfig, completer: Arc<dyn TextCompleter>) -> Result<Self> {
        config.validate()?;
        let synthesizer = ArticleSynthesizer::new(completer, config.synthesis.clone());
        Ok(Self {
            config,
            synthesizer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Dedupes, clusters, analyzes and ranks `articles`.
    pub fn process_topics(&self, articles: &[Article], now: DateTime<Utc>) -> Vec<Topic> {
        let unique = dedupe(articles);
        info!(
            target: TARGET_PIPELINE,
            "Processing {} unique of {} articles",
            unique.len(),
            articles.len()
        );

        let topics: Vec<Topic> = cluster(&unique, &self.config)
            .into_iter()
            .map(|skeleton| analyze(skeleton, &self.config, now))
            .collect();

        let ranked = filter_and_rank(topics, &self.config);
        if ranked.is_empty() {
            warn!(target: TARGET_PIPELINE, "No topics met the relevance threshold");
        }
        ranked
    }

    pub async fn run(&self, articles: &[Article]) -> PipelineOutput {
        self.run_at(articles, Utc::now()).await
    }

    /// Runs the whole batch as of `now`. Topics are synthesized concurrently,
    /// and records come back in ranked-topic order.
    pub async fn run_at(&self, articles: &[Article], now: DateTime<Utc>) -> PipelineOutput {
        let topics = self.process_topics(articles, now);
        let seed = self
            .config
            .synthesis
            .template_seed
            .unwrap_or_else(rand::random::<u64>);

        let synthesizer = &self.synthesizer;
        let records: Vec<ArticleRecord> = stream::iter(topics.iter())
            .map(|topic| synthesizer.synthesize(topic, seed, now))
            .buffered(self.config.synthesis.concurrency)
            .collect()
            .await;

        let degraded = records.iter().filter(|r| r.is_degraded()).count();
        info!(
            target: TARGET_PIPELINE,
            "Synthesized {} articles ({} with extractive fallbacks)",
            records.len(),
            degraded
        );

        PipelineOutput {
            topics,
            articles: records,
        }
    }
}
