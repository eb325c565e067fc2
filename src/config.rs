use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::TARGET_PIPELINE;

/// Weights blended into a topic's relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    pub count: f64,
    pub sentiment: f64,
    pub recency: f64,
    pub diversity: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            count: 0.25,
            sentiment: 0.20,
            recency: 0.35,
            diversity: 0.20,
        }
    }
}

impl RelevanceWeights {
    pub fn total(&self) -> f64 {
        self.count + self.sentiment + self.recency + self.diversity
    }
}

/// Article synthesis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Category used when no classification term matches.
    pub default_category: String,
    /// Seeds title and meta-description template choice; drawn once per run when absent.
    pub template_seed: Option<u64>,
    pub llm_timeout_secs: u64,
    pub llm_max_tokens: u32,
    /// Topics synthesized at once.
    pub concurrency: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            default_category: "technology_ai".to_string(),
            template_seed: None,
            llm_timeout_secs: 60,
            llm_max_tokens: 500,
            concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_articles_per_topic: usize,
    pub max_articles_per_topic: usize,
    pub min_topic_relevance: f64,
    pub max_topics: usize,
    pub min_df: usize,
    pub max_df: f64,
    pub max_vocabulary: usize,
    pub dominant_term_count: usize,
    pub relevance_weights: RelevanceWeights,
    pub recency_window_days: f64,
    pub diversity_saturation: usize,
    pub kmeans_seed: u64,
    pub synthesis: SynthesisConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_articles_per_topic: 3,
            max_articles_per_topic: 15,
            min_topic_relevance: 0.5,
            max_topics: 10,
            min_df: 2,
            max_df: 0.8,
            max_vocabulary: 5000,
            dominant_term_count: 20,
            relevance_weights: RelevanceWeights::default(),
            recency_window_days: 7.0,
            diversity_saturation: 5,
            kmeans_seed: 42,
            synthesis: SynthesisConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads a JSON configuration file; any omitted field keeps its default.
    ///
    /// A missing file is not an error: defaults are used and a warning logged.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                let config: PipelineConfig = serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                info!(target: TARGET_PIPELINE, "Loaded pipeline configuration from {}", path.display());
                config
            }
            Some(path) => {
                warn!(
                    target: TARGET_PIPELINE,
                    "Config file not found at {}. Using default configuration.",
                    path.display()
                );
                PipelineConfig::default()
            }
            None => PipelineConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_topics == 0 {
            bail!("max_topics must be greater than 0");
        }
        if self.min_articles_per_topic == 0 {
            bail!("min_articles_per_topic must be greater than 0");
        }
        if self.min_articles_per_topic > self.max_articles_per_topic {
            bail!(
                "min_articles_per_topic ({}) exceeds max_articles_per_topic ({})",
                self.min_articles_per_topic,
                self.max_articles_per_topic
            );
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            bail!("max_df must be in (0, 1], got {}", self.max_df);
        }
        if self.min_df == 0 {
            bail!("min_df must be at least 1");
        }
        if self.max_vocabulary == 0 {
            bail!("max_vocabulary must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.min_topic_relevance) {
            bail!(
                "min_topic_relevance must be in [0, 1], got {}",
                self.min_topic_relevance
            );
        }

        let weights = &self.relevance_weights;
        if [weights.count, weights.sentiment, weights.recency, weights.diversity]
            .iter()
            .any(|w| *w < 0.0 || !w.is_finite())
        {
            bail!("relevance weights must be non-negative");
        }
        if weights.total() > 1.0 + 1e-9 {
            bail!("relevance weights sum to {:.3}, above 1.0", weights.total());
        }

        if !(self.recency_window_days > 0.0) {
            bail!("recency_window_days must be positive");
        }
        if self.diversity_saturation == 0 {
            bail!("diversity_saturation must be greater than 0");
        }
        if self.synthesis.concurrency == 0 {
            bail!("synthesis.concurrency must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_articles_per_topic, 3);
        assert_eq!(config.max_articles_per_topic, 15);
        assert_eq!(config.max_topics, 10);
        assert_eq!(config.synthesis.default_category, "technology_ai");
        assert!((config.relevance_weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"max_topics": 3, "synthesis": {"template_seed": 7}}"#)
                .unwrap();
        assert_eq!(config.max_topics, 3);
        assert_eq!(config.min_df, 2);
        assert_eq!(config.synthesis.template_seed, Some(7));
        assert_eq!(config.synthesis.llm_max_tokens, 500);
    }

    #[test]
    fn test_validate_rejects_invalid_values() {
        let cases: [fn(&mut PipelineConfig); 15] = [
            |c: &mut PipelineConfig| c.max_topics = 0,
            |c: &mut PipelineConfig| c.min_articles_per_topic = 0,
            |c: &mut PipelineConfig| c.min_articles_per_topic = 20,
            |c: &mut PipelineConfig| c.max_df = 0.0,
            |c: &mut PipelineConfig| c.max_df = 1.5,
            |c: &mut PipelineConfig| c.min_df = 0,
            |c: &mut PipelineConfig| c.max_vocabulary = 0,
            |c: &mut PipelineConfig| c.min_topic_relevance = f64::NAN,
            |c: &mut PipelineConfig| c.min_topic_relevance = 1.5,
            |c: &mut PipelineConfig| c.min_topic_relevance = -0.1,
            |c: &mut PipelineConfig| c.relevance_weights.count = -0.1,
            |c: &mut PipelineConfig| c.relevance_weights.recency = 0.9,
            |c: &mut PipelineConfig| c.recency_window_days = 0.0,
            |c: &mut PipelineConfig| c.diversity_saturation = 0,
            |c: &mut PipelineConfig| c.synthesis.concurrency = 0,
        ];

        for mutate in cases {
            let mut config = PipelineConfig::default();
            mutate(&mut config);
            assert!(config.validate().is_err(), "accepted {:?}", config);
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("topic-forge-no-such-config.json");
        let config = PipelineConfig::load(Some(&path)).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "topic-forge-invalid-config-{}.json",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"max_topics": 0}"#).unwrap();

        let result = PipelineConfig::load(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
