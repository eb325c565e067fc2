use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use topic_forge::logging::configure_logging;
use topic_forge::output::{save_articles, save_processed_topics};
use topic_forge::{
    completer_from_env, Article, NullCompleter, Pipeline, PipelineConfig, TextCompleter,
    TARGET_PIPELINE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Cluster news articles into topics and draft an article per topic", long_about = None)]
struct Args {
    /// JSON array of input articles
    #[arg(short, long)]
    input: PathBuf,

    /// JSON pipeline configuration; defaults apply to missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for generated articles and processed topics
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Seed for title and meta-description template choice
    #[arg(short, long)]
    seed: Option<u64>,

    /// Build every section extractively, without a language model
    #[arg(long)]
    no_llm: bool,

    /// Also write daily-rolling logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.log_dir.as_deref());

    let mut config = PipelineConfig::load(args.config.as_deref())?;
    if args.seed.is_some() {
        config.synthesis.template_seed = args.seed;
    }

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let articles: Vec<Article> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse articles from {}", args.input.display()))?;
    info!(target: TARGET_PIPELINE, "Loaded {} articles from {}", articles.len(), args.input.display());

    let completer: Arc<dyn TextCompleter> = if args.no_llm {
        Arc::new(NullCompleter)
    } else {
        completer_from_env()
    };

    let pipeline = Pipeline::new(config, completer)?;
    let started = Utc::now();
    let output = pipeline.run_at(&articles, started).await;

    if output.articles.is_empty() {
        bail!(
            "No topics reached the relevance threshold of {}",
            pipeline.config().min_topic_relevance
        );
    }

    for (rank, record) in output.articles.iter().enumerate() {
        println!(
            "{}. {} [{} | {} | {} articles]",
            rank + 1,
            record.title,
            record.template_used,
            record.category,
            record.source_topic.article_count
        );
        for warning in &record.warnings {
            println!("   warning: {}", warning);
        }
    }

    save_processed_topics(&args.output_dir, &output.topics, started)?;
    let path = save_articles(&args.output_dir, &output.articles, started)?;
    println!("Saved {} articles to {}", output.articles.len(), path.display());

    Ok(())
}
