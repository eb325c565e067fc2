use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::record::ArticleRecord;
use crate::topic::Topic;
use crate::TARGET_PIPELINE;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes `processed_topics_<timestamp>.json` under `dir`.
pub fn save_processed_topics(dir: &Path, topics: &[Topic], at: DateTime<Utc>) -> Result<PathBuf> {
    write_json(dir, "processed_topics", topics, at)
}

/// Writes `articles_<timestamp>.json` under `dir`.
pub fn save_articles(dir: &Path, records: &[ArticleRecord], at: DateTime<Utc>) -> Result<PathBuf> {
    write_json(dir, "articles", records, at)
}

fn write_json<T: Serialize + ?Sized>(
    dir: &Path,
    prefix: &str,
    value: &T,
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(format!("{}_{}.json", prefix, at.format(TIMESTAMP_FORMAT)));
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(target: TARGET_PIPELINE, "Saved {}", path.display());
    Ok(path)
}
