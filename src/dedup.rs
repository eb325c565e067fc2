use std::collections::HashSet;
use tracing::{debug, warn};

use crate::article::Article;
use crate::TARGET_PIPELINE;

/// Removes articles without a URL and repeated URLs, keeping the first
/// occurrence and the input order.
pub fn dedupe(articles: &[Article]) -> Vec<Article> {
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut unique = Vec::with_capacity(articles.len());

    for article in articles {
        let url = article.url.trim();
        if url.is_empty() {
            warn!(target: TARGET_PIPELINE, "Dropping article without URL: {:?}", article.title);
            continue;
        }

        if !seen_urls.insert(url) {
            debug!(target: TARGET_PIPELINE, "Skipping duplicate article: {}", url);
            continue;
        }

        unique.push(article.clone());
    }

    unique
}
