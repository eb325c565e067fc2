use tracing::{debug, info};

use super::kmeans::kmeans;
use super::{distinct_rows, TfidfVectorizer};
use crate::article::Article;
use crate::config::PipelineConfig;
use crate::text::frequent_terms;
use crate::topic::TopicSkeleton;
use crate::TARGET_CLUSTER;

/// Clusters articles into topic skeletons and drops clusters whose size falls
/// outside the configured article-count bounds.
///
/// A degenerate input (fewer than two articles, or no shared vocabulary) yields
/// a single topic holding every article. Only the single-article topic skips
/// the size bounds.
pub fn cluster(articles: &[Article], config: &PipelineConfig) -> Vec<TopicSkeleton> {
    let (skeletons, unclustered) = partition(articles, config);
    if unclustered {
        return skeletons;
    }

    let before = skeletons.len();
    let kept: Vec<TopicSkeleton> = skeletons
        .into_iter()
        .filter(|skeleton| {
            let count = skeleton.member_articles.len();
            let keep =
                count >= config.min_articles_per_topic && count <= config.max_articles_per_topic;
            if !keep {
                debug!(
                    target: TARGET_CLUSTER,
                    "Discarding cluster {} with {} articles", skeleton.id, count
                );
            }
            keep
        })
        .collect();

    info!(
        target: TARGET_CLUSTER,
        "Kept {} of {} clusters within [{}, {}] articles",
        kept.len(),
        before,
        config.min_articles_per_topic,
        config.max_articles_per_topic
    );
    kept
}

/// Splits every article into exactly one cluster, without size filtering.
///
/// Returns the clusters and whether there were too few articles to cluster at all.
pub fn partition(articles: &[Article], config: &PipelineConfig) -> (Vec<TopicSkeleton>, bool) {
    if articles.is_empty() {
        return (Vec::new(), false);
    }

    let texts: Vec<String> = articles.iter().map(Article::cluster_text).collect();
    if texts.len() < 2 {
        info!(target: TARGET_CLUSTER, "Too few articles to cluster, using a single topic");
        return (vec![single_topic(articles, &texts, config)], true);
    }

    let vectorizer = TfidfVectorizer::new(config.min_df, config.max_df, config.max_vocabulary);
    let Some(matrix) = vectorizer.fit_transform(&texts) else {
        info!(
            target: TARGET_CLUSTER,
            "No shared vocabulary across {} articles, using a single topic",
            articles.len()
        );
        return (vec![single_topic(articles, &texts, config)], false);
    };

    let unmatched = matrix.rows.iter().filter(|row| row.is_empty()).count();
    if unmatched > 0 {
        debug!(
            target: TARGET_CLUSTER,
            "{} articles share no vocabulary with the rest", unmatched
        );
    }

    let k = cluster_count(articles.len(), config.min_articles_per_topic)
        .min(distinct_rows(&matrix.rows))
        .max(1);
    let result = kmeans(&matrix.rows, matrix.vocabulary.len(), k, config.kmeans_seed);
    debug!(
        target: TARGET_CLUSTER,
        "k-means with k={} settled after {} iterations", k, result.iterations
    );

    let mut members: Vec<Vec<Article>> = vec![Vec::new(); k];
    for (article, label) in articles.iter().zip(&result.labels) {
        members[*label].push(article.clone());
    }

    let skeletons = members
        .into_iter()
        .zip(&result.centroids)
        .enumerate()
        .filter(|(_, (member_articles, _))| !member_articles.is_empty())
        .map(|(id, (member_articles, centroid))| TopicSkeleton {
            id,
            member_articles,
            dominant_terms: top_terms(centroid, &matrix.vocabulary, config.dominant_term_count),
        })
        .collect();

    (skeletons, false)
}

/// `clamp(max(3, n / 5), 3, 10)`, further limited so every cluster can reach
/// the minimum topic size.
pub fn cluster_count(article_count: usize, min_articles_per_topic: usize) -> usize {
    let k = (article_count / 5).clamp(3, 10);
    let reachable = (article_count / min_articles_per_topic.max(1)).max(1);
    k.min(reachable)
}

/// Vocabulary terms ordered by centroid weight, descending; zero weights are skipped.
fn top_terms(centroid: &[f64], vocabulary: &[String], limit: usize) -> Vec<String> {
    let mut weighted: Vec<(usize, f64)> = centroid
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    weighted
        .into_iter()
        .take(limit)
        .filter_map(|(index, _)| vocabulary.get(index).cloned())
        .collect()
}

fn single_topic(articles: &[Article], texts: &[String], config: &PipelineConfig) -> TopicSkeleton {
    TopicSkeleton {
        id: 0,
        member_articles: articles.to_vec(),
        dominant_terms: frequent_terms(texts, config.dominant_term_count),
    }
}
