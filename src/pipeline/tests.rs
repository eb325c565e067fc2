use super::*;
use anyhow::anyhow;
use chrono::TimeZone;
use futures::future::BoxFuture;
use std::collections::HashSet;
use std::time::Duration;

use crate::llm::NullCompleter;
use crate::record::SectionProvenance;
use crate::synthesis::{TemplateKind, MAX_META_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use crate::topic::Polarity;

struct FailingCompleter;

impl TextCompleter for FailingCompleter {
    fn name(&self) -> &str {
        "failing"
    }

    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
        _max_tokens: u32,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
        Box::pin(async { Err::<String, _>(anyhow!("service unavailable")) })
    }
}

/// Answers after a prompt-dependent delay so topics finish out of order.
struct EchoCompleter;

impl TextCompleter for EchoCompleter {
    fn name(&self) -> &str {
        "echo"
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        _max_tokens: u32,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis((prompt.len() % 7) as u64)).await;
            Ok::<_, anyhow::Error>(format!("Echo of a {} character prompt.", prompt.len()))
        })
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

fn config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.synthesis.template_seed = Some(7);
    config
}

fn pipeline(config: PipelineConfig, completer: Arc<dyn TextCompleter>) -> Pipeline {
    Pipeline::new(config, completer).unwrap()
}

fn article(id: usize, title: &str, source: &str, summary: &str) -> Article {
    Article::new(title, format!("https://news.test/{id}"), source, summary).with_published_at(now())
}

/// Three groups of six articles, three sources each.
fn mixed_corpus() -> Vec<Article> {
    let sources = ["Wire A", "Wire B", "Wire C"];
    let groups = [
        ("Quantum processor milestone", "Quantum processor qubits error correction lab"),
        ("Electric vehicle battery plant", "Electric vehicle battery factory charging network"),
        ("Ransomware attack hospital", "Ransomware attack hospital systems security breach"),
    ];
    let mut articles = Vec::new();
    for (g, (title, summary)) in groups.iter().enumerate() {
        for i in 0..6 {
            let id = g * 6 + i;
            articles.push(article(id, &format!("{title} {i}"), sources[i % 3], summary));
        }
    }
    articles
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut bad = config();
    bad.max_topics = 0;
    assert!(Pipeline::new(bad, Arc::new(NullCompleter)).is_err());
}

#[tokio::test]
async fn test_scenario_a_ai_in_healthcare() {
    let articles = vec![
        article(
            1,
            "AI helps doctors diagnose cancer earlier",
            "Health Daily",
            "Hospitals report great success as machine learning AI improves diagnosis accuracy for patients.",
        ),
        article(
            2,
            "Machine learning AI improves hospital care",
            "Med Tech News",
            "Doctors praise the AI system, which helps hospitals deliver excellent care to patients.",
        ),
        article(
            3,
            "Hospitals celebrate AI diagnosis breakthrough",
            "Care Weekly",
            "A promising machine learning AI helps doctors improve patient outcomes with impressive accuracy.",
        ),
    ];
    let p = pipeline(config(), Arc::new(NullCompleter));
    let topics = p.process_topics(&articles, now());

    assert_eq!(topics.len(), 1);
    let topic = &topics[0];
    assert_eq!(topic.member_count(), 3);
    assert_eq!(topic.sentiment.overall, Polarity::Positive);
    assert!(topic.relevance_score > 0.5);

    let output = p.run_at(&articles, now()).await;
    assert_eq!(output.articles.len(), 1);
    assert_eq!(output.articles[0].category, "technology_ai");
    assert_eq!(output.articles[0].template_used, TemplateKind::Analysis);
}

#[test]
fn test_scenario_b_missing_url_is_dropped() {
    let mut nameless = article(1, "Chip shortage eases", "Wire", "Supply improves.");
    nameless.url = String::new();
    let valid = article(2, "Chip shortage eases further", "Wire", "Supply improves again.");
    let input = vec![nameless, valid];

    assert_eq!(dedupe(&input).len(), 1);

    let mut lenient = config();
    lenient.min_topic_relevance = 0.0;
    let topics = pipeline(lenient, Arc::new(NullCompleter)).process_topics(&input, now());
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].member_articles[0].url, "https://news.test/2");
}

#[tokio::test]
async fn test_scenario_c_single_article() {
    let articles = vec![article(
        1,
        "Open source database adds vector search",
        "Dev Journal",
        "The project shipped vector indexes in its latest release. Early users report faster similarity queries.",
    )];
    let mut lenient = config();
    lenient.min_topic_relevance = 0.0;
    let output = pipeline(lenient, Arc::new(NullCompleter))
        .run_at(&articles, now())
        .await;

    assert_eq!(output.topics.len(), 1);
    assert_eq!(output.topics[0].member_articles, articles);
    assert!(!output.topics[0].dominant_terms.is_empty());

    let record = &output.articles[0];
    assert!(!record.title.is_empty());
    assert!(record.title.chars().count() <= MAX_TITLE_CHARS);
    assert!(!record.content.is_empty());
    assert_eq!(
        record.sections,
        vec![SectionProvenance::Extractive, SectionProvenance::Generic]
    );
    assert_eq!(record.template_used, TemplateKind::DeepDive);
}

#[tokio::test]
async fn test_scenario_d_dominant_group_is_a_news_roundup() {
    let mut articles: Vec<Article> = (0..11)
        .map(|i| {
            article(
                i,
                "Chipmakers expand semiconductor fabrication capacity",
                &format!("Source {}", i % 5),
                "New semiconductor fabs raise wafer output across several regions.",
            )
        })
        .collect();
    articles.push(article(
        11,
        "Gardening club hosts tomato festival",
        "Local Herald",
        "Volunteers grew heirloom varieties this summer.",
    ));

    // Terms shared by the whole group sit in 11 of 12 documents, above the
    // default 0.8 document-frequency ceiling, so it is lifted. The identical
    // group texts leave two distinct rows, which caps k at two.
    let mut wide = config();
    wide.max_df = 1.0;
    let output = pipeline(wide, Arc::new(NullCompleter))
        .run_at(&articles, now())
        .await;

    assert_eq!(output.topics.len(), 1);
    assert_eq!(output.topics[0].member_count(), 11);
    assert_eq!(output.articles[0].template_used, TemplateKind::NewsRoundup);
}

#[tokio::test]
async fn test_failing_language_model_still_yields_records() {
    let articles = mixed_corpus();
    let output = pipeline(config(), Arc::new(FailingCompleter))
        .run_at(&articles, now())
        .await;

    assert_eq!(output.topics.len(), 3);
    assert_eq!(output.articles.len(), output.topics.len());
    for record in &output.articles {
        assert!(!record.content.is_empty());
        assert!(record.is_degraded());
        assert!(record
            .sections
            .iter()
            .all(|s| *s == SectionProvenance::Extractive));
    }
}

#[tokio::test]
async fn test_records_follow_ranked_order() {
    let articles = mixed_corpus();
    let mut concurrent = config();
    concurrent.synthesis.concurrency = 3;
    let output = pipeline(concurrent, Arc::new(EchoCompleter))
        .run_at(&articles, now())
        .await;

    assert!(!output.topics.is_empty());
    let ids: Vec<usize> = output.topics.iter().map(|t| t.id).collect();
    let record_ids: Vec<usize> = output.articles.iter().map(|r| r.source_topic.id).collect();
    assert_eq!(ids, record_ids);
    assert!(output
        .topics
        .windows(2)
        .all(|w| w[0].relevance_score >= w[1].relevance_score));
    for record in &output.articles {
        assert!(record
            .sections
            .iter()
            .all(|s| *s == SectionProvenance::Generated));
        assert!(record.content.contains("Echo of a"));
    }
}

#[tokio::test]
async fn test_bounds_hold_for_every_record() {
    let articles = mixed_corpus();
    let output = pipeline(config(), Arc::new(NullCompleter))
        .run_at(&articles, now())
        .await;

    let mut urls = HashSet::new();
    for topic in &output.topics {
        assert!((0.0..=1.0).contains(&topic.relevance_score));
        for member in &topic.member_articles {
            assert!(urls.insert(member.url.clone()));
        }
    }
    for record in &output.articles {
        assert!(record.title.chars().count() <= MAX_TITLE_CHARS);
        assert!(record.meta_description.chars().count() <= MAX_META_DESCRIPTION_CHARS);
        assert_eq!(record.generated_at, now());
    }
}

#[tokio::test]
async fn test_fixed_seed_is_reproducible() {
    let articles = mixed_corpus();
    let p = pipeline(config(), Arc::new(NullCompleter));
    let first = p.run_at(&articles, now()).await;
    let second = p.run_at(&articles, now()).await;
    assert_eq!(first.articles, second.articles);
}

#[tokio::test]
async fn test_all_filtered_out_is_empty_not_an_error() {
    let articles = mixed_corpus();
    let mut strict = config();
    strict.min_topic_relevance = 0.99;
    let output = pipeline(strict, Arc::new(NullCompleter))
        .run_at(&articles, now())
        .await;
    assert!(output.topics.is_empty());
    assert!(output.articles.is_empty());
}
