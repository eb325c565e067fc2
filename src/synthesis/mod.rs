//! Turns a ranked topic into an SEO-oriented article draft.

mod classify;
mod sections;
mod seo;
mod templates;

pub use classify::{
    build_tags, classification_text, infer_industry, primary_keyword, secondary_aspects,
    select_category, MatchText, DEFAULT_INDUSTRY, FALLBACK_PRIMARY_KEYWORD,
};
pub use sections::{
    extractive_body, generic_body, partition_members, section_count, Section, SectionContext,
};
pub use seo::{
    generate_meta_description, generate_title, truncate_with_ellipsis, MAX_META_DESCRIPTION_CHARS,
    MAX_TITLE_CHARS,
};
pub use templates::{select_template, ArticleTemplate, Placeholders, TemplateKind};

use chrono::{DateTime, Datelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SynthesisConfig;
use crate::llm::TextCompleter;
use crate::record::{ArticleRecord, SourceTopicRef};
use crate::topic::Topic;
use crate::TARGET_PIPELINE;

use sections::{write_section, DEFAULT_SECTION_ASPECT};
use templates::TITLE_NUMBERS;

/// Aspect placeholder for titles when a topic offers none.
const DEFAULT_TITLE_ASPECT: &str = "Latest Developments";

pub struct ArticleSynthesizer {
    completer: Arc<dyn TextCompleter>,
    config: SynthesisConfig,
}

impl ArticleSynthesizer {
    pub fn new(completer: Arc<dyn TextCompleter>, config: SynthesisConfig) -> Self {
        Self { completer, config }
    }

    /// Builds the article record for `topic`.
    ///
    /// Template choices are drawn from an RNG seeded with `seed` offset by the
    /// topic id, so a run is reproducible for a fixed seed. Language model
    /// failures only degrade individual sections.
    pub async fn synthesize(&self, topic: &Topic, seed: u64, now: DateTime<Utc>) -> ArticleRecord {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(topic.id as u64));

        let template_kind = select_template(topic);
        let template = template_kind.template();
        let primary = primary_keyword(topic);
        let aspects = secondary_aspects(topic, &primary);
        let match_text = classification_text(topic);
        let industry = infer_industry(&match_text);
        let category = select_category(&match_text, &self.config.default_category);
        let number = TITLE_NUMBERS[rng.random_range(0..TITLE_NUMBERS.len())];

        let values = Placeholders {
            primary_keyword: &primary,
            secondary_aspect: aspects
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_SECTION_ASPECT),
            related_industry: industry,
            current_year: now.year(),
            number,
        };
        let title_values = Placeholders {
            secondary_aspect: aspects
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_TITLE_ASPECT),
            ..values.clone()
        };

        let title = generate_title(&topic.suggested_title, &title_values, &mut rng);
        let meta_description = generate_meta_description(&values, &mut rng);

        debug!(
            target: TARGET_PIPELINE,
            "Topic {}: template {}, primary keyword {:?}, industry {}, category {}",
            topic.id,
            template_kind,
            primary,
            industry,
            category
        );

        let ctx = SectionContext {
            completer: self.completer.as_ref(),
            primary_keyword: &primary,
            related_industry: industry,
            llm_timeout: Duration::from_secs(self.config.llm_timeout_secs),
            llm_max_tokens: self.config.llm_max_tokens,
            now,
        };
        let count = section_count(topic.member_count());
        let runs = partition_members(&topic.member_articles, count);
        let mut sections = Vec::with_capacity(count);
        let mut warnings = Vec::new();
        for (index, run) in runs.into_iter().enumerate() {
            let aspect = if aspects.is_empty() {
                DEFAULT_SECTION_ASPECT
            } else {
                aspects[index % aspects.len()].as_str()
            };
            let (section, warning) = write_section(&ctx, index, aspect, run).await;
            if let Some(warning) = warning {
                warn!(target: TARGET_PIPELINE, "Topic {}: {}", topic.id, warning);
                warnings.push(warning);
            }
            sections.push(section);
        }

        let content = assemble_content(template, &values, &sections);

        ArticleRecord {
            title,
            content,
            meta_description,
            keywords: build_tags(topic, industry),
            category,
            template_used: template_kind,
            source_topic: SourceTopicRef::from(topic),
            generated_at: now,
            sections: sections.iter().map(|s| s.provenance).collect(),
            warnings,
        }
    }
}

/// Intro paragraph, one `<h2>` block per section, the conclusion and the call to action.
pub fn assemble_content(
    template: &ArticleTemplate,
    values: &Placeholders<'_>,
    sections: &[Section],
) -> String {
    let mut content = format!("<p>{}</p>\n\n", values.fill(template.intro));
    for section in sections {
        content.push_str(&format!(
            "<h2>{}</h2>\n<p>{}</p>\n\n",
            section.heading, section.body
        ));
    }
    content.push_str(&format!(
        "<h2>Conclusion</h2>\n<p>{}</p>\n\n<p>{}</p>",
        values.fill(template.conclusion),
        values.fill(template.call_to_action)
    ));
    content
}
