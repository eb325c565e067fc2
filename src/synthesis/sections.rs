use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

use crate::article::Article;
use crate::llm::{generate_llm_response, TextCompleter};
use crate::prompt::section_synthesis_prompt;
use crate::record::SectionProvenance;
use crate::text::split_sentences;
use crate::TARGET_LLM_REQUEST;

use super::templates::HEADING_PATTERNS;

pub const MIN_SECTIONS: usize = 2;
pub const MAX_SECTIONS: usize = 4;
pub const DEFAULT_SECTION_ASPECT: &str = "recent developments";
const MIN_EXCERPT_SENTENCE_CHARS: usize = 20;
const EXCERPT_SENTENCES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub body: String,
    pub provenance: SectionProvenance,
}

/// Everything a section needs besides its own slice of members.
pub struct SectionContext<'a> {
    pub completer: &'a dyn TextCompleter,
    pub primary_keyword: &'a str,
    pub related_industry: &'a str,
    pub llm_timeout: Duration,
    pub llm_max_tokens: u32,
    pub now: DateTime<Utc>,
}

pub fn section_count(member_count: usize) -> usize {
    (member_count / 2 + 1).clamp(MIN_SECTIONS, MAX_SECTIONS)
}

/// Splits `members` into `parts` contiguous runs; earlier runs take the remainder.
/// Runs are empty when there are fewer members than parts.
pub fn partition_members(members: &[Article], parts: usize) -> Vec<&[Article]> {
    if parts == 0 {
        return Vec::new();
    }
    let base = members.len() / parts;
    let extra = members.len() % parts;
    let mut runs = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        runs.push(&members[start..start + len]);
        start += len;
    }
    runs
}

pub fn section_heading(index: usize, primary_keyword: &str, aspect: &str, industry: &str) -> String {
    HEADING_PATTERNS[index % HEADING_PATTERNS.len()]
        .replace("{{primary_keyword}}", primary_keyword)
        .replace("{{secondary_aspect}}", aspect)
        .replace("{{related_industry}}", industry)
}

pub fn generic_body(primary_keyword: &str, aspect: &str) -> String {
    format!(
        "The field of {primary_keyword} continues to evolve, with new developments in {aspect} being particularly noteworthy. \
         Industry experts suggest that these advancements will have significant implications for how we understand and interact with technology in the coming years."
    )
}

/// Opening sentence, an excerpt per member with a usable summary, closing sentence.
pub fn extractive_body(articles: &[Article], primary_keyword: &str, aspect: &str) -> String {
    let mut paragraphs = vec![format!(
        "Recent developments in {primary_keyword} have brought significant attention to {aspect}. \
         Industry watchers and technology experts alike are taking notice of these advancements."
    )];

    for article in articles {
        let excerpt: Vec<String> = split_sentences(&article.summary)
            .into_iter()
            .filter(|s| s.chars().count() > MIN_EXCERPT_SENTENCE_CHARS)
            .take(EXCERPT_SENTENCES)
            .collect();
        if excerpt.is_empty() {
            continue;
        }
        paragraphs.push(format!(
            "{} This insight from {} highlights the importance of understanding how {} continues to evolve.",
            excerpt.join(" "),
            article.source,
            primary_keyword
        ));
    }

    paragraphs.push(format!(
        "As these developments continue to unfold, the relationship between {primary_keyword} and {aspect} will likely remain a key area of focus for industry professionals."
    ));
    paragraphs.join("\n\n")
}

/// Writes one section. Returns the section and, when the language model was
/// tried and failed, a warning describing the fallback.
pub async fn write_section(
    ctx: &SectionContext<'_>,
    index: usize,
    aspect: &str,
    articles: &[Article],
) -> (Section, Option<String>) {
    let heading = section_heading(index, ctx.primary_keyword, aspect, ctx.related_industry);

    if articles.is_empty() {
        let section = Section {
            heading,
            body: generic_body(ctx.primary_keyword, aspect),
            provenance: SectionProvenance::Generic,
        };
        return (section, None);
    }

    let mut warning = None;
    if ctx.completer.is_available() {
        let prompt = section_synthesis_prompt(ctx.primary_keyword, aspect, articles, ctx.now);
        match generate_llm_response(ctx.completer, &prompt, ctx.llm_max_tokens, ctx.llm_timeout)
            .await
        {
            Ok(body) => {
                let section = Section {
                    heading,
                    body,
                    provenance: SectionProvenance::Generated,
                };
                return (section, None);
            }
            Err(e) => {
                warning = Some(format!(
                    "section {} \"{}\" fell back to extractive text: {:#}",
                    index + 1,
                    heading,
                    e
                ));
            }
        }
    } else {
        debug!(target: TARGET_LLM_REQUEST, "{}: skipped, building section {} extractively", ctx.completer.name(), index + 1);
    }

    let section = Section {
        body: extractive_body(articles, ctx.primary_keyword, aspect),
        heading,
        provenance: SectionProvenance::Extractive,
    };
    (section, warning)
}
