use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::article::Article;
use crate::prompt::common::{format_prompt_date, DONT_TELL_ME, WRITE_IN_CLEAR_ENGLISH};

#[derive(Serialize)]
struct SourceArticle<'a> {
    title: &'a str,
    summary: &'a str,
    source: &'a str,
}

/// Prompt asking for a section body that synthesizes the given articles.
pub fn section_synthesis_prompt(
    primary_keyword: &str,
    secondary_aspect: &str,
    articles: &[Article],
    now: DateTime<Utc>,
) -> String {
    let sources: Vec<SourceArticle> = articles
        .iter()
        .map(|article| SourceArticle {
            title: &article.title,
            summary: &article.summary,
            source: &article.source,
        })
        .collect();
    let sources = serde_json::to_string_pretty(&sources).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Today is {date}.

Write a coherent paragraph or two about {primary}, focusing on {aspect}, using information from these articles:

{sources}

The content should be informative, engaging, and flow naturally. Include relevant details from the articles while maintaining a cohesive narrative. Avoid simply listing facts from each article. Instead, synthesize the information into insightful analysis that would be valuable for readers interested in {primary}.

Make the text SEO-friendly by naturally incorporating the terms '{primary}' and '{aspect}' without keyword stuffing.
{clear_english}
{dont_tell_me}"#,
        date = format_prompt_date(now),
        primary = primary_keyword,
        aspect = secondary_aspect,
        sources = sources,
        clear_english = WRITE_IN_CLEAR_ENGLISH,
        dont_tell_me = DONT_TELL_ME,
    )
}
