use chrono::{DateTime, Utc};

// Common text blocks for all prompts
pub const DONT_TELL_ME: &str = r#"
Important instructions for your responses:

1. Do not narrate or describe your actions.
2. Do not summarize or restate the instructions I've given you.
3. Do not preface your responses with phrases like "Here's a paragraph..." or "I will now..."
4. Do not add headings, lists or Markdown; return plain prose paragraphs only.
5. Avoid phrases like "As an AI language model..." or similar self-referential statements.

Your responses should read as if written by a knowledgeable technology journalist.
"#;

pub const WRITE_IN_CLEAR_ENGLISH: &str = r#"
Language Standards for Output:
1. Write in clear American English, using American spelling and grammar.
2. Keep product, company and people names exactly as they appear in the sources.
3. Prefer short-to-medium sentences and active voice.
"#;

/// Formats a date the way prompts refer to it, e.g. "March 4, 2025".
pub fn format_prompt_date(date: DateTime<Utc>) -> String {
    format!(
        "{} {}, {}",
        date.format("%B"),
        date.format("%-d"),
        date.format("%Y")
    )
}
