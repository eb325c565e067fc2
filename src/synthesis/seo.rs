use rand::rngs::StdRng;
use rand::Rng;

use super::templates::{Placeholders, META_DESCRIPTION_FORMATS, TITLE_FORMATS};

pub const MAX_TITLE_CHARS: usize = 70;
pub const MIN_REUSED_TITLE_CHARS: usize = 20;
pub const MAX_META_DESCRIPTION_CHARS: usize = 160;
const ELLIPSIS: &str = "...";

/// Cuts `text` to at most `max_chars` characters, ending in "..." when shortened.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Reuses the suggested title when it already names the primary keyword and
/// fits 20 to 70 characters; otherwise fills a randomly chosen title format.
pub fn generate_title(suggested_title: &str, values: &Placeholders<'_>, rng: &mut StdRng) -> String {
    let length = suggested_title.chars().count();
    if (MIN_REUSED_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&length)
        && suggested_title
            .to_lowercase()
            .contains(&values.primary_keyword.to_lowercase())
    {
        return suggested_title.to_string();
    }

    let format = TITLE_FORMATS[rng.random_range(0..TITLE_FORMATS.len())];
    truncate_with_ellipsis(&values.fill(format), MAX_TITLE_CHARS)
}

/// Fills a randomly chosen meta-description format, capped at 160 characters.
pub fn generate_meta_description(values: &Placeholders<'_>, rng: &mut StdRng) -> String {
    let format = META_DESCRIPTION_FORMATS[rng.random_range(0..META_DESCRIPTION_FORMATS.len())];
    truncate_with_ellipsis(&values.fill(format), MAX_META_DESCRIPTION_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn values(primary_keyword: &str) -> Placeholders<'_> {
        Placeholders {
            primary_keyword,
            secondary_aspect: "consensus",
            related_industry: "Cloud Computing",
            current_year: 2025,
            number: "7",
        }
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 70), "short");
        let long = "x".repeat(80);
        let truncated = truncate_with_ellipsis(&long, 70);
        assert_eq!(truncated.chars().count(), 70);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let accented = "é".repeat(75);
        let truncated = truncate_with_ellipsis(&accented, 70);
        assert_eq!(truncated.chars().count(), 70);
        assert!(truncated.starts_with("ééé"));
    }

    #[test]
    fn test_reuses_matching_suggested_title() {
        let mut rng = StdRng::seed_from_u64(1);
        let title = generate_title(
            "Quantum computing hits a new milestone",
            &values("quantum"),
            &mut rng,
        );
        assert_eq!(title, "Quantum computing hits a new milestone");
    }

    #[test]
    fn test_generated_titles_are_bounded_and_filled() {
        let primary = "an extraordinarily long primary keyword about distributed systems";
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let title = generate_title("Too short", &values(primary), &mut rng);
            assert!(title.chars().count() <= MAX_TITLE_CHARS);
            assert!(!title.contains("{{"));
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_title("", &values("Edge AI"), &mut rng)
        };
        assert_eq!(pick(9), pick(9));
    }

    #[test]
    fn test_meta_description_bounded() {
        let primary = "very long keyword ".repeat(10);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let meta = generate_meta_description(&values(&primary), &mut rng);
            assert!(meta.chars().count() <= MAX_META_DESCRIPTION_CHARS);
        }
    }
}
