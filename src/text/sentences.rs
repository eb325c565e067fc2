use unicode_segmentation::UnicodeSegmentation;

use super::tokenize::normalize;

/// Splits text into trimmed, non-empty sentences (UAX #29 sentence bounds).
pub fn split_sentences(text: &str) -> Vec<String> {
    normalize(text)
        .unicode_sentences()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences(
            "Researchers unveiled a model. It beats benchmarks by 20%!   Is it safe?",
        );
        assert_eq!(
            sentences,
            vec![
                "Researchers unveiled a model.",
                "It beats benchmarks by 20%!",
                "Is it safe?"
            ]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("   ").is_empty());
    }
}
