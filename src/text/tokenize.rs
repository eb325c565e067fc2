use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stop_word;

lazy_static! {
    // Two or more word characters, the vectorizer's token definition.
    static ref TOKEN_PATTERN: Regex = Regex::new(r"(?u)\b\w\w+\b").expect("valid token pattern");
}

/// NFC-normalizes text so composed and decomposed forms tokenize alike.
pub fn normalize(text: &str) -> String {
    text.nfc().collect()
}

/// Lowercased vectorizer tokens with stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = normalize(text).to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Unicode word segments in their original case.
pub fn word_tokens(text: &str) -> Vec<String> {
    normalize(text).unicode_words().map(str::to_string).collect()
}

/// Capitalized, non stop-word tokens longer than one character, in text order.
pub fn capitalized_tokens(text: &str) -> Vec<String> {
    word_tokens(text)
        .into_iter()
        .filter(|word| {
            word.chars().count() > 1
                && word.chars().next().is_some_and(char::is_uppercase)
                && !is_stop_word(word)
        })
        .collect()
}

/// The `limit` most frequent alphabetic, non stop-word terms longer than two
/// characters. Ties keep first-seen order.
pub fn frequent_terms<S: AsRef<str>>(texts: &[S], limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut position = 0;

    for text in texts {
        for word in normalize(text.as_ref()).to_lowercase().unicode_words() {
            if word.chars().count() <= 2
                || !word.chars().all(char::is_alphabetic)
                || is_stop_word(word)
            {
                continue;
            }
            let entry = counts.entry(word.to_string()).or_insert((0, position));
            entry.0 += 1;
            position += 1;
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(limit).map(|(term, _)| term).collect()
}
