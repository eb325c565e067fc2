//! Lexicon and rule based polarity scoring (VADER-style) for short news text.

mod lexicon;

pub use lexicon::{booster, is_negation, valence};

use lexicon::{CAPS_INCREMENT, NEGATION_SCALAR};
use serde::Serialize;

/// Approximates the maximum expected compound sum when normalizing.
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;

/// Polarity scores of one text. `compound` lies in `[-1, 1]`; the other three
/// are proportions summing to roughly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

struct Token<'a> {
    word: &'a str,
    lower: String,
}

pub fn polarity_scores(text: &str) -> SentimentScores {
    let tokens: Vec<Token> = text
        .split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .filter(|word| word.chars().count() > 1)
        .map(|word| Token {
            word,
            lower: word.to_lowercase(),
        })
        .collect();

    let caps_differ = caps_differential(&tokens);
    let mut sentiments: Vec<f64> = (0..tokens.len())
        .map(|i| token_valence(&tokens, i, caps_differ))
        .collect();

    apply_but_rule(&tokens, &mut sentiments);
    score_valence(&sentiments, text)
}

/// True when some, but not all, words are shouted in capitals.
fn caps_differential(tokens: &[Token]) -> bool {
    let shouted = tokens.iter().filter(|t| is_all_caps(t.word)).count();
    shouted > 0 && shouted < tokens.len()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn token_valence(tokens: &[Token], i: usize, caps_differ: bool) -> f64 {
    let token = &tokens[i];
    if booster(&token.lower).is_some() {
        return 0.0;
    }
    let Some(mut value) = valence(&token.lower) else {
        return 0.0;
    };

    if caps_differ && is_all_caps(token.word) {
        value += CAPS_INCREMENT.copysign(value);
    }

    for distance in 1..=3 {
        if i < distance {
            break;
        }
        let previous = &tokens[i - distance];
        if valence(&previous.lower).is_none() {
            let mut scalar = booster_scalar(previous, value, caps_differ);
            if distance == 2 {
                scalar *= 0.95;
            } else if distance == 3 {
                scalar *= 0.9;
            }
            value += scalar;
        }
        value = negation_check(tokens, i, distance, value);
    }

    value
}

fn booster_scalar(token: &Token, value: f64, caps_differ: bool) -> f64 {
    let Some(mut scalar) = booster(&token.lower) else {
        return 0.0;
    };
    if value < 0.0 {
        scalar = -scalar;
    }
    if caps_differ && is_all_caps(token.word) {
        scalar += CAPS_INCREMENT.copysign(value);
    }
    scalar
}

fn negation_check(tokens: &[Token], i: usize, distance: usize, value: f64) -> f64 {
    let word_at = |d: usize| tokens[i - d].lower.as_str();
    let negator = word_at(distance);

    if distance > 1 && negator == "never" {
        let emphasised = (1..distance).any(|d| matches!(word_at(d), "so" | "this"));
        if emphasised {
            return value * 1.25;
        }
    }
    if distance > 1 && negator == "without" && word_at(distance - 1) == "doubt" {
        return value;
    }
    if is_negation(negator) {
        return value * NEGATION_SCALAR;
    }
    value
}

/// Sentiment before "but" is dampened and sentiment after it emphasized.
fn apply_but_rule(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(but) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (index, sentiment) in sentiments.iter_mut().enumerate() {
        if index < but {
            *sentiment *= 0.5;
        } else if index > but {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => 0.96,
    };
    exclamations * EXCLAMATION_INCREMENT + question_emphasis
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> SentimentScores {
    if sentiments.is_empty() {
        return SentimentScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    let mut neutral_count = 0.0;
    for sentiment in sentiments {
        if *sentiment > 0.0 {
            positive_sum += sentiment + 1.0;
        } else if *sentiment < 0.0 {
            negative_sum += sentiment - 1.0;
        } else {
            neutral_count += 1.0;
        }
    }
    if positive_sum > negative_sum.abs() {
        positive_sum += emphasis;
    } else if positive_sum < negative_sum.abs() {
        negative_sum -= emphasis;
    }

    let total = positive_sum + negative_sum.abs() + neutral_count;
    SentimentScores {
        compound: round_to(compound, 4),
        positive: round_to((positive_sum / total).abs(), 3),
        negative: round_to((negative_sum / total).abs(), 3),
        neutral: round_to((neutral_count / total).abs(), 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let scores = polarity_scores("The company released its quarterly report");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);
        assert_eq!(scores.positive, 0.0);
    }

    #[test]
    fn test_single_positive_word() {
        let scores = polarity_scores("Doctors improve diagnosis");
        // 1.9 / sqrt(1.9^2 + 15)
        assert!((scores.compound - 0.4404).abs() < 1e-4);
        assert!(scores.positive > scores.negative);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = polarity_scores("The launch was good");
        let negated = polarity_scores("The launch was not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let plain = polarity_scores("The results were good");
        let boosted = polarity_scores("The results were very good");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn test_caps_and_exclamation_emphasis() {
        let plain = polarity_scores("The new chip is great");
        let shouted = polarity_scores("The new chip is GREAT!!");
        assert!(shouted.compound > plain.compound);
    }

    #[test]
    fn test_but_shifts_weight() {
        let scores = polarity_scores("The rollout was slow but the results are excellent");
        assert!(scores.compound > 0.0);
    }

    #[test]
    fn test_negative_text() {
        let scores = polarity_scores("Ransomware attack causes outage and data breach at hospital");
        assert!(scores.compound < -0.05);
        assert!(scores.negative > scores.positive);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(polarity_scores(""), SentimentScores::default());
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let scores = polarity_scores("Great progress, but serious risks remain for security teams");
        let total = scores.positive + scores.negative + scores.neutral;
        assert!((total - 1.0).abs() < 0.01);
    }
}
