use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Scalar added by an intensifying booster word.
pub const BOOSTER_INCREMENT: f64 = 0.293;
/// Scalar added by a dampening booster word.
pub const BOOSTER_DECREMENT: f64 = -0.293;
/// Extra valence for an emphasized ALL-CAPS word in mixed-case text.
pub const CAPS_INCREMENT: f64 = 0.733;
/// Valence multiplier applied after a negation.
pub const NEGATION_SCALAR: f64 = -0.74;

// Word valences on a -4..4 scale.
const VALENCES: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abuse", -3.2),
    ("accelerate", 1.0),
    ("accomplish", 1.8),
    ("accomplished", 1.9),
    ("achieve", 1.3),
    ("achievement", 2.1),
    ("admire", 2.1),
    ("advance", 1.3),
    ("advanced", 1.0),
    ("advantage", 1.0),
    ("afraid", -2.2),
    ("alarm", -1.4),
    ("alarming", -2.0),
    ("amazing", 2.8),
    ("anger", -2.7),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("anxiety", -0.7),
    ("anxious", -1.0),
    ("applaud", 2.0),
    ("attack", -2.1),
    ("attacks", -1.9),
    ("awesome", 3.1),
    ("bad", -2.5),
    ("ban", -2.6),
    ("banned", -2.0),
    ("beautiful", 2.9),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("best", 3.2),
    ("better", 1.9),
    ("blame", -1.4),
    ("boost", 1.7),
    ("boosts", 1.3),
    ("breach", -1.8),
    ("breakthrough", 2.0),
    ("bright", 1.9),
    ("brilliant", 2.8),
    ("broken", -2.1),
    ("bug", -1.0),
    ("burden", -1.9),
    ("calm", 1.3),
    ("care", 2.2),
    ("catastrophe", -3.4),
    ("celebrate", 2.7),
    ("chaos", -2.7),
    ("cheer", 2.3),
    ("clean", 1.7),
    ("clear", 1.6),
    ("collapse", -2.2),
    ("comfortable", 2.0),
    ("concern", -0.6),
    ("concerned", -1.3),
    ("concerns", -0.6),
    ("confident", 2.2),
    ("conflict", -1.3),
    ("confusion", -1.3),
    ("crash", -1.7),
    ("crisis", -3.1),
    ("critical", -1.3),
    ("criticism", -1.9),
    ("cure", 1.0),
    ("damage", -2.2),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("dead", -3.3),
    ("death", -2.9),
    ("decline", -1.1),
    ("defeat", -2.0),
    ("delay", -1.3),
    ("delayed", -0.9),
    ("delight", 2.9),
    ("destroy", -2.5),
    ("disaster", -3.1),
    ("disappoint", -2.3),
    ("disappointing", -2.2),
    ("disrupt", -1.0),
    ("doubt", -1.5),
    ("drop", -1.1),
    ("easy", 1.9),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("empower", 1.6),
    ("encourage", 2.3),
    ("encouraging", 2.4),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fake", -2.1),
    ("fantastic", 2.6),
    ("fear", -2.2),
    ("fears", -1.8),
    ("fine", 0.8),
    ("flaw", -1.4),
    ("fraud", -2.8),
    ("free", 2.3),
    ("fun", 2.3),
    ("gain", 2.0),
    ("gains", 1.8),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("grow", 1.6),
    ("growth", 1.6),
    ("happy", 2.7),
    ("harm", -2.5),
    ("hate", -2.7),
    ("healthy", 1.7),
    ("help", 1.7),
    ("helpful", 1.8),
    ("helps", 1.6),
    ("hope", 1.9),
    ("hopeful", 2.0),
    ("hurt", -2.4),
    ("ideal", 2.4),
    ("illegal", -2.6),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("improves", 1.8),
    ("improving", 1.8),
    ("innovative", 1.9),
    ("inspire", 2.4),
    ("interesting", 1.7),
    ("kill", -3.7),
    ("lack", -1.3),
    ("lawsuit", -0.9),
    ("leak", -1.4),
    ("lose", -1.7),
    ("loss", -1.3),
    ("losses", -1.7),
    ("love", 3.2),
    ("malicious", -2.5),
    ("miss", -0.6),
    ("mistake", -1.4),
    ("negative", -2.7),
    ("nice", 1.8),
    ("optimistic", 1.3),
    ("outage", -1.5),
    ("pain", -2.3),
    ("panic", -2.3),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("popular", 1.8),
    ("positive", 2.6),
    ("powerful", 1.8),
    ("praise", 2.6),
    ("problem", -1.7),
    ("problems", -1.7),
    ("profit", 1.9),
    ("progress", 1.8),
    ("promise", 1.3),
    ("promising", 1.7),
    ("protect", 1.6),
    ("proud", 2.1),
    ("recover", 1.6),
    ("reliable", 1.7),
    ("relief", 2.1),
    ("resolve", 1.6),
    ("reward", 2.0),
    ("risk", -1.1),
    ("risks", -1.1),
    ("risky", -0.8),
    ("robust", 1.4),
    ("safe", 1.9),
    ("safer", 1.8),
    ("safety", 1.8),
    ("scam", -2.7),
    ("scandal", -1.9),
    ("scary", -2.2),
    ("secure", 1.4),
    ("severe", -1.6),
    ("shortage", -1.4),
    ("slow", -0.7),
    ("smart", 1.7),
    ("solution", 1.3),
    ("solve", 0.8),
    ("strong", 2.3),
    ("struggle", -1.3),
    ("stuck", -1.0),
    ("succeed", 2.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("suffer", -2.1),
    ("support", 1.7),
    ("surge", 0.4),
    ("terrible", -2.1),
    ("thank", 1.5),
    ("threat", -2.4),
    ("threats", -1.8),
    ("transform", 1.0),
    ("trouble", -1.7),
    ("trust", 2.3),
    ("ugly", -2.3),
    ("unsafe", -2.2),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("victory", 2.8),
    ("vulnerability", -0.9),
    ("vulnerable", -0.9),
    ("warn", -0.4),
    ("warning", -1.4),
    ("weak", -1.9),
    ("win", 2.8),
    ("wins", 2.7),
    ("wonderful", 2.7),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT),
    ("amazingly", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("considerably", BOOSTER_INCREMENT),
    ("deeply", BOOSTER_INCREMENT),
    ("enormously", BOOSTER_INCREMENT),
    ("entirely", BOOSTER_INCREMENT),
    ("especially", BOOSTER_INCREMENT),
    ("exceptionally", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("fully", BOOSTER_INCREMENT),
    ("greatly", BOOSTER_INCREMENT),
    ("highly", BOOSTER_INCREMENT),
    ("hugely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("intensely", BOOSTER_INCREMENT),
    ("more", BOOSTER_INCREMENT),
    ("most", BOOSTER_INCREMENT),
    ("particularly", BOOSTER_INCREMENT),
    ("quite", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("remarkably", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("substantially", BOOSTER_INCREMENT),
    ("thoroughly", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("tremendously", BOOSTER_INCREMENT),
    ("unbelievably", BOOSTER_INCREMENT),
    ("utterly", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT),
    ("almost", BOOSTER_DECREMENT),
    ("barely", BOOSTER_DECREMENT),
    ("hardly", BOOSTER_DECREMENT),
    ("kinda", BOOSTER_DECREMENT),
    ("less", BOOSTER_DECREMENT),
    ("little", BOOSTER_DECREMENT),
    ("marginally", BOOSTER_DECREMENT),
    ("occasionally", BOOSTER_DECREMENT),
    ("partly", BOOSTER_DECREMENT),
    ("scarcely", BOOSTER_DECREMENT),
    ("slightly", BOOSTER_DECREMENT),
    ("somewhat", BOOSTER_DECREMENT),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

lazy_static! {
    static ref LEXICON: HashMap<&'static str, f64> = VALENCES.iter().copied().collect();
    static ref BOOSTER_DICT: HashMap<&'static str, f64> = BOOSTERS.iter().copied().collect();
    static ref NEGATION_SET: HashSet<&'static str> = NEGATIONS.iter().copied().collect();
}

/// Valence of a lowercased word, if it carries sentiment.
pub fn valence(word: &str) -> Option<f64> {
    LEXICON.get(word).copied()
}

/// Booster scalar of a lowercased word, if it intensifies or dampens.
pub fn booster(word: &str) -> Option<f64> {
    BOOSTER_DICT.get(word).copied()
}

/// Whether a lowercased word negates what follows.
pub fn is_negation(word: &str) -> bool {
    let stripped: String = word.chars().filter(|c| *c != '\'').collect();
    NEGATION_SET.contains(stripped.as_str()) || word.contains("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert_eq!(valence("great"), Some(3.1));
        assert_eq!(valence("processor"), None);
        assert_eq!(booster("very"), Some(BOOSTER_INCREMENT));
        assert_eq!(booster("slightly"), Some(BOOSTER_DECREMENT));
    }

    #[test]
    fn test_negations() {
        assert!(is_negation("not"));
        assert!(is_negation("don't"));
        assert!(is_negation("shouldn't"));
        assert!(!is_negation("note"));
    }
}
