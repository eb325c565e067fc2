//! Text utilities shared by every pipeline stage.

mod sentences;
mod stopwords;
mod tokenize;

pub use sentences::split_sentences;
pub use stopwords::is_stop_word;
pub use tokenize::{capitalized_tokens, frequent_terms, normalize, tokenize, word_tokens};
