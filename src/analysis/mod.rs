//! Linguistic analysis: tokenization, marker lexicons and style metrics.

mod lexicon;
mod style;
mod tokenizer;

pub use lexicon::Lexicons;
pub use style::{SentenceEndingDistribution, SentimentSummary, StyleMetrics};
pub use tokenizer::{sentence_endings, tokenize, SentenceEnding};
