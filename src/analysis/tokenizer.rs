//! Tokenization and sentence segmentation.
//!
//! Tokenization policy, fixed for comparability across runs: tokens are the
//! Unicode words of the normalized text (UAX #29 word boundaries via
//! `unicode-segmentation`), lowercased. Korean text therefore tokenizes at
//! whitespace and punctuation without morphological splitting; lexicon
//! matching downstream accounts for that by listing surface forms.

use unicode_segmentation::UnicodeSegmentation;

/// Split normalized text into lowercased tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Sentence-final punctuation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceEnding {
    Declarative,
    Interrogative,
    Exclamatory,
    /// Sentence ends without a recognized final marker (very common in chat).
    Unmarked,
}

fn classify_terminator(c: char) -> Option<SentenceEnding> {
    match c {
        '.' | '…' => Some(SentenceEnding::Declarative),
        '?' | '？' => Some(SentenceEnding::Interrogative),
        '!' | '！' => Some(SentenceEnding::Exclamatory),
        _ => None,
    }
}

/// Scan text and classify how each sentence ends.
///
/// A run of consecutive terminators ("?!", "...") counts as one sentence
/// ending, classified by its first character.
pub fn sentence_endings(text: &str) -> Vec<SentenceEnding> {
    let mut endings = Vec::new();
    let mut has_content = false;
    let mut in_terminator_run = false;

    for c in text.chars() {
        match classify_terminator(c) {
            Some(kind) => {
                if has_content && !in_terminator_run {
                    endings.push(kind);
                    has_content = false;
                }
                in_terminator_run = true;
            }
            None => {
                in_terminator_run = false;
                if !c.is_whitespace() {
                    has_content = true;
                }
            }
        }
    }
    if has_content {
        endings.push(SentenceEnding::Unmarked);
    }
    endings
}
