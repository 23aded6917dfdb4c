//! Transcript ingestion: parsing, speaker filtering and sampling.

mod filter;
mod parser;
mod sampler;

pub use filter::{filter_speaker, EmptySelectionError};
pub use parser::{parse_transcript, ParseError};
pub use sampler::{SampleStrategy, Sampler};

use chrono::NaiveDateTime;
use serde::Serialize;

/// A single message attributed to one speaker.
///
/// Created by the parser and treated as read-only downstream. `text` is the
/// normalized form used for all analysis; `raw` preserves the message as it
/// appeared in the export (continuation lines joined with newlines).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    /// Position in the parsed transcript, dense and ascending.
    pub index: usize,
    /// Full timestamp when the export provides enough context, else None.
    pub timestamp: Option<NaiveDateTime>,
    pub speaker: String,
    pub raw: String,
    pub text: String,
}
