//! Speaker selection over a parsed transcript.

use super::Utterance;
use thiserror::Error;

/// No utterance matched the requested speaker.
///
/// The most common cause is a typo or display-name mismatch, so the error
/// carries every speaker name that was actually present.
#[derive(Debug, Error)]
#[error("no utterances found for speaker '{target}' (speakers present: {})", .available.join(", "))]
pub struct EmptySelectionError {
    pub target: String,
    pub available: Vec<String>,
}

/// Select the utterances authored by `target`, preserving order.
///
/// Matching is case-insensitive after trimming; the export sometimes pads
/// display names with whitespace.
pub fn filter_speaker(
    utterances: &[Utterance],
    target: &str,
) -> Result<Vec<Utterance>, EmptySelectionError> {
    let wanted = target.trim().to_lowercase();
    let selected: Vec<Utterance> = utterances
        .iter()
        .filter(|u| u.speaker.trim().to_lowercase() == wanted)
        .cloned()
        .collect();

    if selected.is_empty() {
        let mut available: Vec<String> = utterances
            .iter()
            .map(|u| u.speaker.trim().to_string())
            .collect();
        available.sort();
        available.dedup();
        return Err(EmptySelectionError {
            target: target.to_string(),
            available,
        });
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_utterance(index: usize, speaker: &str, text: &str) -> Utterance {
        Utterance {
            index,
            timestamp: None,
            speaker: speaker.to_string(),
            raw: text.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_selects_matching_speaker_in_order() {
        let utterances = vec![
            make_utterance(0, "민수", "하나"),
            make_utterance(1, "지영", "둘"),
            make_utterance(2, "민수", "셋"),
        ];

        let selected = filter_speaker(&utterances, "민수").unwrap();

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].index, 0);
        assert_eq!(selected[1].index, 2);
    }

    #[test]
    fn test_match_is_case_insensitive_and_trimmed() {
        let utterances = vec![make_utterance(0, " Alice ", "hi")];
        let selected = filter_speaker(&utterances, "alice").unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_no_match_lists_available_speakers() {
        let utterances = vec![
            make_utterance(0, "민수", "하나"),
            make_utterance(1, "지영", "둘"),
            make_utterance(2, "민수", "셋"),
        ];

        let err = filter_speaker(&utterances, "영희").unwrap_err();

        assert_eq!(err.target, "영희");
        assert_eq!(err.available, vec!["민수".to_string(), "지영".to_string()]);
        let message = err.to_string();
        assert!(message.contains("영희"));
        assert!(message.contains("민수"));
        assert!(message.contains("지영"));
    }

    #[test]
    fn test_empty_transcript_yields_empty_selection() {
        let err = filter_speaker(&[], "민수").unwrap_err();
        assert!(err.available.is_empty());
    }
}
