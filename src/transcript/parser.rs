//! Parser for KakaoTalk-style text exports.
//!
//! The export is a line format: a message starts with a header line carrying
//! a timestamp and speaker name, followed by zero or more continuation lines
//! that belong to the same message. Two header shapes are recognized:
//!
//! - `[name] [오후 9:33] text` (mobile export; date comes from banner lines)
//! - `2023. 1. 15. 오후 9:33, name : text` (older desktop export)
//!
//! Lines matching neither shape are continuations of the current message.
//! System notices (joins, leaves, invites) and media-only placeholder
//! messages (photo, emoticon, video, file, deleted) are dropped.

use super::Utterance;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Errors produced while parsing a transcript.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not a single header line was recognized in the whole input.
    #[error("no structured messages found in transcript")]
    NoMessages,
}

lazy_static! {
    // [name] [오후 9:33] message
    static ref BRACKET_HEADER: Regex = Regex::new(
        r"^\[([^\[\]]+)\]\s+\[(?:(오전|오후)\s+)?(\d{1,2}):(\d{2})\]\s?(.*)$"
    )
    .unwrap();

    // 2023. 1. 15. 오후 9:33, name : message
    static ref DATED_HEADER: Regex = Regex::new(
        r"^(\d{4})\.\s?(\d{1,2})\.\s?(\d{1,2})\.\s+(?:(오전|오후)\s+)?(\d{1,2}):(\d{2}),\s*([^:]+?)\s*:\s?(.*)$"
    )
    .unwrap();

    // --------------- 2023년 1월 15일 일요일 --------------- (date divider)
    static ref DATE_BANNER: Regex =
        Regex::new(r"^-*\s*(\d{4})년\s+(\d{1,2})월\s+(\d{1,2})일.*$").unwrap();

    // Room notices that carry no speaker content.
    static ref SYSTEM_NOTICE: Regex = Regex::new(
        "님이 들어왔습니다|님이 나갔습니다|님을 초대했습니다|님을 내보냈습니다"
    )
    .unwrap();

    static ref URL_RE: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref LAUGHTER_RE: Regex = Regex::new(r"[ㅋㅎㅠㅜ]+").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Placeholder bodies the export substitutes for non-text content.
const MEDIA_PLACEHOLDERS: &[&str] = &[
    "사진",
    "사진 여러 장",
    "이모티콘",
    "동영상",
    "파일",
    "삭제된 메시지입니다.",
    "보이스톡 해요.",
];

/// Normalize message text for analysis: strip URLs and laughter/crying jamo
/// runs, collapse whitespace.
pub(crate) fn normalize_text(raw: &str) -> String {
    let without_urls = URL_RE.replace_all(raw, " ");
    let without_laughter = LAUGHTER_RE.replace_all(&without_urls, "");
    WHITESPACE_RE
        .replace_all(&without_laughter, " ")
        .trim()
        .to_string()
}

fn parse_time(ampm: Option<&str>, hour: u32, minute: u32) -> Option<NaiveTime> {
    let hour = match ampm {
        Some("오후") if hour < 12 => hour + 12,
        Some("오전") if hour == 12 => 0,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// A message being accumulated while its continuation lines are scanned.
struct PendingMessage {
    speaker: String,
    timestamp: Option<NaiveDateTime>,
    lines: Vec<String>,
}

struct MessageBuilder {
    current: Option<PendingMessage>,
    current_date: Option<NaiveDate>,
    saw_header: bool,
    out: Vec<Utterance>,
}

impl MessageBuilder {
    fn new() -> Self {
        Self {
            current: None,
            current_date: None,
            saw_header: false,
            out: Vec::new(),
        }
    }

    /// Close out the current message, dropping it if it normalizes to nothing
    /// or is a media-only placeholder.
    fn flush(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };
        let raw = pending.lines.join("\n");
        if MEDIA_PLACEHOLDERS.contains(&raw.trim()) {
            return;
        }
        let text = normalize_text(&raw);
        if text.is_empty() {
            return;
        }
        self.out.push(Utterance {
            index: self.out.len(),
            timestamp: pending.timestamp,
            speaker: pending.speaker,
            raw,
            text,
        });
    }

    fn start(&mut self, speaker: &str, time: Option<NaiveTime>, first_line: &str) {
        self.flush();
        self.saw_header = true;
        let timestamp = match (self.current_date, time) {
            (Some(date), Some(time)) => Some(NaiveDateTime::new(date, time)),
            _ => None,
        };
        self.current = Some(PendingMessage {
            speaker: speaker.trim().to_string(),
            timestamp,
            lines: vec![first_line.to_string()],
        });
    }

    fn continuation(&mut self, line: &str) {
        if let Some(pending) = self.current.as_mut() {
            pending.lines.push(line.to_string());
        }
        // Lines before the first header have no message to attach to.
    }
}

/// Parse a raw export into an ordered sequence of utterances.
///
/// Malformed lines never fail the parse; they are treated as continuations
/// of the current message. The parse fails only when no header line at all
/// is recognized.
pub fn parse_transcript(text: &str) -> Result<Vec<Utterance>, ParseError> {
    let mut builder = MessageBuilder::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');

        if let Some(caps) = DATE_BANNER.captures(line) {
            // Banner closes the previous message and sets the running date.
            builder.flush();
            builder.current_date = NaiveDate::from_ymd_opt(
                caps[1].parse().unwrap_or(0),
                caps[2].parse().unwrap_or(0),
                caps[3].parse().unwrap_or(0),
            );
            continue;
        }

        if SYSTEM_NOTICE.is_match(line) {
            builder.flush();
            continue;
        }

        if let Some(caps) = BRACKET_HEADER.captures(line) {
            let time = parse_time(
                caps.get(2).map(|m| m.as_str()),
                caps[3].parse().unwrap_or(0),
                caps[4].parse().unwrap_or(0),
            );
            let (speaker, msg) = (caps[1].to_string(), caps[5].to_string());
            builder.start(&speaker, time, &msg);
            continue;
        }

        if let Some(caps) = DATED_HEADER.captures(line) {
            builder.current_date = NaiveDate::from_ymd_opt(
                caps[1].parse().unwrap_or(0),
                caps[2].parse().unwrap_or(0),
                caps[3].parse().unwrap_or(0),
            );
            let time = parse_time(
                caps.get(4).map(|m| m.as_str()),
                caps[5].parse().unwrap_or(0),
                caps[6].parse().unwrap_or(0),
            );
            let (speaker, msg) = (caps[7].to_string(), caps[8].to_string());
            builder.start(&speaker, time, &msg);
            continue;
        }

        builder.continuation(line);
    }

    builder.flush();

    if !builder.saw_header {
        return Err(ParseError::NoMessages);
    }
    Ok(builder.out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "\
[민수] [오후 2:01] 안녕하세요
[지영] [오후 2:02] 안녕! 오늘 뭐해?
[민수] [오후 2:03] 그냥 집에 있어";

    #[test]
    fn test_parses_bracket_headers() {
        let utterances = parse_transcript(SIMPLE).unwrap();

        assert_eq!(utterances.len(), 3);
        assert_eq!(utterances[0].speaker, "민수");
        assert_eq!(utterances[0].text, "안녕하세요");
        assert_eq!(utterances[1].speaker, "지영");
        assert_eq!(utterances[2].text, "그냥 집에 있어");
    }

    #[test]
    fn test_indexes_are_dense_and_ascending() {
        let utterances = parse_transcript(SIMPLE).unwrap();
        for (i, u) in utterances.iter().enumerate() {
            assert_eq!(u.index, i);
        }
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_transcript(SIMPLE).unwrap();
        let second = parse_transcript(SIMPLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multiline_continuation_joined_with_newline() {
        let text = "\
[민수] [오후 2:01] 첫 줄인데
둘째 줄이야
셋째 줄
[지영] [오후 2:02] 응";
        let utterances = parse_transcript(text).unwrap();

        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].raw, "첫 줄인데\n둘째 줄이야\n셋째 줄");
        // Normalized text collapses the newlines.
        assert_eq!(utterances[0].text, "첫 줄인데 둘째 줄이야 셋째 줄");
    }

    #[test]
    fn test_system_notice_excluded() {
        // 3 headers, one multi-line continuation, one join notice:
        // exactly 3 utterances, notice excluded.
        let text = "\
[민수] [오후 2:01] 안녕
[지영] [오후 2:02] 어 왔어?
계속 기다렸잖아
박철수님이 들어왔습니다.
[민수] [오후 2:05] 철수 왔네";
        let utterances = parse_transcript(text).unwrap();

        assert_eq!(utterances.len(), 3);
        assert!(utterances.iter().all(|u| !u.raw.contains("들어왔습니다")));
        assert_eq!(utterances[1].raw, "어 왔어?\n계속 기다렸잖아");
    }

    #[test]
    fn test_media_placeholders_dropped() {
        let text = "\
[민수] [오후 2:01] 사진
[지영] [오후 2:02] 이모티콘
[민수] [오후 2:03] 삭제된 메시지입니다.
[지영] [오후 2:04] 실제 메시지";
        let utterances = parse_transcript(text).unwrap();

        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].text, "실제 메시지");
    }

    #[test]
    fn test_trailing_buffer_flushed_at_eof() {
        let text = "[민수] [오후 2:01] 마지막 메시지\n이어지는 줄";
        let utterances = parse_transcript(text).unwrap();

        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].raw, "마지막 메시지\n이어지는 줄");
    }

    #[test]
    fn test_no_headers_is_parse_error() {
        let result = parse_transcript("그냥 텍스트 파일\n헤더가 없음");
        assert!(matches!(result, Err(ParseError::NoMessages)));
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        assert!(matches!(parse_transcript(""), Err(ParseError::NoMessages)));
    }

    #[test]
    fn test_headers_with_empty_bodies_only_still_counts_as_structured() {
        // All messages normalize to nothing, but headers were recognized:
        // this is an empty transcript, not an unparsable one.
        let text = "[민수] [오후 2:01] 사진";
        let utterances = parse_transcript(text).unwrap();
        assert!(utterances.is_empty());
    }

    #[test]
    fn test_date_banner_provides_timestamp_date() {
        let text = "\
--------------- 2023년 1월 15일 일요일 ---------------
[민수] [오후 2:01] 안녕";
        let utterances = parse_transcript(text).unwrap();

        assert_eq!(utterances.len(), 1);
        let ts = utterances[0].timestamp.expect("timestamp should be set");
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(14, 1, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_timestamp_none_without_date_context() {
        let utterances = parse_transcript(SIMPLE).unwrap();
        assert!(utterances.iter().all(|u| u.timestamp.is_none()));
    }

    #[test]
    fn test_dated_header_format() {
        let text = "2023. 1. 15. 오전 12:05, 지영 : 새벽이다";
        let utterances = parse_transcript(text).unwrap();

        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].speaker, "지영");
        assert_eq!(utterances[0].text, "새벽이다");
        let ts = utterances[0].timestamp.unwrap();
        // 오전 12:05 is five past midnight.
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(0, 5, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_normalize_strips_urls_and_laughter() {
        assert_eq!(
            normalize_text("이거 봐 https://example.com/a?b=c ㅋㅋㅋㅋ 웃기다"),
            "이거 봐 웃기다"
        );
        assert_eq!(normalize_text("  공백   정리  "), "공백 정리");
    }

    #[test]
    fn test_am_pm_conversion() {
        let text = "\
--------------- 2023년 3월 2일 목요일 ---------------
[민수] [오전 9:30] 아침
[민수] [오후 12:00] 점심
[민수] [오후 11:59] 밤";
        let utterances = parse_transcript(text).unwrap();
        let hours: Vec<u32> = utterances
            .iter()
            .map(|u| chrono::Timelike::hour(&u.timestamp.unwrap()))
            .collect();
        assert_eq!(hours, vec![9, 12, 23]);
    }
}
