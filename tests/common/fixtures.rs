//! Shared transcript fixtures.

pub const TARGET_SPEAKER: &str = "민수";

/// A small but representative export: date banner, three speakers, one
/// multi-line message, a join notice and two media placeholders.
///
/// Expected parse: 15 utterances total, 9 of them by 민수.
pub const SAMPLE_TRANSCRIPT: &str = "\
--------------- 2023년 3월 2일 목요일 ---------------
[민수] [오전 9:12] 좋은 아침! 오늘 진짜 날씨 좋다
[지영] [오전 9:13] 응 좋은 아침
[민수] [오전 9:15] 나는 오늘 발표가 있어서 긴장돼
[지영] [오전 9:16] 잘할 거야
[민수] [오전 9:20] 아마 괜찮을 듯? 준비는 많이 했어
[민수] [오전 9:21] 사진
박철수님이 들어왔습니다.
[철수] [오전 9:25] 안녕하세요
[민수] [오전 9:26] 어 철수 왔네! 반갑다
[지영] [오전 9:30] 점심 뭐 먹을까?
[민수] [오전 9:31] 최악이다 어제 회의 때문에 짜증나
[민수] [오전 9:32] 그래도 점심은 김치찌개 어때?
먹고 싶었어
계속 생각났거든
[지영] [오후 12:01] 그러자
[민수] [오후 1:45] 내가 쏠게 고마워서 그래
[철수] [오후 1:50] 이모티콘
[민수] [오후 2:10] 발표 끝! 확실히 준비한 보람이 있다
[지영] [오후 2:11] 축하해!
[민수] [오후 2:15] 바보같은 실수 하나 했는데 그래도 만족해
";

pub const PARSED_COUNT: usize = 15;
pub const TARGET_COUNT: usize = 9;
