//! 플래시카드 응답 파싱
//!
//! 모델 응답에서 콜론이 있는 줄을 첫 번째 콜론 기준으로 `용어: 정의`로 나눕니다.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

/// 줄 앞의 목록/굵게 표시 (`-`, `*`, `**`, `•`, `1.`)
const LEADING_MARKERS: &str = r"^(?:[-*•]+\s*|\d+[.)]\s+)+";

static LEADING_MARKERS_RE: OnceLock<Regex> = OnceLock::new();

fn leading_markers() -> &'static Regex {
    LEADING_MARKERS_RE.get_or_init(|| Regex::new(LEADING_MARKERS).expect("valid marker pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Flashcard {
    #[schema(example = "Stack")]
    pub term: String,
    #[schema(example = "A LIFO data structure")]
    pub definition: String,
}

/// 콜론이 없는 줄만 건너뜁니다.
///
/// 용어 앞의 목록/굵게 표시는 지우고, 정의는 앞뒤 공백만 정리합니다.
/// `**Term:** 정의`처럼 굵게 표시가 콜론을 감싸면 정의 앞의 닫는 `**`도 지웁니다.
pub fn parse_flashcards(raw: &str) -> Vec<Flashcard> {
    raw.lines()
        .filter_map(|line| {
            let (term, definition) = line.split_once(':')?;

            let term = term.trim();
            let definition = definition.trim();
            let definition = if has_open_bold(term) {
                definition.strip_prefix("**").unwrap_or(definition).trim_start()
            } else {
                definition
            };

            let term = leading_markers().replace(term, "");
            Some(Flashcard {
                term: term.trim_matches('*').trim().to_string(),
                definition: definition.to_string(),
            })
        })
        .collect()
}

/// 닫히지 않은 `**`가 남아 있는지 여부
fn has_open_bold(term: &str) -> bool {
    term.matches("**").count() % 2 == 1
}
