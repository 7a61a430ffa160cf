//! 모델 응답 분리
//!
//! 시험지 응답은 `---SUMMARY---` 한 줄을 경계로 본문과 정답/요약으로 나뉩니다.
//! 경계가 없으면 에러가 아니라 요약이 없는 결과로 취급합니다.

use serde::Serialize;

/// 본문과 요약을 나누는 문자열
pub const SUMMARY_SENTINEL: &str = "---SUMMARY---";

/// 경계가 없을 때의 요약 문구
pub const UNIT_SUMMARY_PLACEHOLDER: &str = "Unit summary unavailable.";

/// 분리된 모델 응답
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Segmented {
    #[serde(rename_all = "camelCase")]
    Complete {
        paper_body: String,
        unit_summary: String,
    },
    #[serde(rename_all = "camelCase")]
    Degraded { paper_body: String },
}

impl Segmented {
    pub fn paper_body(&self) -> &str {
        match self {
            Segmented::Complete { paper_body, .. } | Segmented::Degraded { paper_body } => {
                paper_body
            }
        }
    }

    pub fn unit_summary(&self) -> &str {
        match self {
            Segmented::Complete { unit_summary, .. } => unit_summary,
            Segmented::Degraded { .. } => UNIT_SUMMARY_PLACEHOLDER,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Segmented::Complete { .. })
    }

    /// 다운로드/저장용 전체 텍스트
    ///
    /// 요약이 있으면 경계 줄을 다시 넣어 이어 붙입니다.
    pub fn full_text(&self) -> String {
        match self {
            Segmented::Complete {
                paper_body,
                unit_summary,
            } => format!("{}\n\n{}\n\n{}", paper_body, SUMMARY_SENTINEL, unit_summary),
            Segmented::Degraded { paper_body } => paper_body.clone(),
        }
    }
}

/// 처음 나오는 경계에서만 나눕니다.
pub fn segment(raw: &str) -> Segmented {
    match raw.split_once(SUMMARY_SENTINEL) {
        Some((body, summary)) => Segmented::Complete {
            paper_body: body.trim().to_string(),
            unit_summary: summary.trim().to_string(),
        },
        None => Segmented::Degraded {
            paper_body: raw.trim().to_string(),
        },
    }
}
