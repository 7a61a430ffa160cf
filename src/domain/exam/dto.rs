use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 기본 대상 학습자
pub const DEFAULT_AUDIENCE: &str = "MCA (Masters in Computer Application) Students";

// ============================================
// Enums
// ============================================

/// 문항 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// 객관식
    Mcq,
    /// 단답형 (2-5점)
    ShortAnswer,
    /// 서술형 (10점 이상)
    LongTheory,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "Multiple Choice (MCQ)",
            QuestionType::ShortAnswer => "Short Answer (2-5 Marks)",
            QuestionType::LongTheory => "Long Theory (10+ Marks)",
        }
    }

    /// 정답을 본문에 싣지 않는 객관식 여부
    pub fn is_objective(&self) -> bool {
        matches!(self, QuestionType::Mcq)
    }
}

/// 난이도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

// ============================================
// Request DTOs
// ============================================

/// 섹션 하나의 구성
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionSpec {
    pub question_type: QuestionType,
    /// 문항 수 (1~20)
    #[validate(range(min = 1, max = 20, message = "count must be between 1 and 20"))]
    #[schema(example = 5)]
    pub count: u32,
    pub difficulty: Difficulty,
}

/// 시험지 생성 요청
///
/// 요청마다 새로 만들어지며 저장되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// 섹션 목록 (1~3개, 순서대로 A, B, C)
    #[validate(
        length(min = 1, max = 3, message = "between 1 and 3 sections are required"),
        nested
    )]
    pub sections: Vec<SectionSpec>,
    /// 대상 학습자 라벨
    #[serde(default = "default_audience")]
    #[validate(length(min = 1, max = 200, message = "audience must be 1-200 characters"))]
    #[schema(example = "MCA (Masters in Computer Application) Students")]
    pub audience: String,
    /// 사용할 문서 파일명 (생략 시 활성 문서)
    #[serde(default)]
    pub document: Option<String>,
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}
