use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::flashcard::Flashcard;
use crate::domain::session::dto::ArtifactResponse;

// ============================================
// Request DTOs
// ============================================

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRequest {
    /// 카드 수 (기본 5)
    #[validate(range(min = 1, max = 20, message = "count must be between 1 and 20"))]
    #[schema(example = 5)]
    pub count: Option<u32>,
    /// 사용할 문서 파일명 (생략 시 활성 문서)
    pub document: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlanRequest {
    /// 수업 시간 (분, 기본 60)
    #[validate(range(min = 10, max = 240, message = "durationMinutes must be between 10 and 240"))]
    #[schema(example = 60)]
    pub duration_minutes: Option<u32>,
    /// 대상 학습자 (기본: MCA 학생)
    #[validate(length(min = 1, max = 200, message = "audience must be 1-200 characters"))]
    pub audience: Option<String>,
    pub document: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlideOutlineRequest {
    /// 슬라이드 수 (기본 10)
    #[validate(range(min = 3, max = 30, message = "slideCount must be between 3 and 30"))]
    #[schema(example = 10)]
    pub slide_count: Option<u32>,
    pub document: Option<String>,
}

// ============================================
// Response DTOs
// ============================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardResponse {
    pub artifact: ArtifactResponse,
    /// `용어: 정의` 형식으로 파싱된 카드
    pub cards: Vec<Flashcard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_empty_body_with_defaults() {
        // Act
        let request: FlashcardRequest = serde_json::from_str("{}").unwrap();

        // Assert
        assert!(request.count.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn should_reject_out_of_range_values() {
        let flashcards = FlashcardRequest {
            count: Some(0),
            document: None,
        };
        let lesson = LessonPlanRequest {
            duration_minutes: Some(5),
            ..Default::default()
        };
        let slides = SlideOutlineRequest {
            slide_count: Some(31),
            document: None,
        };

        assert!(flashcards.validate().is_err());
        assert!(lesson.validate().is_err());
        assert!(slides.validate().is_err());
    }

    #[test]
    fn should_read_camel_case_fields() {
        let request: LessonPlanRequest =
            serde_json::from_str(r#"{"durationMinutes":90,"audience":"BSc students"}"#).unwrap();

        assert_eq!(request.duration_minutes, Some(90));
        assert_eq!(request.audience.as_deref(), Some("BSc students"));
    }
}
