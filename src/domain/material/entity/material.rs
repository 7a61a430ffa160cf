use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 생성 결과물 종류
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    #[sea_orm(string_value = "EXAM_PAPER")]
    ExamPaper,
    #[sea_orm(string_value = "FLASHCARDS")]
    Flashcards,
    #[sea_orm(string_value = "LESSON_PLAN")]
    LessonPlan,
    #[sea_orm(string_value = "SLIDE_OUTLINE")]
    SlideOutline,
    #[sea_orm(string_value = "CHAT_ANSWER")]
    ChatAnswer,
}

impl MaterialKind {
    /// 화면/문서 제목용 라벨
    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::ExamPaper => "Exam Paper",
            MaterialKind::Flashcards => "Flashcards",
            MaterialKind::LessonPlan => "Lesson Plan",
            MaterialKind::SlideOutline => "Slide Outline",
            MaterialKind::ChatAnswer => "Tutor Answer",
        }
    }

    /// 응답을 본문과 요약으로 나누도록 요청하는 종류 (시험지만 해당)
    pub fn has_summary_section(&self) -> bool {
        matches!(self, MaterialKind::ExamPaper)
    }

    /// 다운로드 파일 이름 (확장자 제외)
    pub fn file_stem(&self) -> &'static str {
        match self {
            MaterialKind::ExamPaper => "exam_paper",
            MaterialKind::Flashcards => "flashcards",
            MaterialKind::LessonPlan => "lesson_plan",
            MaterialKind::SlideOutline => "slide_outline",
            MaterialKind::ChatAnswer => "chat_answer",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub material_id: i64,
    /// 소유자 username
    pub owner: String,
    /// 원본 문서 파일명
    pub filename: String,
    pub topic: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub kind: MaterialKind,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_kind_in_screaming_snake_case() {
        let json = serde_json::to_string(&MaterialKind::SlideOutline).unwrap();

        assert_eq!(json, "\"SLIDE_OUTLINE\"");
    }

    #[test]
    fn should_use_snake_case_file_stem() {
        assert_eq!(MaterialKind::ExamPaper.file_stem(), "exam_paper");
        assert_eq!(MaterialKind::ChatAnswer.file_stem(), "chat_answer");
    }
}
