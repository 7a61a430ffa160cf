use super::dto::{FlashcardRequest, FlashcardResponse, LessonPlanRequest, SlideOutlineRequest};
use super::flashcard::parse_flashcards;
use super::prompt::{
    flashcard_prompt, lesson_plan_prompt, slide_outline_prompt, DEFAULT_FLASHCARD_COUNT,
    DEFAULT_LESSON_MINUTES, DEFAULT_SLIDE_COUNT,
};
use crate::domain::ai::excerpt;
use crate::domain::exam::dto::DEFAULT_AUDIENCE;
use crate::domain::material::entity::material::MaterialKind;
use crate::domain::session::dto::ArtifactResponse;
use crate::domain::session::service::produce_artifact;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

/// 플래시카드, 수업 계획, 슬라이드 개요 생성
///
/// 문서 앞부분(`STUDY_CONTEXT_CHARS`)만 프롬프트에 넣습니다.
pub struct StudyService;

impl StudyService {
    pub async fn generate_flashcards(
        state: AppState,
        session: CurrentSession,
        req: FlashcardRequest,
    ) -> Result<FlashcardResponse, AppError> {
        let budget = state.config.study_context_chars;
        let count = req.count.unwrap_or(DEFAULT_FLASHCARD_COUNT);
        let mut context = session.context.lock().await;

        let artifact = produce_artifact(
            state.ai.as_ref(),
            &mut context,
            MaterialKind::Flashcards,
            req.document.as_deref(),
            |doc| flashcard_prompt(count, excerpt(&doc.text, budget)),
        )
        .await?;

        let cards = parse_flashcards(artifact.body());
        if cards.is_empty() {
            tracing::warn!(source = %artifact.source, "플래시카드 형식의 줄이 없습니다");
        }

        Ok(FlashcardResponse {
            artifact: ArtifactResponse::from(&artifact),
            cards,
        })
    }

    pub async fn generate_lesson_plan(
        state: AppState,
        session: CurrentSession,
        req: LessonPlanRequest,
    ) -> Result<ArtifactResponse, AppError> {
        let budget = state.config.study_context_chars;
        let minutes = req.duration_minutes.unwrap_or(DEFAULT_LESSON_MINUTES);
        let audience = req.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE);
        let mut context = session.context.lock().await;

        let artifact = produce_artifact(
            state.ai.as_ref(),
            &mut context,
            MaterialKind::LessonPlan,
            req.document.as_deref(),
            |doc| lesson_plan_prompt(minutes, audience, excerpt(&doc.text, budget)),
        )
        .await?;

        Ok(ArtifactResponse::from(&artifact))
    }

    pub async fn generate_slides(
        state: AppState,
        session: CurrentSession,
        req: SlideOutlineRequest,
    ) -> Result<ArtifactResponse, AppError> {
        let budget = state.config.study_context_chars;
        let slides = req.slide_count.unwrap_or(DEFAULT_SLIDE_COUNT);
        let mut context = session.context.lock().await;

        let artifact = produce_artifact(
            state.ai.as_ref(),
            &mut context,
            MaterialKind::SlideOutline,
            req.document.as_deref(),
            |doc| slide_outline_prompt(slides, excerpt(&doc.text, budget)),
        )
        .await?;

        Ok(ArtifactResponse::from(&artifact))
    }
}
