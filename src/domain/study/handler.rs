use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use super::dto::{FlashcardRequest, FlashcardResponse, LessonPlanRequest, SlideOutlineRequest};
use super::service::StudyService;
use crate::domain::session::dto::ArtifactResponse;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 플래시카드 생성 API
///
/// 핵심 용어와 정의를 추출해 카드 목록으로 반환합니다.
/// `용어: 정의` 형식이 아닌 줄은 카드에서 제외됩니다.
#[utoipa::path(
    post,
    path = "/api/study/flashcards",
    request_body = FlashcardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = FlashcardResponse),
        (status = 400, description = "잘못된 요청 또는 활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 503, description = "AI 호출 실패", body = ErrorResponse)
    ),
    tag = "Study"
)]
pub async fn generate_flashcards(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<FlashcardRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<FlashcardResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = StudyService::generate_flashcards(state, session, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 수업 계획 생성 API
#[utoipa::path(
    post,
    path = "/api/study/lesson-plan",
    request_body = LessonPlanRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = ArtifactResponse),
        (status = 400, description = "잘못된 요청 또는 활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 503, description = "AI 호출 실패", body = ErrorResponse)
    ),
    tag = "Study"
)]
pub async fn generate_lesson_plan(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<LessonPlanRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ArtifactResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = StudyService::generate_lesson_plan(state, session, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 슬라이드 개요 생성 API
#[utoipa::path(
    post,
    path = "/api/study/slides",
    request_body = SlideOutlineRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = ArtifactResponse),
        (status = 400, description = "잘못된 요청 또는 활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 503, description = "AI 호출 실패", body = ErrorResponse)
    ),
    tag = "Study"
)]
pub async fn generate_slides(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<SlideOutlineRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ArtifactResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = StudyService::generate_slides(state, session, req).await?;

    Ok(Json(BaseResponse::success(result)))
}
