use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use super::dto::{ChatRequest, ChatResponse, HistoryResponse};
use super::service::TutorService;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 튜터 질문 API
///
/// 활성 문서 앞부분과 지금까지의 대화를 함께 보내 답변을 받습니다.
#[utoipa::path(
    post,
    path = "/api/tutor/chat",
    request_body = ChatRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "답변 성공", body = ChatResponse),
        (status = 400, description = "잘못된 요청 또는 활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 503, description = "AI 호출 실패", body = ErrorResponse)
    ),
    tag = "Tutor"
)]
pub async fn chat(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ChatResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = TutorService::chat(state, session, req.question).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 쉬운 설명 API
///
/// 마지막 튜터 답변을 아이에게 설명하듯 다시 풀어 씁니다.
#[utoipa::path(
    post,
    path = "/api/tutor/simplify",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "답변 성공", body = ChatResponse),
        (status = 400, description = "이전 답변 또는 활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 503, description = "AI 호출 실패", body = ErrorResponse)
    ),
    tag = "Tutor"
)]
pub async fn simplify(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<BaseResponse<ChatResponse>>, AppError> {
    let result = TutorService::simplify(state, session).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 대화 기록 조회 API
#[utoipa::path(
    get,
    path = "/api/tutor/history",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = HistoryResponse),
        (status = 400, description = "활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Tutor"
)]
pub async fn get_history(
    session: CurrentSession,
) -> Result<Json<BaseResponse<HistoryResponse>>, AppError> {
    let result = TutorService::history(session).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 대화 기록 삭제 API
#[utoipa::path(
    delete,
    path = "/api/tutor/history",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 400, description = "활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Tutor"
)]
pub async fn clear_history(
    session: CurrentSession,
) -> Result<Json<BaseResponse<()>>, AppError> {
    TutorService::clear_history(session).await?;

    Ok(Json(BaseResponse::success_with_message("Chat history cleared")))
}
