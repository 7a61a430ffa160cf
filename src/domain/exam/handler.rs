use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use super::dto::GenerationRequest;
use super::service::ExamService;
use crate::domain::session::dto::ArtifactResponse;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 시험지 생성 API
///
/// 섹션별 문항 유형/수/난이도로 시험지를 만들고 `EXAM_PAPER` 결과물로 보관합니다.
/// 응답에 `---SUMMARY---` 경계가 없으면 `segmented=false`와 안내 문구를 반환합니다.
#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = GenerationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "시험지 생성 성공", body = ArtifactResponse),
        (status = 400, description = "잘못된 요청 또는 활성 문서 없음", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 503, description = "AI 호출 실패", body = ErrorResponse),
        (status = 504, description = "AI 호출 타임아웃", body = ErrorResponse)
    ),
    tag = "Exam"
)]
pub async fn generate_exam(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ArtifactResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = ExamService::generate_exam(state, session, req).await?;

    Ok(Json(BaseResponse::success(result)))
}
