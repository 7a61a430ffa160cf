use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use validator::Validate;

use super::dto::{MaterialListQuery, MaterialResponse, SaveMaterialRequest};
use super::service::MaterialService;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 학습 자료 저장 API
///
/// 세션에 있는 해당 종류의 현재 결과물을 이력에 추가합니다.
#[utoipa::path(
    post,
    path = "/api/materials",
    request_body = SaveMaterialRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "저장 성공", body = MaterialResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "저장할 결과물 없음", body = ErrorResponse)
    ),
    tag = "Material"
)]
pub async fn save_material(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<SaveMaterialRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<MaterialResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = MaterialService::save(state, session, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 학습 자료 이력 조회 API
///
/// 본인이 저장한 자료를 최신순으로 반환합니다.
#[utoipa::path(
    get,
    path = "/api/materials",
    params(MaterialListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [MaterialResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Material"
)]
pub async fn list_materials(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<MaterialListQuery>,
) -> Result<Json<BaseResponse<Vec<MaterialResponse>>>, AppError> {
    let result = MaterialService::list(state, session, query.kind).await?;

    Ok(Json(BaseResponse::success(result)))
}
