use axum::{extract::Path, Json};

use super::dto::ArtifactResponse;
use crate::domain::material::entity::material::MaterialKind;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 현재 결과물 조회 API
///
/// 세션에 보관된 해당 종류의 가장 최근 결과물을 반환합니다.
#[utoipa::path(
    get,
    path = "/api/artifacts/{kind}",
    params(("kind" = MaterialKind, Path, description = "결과물 종류")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ArtifactResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "결과물 없음", body = ErrorResponse)
    ),
    tag = "Artifact"
)]
pub async fn get_artifact(
    session: CurrentSession,
    Path(kind): Path<MaterialKind>,
) -> Result<Json<BaseResponse<ArtifactResponse>>, AppError> {
    let context = session.context.lock().await;
    let artifact = context
        .artifact(kind)
        .ok_or_else(|| AppError::not_found(format!("No {} generated yet", kind.label())))?;

    Ok(Json(BaseResponse::success(ArtifactResponse::from(artifact))))
}
