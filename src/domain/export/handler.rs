use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName},
};

use super::dto::ExportQuery;
use super::service::ExportService;
use crate::domain::material::entity::material::MaterialKind;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

/// 결과물 내보내기 API
///
/// 현재 결과물을 텍스트 파일 또는 PDF 첨부로 내려받습니다.
/// PDF에서는 ASCII 외 문자가 제거됩니다.
#[utoipa::path(
    get,
    path = "/api/artifacts/{kind}/export",
    params(
        ("kind" = MaterialKind, Path, description = "결과물 종류"),
        ExportQuery
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "파일 다운로드", content_type = "application/octet-stream"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "결과물 없음", body = ErrorResponse),
        (status = 500, description = "PDF 생성 실패", body = ErrorResponse)
    ),
    tag = "Artifact"
)]
pub async fn export_artifact(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(kind): Path<MaterialKind>,
    Query(query): Query<ExportQuery>,
) -> Result<([(HeaderName, String); 3], Vec<u8>), AppError> {
    let file = ExportService::export(state, session, kind, query.format, query.title).await?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
        (
            header::CACHE_CONTROL,
            "no-cache, no-store, must-revalidate".to_string(),
        ),
    ];

    Ok((headers, file.bytes))
}
