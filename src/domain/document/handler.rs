use axum::{
    extract::rejection::JsonRejection,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use validator::Validate;

use super::dto::{DocumentListResponse, DocumentSummary, SelectDocumentRequest, UploadResponse};
use super::service::DocumentService;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// multipart 필드 이름
const FILE_FIELD: &str = "file";

/// 문서 업로드 API
///
/// multipart `file` 필드로 .pdf/.txt/.md 파일을 받아 평문을 추출합니다.
/// 가장 최근 업로드가 활성 문서가 되며, 같은 파일명은 교체됩니다.
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body(content_type = "multipart/form-data", description = "`file` 필드에 업로드할 파일"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "업로드 성공", body = UploadResponse),
        (status = 400, description = "지원하지 않는 파일 또는 빈 문서", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 422, description = "파일 파싱 실패", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn upload_document(
    State(state): State<AppState>,
    session: CurrentSession,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BaseResponse<UploadResponse>>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        let result = DocumentService::upload(state, session, &filename, bytes.to_vec()).await?;
        return Ok(Json(BaseResponse::success(result)));
    }

    Err(AppError::bad_request("Missing multipart field 'file'."))
}

/// 문서 목록 API
#[utoipa::path(
    get,
    path = "/api/documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = DocumentListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn list_documents(
    session: CurrentSession,
) -> Result<Json<BaseResponse<DocumentListResponse>>, AppError> {
    let result = DocumentService::list(session).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 활성 문서 선택 API
#[utoipa::path(
    put,
    path = "/api/documents/active",
    request_body = SelectDocumentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "선택 성공", body = DocumentSummary),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "문서 없음", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn select_document(
    session: CurrentSession,
    payload: Result<Json<SelectDocumentRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<DocumentSummary>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = DocumentService::select(session, &req.name).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 세션 초기화 API
///
/// 업로드한 문서, 생성 결과물, 대화 기록을 모두 지웁니다.
#[utoipa::path(
    delete,
    path = "/api/documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "초기화 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn reset_documents(
    session: CurrentSession,
) -> Result<Json<BaseResponse<()>>, AppError> {
    DocumentService::reset(session).await?;

    Ok(Json(BaseResponse::success_with_message("Session reset")))
}
