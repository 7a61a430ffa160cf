use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use tracing::error;

use super::response::ErrorResponse;

/// 외부 호출 실패 시 사용자에게 노출되는 일반 메시지
const GENERIC_AI_MESSAGE: &str = "The tutor could not generate a response. Please try again.";

/// 애플리케이션 전역 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("잘못된 요청 형식: {0}")]
    JsonParseFailed(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("활성 문서 없음")]
    NoActiveDocument,
    #[error("문서 파싱 실패: {0}")]
    DocumentParseFailed(String),
    #[error("AI API 에러: {0}")]
    AiServiceError(String),
    #[error("AI API 타임아웃")]
    AiTimeout,
    #[error("PDF 생성 실패: {0}")]
    PdfGenerationFailed(String),
    #[error("DB 에러: {0}")]
    Database(String),
    #[error("내부 에러: {0}")]
    InternalError(String),
}

impl AppError {
    /// 사용자에게 노출할 메시지 반환
    ///
    /// 외부 호출 실패는 상세 내용을 숨기고 일반 메시지만 반환합니다.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("Malformed request body: {}", msg),
            AppError::NoActiveDocument => {
                "Upload a syllabus or chapter before using this feature.".to_string()
            }
            AppError::DocumentParseFailed(_) => {
                "The uploaded file could not be read. Please upload a text-based PDF.".to_string()
            }
            AppError::AiServiceError(_) | AppError::AiTimeout => GENERIC_AI_MESSAGE.to_string(),
            AppError::PdfGenerationFailed(_) => {
                "The document could not be exported as PDF.".to_string()
            }
            AppError::Database(_) | AppError::InternalError(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::Unauthorized(_) => "AUTH401",
            AppError::NotFound(_) => "COMMON404",
            AppError::Conflict(_) => "COMMON409",
            AppError::NoActiveDocument => "DOC001",
            AppError::DocumentParseFailed(_) => "DOC002",
            AppError::AiServiceError(_) => "AI001",
            AppError::AiTimeout => "AI002",
            AppError::PdfGenerationFailed(_) => "EXPORT001",
            AppError::Database(_) => "COMMON500",
            AppError::InternalError(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NoActiveDocument => StatusCode::BAD_REQUEST,
            AppError::DocumentParseFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AiServiceError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::AiTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::PdfGenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // 상세 원인은 로그에만 남깁니다
        if status.is_server_error() {
            error!(code = %error_code, detail = %self, "Server Error");
        } else {
            error!("Error [{}]: {}", error_code, self);
        }

        let error_response = ErrorResponse::new(error_code, self.message());

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid upload: {}", err.body_text()))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}
