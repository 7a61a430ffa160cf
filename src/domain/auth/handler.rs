use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use super::dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 회원가입 API
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "가입 성공", body = SignupResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이미 사용 중인 이름", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<SignupResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = AuthService::signup(state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 로그인 API
///
/// 새 세션을 만들고 세션 ID가 담긴 Access Token을 발급합니다.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "자격 증명 불일치", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<LoginResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = AuthService::login(state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 로그아웃 API
///
/// 세션의 문서, 결과물, 대화 기록이 모두 사라집니다.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "로그아웃 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<BaseResponse<()>>, AppError> {
    AuthService::logout(state, session).await?;

    Ok(Json(BaseResponse::success_with_message("Logged out")))
}
