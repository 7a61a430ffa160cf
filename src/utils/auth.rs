use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::domain::session::store::SharedContext;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::decode_token;

/// 로그인 세션 Extractor
///
/// Bearer 토큰을 검증하고 토큰의 `sid`로 서버 측 SessionContext를 찾습니다.
/// 로그아웃 등으로 세션이 사라졌으면 토큰이 유효해도 401입니다.
pub struct CurrentSession {
    pub username: String,
    pub session_id: String,
    pub context: SharedContext,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("Login required."))?
            .to_str()
            .map_err(|_| AppError::unauthorized("Malformed Authorization header."))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Expected a Bearer token."))?;

        let claims = decode_token(token, &state.config.jwt_secret)?;

        let context = state
            .sessions
            .get(&claims.sid)
            .await
            .ok_or_else(|| AppError::unauthorized("Session expired. Please log in again."))?;

        Ok(CurrentSession {
            username: claims.sub,
            session_id: claims.sid,
            context,
        })
    }
}
