use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// JWT Claims 구조체
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Session ID (서버 측 SessionContext 키)
    pub sid: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
}

/// Access Token 생성
pub fn encode_token(
    sub: &str,
    sid: &str,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::internal_error("Token expiration overflow"))?
        .timestamp() as usize;

    let claims = Claims {
        sub: sub.to_string(),
        sid: sid.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// Access Token 검증 및 디코딩
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "토큰 검증 실패");
        AppError::unauthorized("Invalid or expired token. Please log in again.")
    })
}
