use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================
// Request DTOs
// ============================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// 사용자 이름 (3~32자)
    #[validate(length(min = 3, max = 32, message = "username must be 3-32 characters"))]
    #[schema(example = "student01")]
    pub username: String,
    /// 비밀번호 (8자 이상)
    #[validate(length(min = 8, max = 128, message = "password must be at least 8 characters"))]
    #[schema(example = "correct-horse")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

// ============================================
// Response DTOs
// ============================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    #[schema(example = 86400)]
    pub expires_in: i64,
}
