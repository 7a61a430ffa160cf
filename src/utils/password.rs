//! 비밀번호 해싱
//!
//! Argon2id PHC 문자열(`$argon2id$v=19$...`)로 저장합니다.
//! 해싱은 CPU를 오래 쓰므로 blocking 스레드에서 실행합니다.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::error::AppError;

/// 랜덤 salt로 비밀번호 해시 생성
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("password hashing task failed: {}", e)))?
}

/// 저장된 해시와 비밀번호 비교
///
/// 형식이 잘못된 해시는 불일치로 취급합니다.
pub async fn verify_password(password: String, stored: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
        .await
        .map_err(|e| AppError::InternalError(format!("password verification task failed: {}", e)))
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
}

fn verify_blocking(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("저장된 비밀번호 해시 형식이 올바르지 않습니다");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
