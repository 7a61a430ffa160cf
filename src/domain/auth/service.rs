use std::time::Duration;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use tracing::info;

use super::dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;
use crate::utils::jwt::encode_token;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

pub struct AuthService;

impl AuthService {
    pub async fn signup(state: AppState, req: SignupRequest) -> Result<SignupResponse, AppError> {
        let username = req.username.trim();
        if username.len() < 3 {
            return Err(AppError::validation_error("username must be 3-32 characters"));
        }

        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&state.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Username is already taken.".to_string()));
        }

        let password_hash = hash_password(req.password).await?;
        let active = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        // 동시 가입 시 unique 제약 위반도 중복으로 처리
        let model = active.insert(&state.db).await.map_err(|e: DbErr| {
            if e.to_string().contains("UNIQUE") {
                AppError::Conflict("Username is already taken.".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        info!(user_id = model.user_id, username = %model.username, "회원가입 완료");

        Ok(SignupResponse {
            user_id: model.user_id,
            username: model.username,
        })
    }

    /// 자격 증명을 확인하고 새 세션과 토큰을 발급합니다.
    pub async fn login(state: AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let account = user::Entity::find()
            .filter(user::Column::Username.eq(req.username.trim()))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(req.password, account.password_hash.clone()).await? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        // 세션은 토큰과 함께 만료됩니다
        let ttl = Duration::from_secs(u64::try_from(state.config.jwt_expiration).unwrap_or(0));
        let session_id = state.sessions.create(&account.username, ttl).await;
        let access_token = encode_token(
            &account.username,
            &session_id,
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!(username = %account.username, "로그인 성공");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.config.jwt_expiration,
        })
    }

    /// 세션을 버립니다. 이후 같은 토큰은 401입니다.
    pub async fn logout(state: AppState, session: CurrentSession) -> Result<(), AppError> {
        state.sessions.remove(&session.session_id).await;
        info!(username = %session.username, "로그아웃");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{establish_connection, AppConfig};
    use crate::domain::ai::client::MockAiClientTrait;
    use crate::domain::session::SessionStore;
    use crate::utils::jwt::decode_token;

    async fn state() -> AppState {
        AppState {
            db: establish_connection("sqlite::memory:").await.unwrap(),
            config: AppConfig::default(),
            ai: Arc::new(MockAiClientTrait::new()),
            sessions: SessionStore::new(),
        }
    }

    fn signup_req(username: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn should_reject_duplicate_username() {
        // Arrange
        let state = state().await;
        AuthService::signup(state.clone(), signup_req("student01"))
            .await
            .unwrap();

        // Act
        let result = AuthService::signup(state, signup_req("student01")).await;

        // Assert
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_issue_token_bound_to_new_session() {
        // Arrange
        let state = state().await;
        AuthService::signup(state.clone(), signup_req("student01"))
            .await
            .unwrap();

        // Act
        let response = AuthService::login(
            state.clone(),
            LoginRequest {
                username: "student01".to_string(),
                password: "correct-horse".to_string(),
            },
        )
        .await
        .unwrap();

        // Assert
        let claims = decode_token(&response.access_token, &state.config.jwt_secret).unwrap();
        assert_eq!(claims.sub, "student01");
        assert!(state.sessions.get(&claims.sid).await.is_some());
    }

    #[tokio::test]
    async fn should_expire_session_with_token() {
        // Arrange
        let mut state = state().await;
        state.config.jwt_expiration = 0;
        AuthService::signup(state.clone(), signup_req("student01"))
            .await
            .unwrap();

        // Act
        let response = AuthService::login(
            state.clone(),
            LoginRequest {
                username: "student01".to_string(),
                password: "correct-horse".to_string(),
            },
        )
        .await
        .unwrap();

        // Assert
        // 토큰 검증의 기본 leeway(60초) 안이라 디코딩은 성공합니다
        let claims = decode_token(&response.access_token, &state.config.jwt_secret).unwrap();
        assert!(state.sessions.get(&claims.sid).await.is_none());
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn should_reject_wrong_password() {
        // Arrange
        let state = state().await;
        AuthService::signup(state.clone(), signup_req("student01"))
            .await
            .unwrap();

        // Act
        let result = AuthService::login(
            state.clone(),
            LoginRequest {
                username: "student01".to_string(),
                password: "wrong-password".to_string(),
            },
        )
        .await;

        // Assert
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn should_reject_unknown_user() {
        let state = state().await;

        let result = AuthService::login(
            state,
            LoginRequest {
                username: "ghost".to_string(),
                password: "whatever1".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
