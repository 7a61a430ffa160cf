use std::env;
use std::str::FromStr;

/// 개발용 JWT 시크릿 (JWT_SECRET 미설정 시)
const DEV_JWT_SECRET: &str = "edu-agent-dev-secret";

/// Google의 OpenAI 호환 Gemini 엔드포인트
pub const DEFAULT_AI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: i64,

    // AI Service
    pub ai_api_key: String,
    pub ai_api_base: String,
    /// 설정 시 모델 자동 탐지를 건너뜁니다
    pub ai_model: Option<String>,
    pub ai_fallback_model: String,
    pub ai_timeout_secs: u64,

    // 프롬프트에 들어가는 문서 앞부분 길이 (문자 수)
    pub exam_context_chars: usize,
    pub study_context_chars: usize,
    pub chat_context_chars: usize,

    pub max_upload_bytes: usize,

    // PDF Export
    pub pdf_font_dir: String,
    pub pdf_font_family: String,

    pub log_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_url: "sqlite://edu_agent.db?mode=rwc".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 86400,
            ai_api_key: String::new(),
            ai_api_base: DEFAULT_AI_API_BASE.to_string(),
            ai_model: None,
            ai_fallback_model: "gemini-1.5-flash".to_string(),
            ai_timeout_secs: 60,
            exam_context_chars: 5000,
            study_context_chars: 4000,
            chat_context_chars: 8000,
            max_upload_bytes: 20 * 1024 * 1024,
            pdf_font_dir: "./fonts".to_string(),
            pdf_font_family: "LiberationSans".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server_port = parse_var("SERVER_PORT", defaults.server_port)
            .map_err(|_| ConfigError::InvalidPort)?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret);

        let jwt_expiration = parse_var("JWT_EXPIRATION", defaults.jwt_expiration)
            .map_err(|_| ConfigError::InvalidExpiration)?;

        let ai_api_key = env::var("AI_API_KEY").unwrap_or_default();

        let ai_model = env::var("AI_MODEL").ok().filter(|m| !m.trim().is_empty());

        Ok(Self {
            server_port,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            jwt_expiration,
            ai_api_key,
            ai_api_base: env::var("AI_API_BASE").unwrap_or(defaults.ai_api_base),
            ai_model,
            ai_fallback_model: env::var("AI_FALLBACK_MODEL").unwrap_or(defaults.ai_fallback_model),
            ai_timeout_secs: parse_var("AI_TIMEOUT_SECS", defaults.ai_timeout_secs)
                .map_err(|_| ConfigError::InvalidNumber("AI_TIMEOUT_SECS"))?,
            exam_context_chars: parse_var("EXAM_CONTEXT_CHARS", defaults.exam_context_chars)
                .map_err(|_| ConfigError::InvalidNumber("EXAM_CONTEXT_CHARS"))?,
            study_context_chars: parse_var("STUDY_CONTEXT_CHARS", defaults.study_context_chars)
                .map_err(|_| ConfigError::InvalidNumber("STUDY_CONTEXT_CHARS"))?,
            chat_context_chars: parse_var("CHAT_CONTEXT_CHARS", defaults.chat_context_chars)
                .map_err(|_| ConfigError::InvalidNumber("CHAT_CONTEXT_CHARS"))?,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)
                .map_err(|_| ConfigError::InvalidNumber("MAX_UPLOAD_BYTES"))?,
            pdf_font_dir: env::var("PDF_FONT_DIR").unwrap_or(defaults.pdf_font_dir),
            pdf_font_family: env::var("PDF_FONT_FAMILY").unwrap_or(defaults.pdf_font_family),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        })
    }

    /// 로깅 초기화 전에 설정을 읽으므로, 누락 경고는 로거가 준비된 뒤 출력합니다.
    pub fn warn_missing_settings(&self) {
        for key in self.missing_settings() {
            match key {
                "JWT_SECRET" => tracing::warn!(
                    "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
                ),
                _ => tracing::warn!("{} 환경변수가 설정되지 않았습니다. AI 호출이 실패합니다.", key),
            }
        }
    }

    /// 개발용 기본값으로 남아 있는 필수 설정 이름
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.jwt_secret == DEV_JWT_SECRET {
            missing.push("JWT_SECRET");
        }
        if self.ai_api_key.trim().is_empty() {
            missing.push("AI_API_KEY");
        }
        missing
    }
}

/// 환경 변수를 파싱하고, 없으면 기본값을 사용합니다.
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, T::Err> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse(),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time")]
    InvalidExpiration,
    #[error("Invalid numeric value for {0}")]
    InvalidNumber(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_documented_defaults() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.exam_context_chars, 5000);
        assert_eq!(config.study_context_chars, 4000);
        assert_eq!(config.chat_context_chars, 8000);
        assert_eq!(config.ai_fallback_model, "gemini-1.5-flash");
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert!(config.ai_model.is_none());
    }

    #[test]
    fn should_report_settings_left_at_dev_defaults() {
        // Arrange
        let configured = AppConfig {
            jwt_secret: "prod-secret".to_string(),
            ai_api_key: "key".to_string(),
            ..AppConfig::default()
        };

        // Act & Assert
        assert_eq!(AppConfig::default().missing_settings(), vec!["JWT_SECRET", "AI_API_KEY"]);
        assert!(configured.missing_settings().is_empty());
    }

    #[test]
    fn should_fall_back_to_default_when_variable_missing() {
        let value: u64 = parse_var("EDU_AGENT_TEST_SURELY_UNSET", 42).unwrap();

        assert_eq!(value, 42);
    }

    #[test]
    fn should_reject_non_numeric_variable() {
        // Arrange
        env::set_var("EDU_AGENT_TEST_BAD_NUMBER", "sixty");

        // Act
        let result: Result<u64, _> = parse_var("EDU_AGENT_TEST_BAD_NUMBER", 60);

        // Assert
        assert!(result.is_err());
        env::remove_var("EDU_AGENT_TEST_BAD_NUMBER");
    }
}
