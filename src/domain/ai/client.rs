use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::utils::error::AppError;

/// 모델 자동 선택 키워드
const PREFERRED_MODEL_MARKERS: [&str; 2] = ["flash", "pro"];

/// OpenAI 호환 API 에러를 AppError로 변환
///
/// 상세 내용은 AppError 안에만 남고 사용자 메시지에는 노출되지 않습니다.
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("unknown");
            AppError::AiServiceError(format!("{}: {}", err_type, api_err.message))
        }
        OpenAIError::Reqwest(req_err) if req_err.is_timeout() => AppError::AiTimeout,
        OpenAIError::Reqwest(req_err) => match req_err.status() {
            Some(status) => AppError::AiServiceError(format!("HTTP {}: {}", status, req_err)),
            None => AppError::AiServiceError(req_err.to_string()),
        },
        _ => AppError::AiServiceError(error.to_string()),
    }
}

/// 생성형 언어 모델 클라이언트 인터페이스
///
/// 테스트에서는 Mock 객체로 대체합니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 채팅 완성 요청 (재시도 없음)
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError>;

    /// 사용 가능한 모델 ID 목록 (API가 반환한 순서)
    async fn list_models(&self) -> Result<Vec<String>, AppError>;
}

/// Arc로 래핑된 AiClient (Clone 지원)
pub type AiClient = Arc<dyn AiClientTrait>;

/// OpenAI 호환 엔드포인트 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig, model: impl Into<String>) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.ai_api_key.clone())
            .with_api_base(config.ai_api_base.clone());
        Self {
            client: Client::with_config(openai_config),
            model: model.into(),
            timeout: Duration::from_secs(config.ai_timeout_secs),
        }
    }

    /// 다른 모델을 사용하는 복제본
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl AiClientTrait for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| AppError::AiTimeout)?
            .map_err(classify_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::AiServiceError("empty completion".to_string()))
    }

    async fn list_models(&self) -> Result<Vec<String>, AppError> {
        let response = tokio::time::timeout(self.timeout, self.client.models().list())
            .await
            .map_err(|_| AppError::AiTimeout)?
            .map_err(classify_openai_error)?;

        Ok(response.data.into_iter().map(|m| m.id).collect())
    }
}

/// 목록 순서대로 처음 "flash" 또는 "pro"를 포함하는 모델을 고릅니다.
///
/// `models/` 접두어는 제거합니다.
pub fn pick_model(ids: &[String]) -> Option<String> {
    ids.iter()
        .find(|id| PREFERRED_MODEL_MARKERS.iter().any(|m| id.contains(m)))
        .map(|id| id.trim_start_matches("models/").to_string())
}

/// 시작 시 사용할 모델을 결정합니다.
///
/// `AI_MODEL`이 설정되어 있으면 그대로 쓰고, 아니면 목록에서 고르며,
/// 목록 조회 실패나 후보 없음이면 fallback 모델을 사용합니다.
pub async fn detect_model(ai: &dyn AiClientTrait, config: &AppConfig) -> String {
    if let Some(model) = &config.ai_model {
        info!(model = %model, "AI_MODEL 설정 사용");
        return model.clone();
    }

    match ai.list_models().await {
        Ok(ids) => match pick_model(&ids) {
            Some(model) => {
                info!(model = %model, candidates = ids.len(), "모델 자동 선택");
                model
            }
            None => {
                warn!(fallback = %config.ai_fallback_model, "선호 모델 없음, fallback 사용");
                config.ai_fallback_model.clone()
            }
        },
        Err(e) => {
            warn!(error = %e, fallback = %config.ai_fallback_model, "모델 목록 조회 실패, fallback 사용");
            config.ai_fallback_model.clone()
        }
    }
}

/// 단일 프롬프트 생성 요청
pub async fn generate(ai: &dyn AiClientTrait, prompt: &str) -> Result<String, AppError> {
    ai.complete(vec![build_user_message(prompt)?]).await
}

/// 메시지 빌더 헬퍼 함수 (crate 내부용)
pub(crate) fn build_system_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?,
    ))
}

pub(crate) fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?,
    ))
}

pub(crate) fn build_assistant_message(
    content: &str,
) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::Assistant(
        ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?,
    ))
}
