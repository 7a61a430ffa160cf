use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::session::ChatMessage;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "question must be 1-2000 characters"))]
    #[schema(example = "What is a page fault?")]
    pub question: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// 이번 답변
    pub answer: String,
    /// 답변을 포함한 전체 대화
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}
