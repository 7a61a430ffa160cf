//! 튜터 대화 프롬프트

use async_openai::types::ChatCompletionRequestMessage;

use crate::domain::ai::client::{build_assistant_message, build_system_message, build_user_message};
use crate::domain::session::{ChatMessage, ChatRole};
use crate::utils::error::AppError;

/// 쉬운 설명 답변 앞에 붙는 표시
pub const SIMPLIFIED_PREFIX: &str = "**Simplified:** ";

pub fn system_prompt(context: &str) -> String {
    format!(
        "You are a patient tutor helping a student study the document below. \
         Answer using the document; when it does not cover the question, say so \
         and then answer from general knowledge.\n\n\
         Context: {}",
        context
    )
}

/// 시스템 메시지(문서 발췌) → 이전 대화 → 질문 순서
pub fn chat_messages(
    context: &str,
    history: &[ChatMessage],
    question: &str,
) -> Result<Vec<ChatCompletionRequestMessage>, AppError> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(build_system_message(&system_prompt(context))?);

    for message in history {
        messages.push(match message.role {
            ChatRole::User => build_user_message(&message.content)?,
            ChatRole::Assistant => build_assistant_message(&message.content)?,
        });
    }

    messages.push(build_user_message(&format!("Question: {}", question))?);
    Ok(messages)
}

pub fn simplify_prompt(answer: &str) -> String {
    format!("Explain this simply for a child: {}", answer)
}
