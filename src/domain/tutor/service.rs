use tracing::info;

use super::dto::{ChatResponse, HistoryResponse};
use super::prompt::{chat_messages, simplify_prompt, SIMPLIFIED_PREFIX};
use crate::domain::ai::{excerpt, generate};
use crate::domain::material::entity::material::MaterialKind;
use crate::domain::session::{Artifact, ChatMessage};
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

pub struct TutorService;

impl TutorService {
    /// 활성 문서에 대한 질문
    ///
    /// 모델 호출이 실패하면 대화 기록은 바뀌지 않습니다.
    pub async fn chat(
        state: AppState,
        session: CurrentSession,
        question: String,
    ) -> Result<ChatResponse, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::validation_error("question must not be blank"));
        }

        let mut context = session.context.lock().await;
        let document = context.active_document()?;
        let source = document.name.clone();
        let messages = chat_messages(
            excerpt(&document.text, state.config.chat_context_chars),
            context.history(),
            question,
        )?;

        let answer = state.ai.complete(messages).await?;
        info!(source = %source, turns = context.history().len() / 2 + 1, "튜터 답변 생성");

        context.push_message(ChatMessage::user(question));
        context.push_message(ChatMessage::assistant(answer.clone()));
        context.store_artifact(Artifact::new(MaterialKind::ChatAnswer, source, &answer));

        Ok(ChatResponse {
            answer,
            history: context.history().to_vec(),
        })
    }

    /// 마지막 답변을 쉬운 말로 다시 설명
    pub async fn simplify(state: AppState, session: CurrentSession) -> Result<ChatResponse, AppError> {
        let mut context = session.context.lock().await;
        let source = context.active_document()?.name.clone();
        let last = context
            .last_assistant_message()
            .ok_or_else(|| AppError::bad_request("There is no tutor answer to simplify yet."))?
            .to_string();

        let simplified = generate(state.ai.as_ref(), &simplify_prompt(&last)).await?;
        let answer = format!("{}{}", SIMPLIFIED_PREFIX, simplified.trim());

        context.push_message(ChatMessage::assistant(answer.clone()));
        context.store_artifact(Artifact::new(MaterialKind::ChatAnswer, source, &answer));

        Ok(ChatResponse {
            answer,
            history: context.history().to_vec(),
        })
    }

    pub async fn history(session: CurrentSession) -> Result<HistoryResponse, AppError> {
        let context = session.context.lock().await;
        context.active_document()?;

        Ok(HistoryResponse {
            messages: context.history().to_vec(),
        })
    }

    pub async fn clear_history(session: CurrentSession) -> Result<(), AppError> {
        let mut context = session.context.lock().await;
        context.active_document()?;
        context.clear_history();
        Ok(())
    }
}
