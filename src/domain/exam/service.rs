use super::dto::GenerationRequest;
use super::prompt::exam_prompt;
use crate::domain::ai::excerpt;
use crate::domain::material::entity::material::MaterialKind;
use crate::domain::session::dto::ArtifactResponse;
use crate::domain::session::service::produce_artifact;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

pub struct ExamService;

impl ExamService {
    /// 시험지 생성
    ///
    /// 문서 앞부분(`EXAM_CONTEXT_CHARS`)만 프롬프트에 넣습니다.
    pub async fn generate_exam(
        state: AppState,
        session: CurrentSession,
        req: GenerationRequest,
    ) -> Result<ArtifactResponse, AppError> {
        let budget = state.config.exam_context_chars;
        let mut context = session.context.lock().await;

        let artifact = produce_artifact(
            state.ai.as_ref(),
            &mut context,
            MaterialKind::ExamPaper,
            req.document.as_deref(),
            |doc| exam_prompt(&req, excerpt(&doc.text, budget)),
        )
        .await?;

        Ok(ArtifactResponse::from(&artifact))
    }
}
