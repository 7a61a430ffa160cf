use tracing::info;

use super::context::{Artifact, SessionContext};
use crate::domain::ai::{generate, AiClientTrait};
use crate::domain::document::model::Document;
use crate::domain::material::entity::material::MaterialKind;
use crate::utils::error::AppError;

/// 문서로 프롬프트를 만들어 생성하고, 결과를 세션에 보관합니다.
///
/// `document`가 없으면 활성 문서를 사용합니다. 생성이 실패하면 이전 결과물은 그대로 남습니다.
pub async fn produce_artifact<F>(
    ai: &dyn AiClientTrait,
    context: &mut SessionContext,
    kind: MaterialKind,
    document: Option<&str>,
    build_prompt: F,
) -> Result<Artifact, AppError>
where
    F: FnOnce(&Document) -> String,
{
    let source = context.resolve_document(document)?;
    let prompt = build_prompt(source);
    let source_name = source.name.clone();

    let raw = generate(ai, &prompt).await?;
    let artifact = Artifact::new(kind, source_name, &raw);

    info!(
        kind = ?kind,
        source = %artifact.source,
        prompt_chars = prompt.chars().count(),
        segmented = ?artifact.is_segmented(),
        "결과물 생성 완료"
    );

    context.store_artifact(artifact.clone());
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::client::MockAiClientTrait;

    #[tokio::test]
    async fn should_store_segmented_artifact_for_active_document() {
        // Arrange
        let mut mock = MockAiClientTrait::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Ok("**Q1.** Define paging.\n---SUMMARY---\n**Answer:** ...".to_string()));
        let mut context = SessionContext::new("alice");
        context.add_document(Document::new("os.pdf", "Paging divides memory."));

        // Act
        let artifact = produce_artifact(&mock, &mut context, MaterialKind::ExamPaper, None, |doc| {
            format!("prompt for {}", doc.name)
        })
        .await
        .unwrap();

        // Assert
        assert_eq!(artifact.source, "os.pdf");
        assert_eq!(artifact.is_segmented(), Some(true));
        assert_eq!(context.artifact(MaterialKind::ExamPaper), Some(&artifact));
    }

    #[tokio::test]
    async fn should_not_call_model_without_document() {
        // Arrange
        let mut mock = MockAiClientTrait::new();
        mock.expect_complete().times(0);
        let mut context = SessionContext::new("alice");

        // Act
        let result = produce_artifact(&mock, &mut context, MaterialKind::Flashcards, None, |_| {
            String::new()
        })
        .await;

        // Assert
        assert!(matches!(result, Err(AppError::NoActiveDocument)));
    }

    #[tokio::test]
    async fn should_keep_previous_artifact_when_model_fails() {
        // Arrange
        let mut mock = MockAiClientTrait::new();
        mock.expect_complete()
            .returning(|_| Err(AppError::AiServiceError("quota".to_string())));
        let mut context = SessionContext::new("alice");
        context.add_document(Document::new("os.pdf", "text"));
        let previous = Artifact::new(MaterialKind::LessonPlan, "os.pdf", "old plan");
        context.store_artifact(previous.clone());

        // Act
        let result = produce_artifact(&mock, &mut context, MaterialKind::LessonPlan, None, |_| {
            "prompt".to_string()
        })
        .await;

        // Assert
        assert!(matches!(result, Err(AppError::AiServiceError(_))));
        assert_eq!(context.artifact(MaterialKind::LessonPlan), Some(&previous));
    }
}
