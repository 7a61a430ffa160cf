use tracing::info;

use super::dto::{DocumentListResponse, DocumentSummary, UploadResponse};
use super::extract::{clean_filename, extract_text, SourceFormat};
use super::model::Document;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

pub struct DocumentService;

impl DocumentService {
    /// 업로드 파일을 평문으로 바꿔 세션에 추가하고 활성 문서로 지정합니다.
    pub async fn upload(
        state: AppState,
        session: CurrentSession,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, AppError> {
        let name = clean_filename(filename)
            .ok_or_else(|| AppError::bad_request("The uploaded file has no name."))?;
        if bytes.len() > state.config.max_upload_bytes {
            return Err(AppError::bad_request(format!(
                "File exceeds the {} byte upload limit.",
                state.config.max_upload_bytes
            )));
        }

        let format = SourceFormat::from_filename(&name)?;
        let size = bytes.len();
        // 추출 중에는 세션을 잠그지 않습니다
        let text = extract_text(format, bytes).await?;
        let document = Document::new(name, text);

        let mut context = session.context.lock().await;
        let summary = DocumentSummary::from_document(&document, true);
        let replaced = context.add_document(document);

        info!(
            name = %summary.name,
            bytes = size,
            chars = summary.char_count,
            replaced,
            "문서 업로드 완료"
        );

        Ok(UploadResponse {
            document: summary,
            replaced,
        })
    }

    pub async fn list(session: CurrentSession) -> Result<DocumentListResponse, AppError> {
        let context = session.context.lock().await;
        let active = context.active_name().map(String::from);

        let documents = context
            .documents()
            .map(|doc| DocumentSummary::from_document(doc, active.as_deref() == Some(&doc.name)))
            .collect();

        Ok(DocumentListResponse { active, documents })
    }

    pub async fn select(
        session: CurrentSession,
        name: &str,
    ) -> Result<DocumentSummary, AppError> {
        let mut context = session.context.lock().await;
        context.select(name)?;
        let document = context.active_document()?;

        Ok(DocumentSummary::from_document(document, true))
    }

    /// 문서, 결과물, 대화 기록을 모두 비웁니다.
    pub async fn reset(session: CurrentSession) -> Result<(), AppError> {
        session.context.lock().await.reset();
        info!(user = %session.username, "세션 초기화");
        Ok(())
    }
}
