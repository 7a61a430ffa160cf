use tracing::info;

use super::dto::ExportFormat;
use super::pdf::render_pdf;
use crate::domain::material::entity::material::MaterialKind;
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

/// 내보낸 파일
#[derive(Debug)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportService;

impl ExportService {
    pub async fn export(
        state: AppState,
        session: CurrentSession,
        kind: MaterialKind,
        format: ExportFormat,
        title: Option<String>,
    ) -> Result<ExportedFile, AppError> {
        let (default_title, text) = {
            let context = session.context.lock().await;
            let artifact = context.artifact(kind).ok_or_else(|| {
                AppError::not_found(format!("No {} to export. Generate one first.", kind.label()))
            })?;
            (
                format!("{} - {}", kind.label(), artifact.source),
                artifact.full_text(),
            )
        };
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(default_title);

        let file = match format {
            ExportFormat::Txt => ExportedFile {
                filename: format!("{}.txt", kind.file_stem()),
                content_type: "text/plain; charset=utf-8",
                bytes: text.into_bytes(),
            },
            ExportFormat::Pdf => {
                let font_dir = state.config.pdf_font_dir.clone();
                let family = state.config.pdf_font_family.clone();
                let bytes = tokio::task::spawn_blocking(move || {
                    render_pdf(&title, &text, &font_dir, &family)
                })
                .await
                .map_err(|e| AppError::PdfGenerationFailed(e.to_string()))??;

                ExportedFile {
                    filename: format!("{}.pdf", kind.file_stem()),
                    content_type: "application/pdf",
                    bytes,
                }
            }
        };

        info!(kind = ?kind, format = ?format, bytes = file.bytes.len(), "결과물 내보내기");
        Ok(file)
    }
}
