//! 업로드 파일에서 평문 추출
//!
//! PDF는 `pdf-extract`로 페이지 순서대로 이어 붙이고, `.txt`/`.md`는 UTF-8로 읽습니다.

use std::path::Path;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    PlainText,
}

impl SourceFormat {
    /// 확장자로 형식 판별 (대소문자 무시)
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(SourceFormat::Pdf),
            Some("txt") | Some("md") => Ok(SourceFormat::PlainText),
            _ => Err(AppError::bad_request(
                "Unsupported file type. Upload a .pdf, .txt or .md file.",
            )),
        }
    }
}

/// 경로 구성요소를 제거한 파일 이름
pub fn clean_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(|c| c == '/' || c == '\\').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// 파일 내용을 평문으로 변환합니다.
///
/// PDF 파싱은 블로킹 스레드에서 수행하며, 파서가 패닉해도 파싱 실패로 처리합니다.
pub async fn extract_text(format: SourceFormat, bytes: Vec<u8>) -> Result<String, AppError> {
    let text = match format {
        SourceFormat::PlainText => String::from_utf8(bytes)
            .map_err(|e| AppError::DocumentParseFailed(format!("invalid UTF-8: {}", e)))?,
        SourceFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
        })
        .await
        .map_err(|e| AppError::DocumentParseFailed(format!("pdf parser aborted: {}", e)))?
        .map_err(|e| AppError::DocumentParseFailed(e.to_string()))?,
    };

    if text.trim().is_empty() {
        return Err(AppError::validation_error(
            "No text could be extracted from the file. Scanned PDFs are not supported.",
        ));
    }

    Ok(text)
}
