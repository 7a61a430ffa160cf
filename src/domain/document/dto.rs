use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::model::Document;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectDocumentRequest {
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "unit3_os.pdf")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    #[schema(example = "unit3_os.pdf")]
    pub name: String,
    /// 추출된 문자 수
    #[schema(example = 18234)]
    pub char_count: usize,
    pub uploaded_at: String,
    pub active: bool,
}

impl DocumentSummary {
    pub fn from_document(document: &Document, active: bool) -> Self {
        Self {
            name: document.name.clone(),
            char_count: document.char_count(),
            uploaded_at: document.uploaded_at.to_rfc3339(),
            active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub document: DocumentSummary,
    /// 같은 이름의 문서를 교체했는지 여부
    pub replaced: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListResponse {
    pub active: Option<String>,
    pub documents: Vec<DocumentSummary>,
}
