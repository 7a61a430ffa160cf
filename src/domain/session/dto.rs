use serde::Serialize;
use utoipa::ToSchema;

use super::context::Artifact;
use crate::domain::material::entity::material::MaterialKind;

/// 세션에 보관된 생성 결과물 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactResponse {
    pub kind: MaterialKind,
    /// 원본 문서 파일명
    #[schema(example = "unit3_os.pdf")]
    pub source: String,
    /// 본문 (경계 앞부분)
    pub body: String,
    /// 정답/요약 (시험지만 해당, 경계가 없으면 안내 문구)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Unit summary unavailable.")]
    pub unit_summary: Option<String>,
    /// 응답에 경계가 있었는지 여부 (시험지만 해당)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segmented: Option<bool>,
    #[schema(example = "2026-01-15T09:30:00+00:00")]
    pub created_at: String,
}

impl From<&Artifact> for ArtifactResponse {
    fn from(artifact: &Artifact) -> Self {
        Self {
            kind: artifact.kind,
            source: artifact.source.clone(),
            body: artifact.body().to_string(),
            unit_summary: artifact.unit_summary().map(String::from),
            segmented: artifact.is_segmented(),
            created_at: artifact.created_at.to_rfc3339(),
        }
    }
}
