use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Txt,
    Pdf,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// txt(기본) 또는 pdf
    #[serde(default)]
    pub format: ExportFormat,
    /// 문서 제목 (생략 시 "<종류> - <원본 파일명>")
    pub title: Option<String>,
}
