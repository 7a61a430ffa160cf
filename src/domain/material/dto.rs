use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::material::{self, MaterialKind};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveMaterialRequest {
    /// 저장할 현재 결과물 종류
    pub kind: MaterialKind,
    /// 주제 라벨
    #[validate(length(min = 1, max = 200, message = "topic must be 1-200 characters"))]
    #[schema(example = "Unit 3 - Memory Management")]
    pub topic: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialListQuery {
    /// 종류 필터 (생략 시 전체)
    pub kind: Option<MaterialKind>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    pub material_id: i64,
    pub kind: MaterialKind,
    #[schema(example = "unit3_os.pdf")]
    pub filename: String,
    pub topic: String,
    pub content: String,
    pub created_at: String,
}

impl From<material::Model> for MaterialResponse {
    fn from(model: material::Model) -> Self {
        Self {
            material_id: model.material_id,
            kind: model.kind,
            filename: model.filename,
            topic: model.topic,
            content: model.content,
            created_at: model.created_at.and_utc().to_rfc3339(),
        }
    }
}
