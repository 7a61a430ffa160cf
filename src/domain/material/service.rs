use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{MaterialResponse, SaveMaterialRequest};
use super::entity::material::{self, MaterialKind};
use crate::state::AppState;
use crate::utils::auth::CurrentSession;
use crate::utils::error::AppError;

/// 저장된 학습 자료 이력
///
/// 추가와 조회만 있으며 수정/삭제는 없습니다.
pub struct MaterialService;

impl MaterialService {
    /// 세션의 현재 결과물을 저장합니다.
    pub async fn save(
        state: AppState,
        session: CurrentSession,
        req: SaveMaterialRequest,
    ) -> Result<MaterialResponse, AppError> {
        let (filename, content) = {
            let context = session.context.lock().await;
            let artifact = context.artifact(req.kind).ok_or_else(|| {
                AppError::not_found(format!("No {} to save. Generate one first.", req.kind.label()))
            })?;
            (artifact.source.clone(), artifact.full_text())
        };

        let model = Self::insert(
            &state.db,
            &session.username,
            &filename,
            req.topic.trim(),
            &content,
            req.kind,
        )
        .await?;

        info!(
            material_id = model.material_id,
            kind = ?model.kind,
            owner = %model.owner,
            "학습 자료 저장"
        );

        Ok(MaterialResponse::from(model))
    }

    pub async fn list(
        state: AppState,
        session: CurrentSession,
        kind: Option<MaterialKind>,
    ) -> Result<Vec<MaterialResponse>, AppError> {
        let models = Self::find_by_owner(&state.db, &session.username, kind).await?;

        Ok(models.into_iter().map(MaterialResponse::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        owner: &str,
        filename: &str,
        topic: &str,
        content: &str,
        kind: MaterialKind,
    ) -> Result<material::Model, AppError> {
        let active = material::ActiveModel {
            owner: Set(owner.to_string()),
            filename: Set(filename.to_string()),
            topic: Set(topic.to_string()),
            content: Set(content.to_string()),
            kind: Set(kind),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(active.insert(db).await?)
    }

    /// 최신순 (같은 시각이면 나중에 저장된 것 먼저)
    pub async fn find_by_owner(
        db: &DatabaseConnection,
        owner: &str,
        kind: Option<MaterialKind>,
    ) -> Result<Vec<material::Model>, AppError> {
        let mut query = material::Entity::find().filter(material::Column::Owner.eq(owner));
        if let Some(kind) = kind {
            query = query.filter(material::Column::Kind.eq(kind));
        }

        Ok(query
            .order_by_desc(material::Column::CreatedAt)
            .order_by_desc(material::Column::MaterialId)
            .all(db)
            .await?)
    }
}
