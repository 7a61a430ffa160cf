use crate::domain::{material::entity::material, user::entity::user};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement,
};
use tracing::info;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);

    // 인메모리 SQLite는 커넥션마다 별도 DB이므로 하나만 유지
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;
    info!("Successfully connected to the database.");

    create_tables(&db).await?;

    Ok(db)
}

/// 테이블이 없으면 생성합니다. 마이그레이션은 하지 않습니다.
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    create_table_if_not_exists(db, &schema, user::Entity).await?;
    create_table_if_not_exists(db, &schema, material::Entity).await?;
    // 사용자별 최신순 목록 조회용
    create_index_if_not_exists(
        db,
        "idx_materials_owner_created",
        "materials",
        &["owner", "created_at"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        index_name, table_name, cols
    );
    let stmt = Statement::from_string(backend, sql);
    db.execute(stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create index {}: {}", index_name, e);
        e
    })
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    match db.execute(create_stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create table: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_create_schema_twice_without_error() {
        // Arrange
        let db = establish_connection("sqlite::memory:").await.unwrap();

        // Act
        let result = create_tables(&db).await;

        // Assert
        assert!(result.is_ok());
    }
}
