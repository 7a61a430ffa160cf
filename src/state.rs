use crate::config::AppConfig;
use crate::domain::ai::AiClient;
use crate::domain::session::SessionStore;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub ai: AiClient,
    pub sessions: SessionStore,
}
