use std::net::SocketAddr;
use std::sync::Arc;

use edu_agent::config::{establish_connection, AppConfig};
use edu_agent::domain::ai::{detect_model, AiClient, OpenAiClient};
use edu_agent::domain::health::init_start_time;
use edu_agent::domain::session::SessionStore;
use edu_agent::utils::logging::init_logging;
use edu_agent::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 설정 로드 후 로깅 초기화 (guard는 main 종료까지 유지)
    let config = AppConfig::from_env()?;
    let _log_guard = init_logging(&config.log_dir);
    config.warn_missing_settings();
    init_start_time();

    // 3. DB
    let db = establish_connection(&config.database_url).await?;

    // 4. 모델 결정 후 AI 클라이언트 생성
    let fallback_client = OpenAiClient::new(&config, config.ai_fallback_model.clone());
    let model = detect_model(&fallback_client, &config).await;
    let ai: AiClient = Arc::new(fallback_client.with_model(model));

    let state = AppState {
        db,
        config: config.clone(),
        ai,
        sessions: SessionStore::new(),
    };

    // 5. 서버 실행
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
