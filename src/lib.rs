pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

/// multipart 경계/헤더 여유분
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::auth::handler::signup,
        domain::auth::handler::login,
        domain::auth::handler::logout,
        domain::document::handler::upload_document,
        domain::document::handler::list_documents,
        domain::document::handler::select_document,
        domain::document::handler::reset_documents,
        domain::tutor::handler::chat,
        domain::tutor::handler::simplify,
        domain::tutor::handler::get_history,
        domain::tutor::handler::clear_history,
        domain::exam::handler::generate_exam,
        domain::study::handler::generate_flashcards,
        domain::study::handler::generate_lesson_plan,
        domain::study::handler::generate_slides,
        domain::session::handler::get_artifact,
        domain::export::handler::export_artifact,
        domain::material::handler::save_material,
        domain::material::handler::list_materials,
    ),
    components(
        schemas(
            domain::health::dto::HealthStatus,
            domain::health::dto::HealthState,
            domain::health::dto::HealthChecks,
            domain::health::dto::CheckResult,
            domain::auth::dto::SignupRequest,
            domain::auth::dto::SignupResponse,
            domain::auth::dto::LoginRequest,
            domain::auth::dto::LoginResponse,
            domain::document::dto::SelectDocumentRequest,
            domain::document::dto::DocumentSummary,
            domain::document::dto::UploadResponse,
            domain::document::dto::DocumentListResponse,
            domain::tutor::dto::ChatRequest,
            domain::tutor::dto::ChatResponse,
            domain::tutor::dto::HistoryResponse,
            domain::session::context::ChatMessage,
            domain::session::context::ChatRole,
            domain::session::dto::ArtifactResponse,
            domain::exam::dto::GenerationRequest,
            domain::exam::dto::SectionSpec,
            domain::exam::dto::QuestionType,
            domain::exam::dto::Difficulty,
            domain::study::dto::FlashcardRequest,
            domain::study::dto::FlashcardResponse,
            domain::study::dto::LessonPlanRequest,
            domain::study::dto::SlideOutlineRequest,
            domain::study::flashcard::Flashcard,
            domain::export::dto::ExportFormat,
            domain::material::dto::SaveMaterialRequest,
            domain::material::dto::MaterialResponse,
            domain::material::entity::material::MaterialKind,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크 API"),
        (name = "Auth", description = "회원가입/로그인 API"),
        (name = "Document", description = "문서 업로드 및 세션 관리 API"),
        (name = "Tutor", description = "튜터 대화 API"),
        (name = "Exam", description = "시험지 생성 API"),
        (name = "Study", description = "학습 보조 자료 생성 API"),
        (name = "Artifact", description = "생성 결과물 조회/내보내기 API"),
        (name = "Material", description = "학습 자료 이력 API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// 전체 라우터 구성
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        // Auth
        .route("/api/auth/signup", post(domain::auth::handler::signup))
        .route("/api/auth/login", post(domain::auth::handler::login))
        .route("/api/auth/logout", post(domain::auth::handler::logout))
        // Document
        .route(
            "/api/documents",
            post(domain::document::handler::upload_document)
                .get(domain::document::handler::list_documents)
                .delete(domain::document::handler::reset_documents)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/documents/active",
            put(domain::document::handler::select_document),
        )
        // Tutor
        .route("/api/tutor/chat", post(domain::tutor::handler::chat))
        .route("/api/tutor/simplify", post(domain::tutor::handler::simplify))
        .route(
            "/api/tutor/history",
            get(domain::tutor::handler::get_history).delete(domain::tutor::handler::clear_history),
        )
        // Generation
        .route("/api/exams", post(domain::exam::handler::generate_exam))
        .route(
            "/api/study/flashcards",
            post(domain::study::handler::generate_flashcards),
        )
        .route(
            "/api/study/lesson-plan",
            post(domain::study::handler::generate_lesson_plan),
        )
        .route("/api/study/slides", post(domain::study::handler::generate_slides))
        // Artifact
        .route("/api/artifacts/:kind", get(domain::session::handler::get_artifact))
        .route(
            "/api/artifacts/:kind/export",
            get(domain::export::handler::export_artifact),
        )
        // Material
        .route(
            "/api/materials",
            post(domain::material::handler::save_material)
                .get(domain::material::handler::list_materials),
        )
        .layer(middleware::from_fn(global::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
