//! 문서 업로드부터 결과물 생성/저장/내보내기까지의 흐름 통합 테스트
//!
//! AI 클라이언트는 미리 넣어둔 응답을 순서대로 돌려주는 Stub을 사용합니다.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_openai::types::ChatCompletionRequestMessage;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use edu_agent::config::{establish_connection, AppConfig};
use edu_agent::domain::ai::AiClientTrait;
use edu_agent::domain::session::SessionStore;
use edu_agent::utils::error::AppError;
use edu_agent::{create_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "edu-agent-test-boundary";

const OS_NOTES: &str = "Paging divides memory into fixed-size frames. \
Segmentation divides memory into variable-size segments.";

// ===== Helper Functions =====

/// 큐에 넣은 응답을 순서대로 반환하고, 비면 AI 에러를 냅니다.
struct QueuedAi {
    replies: Mutex<VecDeque<String>>,
}

impl QueuedAi {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }
}

#[async_trait::async_trait]
impl AiClientTrait for QueuedAi {
    async fn complete(&self, _: Vec<ChatCompletionRequestMessage>) -> Result<String, AppError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::AiServiceError("quota exceeded".to_string()))
    }

    async fn list_models(&self) -> Result<Vec<String>, AppError> {
        Ok(Vec::new())
    }
}

async fn create_test_router(replies: &[&str]) -> Router {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key".to_string(),
        ..AppConfig::default()
    };
    let db = establish_connection(&config.database_url).await.unwrap();

    create_router(AppState {
        db,
        config,
        ai: Arc::new(QueuedAi::new(replies)),
        sessions: SessionStore::new(),
    })
}

async fn parse_response_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authorized(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn upload_request(token: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: text/plain\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = filename,
        c = content
    );

    Request::builder()
        .method("POST")
        .uri("/api/documents")
        .header("Authorization", format!("Bearer {}", token))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn login(app: &Router) -> String {
    let credentials = json!({ "username": "lecturer01", "password": "correct-horse" });
    for uri in ["/api/auth/signup", "/api/auth/login"] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(credentials.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        if uri.ends_with("login") {
            let body = parse_response_body(response.into_body()).await;
            return body["result"]["accessToken"].as_str().unwrap().to_string();
        }
    }
    unreachable!()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response.into_body()).await)
}

fn exam_request() -> Value {
    json!({
        "sections": [
            { "questionType": "MCQ", "count": 2, "difficulty": "EASY" },
            { "questionType": "LONG_THEORY", "count": 1, "difficulty": "HARD" }
        ]
    })
}

// ===== Document Tests =====

mod document_api {
    use super::*;

    #[tokio::test]
    async fn should_activate_uploaded_text_document() {
        // Arrange
        let app = create_test_router(&[]).await;
        let token = login(&app).await;

        // Act
        let (status, body) = send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;
        let (_, list) = send(&app, authorized("GET", "/api/documents", &token, None)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["document"]["name"], "os_notes.txt");
        assert_eq!(body["result"]["replaced"], false);
        assert_eq!(list["result"]["active"], "os_notes.txt");
        assert_eq!(list["result"]["documents"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_reject_unsupported_extension() {
        let app = create_test_router(&[]).await;
        let token = login(&app).await;

        let (status, body) = send(&app, upload_request(&token, "slides.pptx", "x")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["isSuccess"], false);
    }

    #[tokio::test]
    async fn should_switch_active_document() {
        // Arrange
        let app = create_test_router(&[]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "a.txt", "alpha")).await;
        send(&app, upload_request(&token, "b.txt", "beta")).await;

        // Act
        let (status, _) = send(
            &app,
            authorized("PUT", "/api/documents/active", &token, Some(json!({ "name": "a.txt" }))),
        )
        .await;
        let (missing, _) = send(
            &app,
            authorized("PUT", "/api/documents/active", &token, Some(json!({ "name": "c.txt" }))),
        )
        .await;
        let (_, list) = send(&app, authorized("GET", "/api/documents", &token, None)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(missing, StatusCode::NOT_FOUND);
        assert_eq!(list["result"]["active"], "a.txt");
    }
}

// ===== Generation Tests =====

mod generation_api {
    use super::*;

    #[tokio::test]
    async fn should_require_active_document_before_generating() {
        let app = create_test_router(&["unused"]).await;
        let token = login(&app).await;

        let (status, body) =
            send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "DOC001");
    }

    #[tokio::test]
    async fn should_split_exam_at_summary_sentinel() {
        // Arrange
        let app = create_test_router(&[
            "## Section A\n**Q1.** What is paging?\n---SUMMARY---\n**Answer:** Q1 fixed frames",
        ])
        .await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;

        // Act
        let (status, body) =
            send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;
        let (_, stored) = send(
            &app,
            authorized("GET", "/api/artifacts/EXAM_PAPER", &token, None),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["segmented"], true);
        assert_eq!(body["result"]["body"], "## Section A\n**Q1.** What is paging?");
        assert_eq!(body["result"]["unitSummary"], "**Answer:** Q1 fixed frames");
        assert_eq!(body["result"]["source"], "os_notes.txt");
        assert_eq!(stored["result"]["body"], body["result"]["body"]);
    }

    #[tokio::test]
    async fn should_mark_exam_degraded_without_sentinel() {
        let app = create_test_router(&["**Q1.** What is paging?"]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;

        let (status, body) =
            send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["segmented"], false);
        assert_eq!(body["result"]["unitSummary"], "Unit summary unavailable.");
    }

    #[tokio::test]
    async fn should_reject_fourth_section() {
        let app = create_test_router(&[]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;
        let section = json!({ "questionType": "MCQ", "count": 1, "difficulty": "EASY" });

        let (status, _) = send(
            &app,
            authorized(
                "POST",
                "/api/exams",
                &token,
                Some(json!({ "sections": [section, section, section, section] })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_keep_previous_state_when_ai_fails() {
        // Arrange
        let app = create_test_router(&[]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;

        // Act
        let (status, body) =
            send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;
        let (artifact, _) = send(
            &app,
            authorized("GET", "/api/artifacts/EXAM_PAPER", &token, None),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "AI001");
        assert!(!body["message"].as_str().unwrap().contains("quota"));
        assert_eq!(artifact, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_parse_flashcards_from_reply() {
        let app = create_test_router(&[
            "1. **Paging**: fixed-size frames\n- Segmentation: variable-size segments\nno colon here",
        ])
        .await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;

        let (status, body) = send(
            &app,
            authorized("POST", "/api/study/flashcards", &token, Some(json!({ "count": 2 }))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let cards = body["result"]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["term"], "Paging");
        assert_eq!(cards[1]["definition"], "variable-size segments");
    }
}

// ===== Tutor Tests =====

mod tutor_api {
    use super::*;

    #[tokio::test]
    async fn should_record_chat_and_simplify_last_answer() {
        // Arrange
        let app = create_test_router(&[
            "Paging maps pages to frames.",
            "Memory is cut into equal boxes.",
        ])
        .await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;

        // Act
        let (chat_status, _) = send(
            &app,
            authorized(
                "POST",
                "/api/tutor/chat",
                &token,
                Some(json!({ "question": "What is paging?" })),
            ),
        )
        .await;
        let (simplify_status, simplified) =
            send(&app, authorized("POST", "/api/tutor/simplify", &token, None)).await;
        let (_, history) = send(&app, authorized("GET", "/api/tutor/history", &token, None)).await;

        // Assert
        assert_eq!(chat_status, StatusCode::OK);
        assert_eq!(simplify_status, StatusCode::OK);
        assert_eq!(
            simplified["result"]["answer"],
            "**Simplified:** Memory is cut into equal boxes."
        );
        let messages = history["result"]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
    }

    #[tokio::test]
    async fn should_refuse_simplify_without_answer() {
        let app = create_test_router(&[]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;

        let (status, _) = send(&app, authorized("POST", "/api/tutor/simplify", &token, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// ===== Material / Export Tests =====

mod material_api {
    use super::*;

    #[tokio::test]
    async fn should_save_and_list_current_artifact() {
        // Arrange
        let app = create_test_router(&["**Q1.** Define paging.\n---SUMMARY---\nKey: frames"]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;
        send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;

        // Act
        let (status, saved) = send(
            &app,
            authorized(
                "POST",
                "/api/materials",
                &token,
                Some(json!({ "kind": "EXAM_PAPER", "topic": "Unit 3 - Memory" })),
            ),
        )
        .await;
        let (_, listed) = send(
            &app,
            authorized("GET", "/api/materials?kind=EXAM_PAPER", &token, None),
        )
        .await;
        let (_, other_kind) = send(
            &app,
            authorized("GET", "/api/materials?kind=FLASHCARDS", &token, None),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["result"]["filename"], "os_notes.txt");
        assert_eq!(saved["result"]["topic"], "Unit 3 - Memory");
        assert!(saved["result"]["content"]
            .as_str()
            .unwrap()
            .contains("---SUMMARY---"));
        assert_eq!(listed["result"].as_array().unwrap().len(), 1);
        assert!(other_kind["result"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_404_when_saving_missing_artifact() {
        let app = create_test_router(&[]).await;
        let token = login(&app).await;

        let (status, _) = send(
            &app,
            authorized(
                "POST",
                "/api/materials",
                &token,
                Some(json!({ "kind": "LESSON_PLAN", "topic": "Unit 1" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_export_artifact_as_text_attachment() {
        // Arrange
        let app = create_test_router(&["**Q1.** Define paging.\n---SUMMARY---\nKey: frames"]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;
        send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;

        // Act
        let response = app
            .clone()
            .oneshot(authorized(
                "GET",
                "/api/artifacts/EXAM_PAPER/export?format=txt",
                &token,
                None,
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("exam_paper.txt"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("Define paging."));
        assert!(text.contains("Key: frames"));
    }

    #[tokio::test]
    async fn should_clear_session_on_reset() {
        // Arrange
        let app = create_test_router(&["**Q1.** Define paging."]).await;
        let token = login(&app).await;
        send(&app, upload_request(&token, "os_notes.txt", OS_NOTES)).await;
        send(&app, authorized("POST", "/api/exams", &token, Some(exam_request()))).await;

        // Act
        let (status, _) = send(&app, authorized("DELETE", "/api/documents", &token, None)).await;
        let (_, list) = send(&app, authorized("GET", "/api/documents", &token, None)).await;
        let (artifact, _) = send(
            &app,
            authorized("GET", "/api/artifacts/EXAM_PAPER", &token, None),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert!(list["result"]["documents"].as_array().unwrap().is_empty());
        assert!(list["result"]["active"].is_null());
        assert_eq!(artifact, StatusCode::NOT_FOUND);
    }
}

// ===== Context Budget Tests =====

mod context_budget {
    use super::*;

    const TAIL: &str = "TAILMARKER";

    /// 받은 프롬프트를 기록하고 고정 응답을 돌려줍니다.
    #[derive(Default)]
    struct RecordingAi {
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingAi {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.prompts.lock().unwrap())
        }
    }

    #[async_trait::async_trait]
    impl AiClientTrait for RecordingAi {
        async fn complete(
            &self,
            messages: Vec<ChatCompletionRequestMessage>,
        ) -> Result<String, AppError> {
            self.prompts.lock().unwrap().push(format!("{:?}", messages));
            Ok("Term: definition".to_string())
        }

        async fn list_models(&self) -> Result<Vec<String>, AppError> {
            Ok(Vec::new())
        }
    }

    async fn create_budget_router(ai: Arc<RecordingAi>) -> Router {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret-key".to_string(),
            exam_context_chars: 50,
            study_context_chars: 40,
            chat_context_chars: 60,
            ..AppConfig::default()
        };
        let db = establish_connection(&config.database_url).await.unwrap();

        create_router(AppState {
            db,
            config,
            ai,
            sessions: SessionStore::new(),
        })
    }

    fn assert_cut_at(prompt: &str, budget: usize) {
        assert!(prompt.contains(&"a".repeat(budget)), "excerpt shorter than {}", budget);
        assert!(!prompt.contains(&"a".repeat(budget + 1)), "excerpt longer than {}", budget);
        assert!(!prompt.contains(TAIL));
    }

    #[tokio::test]
    async fn should_send_only_leading_characters_of_long_document() {
        // Arrange
        let ai = Arc::new(RecordingAi::default());
        let app = create_budget_router(ai.clone()).await;
        let token = login(&app).await;
        let document = format!("{}{}", "a".repeat(200), TAIL);
        let (status, _) = send(&app, upload_request(&token, "long.txt", &document)).await;
        assert_eq!(status, StatusCode::OK);

        // Act
        let (exam, _) = send(
            &app,
            authorized("POST", "/api/exams", &token, Some(exam_request())),
        )
        .await;
        let exam_prompts = ai.take();
        let (cards, _) = send(
            &app,
            authorized("POST", "/api/study/flashcards", &token, Some(json!({ "count": 2 }))),
        )
        .await;
        let card_prompts = ai.take();
        let (chat, _) = send(
            &app,
            authorized(
                "POST",
                "/api/tutor/chat",
                &token,
                Some(json!({ "question": "Summarize it" })),
            ),
        )
        .await;
        let chat_prompts = ai.take();

        // Assert
        assert_eq!(exam, StatusCode::OK);
        assert_eq!(cards, StatusCode::OK);
        assert_eq!(chat, StatusCode::OK);
        assert_cut_at(&exam_prompts.concat(), 50);
        assert_cut_at(&card_prompts.concat(), 40);
        assert_cut_at(&chat_prompts.concat(), 60);
    }
}
