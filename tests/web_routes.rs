// Route tests: drive the Axum router in-process with tower's oneshot.
//
// No sockets are opened; each test builds a router around a placeholder or
// test-double backend and inspects status codes and JSON bodies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use brainrot::backend::placeholder::PlaceholderBackend;
use brainrot::backend::traits::{BackendError, Judgment, ModelBackend};
use brainrot::filter::service::FilterService;
use brainrot::web::{build_router, AppState};

fn router_with(backend: Arc<dyn ModelBackend>, timeout: Duration) -> Router {
    build_router(AppState::new(FilterService::new(backend, 0.5, timeout)))
}

fn placeholder_router() -> Router {
    router_with(
        Arc::new(PlaceholderBackend::new("llama3")),
        Duration::from_secs(5),
    )
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_filter(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/filter")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Counts calls so tests can assert the backend was never reached.
struct CountingBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl ModelBackend for CountingBackend {
    fn model(&self) -> &str {
        "counting"
    }

    async fn evaluate(
        &self,
        _text: &str,
        _context: Option<&str>,
    ) -> Result<Judgment, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Judgment {
            score: 0.2,
            reasoning: "Low effort.".to_string(),
        })
    }
}

struct DownBackend;

#[async_trait]
impl ModelBackend for DownBackend {
    fn model(&self) -> &str {
        "down"
    }

    async fn evaluate(
        &self,
        _text: &str,
        _context: Option<&str>,
    ) -> Result<Judgment, BackendError> {
        Err(BackendError::Unavailable("connection refused".to_string()))
    }
}

struct SlowBackend;

#[async_trait]
impl ModelBackend for SlowBackend {
    fn model(&self) -> &str {
        "slow"
    }

    async fn evaluate(
        &self,
        _text: &str,
        _context: Option<&str>,
    ) -> Result<Judgment, BackendError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Judgment {
            score: 0.9,
            reasoning: "Too late.".to_string(),
        })
    }
}

struct OutOfRangeBackend;

#[async_trait]
impl ModelBackend for OutOfRangeBackend {
    fn model(&self) -> &str {
        "confused"
    }

    async fn evaluate(
        &self,
        _text: &str,
        _context: Option<&str>,
    ) -> Result<Judgment, BackendError> {
        Ok(Judgment {
            score: 7.5,
            reasoning: "Rated out of ten.".to_string(),
        })
    }
}

// ============================================================
// GET /
// ============================================================

#[tokio::test]
async fn status_reports_model() {
    let (status, body) = send(placeholder_router(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "AI Service Operational", "model": "llama3" })
    );
}

#[tokio::test]
async fn status_answers_while_backend_is_down() {
    let router = router_with(Arc::new(DownBackend), Duration::from_secs(1));
    let (status, body) = send(router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "down");
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(placeholder_router(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

// ============================================================
// POST /filter: success
// ============================================================

#[tokio::test]
async fn filter_hello_world_returns_placeholder() {
    let request = post_filter(r#"{"text": "hello world"}"#);
    let (status, body) = send(placeholder_router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "score": 0.95,
            "is_brain_rot": false,
            "reasoning": "Placeholder: Content seems high quality."
        })
    );
}

#[tokio::test]
async fn filter_accepts_context() {
    let (status, body) = send(
        placeholder_router(),
        post_filter(r#"{"text": "a thread about compilers", "context": "strict mode"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let score = body["score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert!(!body["reasoning"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn filter_is_idempotent() {
    let router = placeholder_router();
    let (_, first) = send(router.clone(), post_filter(r#"{"text": "same input"}"#)).await;
    let (_, second) = send(router, post_filter(r#"{"text": "same input"}"#)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn low_score_is_flagged_as_brain_rot() {
    let backend = Arc::new(CountingBackend {
        calls: Default::default(),
    });
    let router = router_with(backend, Duration::from_secs(1));
    let (status, body) = send(router, post_filter(r#"{"text": "ohio rizz"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_brain_rot"], true);
    assert_eq!(body["score"], 0.2);
}

// ============================================================
// POST /filter: validation
// ============================================================

#[tokio::test]
async fn missing_text_is_rejected_with_field_detail() {
    let (status, body) = send(placeholder_router(), post_filter("{}")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "text");
    assert!(body.get("score").is_none());
}

#[tokio::test]
async fn non_string_text_is_rejected() {
    let (status, body) = send(placeholder_router(), post_filter(r#"{"text": 12}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "text");
    assert_eq!(body["fields"][0]["message"], "must be a string");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (status, body) = send(placeholder_router(), post_filter(r#"{"text": "#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "body");
}

#[tokio::test]
async fn oversized_body_is_413_not_validation() {
    // Axum's default body limit is 2 MiB.
    let text = "a".repeat(3 * 1024 * 1024);
    let payload = json!({ "text": text }).to_string();
    let (status, body) = send(placeholder_router(), post_filter(&payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["fields"][0]["field"], "body");
    assert!(body.get("score").is_none());
}

#[tokio::test]
async fn missing_content_type_is_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/filter")
        .body(Body::from(r#"{"text": "hello"}"#))
        .unwrap();
    let (status, body) = send(placeholder_router(), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["fields"][0]["field"], "body");
}

#[tokio::test]
async fn invalid_request_never_reaches_backend() {
    let backend = Arc::new(CountingBackend {
        calls: Default::default(),
    });
    let router = router_with(backend.clone(), Duration::from_secs(1));
    let (status, _) = send(router, post_filter(r#"{"context": "only context"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

// ============================================================
// POST /filter: backend failures
// ============================================================

#[tokio::test]
async fn unavailable_backend_is_503() {
    let router = router_with(Arc::new(DownBackend), Duration::from_secs(1));
    let (status, body) = send(router, post_filter(r#"{"text": "hello"}"#)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
    assert!(body.get("score").is_none());
}

#[tokio::test]
async fn slow_backend_times_out_with_504() {
    let router = router_with(Arc::new(SlowBackend), Duration::from_millis(50));
    let (status, body) = send(router, post_filter(r#"{"text": "hello"}"#)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn out_of_range_score_is_502() {
    let router = router_with(Arc::new(OutOfRangeBackend), Duration::from_secs(1));
    let (status, _) = send(router, post_filter(r#"{"text": "hello"}"#)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
