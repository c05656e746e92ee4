//! # Keyword Server Routes
//!
//! File: cli/src/commands/serve/routes.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! | Method | Path              | Handler        |
//! |--------|-------------------|----------------|
//! | POST   | `/api/ktm/chat`   | `chat`         |
//! | GET    | `/api/ktm/info`   | `info`         |
//! | GET    | `/api/ktm/health` | `health`       |
//! | GET    | `/api`            | `api_overview` |
//! | any    | everything else   | static files, then `index.html`, then a plain-text 404 |
//!
//! Unknown paths fall back to `index.html` so a single-page interface can
//! handle its own routing.
//!
use crate::assistant::{self, identity, ChatRequest, ChatResponse};
use crate::common::http::{require_message, with_middleware};
use crate::core::error::KtmError;
use axum::{
    extract::{rejection::JsonRejection, State},
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;
use tracing::{debug, info};

use super::config::ServeConfig;

/// Router state for the keyword server.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Root URL advertised by `GET /api`, e.g. `http://localhost:5000`.
    pub base_url: String,
}

/// # Create Axum Application (`create_app`)
///
/// Builds the API routes, the static-file fallback and the middleware stack.
///
/// ## Arguments
///
/// * `config`: static directory and CORS setting.
/// * `base_url`: root URL reported by `GET /api`, normally built from the bound port.
///
/// ## Returns
///
/// A `Router` ready for `axum::serve`. Paths that match no route or file are
/// answered with `index.html`, or a plain-text 404 when it is missing.
pub fn create_app(config: &ServeConfig, base_url: String) -> Router {
    let state = AppState { base_url };

    let index_path = config.static_dir.join("index.html");
    let index_fallback = move || {
        let index_path: PathBuf = index_path.clone();
        async move { serve_index(&index_path).await }
    };
    let static_files = ServeDir::new(&config.static_dir).fallback(index_fallback.into_service());

    let router = Router::new()
        .route("/api", get(api_overview))
        .route("/api/ktm/chat", post(chat))
        .route("/api/ktm/info", get(info))
        .route("/api/ktm/health", get(health))
        .with_state(state)
        .fallback_service(static_files);

    with_middleware(router, config.bind.enable_cors)
}

/// # Keyword Chat Handler (`chat`)
///
/// `POST /api/ktm/chat`: classifies the message and answers with a canned
/// reply for its category.
///
/// ## Returns
///
/// `200` with a `ChatResponse` (`status: "success"`).
///
/// ## Errors
///
/// * `KtmError::InvalidRequest` (400): body is not JSON or has no string `message`.
/// * `KtmError::EmptyMessage` (400): `message` is blank after trimming.
async fn chat(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, KtmError> {
    let message = require_message(payload)?;
    let (category, response) = assistant::answer(&message);
    info!("Answered a '{}' message", category);
    Ok(Json(response))
}

/// GET /api/ktm/info
async fn info() -> Json<Value> {
    Json(json!({
        "name": identity::API_NAME,
        "version": identity::VERSION,
        "developer": identity::DEVELOPER,
        "founder": identity::FOUNDER,
        "launch_date": identity::LAUNCH_DATE,
        "features": identity::FEATURES,
        "endpoints": {
            "chat": "/api/ktm/chat (POST)",
            "info": "/api/ktm/info (GET)",
            "health": "/api/ktm/health (GET)",
        },
        "status": "active",
    }))
}

/// GET /api/ktm/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": identity::timestamp(),
        "version": identity::VERSION,
    }))
}

/// GET /api
async fn api_overview(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": identity::API_NAME,
        "version": identity::VERSION,
        "developer": identity::DEVELOPER,
        "founder": identity::FOUNDER,
        "launch_date": identity::LAUNCH_DATE,
        "base_url": state.base_url,
        "endpoints": {
            "chat": "/api/ktm/chat (POST)",
            "info": "/api/ktm/info (GET)",
            "health": "/api/ktm/health (GET)",
        },
        "documentation": "Visit the root URL for browser interface and testing",
    }))
}

async fn serve_index(index_path: &Path) -> Response {
    match tokio::fs::read_to_string(index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            debug!("Could not read {}: {}", index_path.display(), e);
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::responses::responses;
    use crate::assistant::Category;
    use crate::common::network::BindConfig;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(static_dir: &Path) -> Router {
        let config = ServeConfig {
            bind: BindConfig::default(),
            static_dir: static_dir.to_path_buf(),
        };
        create_app(&config, "http://localhost:5000".to_string())
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/ktm/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send(app, request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_chat_hello_there() {
        let dir = TempDir::new().unwrap();
        let (status, json) =
            send_json(test_app(dir.path()), post_chat(r#"{"message": "Hello there"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        let reply = json["response"].as_str().unwrap();
        assert!(responses(Category::Greeting).contains(&reply));
        assert_eq!(json["version"], "R1.0");
        assert_eq!(json["assistant"], "KTM Assistant");
        assert_eq!(json["developer"], "KTM Team");
        assert_eq!(json["founder"], "Sandeep Ghimeere");
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_chat_reply_follows_category() {
        let dir = TempDir::new().unwrap();
        let (status, json) = send_json(
            test_app(dir.path()),
            post_chat(r#"{"message": "What can you do?"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let reply = json["response"].as_str().unwrap();
        assert!(responses(Category::Features).contains(&reply));
    }

    #[tokio::test]
    async fn test_chat_empty_message() {
        let dir = TempDir::new().unwrap();
        let (status, json) = send_json(test_app(dir.path()), post_chat(r#"{"message": ""}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "Message cannot be empty.");
        assert!(json.get("response").is_none());
    }

    #[tokio::test]
    async fn test_chat_whitespace_message() {
        let dir = TempDir::new().unwrap();
        let (status, json) =
            send_json(test_app(dir.path()), post_chat(r#"{"message": "   \n\t"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_chat_missing_message_field() {
        let dir = TempDir::new().unwrap();
        let (status, json) = send_json(test_app(dir.path()), post_chat(r#"{"text": "hi"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(
            json["error"],
            "Invalid request format. Please provide a message field."
        );
    }

    #[tokio::test]
    async fn test_chat_malformed_bodies() {
        let dir = TempDir::new().unwrap();
        for body in ["not json", r#"{"message": 42}"#, "[]", ""] {
            let (status, json) = send_json(test_app(dir.path()), post_chat(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json["status"], "error", "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let (status, json) = send_json(test_app(dir.path()), get_request("/api/ktm/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], "R1.0");
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_info() {
        let dir = TempDir::new().unwrap();
        let (status, json) = send_json(test_app(dir.path()), get_request("/api/ktm/info")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "KTM Assistant API");
        assert_eq!(json["launch_date"], "May 11, 2025");
        assert_eq!(json["features"].as_array().unwrap().len(), 5);
        assert_eq!(json["endpoints"]["chat"], "/api/ktm/chat (POST)");
        assert_eq!(json["status"], "active");
    }

    #[tokio::test]
    async fn test_api_overview_reports_base_url() {
        let dir = TempDir::new().unwrap();
        let (status, json) = send_json(test_app(dir.path()), get_request("/api")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["base_url"], "http://localhost:5000");
        assert_eq!(json["endpoints"]["health"], "/api/ktm/health (GET)");
    }

    #[tokio::test]
    async fn test_root_serves_index_html() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>KTM</html>").unwrap();

        let (status, body) = send(test_app(dir.path()), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html>KTM</html>"));
    }

    #[tokio::test]
    async fn test_static_asset_and_spa_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>KTM</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('ktm');").unwrap();

        let (status, body) = send(test_app(dir.path()), get_request("/app.js")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('ktm');");

        let (status, body) = send(test_app(dir.path()), get_request("/chat/history")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html>KTM</html>"));
    }

    #[tokio::test]
    async fn test_root_without_index_is_plain_text_404() {
        let dir = TempDir::new().unwrap();

        let (status, body) = send(test_app(dir.path()), get_request("/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "index.html not found");
    }

    #[tokio::test]
    async fn test_missing_static_dir_still_serves_api() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let (status, body) = send(test_app(&missing), get_request("/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "index.html not found");

        let (status, _) = send_json(test_app(&missing), get_request("/api/ktm/health")).await;
        assert_eq!(status, StatusCode::OK);
    }
}
