pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::parsing::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

/// JSON escaping grows text by at most six bytes per input byte (`\u001f`).
const JSON_ESCAPE_FACTOR: usize = 6;
const BODY_ENVELOPE_BYTES: usize = 1024;

/// Largest request body accepted, so oversize text reaches validation as a
/// 400 instead of being cut off by the body limit.
pub fn body_limit(max_text_bytes: usize) -> usize {
    max_text_bytes
        .saturating_mul(JSON_ESCAPE_FACTOR)
        .saturating_add(BODY_ENVELOPE_BYTES)
}

pub fn build_router(state: AppState) -> Router {
    let limit = body_limit(state.config.max_text_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // CV API
        .route("/api/v1/cv/parse", post(handlers::handle_parse))
        .route("/api/v1/cv/skills", post(handlers::handle_skills))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::models::cv::CvRecord;

    fn router_with(config: Config) -> Router {
        build_router(AppState::from_config(config).unwrap())
    }

    fn router() -> Router {
        router_with(Config::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "portfolio-api");
    }

    #[tokio::test]
    async fn test_parse_returns_cv_record() {
        let text = "Jane Doe\nEmail: jane@x.com\n\nEXPERIENCE\nSoftware Engineer\nAcme Corp\n• Shipped Rust services";
        let response = router()
            .oneshot(post_json("/api/v1/cv/parse", json!({ "text": text })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let record: CvRecord = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.contact.email, "jane@x.com");
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.experience[0].company, "Acme Corp");
        assert_eq!(record.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_parse_rejects_blank_text() {
        let response = router()
            .oneshot(post_json("/api/v1/cv/parse", json!({ "text": "   \n " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_rejects_oversize_text() {
        let app = router_with(Config {
            max_text_bytes: 16,
            ..Config::default()
        });
        let response = app
            .oneshot(post_json(
                "/api/v1/cv/parse",
                json!({ "text": "Jane Doe, Rust engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_text_above_default_body_limit_reaches_validation() {
        let app = router_with(Config {
            max_text_bytes: 3_000_000,
            ..Config::default()
        });
        let text = "a".repeat(3_000_001);
        let response = app
            .oneshot(post_json("/api/v1/cv/skills", json!({ "text": text })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_body_limit_covers_escaped_text() {
        assert_eq!(body_limit(10), 1084);
        assert_eq!(body_limit(usize::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn test_skill_frequencies() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/cv/skills",
                json!({ "text": "Go services at Google. Go, Docker, go." }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skills"]["Go"], 3);
        assert_eq!(body["skills"]["Docker"], 1);
        assert_eq!(body["categories"]["languages"], json!(["Go"]));
        assert_eq!(body["categories"]["cloud_devops"], json!(["Docker"]));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = router()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
