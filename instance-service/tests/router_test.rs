//! Router-level tests driven with `oneshot`, no listener involved.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use instance_service::services::InMemoryInstanceStore;
use instance_service::{build_router, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

fn router() -> Router {
    let store = Arc::new(InMemoryInstanceStore::new());
    build_router(AppState::new(common::test_config(), store))
}

async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

#[tokio::test]
async fn options_on_any_route_short_circuits_with_cors_headers() {
    for uri in ["/api/ec2/create", "/api/ec2/list", "/api/ec/terminate/7", "/api/hello"] {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
        assert!(body_bytes(response).await.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn cors_headers_are_added_to_regular_responses() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/ec2/list")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn hello_echoes_name() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/hello")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Ada"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["message"], "Hello, Ada!");
}

#[tokio::test]
async fn hello_defaults_missing_name_to_empty() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/hello")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["message"], "Hello, !");
}

#[tokio::test]
async fn hello_decodes_json_regardless_of_content_type() {
    for content_type in [None, Some("application/x-www-form-urlencoded"), Some("text/plain")] {
        let mut request = Request::builder().method(Method::POST).uri("/api/hello");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }

        let response = router()
            .oneshot(request.body(Body::from(r#"{"name":"Ada"}"#)).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{content_type:?}");
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["message"], "Hello, Ada!", "{content_type:?}");
    }
}

#[tokio::test]
async fn hello_rejects_malformed_json() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/hello")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["message"], "Invalid JSON");
}

#[tokio::test]
async fn create_ignores_request_body() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/ec2/create")
                .body(Body::from("anything at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}
