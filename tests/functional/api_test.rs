//! HTTP surface tests driven through the router

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use creative_banana::api::routes::create_router;
use creative_banana::config::Settings;
use creative_banana::studio::image::MISSING_INPUTS_MESSAGE;
use creative_banana::studio::StudioRegistry;
use creative_banana::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tower::ServiceExt;

use crate::common::{jpeg_bytes, MockBackend, DEFAULT_PROMPT};

const BOUNDARY: &str = "studio-test-boundary";

fn app_with(settings: Settings) -> (Router, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::new(DEFAULT_PROMPT));
    let studios = Arc::new(StudioRegistry::new(backend.clone(), settings.studio.clone()));
    let state = Arc::new(AppState {
        settings: Arc::new(settings),
        studios,
    });
    (create_router(state), backend)
}

fn app() -> (Router, Arc<MockBackend>) {
    app_with(Settings::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart body with one `file` field per entry
fn multipart(uri: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, content_type, bytes) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn create_studio(app: &Router) -> String {
    let (status, body) = send(app, empty(Method::POST, "/api/studios")).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, empty(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_options_lists_every_choice() {
    let (app, _) = app();
    let (status, body) = send(&app, empty(Method::GET, "/api/options")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["aspectRatio"].as_array().unwrap().len(), 5);
    assert_eq!(body["lightingStyle"].as_array().unwrap().len(), 6);
    assert_eq!(body["cameraPerspective"].as_array().unwrap().len(), 6);
    assert_eq!(body["lightingStyle"][0], "Studio Light");
    assert_eq!(
        body["defaults"],
        json!({
            "aspectRatio": "1:1",
            "lightingStyle": "Studio Light",
            "cameraPerspective": "Eye-level Shot"
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_new_studio_view() {
    let (app, _) = app();
    let (status, body) = send(&app, empty(Method::POST, "/api/studios")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["style"]["aspectRatio"], "1:1");
    assert_eq!(body["productImage"]["label"], "Product Photo");
    assert_eq!(body["styleReference"]["label"], "Style Reference (Optional)");
    assert_eq!(body["productImage"]["preview"], Value::Null);
    assert_eq!(body["prompt"], "");
    assert_eq!(body["canGenerate"], false);
    assert_eq!(body["result"]["state"], "placeholder");
    assert_eq!(body["result"]["message"], "Your generated image will appear here");
    assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn test_unknown_studio_is_404() {
    let (app, _) = app();
    let uri = format!("/api/studios/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, empty(Method::GET, &uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "session_not_found");
}

#[tokio::test(start_paused = true)]
async fn test_style_update() {
    let (app, backend) = app();
    let id = create_studio(&app).await;
    let uri = format!("/api/studios/{}/style", id);

    let (status, body) = send(
        &app,
        json_request(Method::PUT, &uri, json!({ "field": "aspectRatio", "value": "16:9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["style"]["aspectRatio"], "16:9");
    assert_eq!(body["style"]["lightingStyle"], "Studio Light");

    sleep(Duration::from_millis(600)).await;
    let calls = backend.text_calls();
    assert_eq!(calls.len(), 1);
    assert!(crate::common::texts(&calls[0]).contains(&"- Aspect Ratio: 16:9\n".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_style_value_is_rejected() {
    let (app, _) = app();
    let id = create_studio(&app).await;
    let uri = format!("/api/studios/{}/style", id);

    let (status, body) = send(
        &app,
        json_request(Method::PUT, &uri, json!({ "field": "aspectRatio", "value": "2:1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");

    let (status, _) = send(
        &app,
        json_request(Method::PUT, &uri, json!({ "field": "colour", "value": "red" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn test_full_studio_flow() {
    let (app, backend) = app();
    let id = create_studio(&app).await;

    let jpeg = jpeg_bytes();
    let upload = format!("/api/studios/{}/images/product", id);
    let (status, body) = send(&app, multipart(&upload, &[("shoe.jpg", "image/jpeg", jpeg.as_slice())])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["productImage"]["preview"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));

    sleep(Duration::from_millis(600)).await;
    let (_, body) = send(&app, empty(Method::GET, &format!("/api/studios/{}", id))).await;
    assert_eq!(body["prompt"], DEFAULT_PROMPT);
    assert_eq!(body["canGenerate"], true);

    let (status, body) = send(&app, empty(Method::POST, &format!("/api/studios/{}/generate", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["state"], "image");
    assert_eq!(body["result"]["src"], "data:image/png;base64,iVBORw0...");
    assert_eq!(body["imageLoading"], false);
    assert_eq!(backend.image_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_generate_without_inputs() {
    let (app, backend) = app();
    let id = create_studio(&app).await;

    let (status, body) = send(&app, empty(Method::POST, &format!("/api/studios/{}/generate", id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");

    let (_, body) = send(&app, empty(Method::GET, &format!("/api/studios/{}", id))).await;
    assert_eq!(body["error"], MISSING_INPUTS_MESSAGE);
    assert!(backend.image_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_non_image_upload_is_ignored() {
    let (app, _) = app();
    let id = create_studio(&app).await;
    let upload = format!("/api/studios/{}/images/product", id);

    let (status, body) = send(&app, multipart(&upload, &[("notes.txt", "text/plain", &b"hello"[..])])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productImage"]["preview"], Value::Null);
    assert_eq!(body["canGenerate"], false);
}

#[tokio::test(start_paused = true)]
async fn test_drop_uses_first_file_and_clear_resets_slot() {
    let (app, backend) = app();
    let id = create_studio(&app).await;
    let slot = format!("/api/studios/{}/images/style-reference", id);

    let (status, body) = send(
        &app,
        multipart(
            &format!("{}/drop", slot),
            &[("a.png", "image/png", &b"first"[..]), ("b.png", "image/png", &b"second"[..])],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["styleReference"]["preview"], "data:image/png;base64,Zmlyc3Q=");
    assert_eq!(body["styleReference"]["dragging"], false);

    let (status, body) = send(&app, empty(Method::DELETE, &slot)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["styleReference"]["preview"], Value::Null);

    // Creation, drop, and clear all landed inside one quiet period
    sleep(Duration::from_millis(600)).await;
    let calls = backend.text_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].iter().all(|part| part.as_image().is_none()));
}

#[tokio::test]
async fn test_unknown_slot_is_rejected() {
    let (app, _) = app();
    let id = create_studio(&app).await;
    let uri = format!("/api/studios/{}/images/background", id);

    let (status, _) = send(&app, empty(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let mut settings = Settings::default();
    settings.studio.max_upload_bytes = 1024;
    let (app, _) = app_with(settings);
    let id = create_studio(&app).await;

    let big = vec![0u8; 4096];
    let upload = format!("/api/studios/{}/images/product", id);
    let (status, body) = send(&app, multipart(&upload, &[("big.png", "image/png", big.as_slice())])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
}

#[tokio::test(start_paused = true)]
async fn test_delete_studio() {
    let (app, backend) = app();
    let id = create_studio(&app).await;
    let uri = format!("/api/studios/{}", id);

    let (status, _) = send(&app, empty(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    sleep(Duration::from_millis(1000)).await;
    assert!(backend.text_calls().is_empty());
}
