//! HTTP surface tests over the in-process router.

mod common;

use std::sync::Arc;

use askdoc::server::{AppState, PlainTextExtractor, router};
use askdoc::{InMemoryIndex, NO_CONTEXT_MESSAGE, QaConfig, QaEngine};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use common::{HashEmbedder, RecordingGenerator};
use tower::ServiceExt;

const DIM: usize = 64;
const BOUNDARY: &str = "test-boundary";

fn app(chunk_size: usize) -> (Router, Arc<RecordingGenerator>) {
    let generator = Arc::new(RecordingGenerator::new());
    let engine = QaEngine::builder()
        .config(QaConfig::builder().chunk_size(chunk_size).build().unwrap())
        .embedder(Arc::new(HashEmbedder::new(DIM)))
        .index(Arc::new(InMemoryIndex::new(DIM)))
        .generator(Arc::clone(&generator) as _)
        .build()
        .unwrap();
    let state = AppState { engine: Arc::new(engine), extractor: Arc::new(PlainTextExtractor) };
    (router(state), generator)
}

fn multipart_upload(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn ask_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (app, _) = app(2);
    let response = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "askdoc is running");
}

#[tokio::test]
async fn upload_then_ask_round_trip() {
    let (app, generator) = app(2);

    let response =
        app.clone().oneshot(multipart_upload("b1", b"alpha beta gamma delta")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["document_id"], "b1");
    assert_eq!(body["chunks"], 2);

    let response =
        app.oneshot(ask_form("question=gamma%20delta&top_k=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["answer"], "generated answer");
    assert_eq!(body["context"], serde_json::json!(["gamma delta"]));
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn ask_against_empty_index_returns_fixed_message() {
    let (app, generator) = app(2);

    let response = app.oneshot(ask_form("question=anything")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["answer"], NO_CONTEXT_MESSAGE);
    assert_eq!(body["context"], serde_json::json!([]));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let (app, _) = app(2);

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_utf8_upload_is_rejected() {
    let (app, _) = app(2);

    let response = app.oneshot(multipart_upload("bin", &[0xff, 0xfe, 0x00])).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("could not extract text"));
}

#[tokio::test]
async fn reupload_replaces_previous_document_contents() {
    let (app, _) = app(1);

    app.clone().oneshot(multipart_upload("b1", b"one two three")).await.unwrap();
    let response = app.clone().oneshot(multipart_upload("b1", b"solo")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["chunks"], 1);

    // The earlier three-chunk set is gone: asking returns only the new text.
    let response = app.oneshot(ask_form("question=solo&top_k=10")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["context"], serde_json::json!(["solo"]));
}
