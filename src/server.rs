//! Thin HTTP serving layer.
//!
//! Routes are glue only — all retrieval semantics live in [`QaEngine`]. The
//! surface mirrors a local-development posture: permissive CORS, a request
//! body limit for uploads, per-request tracing, and a request timeout that
//! bounds the blocking collaborator calls.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::engine::QaEngine;
use crate::error::QaError;

/// Maximum accepted upload size in bytes.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Upper bound on a single request, covering the collaborator round trips.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Produces raw text from an uploaded document's bytes.
///
/// Format-specific extraction (PDF, EPUB, ...) is out of scope for this
/// crate; extraction failures are opaque I/O errors. The default
/// [`PlainTextExtractor`] accepts UTF-8 text uploads as-is. An empty string
/// is a valid extraction result.
pub trait TextExtractor: Send + Sync {
    /// Extract raw text from the uploaded bytes.
    fn extract(&self, bytes: &[u8]) -> io::Result<String>;
}

/// A [`TextExtractor`] that decodes the upload as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> io::Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    /// The engine, constructed once at process start.
    pub engine: Arc<QaEngine>,
    /// Text extraction seam for uploads.
    pub extractor: Arc<dyn TextExtractor>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    // Permissive CORS for local development; restrict before deploying.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/upload", post(upload))
        .route("/ask", post(ask))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Bind `addr` and serve the router until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state)).await
}

// ── Handlers ───────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": "askdoc is running" }))
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    message: String,
    document_id: String,
    chunks: usize,
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let document_id = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        let text = state.extractor.extract(&bytes).map_err(|e| {
            error!(%document_id, error = %e, "text extraction failed");
            ApiError::bad_request(format!("could not extract text: {e}"))
        })?;

        let receipt = state.engine.ingest_document(&document_id, &text).await?;
        return Ok(Json(UploadResponse {
            message: format!("File '{document_id}' processed successfully"),
            document_id: receipt.document_id,
            chunks: receipt.chunk_count,
        }));
    }

    Err(ApiError::bad_request("missing 'file' part"))
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    answer: String,
    context: Vec<String>,
}

async fn ask(
    State(state): State<AppState>,
    Form(request): Form<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let answer = state.engine.answer_question(&request.question, request.top_k).await?;
    let context =
        answer.supporting_chunks.iter().map(|r| r.chunk.text.clone()).collect();
    Ok(Json(AskResponse { answer: answer.answer, context }))
}

// ── Error mapping ──────────────────────────────────────────────────

/// An error rendered as a JSON body with an HTTP status.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<QaError> for ApiError {
    fn from(err: QaError) -> Self {
        let status = match &err {
            QaError::DimensionMismatch { .. } | QaError::EmbeddingDimension { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            QaError::EmbeddingService { .. } | QaError::GenerationService { .. } => {
                StatusCode::BAD_GATEWAY
            }
            QaError::Config(_) => StatusCode::BAD_REQUEST,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
