//! Ollama-backed collaborators.
//!
//! [`OllamaEmbeddings`] and [`OllamaGenerator`] call a local Ollama server
//! over HTTP: `/api/embed` for embeddings and `/api/generate` (non-streaming)
//! for completions. Neither client applies a request timeout of its own —
//! callers own timeout policy and see expiry as the corresponding service
//! error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::generation::GenerationService;

/// The default Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:11434";

/// The default embedding model.
const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// The dimensionality of `nomic-embed-text`.
const DEFAULT_EMBED_DIMENSIONS: usize = 768;

/// The default generation model.
const DEFAULT_GENERATE_MODEL: &str = "tinyllama:1.1b";

// ── Embeddings ─────────────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by Ollama's `/api/embed` endpoint.
///
/// # Configuration
///
/// - `model` – defaults to `nomic-embed-text`.
/// - `dimensions` – must match the model; defaults to 768.
/// - `endpoint` – defaults to `http://127.0.0.1:11434`.
///
/// # Example
///
/// ```rust,ignore
/// use askdoc::OllamaEmbeddings;
///
/// let provider = OllamaEmbeddings::new().with_model("all-minilm", 384);
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct OllamaEmbeddings {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbeddings {
    /// Create a provider against the default local endpoint and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_EMBED_MODEL.into(),
            dimensions: DEFAULT_EMBED_DIMENSIONS,
        }
    }

    /// Set the Ollama endpoint (e.g. `http://127.0.0.1:11434`).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the embedding model and the dimensionality it produces.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }

    fn service_error(&self, message: impl Into<String>) -> QaError {
        QaError::EmbeddingService { provider: "Ollama".into(), message: message.into() }
    }
}

impl Default for OllamaEmbeddings {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| self.service_error("API returned no embeddings"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Ollama", batch_size = texts.len(), model = %self.model, "embedding batch");

        let url = format!("{}/api/embed", self.endpoint);
        let request_body = EmbedRequest { model: &self.model, input: texts.to_vec() };

        let response =
            self.client.post(&url).json(&request_body).send().await.map_err(|e| {
                error!(provider = "Ollama", error = %e, "embed request failed");
                self.service_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "embed API error");
            return Err(self.service_error(format!("API returned {status}: {body}")));
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse embed response");
            self.service_error(format!("failed to parse response: {e}"))
        })?;

        if embed_response.embeddings.len() != texts.len() {
            return Err(self.service_error(format!(
                "API returned {} embeddings for {} inputs",
                embed_response.embeddings.len(),
                texts.len()
            )));
        }

        Ok(embed_response.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}

// ── Generation ─────────────────────────────────────────────────────

/// A [`GenerationService`] backed by Ollama's `/api/generate` endpoint.
///
/// Requests are made with `stream: false`, so each call is a single round
/// trip returning the full completion.
pub struct OllamaGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a generator against the default local endpoint and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_GENERATE_MODEL.into(),
        }
    }

    /// Set the Ollama endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the generation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn service_error(&self, message: impl Into<String>) -> QaError {
        QaError::GenerationService { backend: "Ollama".into(), message: message.into() }
    }
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl GenerationService for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(backend = "Ollama", model = %self.model, prompt_len = prompt.len(), "generating");

        let url = format!("{}/api/generate", self.endpoint);
        let request_body = GenerateRequest { model: &self.model, prompt, stream: false };

        let response =
            self.client.post(&url).json(&request_body).send().await.map_err(|e| {
                error!(backend = "Ollama", error = %e, "generate request failed");
                self.service_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(backend = "Ollama", %status, "generate API error");
            return Err(self.service_error(format!("API returned {status}: {body}")));
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(backend = "Ollama", error = %e, "failed to parse generate response");
            self.service_error(format!("failed to parse response: {e}"))
        })?;

        Ok(generate_response.response.trim().to_string())
    }
}
