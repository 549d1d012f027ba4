//! askdoc server binary.
//!
//! Wires the Ollama collaborators and an in-memory index into a [`QaEngine`]
//! and serves the HTTP surface. Configuration comes from the environment:
//!
//! - `ASKDOC_ADDR` — listen address (default `127.0.0.1:8000`)
//! - `ASKDOC_CHUNK_SIZE` — tokens per chunk (default `500`)
//! - `ASKDOC_EMBED_MODEL` / `ASKDOC_EMBED_DIMENSIONS` — embedding model
//!   (default `nomic-embed-text`, 768 dimensions)
//! - `ASKDOC_GENERATE_MODEL` — generation model (default `tinyllama:1.1b`)
//! - `OLLAMA_ENDPOINT` — Ollama base URL (default `http://127.0.0.1:11434`)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use askdoc::server::{AppState, PlainTextExtractor, serve};
use askdoc::{InMemoryIndex, OllamaEmbeddings, OllamaGenerator, QaConfig, QaEngine};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let endpoint = env_or("OLLAMA_ENDPOINT", askdoc::ollama::DEFAULT_ENDPOINT);
    let embed_model = env_or("ASKDOC_EMBED_MODEL", "nomic-embed-text");
    let embed_dimensions: usize = env_or("ASKDOC_EMBED_DIMENSIONS", "768")
        .parse()
        .context("ASKDOC_EMBED_DIMENSIONS must be a positive integer")?;
    let generate_model = env_or("ASKDOC_GENERATE_MODEL", "tinyllama:1.1b");
    let chunk_size: usize = env_or("ASKDOC_CHUNK_SIZE", "500")
        .parse()
        .context("ASKDOC_CHUNK_SIZE must be a positive integer")?;

    let config = QaConfig::builder().chunk_size(chunk_size).build()?;

    let embedder = Arc::new(
        OllamaEmbeddings::new()
            .with_endpoint(endpoint.as_str())
            .with_model(embed_model, embed_dimensions),
    );
    let generator = Arc::new(
        OllamaGenerator::new().with_endpoint(endpoint.as_str()).with_model(generate_model),
    );
    let index = Arc::new(InMemoryIndex::new(embed_dimensions));

    let engine = QaEngine::builder()
        .config(config)
        .embedder(embedder)
        .index(index)
        .generator(generator)
        .build()?;

    let state = AppState { engine: Arc::new(engine), extractor: Arc::new(PlainTextExtractor) };

    let addr: SocketAddr = env_or("ASKDOC_ADDR", "127.0.0.1:8000")
        .parse()
        .context("ASKDOC_ADDR must be a socket address")?;

    serve(state, addr).await?;
    Ok(())
}
