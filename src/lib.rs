//! # askdoc
//!
//! Document question answering over an in-memory retrieval pipeline.
//!
//! Uploaded text is split into fixed-size word chunks, embedded, and stored
//! in a vector index. Questions are embedded with the same provider, the
//! most similar chunks are retrieved, and a prompt grounding the question in
//! those chunks is forwarded to a generative model.
//!
//! ## Components
//!
//! - [`WordChunker`] — positional word chunking
//! - [`VectorIndex`] / [`InMemoryIndex`] — fixed-dimensionality vector store
//!   with cosine-similarity search and replace-on-reingest semantics
//! - [`Retriever`] — top-k retrieval for a question
//! - [`ContextAssembler`] — prompt assembly with a no-context short-circuit
//! - [`QaEngine`] — the ingest/answer interface consumed by the HTTP layer
//! - [`OllamaEmbeddings`] / [`OllamaGenerator`] — collaborators against a
//!   local Ollama server
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use askdoc::{InMemoryIndex, OllamaEmbeddings, OllamaGenerator, QaConfig, QaEngine};
//!
//! let engine = QaEngine::builder()
//!     .config(QaConfig::default())
//!     .embedder(Arc::new(OllamaEmbeddings::new()))
//!     .index(Arc::new(InMemoryIndex::new(768)))
//!     .generator(Arc::new(OllamaGenerator::new()))
//!     .build()?;
//!
//! engine.ingest_document("b1", "alpha beta gamma delta").await?;
//! let answer = engine.answer_question("what comes after beta?", None).await?;
//! ```

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod generation;
pub mod index;
pub mod inmemory;
pub mod ollama;
pub mod retriever;
pub mod server;
pub mod similarity;

pub use chunking::WordChunker;
pub use config::QaConfig;
pub use context::{Assembly, ContextAssembler, NO_CONTEXT_MESSAGE};
pub use document::{Answer, Chunk, IngestReceipt, SearchResult};
pub use embedding::EmbeddingProvider;
pub use engine::{QaEngine, QaEngineBuilder};
pub use error::{QaError, Result};
pub use generation::GenerationService;
pub use index::VectorIndex;
pub use inmemory::InMemoryIndex;
pub use ollama::{OllamaEmbeddings, OllamaGenerator};
pub use retriever::{DEFAULT_TOP_K, Retriever};
pub use similarity::{CosineSimilarity, SimilarityMetric};
