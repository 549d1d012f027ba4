//! Question-answering engine.
//!
//! The [`QaEngine`] composes the chunker, embedding provider, vector index,
//! retriever, context assembler, and generation service into the two
//! operations the serving layer consumes: [`ingest_document`](QaEngine::ingest_document)
//! and [`answer_question`](QaEngine::answer_question).
//!
//! All services are dependency-injected through the builder — constructed
//! once at process start and shared by handle — so tests can substitute
//! doubles and run in isolation.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use askdoc::{InMemoryIndex, QaConfig, QaEngine};
//!
//! let engine = QaEngine::builder()
//!     .config(QaConfig::default())
//!     .embedder(Arc::new(my_embedder))
//!     .index(Arc::new(InMemoryIndex::new(768)))
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! engine.ingest_document("b1", &text).await?;
//! let answer = engine.answer_question("what is this about?", None).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::WordChunker;
use crate::config::QaConfig;
use crate::context::{Assembly, ContextAssembler, NO_CONTEXT_MESSAGE};
use crate::document::{Answer, IngestReceipt};
use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::generation::GenerationService;
use crate::index::VectorIndex;
use crate::retriever::Retriever;

/// The question-answering engine.
///
/// Write path: raw text → chunker → embedding provider → index.
/// Read path: question → retriever → context assembler → generation service,
/// with a short-circuit that never forwards an empty-context prompt.
pub struct QaEngine {
    config: QaConfig,
    chunker: WordChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn GenerationService>,
    retriever: Retriever,
    assembler: ContextAssembler,
}

impl std::fmt::Debug for QaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QaEngine").field("config", &self.config).finish_non_exhaustive()
    }
}

impl QaEngine {
    /// Create a new [`QaEngineBuilder`].
    pub fn builder() -> QaEngineBuilder {
        QaEngineBuilder::default()
    }

    /// Return a reference to the engine configuration.
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Return a reference to the vector index.
    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.index
    }

    /// Ingest a document: chunk → embed → insert.
    ///
    /// Re-ingesting an existing `document_id` replaces its previous chunk
    /// set in full. Ingestion is all-or-nothing: a failure anywhere leaves
    /// the index exactly as it was. Text with zero tokens is a valid
    /// ingestion that indexes nothing (and clears any previous chunk set
    /// under this id).
    ///
    /// # Errors
    ///
    /// Propagates [`QaError::EmbeddingService`] from the embedding
    /// collaborator and the structural insert errors from the index.
    pub async fn ingest_document(&self, document_id: &str, raw_text: &str) -> Result<IngestReceipt> {
        let chunks: Vec<String> = self.chunker.chunks(raw_text).collect();

        let embeddings = if chunks.is_empty() {
            Vec::new()
        } else {
            let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
            self.embedder.embed_batch(&texts).await.map_err(|e| {
                error!(document_id, error = %e, "embedding failed during ingestion");
                e
            })?
        };

        let chunk_count = self.index.insert(document_id, chunks, embeddings).await?;
        info!(document_id, chunk_count, "ingested document");

        Ok(IngestReceipt { document_id: document_id.to_string(), chunk_count })
    }

    /// Answer a question from the indexed documents.
    ///
    /// Retrieves the top `top_k` chunks (the configured default when
    /// `None`), assembles the prompt, and calls the generation service. If
    /// retrieval finds nothing, returns the fixed
    /// [`NO_CONTEXT_MESSAGE`] with no supporting chunks — the generation
    /// service is not called in that case.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] for an explicit `top_k` of zero, and
    /// propagates collaborator errors verbatim.
    pub async fn answer_question(&self, question: &str, top_k: Option<usize>) -> Result<Answer> {
        let k = match top_k {
            Some(0) => {
                return Err(QaError::Config("top_k must be greater than zero".to_string()));
            }
            Some(k) => k,
            None => self.config.top_k,
        };

        let results = self.retriever.retrieve(question, k).await?;

        match self.assembler.assemble(question, &results) {
            Assembly::NoContext => {
                info!("no relevant context found");
                Ok(Answer {
                    answer: NO_CONTEXT_MESSAGE.to_string(),
                    supporting_chunks: Vec::new(),
                })
            }
            Assembly::Prompt(prompt) => {
                let answer = self.generator.generate(&prompt).await.map_err(|e| {
                    error!(error = %e, "generation failed");
                    e
                })?;
                info!(supporting = results.len(), "answered question");
                Ok(Answer { answer, supporting_chunks: results })
            }
        }
    }
}

/// Builder for constructing a [`QaEngine`].
///
/// The embedder, index, and generator are required; the config defaults to
/// [`QaConfig::default`]. [`build()`](QaEngineBuilder::build) validates that
/// the embedder and index agree on dimensionality.
#[derive(Default)]
pub struct QaEngineBuilder {
    config: Option<QaConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    generator: Option<Arc<dyn GenerationService>>,
}

impl QaEngineBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: QaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the generation service.
    pub fn generator(mut self, generator: Arc<dyn GenerationService>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`QaEngine`], validating that all required services are set
    /// and structurally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if a required service is missing or if
    /// the embedder's dimensionality differs from the index's.
    pub fn build(self) -> Result<QaEngine> {
        let config = self.config.unwrap_or_default();
        let embedder =
            self.embedder.ok_or_else(|| QaError::Config("embedder is required".to_string()))?;
        let index = self.index.ok_or_else(|| QaError::Config("index is required".to_string()))?;
        let generator =
            self.generator.ok_or_else(|| QaError::Config("generator is required".to_string()))?;

        if embedder.dimensions() != index.dimensions() {
            return Err(QaError::Config(format!(
                "embedder produces {}-dimensional vectors but the index expects {}",
                embedder.dimensions(),
                index.dimensions()
            )));
        }

        let chunker = WordChunker::new(config.chunk_size)?;
        let retriever = Retriever::new(Arc::clone(&embedder), Arc::clone(&index));

        Ok(QaEngine {
            config,
            chunker,
            embedder,
            index,
            generator,
            retriever,
            assembler: ContextAssembler,
        })
    }
}
