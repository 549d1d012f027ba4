//! Error types for the `askdoc` crate.

use thiserror::Error;

/// Errors that can occur in the retrieval pipeline.
///
/// The structural variants ([`DimensionMismatch`](QaError::DimensionMismatch)
/// and [`EmbeddingDimension`](QaError::EmbeddingDimension)) are fatal to the
/// ingestion call that produced them and never leave the index partially
/// mutated. Collaborator variants propagate to the caller verbatim; the core
/// never retries silently.
#[derive(Debug, Error)]
pub enum QaError {
    /// Chunk and embedding counts differ on insert.
    #[error("Dimension mismatch: {chunks} chunks but {embeddings} embeddings")]
    DimensionMismatch {
        /// Number of chunks supplied.
        chunks: usize,
        /// Number of embedding vectors supplied.
        embeddings: usize,
    },

    /// A vector's dimensionality does not match the index.
    #[error("Embedding dimension error: index expects {expected}, got {actual}")]
    EmbeddingDimension {
        /// The index's fixed dimensionality.
        expected: usize,
        /// The dimensionality of the offending vector.
        actual: usize,
    },

    /// The embedding collaborator was unreachable or returned malformed output.
    #[error("Embedding service error ({provider}): {message}")]
    EmbeddingService {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The generation collaborator was unreachable or returned malformed output.
    #[error("Generation service error ({backend}): {message}")]
    GenerationService {
        /// The generation backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, QaError>;
