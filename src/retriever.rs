//! Question retrieval against a vector index.

use std::sync::Arc;

use tracing::{debug, error};

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::index::VectorIndex;

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Embeds a question and queries a [`VectorIndex`] for the top-k chunks.
///
/// The retriever makes exactly one embedding call per question and returns
/// the index's ranking unchanged. It does not interpret an empty result —
/// that is the caller's responsibility.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    /// Create a retriever over the given embedding provider and index.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Retrieve the `k` most relevant chunks for `question`.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::EmbeddingService`] if the embedding collaborator is
    /// unreachable or returns a malformed vector (wrong dimensionality or
    /// non-finite components). Collaborator failures propagate verbatim —
    /// they are never swallowed or retried here.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<SearchResult>> {
        let embedding = self.embedder.embed(question).await.map_err(|e| {
            error!(error = %e, "question embedding failed");
            e
        })?;

        let expected = self.index.dimensions();
        if embedding.len() != expected {
            return Err(QaError::EmbeddingService {
                provider: self.embedder.name().to_string(),
                message: format!(
                    "embedding has {} dimensions, index expects {expected}",
                    embedding.len()
                ),
            });
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(QaError::EmbeddingService {
                provider: self.embedder.name().to_string(),
                message: "embedding contains non-finite components".to_string(),
            });
        }

        let results = self.index.query(&embedding, k).await?;
        debug!(k, result_count = results.len(), "retrieved chunks");
        Ok(results)
    }
}
