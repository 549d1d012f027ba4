//! In-memory vector index using cosine similarity.
//!
//! This module provides [`InMemoryIndex`], a vector index backed by a
//! `HashMap` keyed by document id and protected by a `tokio::sync::RwLock`.
//! Keying by document makes replace-on-reingest a single map insert, so a
//! concurrent query sees either a document's old chunk set or its complete
//! new one, never a partial mix.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{QaError, Result};
use crate::index::VectorIndex;
use crate::similarity::{CosineSimilarity, SimilarityMetric};

/// An indexed chunk with its embedding.
#[derive(Debug, Clone)]
struct Entry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// An in-memory [`VectorIndex`] with a swappable similarity metric.
///
/// Dimensionality is fixed at construction and every inserted vector must
/// match it exactly. Entries are staged and validated before the write lock
/// is taken, so a failed or cancelled insert leaves the previous state
/// visible; the write section itself is a single map insert. Queries take
/// the read lock and proceed fully in parallel.
///
/// # Example
///
/// ```rust,ignore
/// use askdoc::{InMemoryIndex, VectorIndex};
///
/// let index = InMemoryIndex::new(384);
/// let count = index.insert("b1", chunks, embeddings).await?;
/// ```
pub struct InMemoryIndex {
    dimensions: usize,
    metric: Arc<dyn SimilarityMetric>,
    documents: RwLock<HashMap<String, Vec<Entry>>>,
}

impl InMemoryIndex {
    /// Create an index of the given fixed dimensionality, scored by
    /// [`CosineSimilarity`].
    pub fn new(dimensions: usize) -> Self {
        Self::with_metric(dimensions, Arc::new(CosineSimilarity))
    }

    /// Create an index with a custom similarity metric.
    pub fn with_metric(dimensions: usize, metric: Arc<dyn SimilarityMetric>) -> Self {
        Self { dimensions, metric, documents: RwLock::new(HashMap::new()) }
    }

    /// Total number of chunks currently indexed, across all documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.values().map(Vec::len).sum()
    }

    /// Whether the index holds no chunks at all.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn insert(
        &self,
        document_id: &str,
        chunks: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<usize> {
        if chunks.len() != embeddings.len() {
            return Err(QaError::DimensionMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }
        if let Some(bad) = embeddings.iter().find(|e| e.len() != self.dimensions) {
            return Err(QaError::EmbeddingDimension {
                expected: self.dimensions,
                actual: bad.len(),
            });
        }

        // Stage the full entry set before taking the lock; all validation is
        // done by this point, so the write section cannot fail part-way.
        let entries: Vec<Entry> = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| Entry {
                chunk: Chunk {
                    id: format!("{document_id}_{i}"),
                    document_id: document_id.to_string(),
                    chunk_index: i,
                    text,
                },
                embedding,
            })
            .collect();

        let count = entries.len();
        let mut documents = self.documents.write().await;
        documents.insert(document_id.to_string(), entries);
        Ok(count)
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if embedding.len() != self.dimensions {
            return Err(QaError::EmbeddingDimension {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        let documents = self.documents.read().await;
        let mut scored: Vec<SearchResult> = documents
            .values()
            .flatten()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: self.metric.score(&entry.embedding, embedding),
            })
            .collect();

        // Descending score; ascending chunk id on ties keeps ranking
        // reproducible across runs.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        scored.truncate(k);
        Ok(scored)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
