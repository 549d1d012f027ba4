//! Vector index trait for storing and searching chunk embeddings.

use async_trait::async_trait;

use crate::document::SearchResult;
use crate::error::Result;

/// A store of (chunk, embedding) entries with nearest-neighbor search.
///
/// The index is the single owner of all chunk and embedding data. Chunk ids
/// are assigned by the index as `{document_id}_{chunk_index}`; callers never
/// supply ids, which keeps them globally unique. Document identity is always
/// supplied by the caller — the index never infers boundaries from content.
///
/// # Example
///
/// ```rust,ignore
/// use askdoc::{InMemoryIndex, VectorIndex};
///
/// let index = InMemoryIndex::new(384);
/// index.insert("b1", chunks, embeddings).await?;
/// let results = index.query(&query_embedding, 3).await?;
/// ```
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert (or replace) the chunk set for a document.
    ///
    /// `chunks` and `embeddings` are parallel sequences. Any previous chunk
    /// set stored under `document_id` is replaced in full — re-ingestion with
    /// a smaller chunk count leaves no orphaned entries. Replacement is
    /// atomic with respect to concurrent queries: either the old set or the
    /// complete new set is visible, never a mix. An empty chunk set is a
    /// valid insert and clears the document's previous entries.
    ///
    /// Returns the number of chunks now indexed for the document.
    ///
    /// # Errors
    ///
    /// - [`QaError::DimensionMismatch`](crate::QaError::DimensionMismatch)
    ///   if the two sequences have different lengths.
    /// - [`QaError::EmbeddingDimension`](crate::QaError::EmbeddingDimension)
    ///   if any vector's length differs from [`dimensions`](Self::dimensions).
    ///
    /// A failed insert leaves the index untouched.
    async fn insert(
        &self,
        document_id: &str,
        chunks: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<usize>;

    /// Return up to `k` entries ranked by descending similarity to `embedding`.
    ///
    /// Ties are broken by ascending chunk id so results are reproducible
    /// across runs. Querying an empty index returns an empty result, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::EmbeddingDimension`](crate::QaError::EmbeddingDimension)
    /// if the query vector's length differs from [`dimensions`](Self::dimensions).
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// The fixed dimensionality of this index, set at construction.
    fn dimensions(&self) -> usize;
}
