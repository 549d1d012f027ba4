//! Data types for chunks, search results, and engine outputs.

use serde::{Deserialize, Serialize};

/// A bounded span of a document's text, the unit of retrieval.
///
/// Chunk ids are assigned by the index as `{document_id}_{chunk_index}` and
/// are globally unique across all indexed documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier, derived as `{document_id}_{chunk_index}`.
    pub id: String,
    /// The ID of the owning document.
    pub document_id: String,
    /// Position of this chunk within its document.
    pub chunk_index: usize,
    /// The text content of the chunk.
    pub text: String,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// Outcome of a successful document ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReceipt {
    /// The document that was ingested.
    pub document_id: String,
    /// Number of chunks now indexed for the document.
    pub chunk_count: usize,
}

/// The engine's response to a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The generated answer, or the fixed no-context message.
    pub answer: String,
    /// The retrieval results that grounded the answer, in ranked order.
    /// Empty when nothing relevant was found.
    pub supporting_chunks: Vec<SearchResult>,
}
