//! Positional word chunking.
//!
//! [`WordChunker`] splits raw text on whitespace and groups consecutive
//! tokens into fixed-size chunks. Boundaries are purely positional — there is
//! no sentence or semantic awareness. That is a deliberate simplicity/quality
//! tradeoff of this pipeline, documented here rather than fixed silently.

use crate::error::{QaError, Result};

/// Splits text into chunks of a fixed number of whitespace-delimited tokens.
///
/// The final chunk holds the remainder (between 1 and `chunk_size` tokens).
/// Text with zero tokens yields an empty sequence, not an error.
///
/// # Example
///
/// ```rust,ignore
/// use askdoc::WordChunker;
///
/// let chunker = WordChunker::new(2)?;
/// let chunks: Vec<String> = chunker.chunks("alpha beta gamma delta").collect();
/// assert_eq!(chunks, ["alpha beta", "gamma delta"]);
/// ```
#[derive(Debug, Clone)]
pub struct WordChunker {
    chunk_size: usize,
}

impl WordChunker {
    /// Create a new `WordChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(QaError::Config("chunk_size must be greater than zero".to_string()));
        }
        Ok(Self { chunk_size })
    }

    /// The number of tokens per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Lazily iterate over the chunks of `text`.
    ///
    /// Each call returns a fresh iterator; there is no shared iteration
    /// state, so chunking is restartable.
    pub fn chunks<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks { words: text.split_whitespace(), chunk_size: self.chunk_size }
    }
}

/// Lazy iterator over the chunks of a text, produced by [`WordChunker::chunks`].
///
/// Tokens within a chunk are joined by a single space.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    words: std::str::SplitWhitespace<'a>,
    chunk_size: usize,
}

impl Iterator for Chunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut chunk = String::new();
        let mut taken = 0;
        while taken < self.chunk_size {
            match self.words.next() {
                Some(word) => {
                    if taken > 0 {
                        chunk.push(' ');
                    }
                    chunk.push_str(word);
                    taken += 1;
                }
                None => break,
            }
        }
        if taken == 0 { None } else { Some(chunk) }
    }
}
