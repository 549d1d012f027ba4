//! Configuration for the question-answering engine.

use serde::{Deserialize, Serialize};

use crate::error::{QaError, Result};
use crate::retriever::DEFAULT_TOP_K;

/// Configuration parameters for the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaConfig {
    /// Number of whitespace-delimited tokens per chunk.
    pub chunk_size: usize,
    /// Number of top results to retrieve per question.
    pub top_k: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self { chunk_size: 500, top_k: DEFAULT_TOP_K }
    }
}

impl QaConfig {
    /// Create a new builder for constructing a [`QaConfig`].
    pub fn builder() -> QaConfigBuilder {
        QaConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`QaConfig`].
#[derive(Debug, Clone, Default)]
pub struct QaConfigBuilder {
    config: QaConfig,
}

impl QaConfigBuilder {
    /// Set the number of tokens per chunk.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the number of top results to retrieve per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`QaConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if `chunk_size` or `top_k` is zero.
    pub fn build(self) -> Result<QaConfig> {
        if self.config.chunk_size == 0 {
            return Err(QaError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.top_k == 0 {
            return Err(QaError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
