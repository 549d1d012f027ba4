//! Generation service trait for producing answers from assembled prompts.

use async_trait::async_trait;

use crate::error::Result;

/// A generative model invoked with a fully assembled prompt.
///
/// One blocking round trip per call; streaming is out of scope here. The
/// prompt is forwarded verbatim — see
/// [`ContextAssembler`](crate::context::ContextAssembler) for the trust
/// boundary around its contents.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
