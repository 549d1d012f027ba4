//! Prompt assembly from retrieved chunks.
//!
//! The assembled prompt interpolates the question and the retrieved chunk
//! texts verbatim. Nothing is escaped or truncated here: the prompt is
//! untrusted input to the generation collaborator, and any hardening
//! (escaping, truncation, injection filtering) is a policy layered above
//! this core.

use crate::document::SearchResult;

/// Fixed answer rendered when retrieval produced no context.
pub const NO_CONTEXT_MESSAGE: &str = "I couldn't find anything relevant in the document.";

/// The outcome of assembling a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembly {
    /// A complete prompt ready for the generation service.
    Prompt(String),
    /// Retrieval produced nothing; no prompt may be sent. Callers render
    /// [`NO_CONTEXT_MESSAGE`] instead of calling the generation service,
    /// which avoids wasting a generation call on empty context.
    NoContext,
}

/// Composes retrieved chunks and a question into a generation prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    /// Assemble a prompt from ranked results.
    ///
    /// Chunk texts are joined in exactly the order given (ranked, not
    /// re-sorted), separated by a blank line. An empty result yields
    /// [`Assembly::NoContext`].
    pub fn assemble(&self, question: &str, results: &[SearchResult]) -> Assembly {
        if results.is_empty() {
            return Assembly::NoContext;
        }

        let context =
            results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");

        Assembly::Prompt(format!(
            "Answer the question based on the context below.\n\nContext:\n{context}\n\nQuestion: {question}\n\nAnswer:"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Chunk;

    fn result(id: &str, text: &str, score: f32) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: id.to_string(),
                document_id: "doc".to_string(),
                chunk_index: 0,
                text: text.to_string(),
            },
            score,
        }
    }

    #[test]
    fn empty_results_signal_no_context() {
        let assembly = ContextAssembler.assemble("what is this?", &[]);
        assert_eq!(assembly, Assembly::NoContext);
    }

    #[test]
    fn prompt_embeds_context_and_question_verbatim() {
        let results = [result("d_0", "gamma delta", 0.9)];
        let Assembly::Prompt(prompt) = ContextAssembler.assemble("what comes third?", &results)
        else {
            panic!("expected a prompt");
        };
        assert!(prompt.contains("Context:\ngamma delta"));
        assert!(prompt.contains("Question: what comes third?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn chunks_appear_in_ranked_order_separated_by_blank_lines() {
        let results = [
            result("d_2", "third chunk", 0.9),
            result("d_0", "first chunk", 0.8),
            result("d_1", "second chunk", 0.7),
        ];
        let Assembly::Prompt(prompt) = ContextAssembler.assemble("q", &results) else {
            panic!("expected a prompt");
        };
        assert!(prompt.contains("third chunk\n\nfirst chunk\n\nsecond chunk"));
    }
}
