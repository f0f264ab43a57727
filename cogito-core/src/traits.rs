//! Common traits for cogito.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// INFERENCE PROVIDER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface to a text-generation backend.
///
/// Implementations might use:
/// - A remote OpenAI-compatible engine (vLLM, TGI, llama.cpp server)
/// - A stub returning canned answers (for testing)
///
/// Completions are expensive and fallible; callers are expected to memoize
/// results rather than paying for repeated identical prompts.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Generates an answer for the given prompt.
    ///
    /// Returns the final answer text only; intermediate reasoning output
    /// stays inside the provider.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Short backend identifier for logs.
    fn name(&self) -> &'static str;
}
