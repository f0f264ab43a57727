//! Upstream inference client for cogito.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (vLLM, TGI,
//! llama.cpp server) and implements the two-pass reasoning recipe: first
//! elicit the model's reasoning, then ask for the final answer with that
//! reasoning in context.

mod provider;

pub use provider::{UpstreamConfig, UpstreamProvider};
