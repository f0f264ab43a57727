//! # Cogito Core
//!
//! Core types, errors, and traits for the cogito inference service.
//!
//! This crate provides the foundational building blocks used by all other cogito crates:
//!
//! - **Types**: Chat messages and generation parameters
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Service defaults and token budgets
//! - **Traits**: The [`InferenceProvider`] interface the API serves through
//!
//! ## Example
//!
//! ```rust
//! use cogito_core::{ChatMessage, CogitoError};
//!
//! // Types are serializable and well-documented
//! let message = ChatMessage::user("What is 17 * 23?");
//! let json = serde_json::to_string(&message).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CogitoError, Result};
pub use traits::*;
pub use types::*;
