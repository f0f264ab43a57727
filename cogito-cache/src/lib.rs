//! TTL cache for cogito model responses.
//!
//! In-memory cache with a fixed per-instance time-to-live and lazy expiry.

mod cache;

pub use cache::{CacheStats, ResponseCache};
