//! Service-wide constants and defaults.

/// Default time-to-live for cached responses, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 500;

/// Answer served to the client when inference fails.
///
/// This string is cached like any successful answer, so identical prompts
/// replay it until the entry expires.
pub const FALLBACK_ANSWER: &str = "Something went wrong. Please try again in a while.";

/// HTTP header carrying the pre-shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Default model identifier requested from the upstream engine.
pub const DEFAULT_MODEL: &str = "KingNish/Reasoning-0.5b";

/// Token budget for the reasoning pass.
pub const MAX_REASONING_TOKENS: u32 = 1024;

/// Token budget for the final answer pass.
pub const MAX_RESPONSE_TOKENS: u32 = 512;
