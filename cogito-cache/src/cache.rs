//! In-memory TTL cache for generated answers.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;

use cogito_core::error::{CogitoError, Result};

/// Cache entry with an absolute expiry instant.
#[derive(Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    /// An entry exactly at its expiry instant counts as expired.
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory response cache with a fixed TTL.
///
/// Thread-safe; every read past an entry's expiry behaves as a miss.
/// Expiry is lazy: stale entries stay in the map until overwritten or
/// cleared. That leaves memory unreclaimed between writes, which is
/// acceptable at the prompt cardinality this service sees but would need
/// a capacity bound at larger scale.
///
/// Keys are compared by exact string equality. No trimming, case folding,
/// or hashing happens here; identical prompts share an entry, anything
/// else does not.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a cache whose entries live for `ttl` after each write.
    ///
    /// A zero TTL is rejected: every read would miss, which in practice is
    /// a misconfiguration rather than a request to disable caching.
    /// Disabling is an explicit configuration switch in the API layer.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CogitoError::ConfigError(
                "cache TTL must be greater than zero".into(),
            ));
        }

        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        })
    }

    /// Creates a cache from a TTL in whole seconds.
    pub fn with_ttl_secs(secs: u64) -> Result<Self> {
        Self::new(Duration::from_secs(secs))
    }

    /// Returns the cached value for `key` if present and not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    /// Inserts or replaces the entry for `key`.
    ///
    /// Overwrites restamp the expiry unconditionally; the previous entry's
    /// deadline never lingers.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.set_at(key, value.into(), Instant::now());
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// TTL applied to every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let live = entries.values().filter(|e| e.is_live(now)).count();

        CacheStats {
            entries: entries.len(),
            live,
            expired: entries.len() - live,
        }
    }

    /// Lookup against an explicit observation instant.
    ///
    /// Reads never mutate the map; a stale entry is reported absent and
    /// left in place.
    fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_live(now) {
                Some(e.value.clone())
            } else {
                None
            }
        })
    }

    /// Write against an explicit write instant.
    fn set_at(&self, key: &str, value: String, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + self.ttl,
        };
        self.entries.write().insert(key.to_owned(), entry);
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    /// Entries held in the map, live and stale.
    pub entries: usize,
    /// Entries that would still answer a `get`.
    pub live: usize,
    /// Entries past their expiry, awaiting overwrite or clear.
    pub expired: usize,
}
