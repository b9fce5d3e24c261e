//! Content-addressed cache of formatting results.
//!
//! Entries are keyed by a hash of the raw (unformatted) content, so two
//! segments with identical text share one entry. Eviction is a full clear:
//! when the configured capacity is reached, `set` empties the cache before
//! inserting. Entries are cheap to regenerate, so the cold-cache churn is
//! acceptable.

use rustc_hash::FxHashMap;

/// Modulus for the rolling content hash.
const HASH_MODULUS: u64 = 2_147_483_647; // 2^31 - 1

/// A bounded store mapping raw content to its formatted text.
#[derive(Debug)]
pub struct FormatCache {
    enabled: bool,
    max_entries: usize,
    entries: FxHashMap<String, String>,
}

impl FormatCache {
    /// Create a cache. A disabled cache turns `get` and `set` into no-ops.
    pub fn new(enabled: bool, max_entries: usize) -> Self {
        Self {
            enabled,
            max_entries,
            entries: FxHashMap::default(),
        }
    }

    /// Derive the cache key for raw content.
    ///
    /// A deterministic, order- and case-sensitive 31-bit rolling hash over
    /// the content's bytes, rendered as a decimal string. A collision maps
    /// different content onto one entry, yielding a wrong cached result for
    /// one of them; that risk is accepted as rare and low-cost.
    pub fn cache_key(content: &str) -> String {
        let mut hash: u64 = 0;
        for &b in content.as_bytes() {
            hash = (hash * 31 + u64::from(b)) % HASH_MODULUS;
        }
        hash.to_string()
    }

    /// Look up the formatted text for raw content.
    pub fn get(&self, content: &str) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.entries
            .get(&Self::cache_key(content))
            .map(String::as_str)
    }

    /// Store a formatting result, clearing the whole cache first when the
    /// entry count has reached capacity.
    pub fn set(&mut self, content: &str, formatted: String) {
        if !self.enabled {
            return;
        }
        if self.entries.len() >= self.max_entries {
            tracing::debug!(entries = self.entries.len(), "format cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(Self::cache_key(content), formatted);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
