//! Stable cache keys.

use std::fmt;

use axon_core::models::QueryOptions;

/// blake3 hash of the query text plus the canonical options form.
/// Stable across processes; safe as a persistence key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn compute(query: &str, options: &QueryOptions) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(query.trim().as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(options.cache_fingerprint().as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_query_and_options_hash_identically() {
        let opts = QueryOptions::default();
        assert_eq!(
            CacheKey::compute("find auth", &opts),
            CacheKey::compute("find auth ", &opts)
        );
    }

    #[test]
    fn different_limits_hash_differently() {
        let a = QueryOptions::default();
        let b = QueryOptions {
            limit: 50,
            ..Default::default()
        };
        assert_ne!(CacheKey::compute("q", &a), CacheKey::compute("q", &b));
    }

    #[test]
    fn bypass_cache_does_not_change_the_key() {
        let a = QueryOptions::default();
        let b = QueryOptions {
            bypass_cache: true,
            ..Default::default()
        };
        assert_eq!(CacheKey::compute("q", &a), CacheKey::compute("q", &b));
    }
}
