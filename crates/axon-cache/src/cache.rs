//! The cache itself: strict LRU under a byte budget.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use lru::LruCache;
use tracing::{debug, trace};

use axon_core::config::CacheConfig;
use axon_core::errors::CacheError;
use axon_core::models::stats::CacheStats;
use axon_core::models::QueryResponse;

use crate::key::CacheKey;

/// One cached result snapshot.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: QueryResponse,
    pub inserted_at: DateTime<Utc>,
    pub size_bytes: usize,
    /// Paths the snapshot touches, for targeted invalidation.
    pub touched_paths: Vec<String>,
}

struct Inner {
    lru: LruCache<String, CacheEntry>,
    used_bytes: usize,
}

/// Bounded result cache. Eviction is strict LRU: inserting past the byte
/// budget pops least-recently-used entries until the new entry fits. An
/// entry larger than the whole budget is refused (counted, not an error
/// the pipeline surfaces).
pub struct QueryCache {
    inner: Mutex<Inner>,
    budget_bytes: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    oversize_rejections: AtomicU64,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_budget(config.budget_bytes)
    }

    pub fn with_budget(budget_bytes: usize) -> Self {
        Self {
            // The LRU list itself is unbounded by entry count; the byte
            // budget is the only capacity control.
            inner: Mutex::new(Inner {
                lru: LruCache::unbounded(),
                used_bytes: 0,
            }),
            budget_bytes,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            oversize_rejections: AtomicU64::new(0),
        }
    }

    /// Look up a cached response, promoting the entry to most recent.
    /// A poisoned lock means a writer panicked mid-update and the cached
    /// state can no longer be trusted; that surfaces as an error rather
    /// than a miss.
    pub fn get(&self, key: &CacheKey) -> Result<Option<QueryResponse>, CacheError> {
        let mut inner = self.inner.lock().map_err(|_| CacheError::Poisoned)?;
        match inner.lru.get(key.as_str()) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(key = %key, "cache hit");
                Ok(Some(entry.response.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// Store a response snapshot. Evicts LRU entries until the budget is
    /// satisfied; refuses entries that can never fit.
    pub fn insert(
        &self,
        key: CacheKey,
        response: &QueryResponse,
        touched_paths: Vec<String>,
    ) -> Result<(), CacheError> {
        let size_bytes = serde_json::to_vec(response)
            .map_err(|e| CacheError::Sizing {
                reason: e.to_string(),
            })?
            .len();
        if size_bytes > self.budget_bytes {
            self.oversize_rejections.fetch_add(1, Ordering::Relaxed);
            return Err(CacheError::EntryExceedsBudget {
                size: size_bytes,
                budget: self.budget_bytes,
            });
        }

        let entry = CacheEntry {
            response: response.clone(),
            inserted_at: Utc::now(),
            size_bytes,
            touched_paths,
        };

        let mut inner = self.inner.lock().map_err(|_| CacheError::Poisoned)?;
        // Replacing an existing entry releases its bytes first.
        if let Some(old) = inner.lru.pop(key.as_str()) {
            inner.used_bytes -= old.size_bytes;
        }
        while inner.used_bytes + size_bytes > self.budget_bytes {
            match inner.lru.pop_lru() {
                Some((_, evicted)) => {
                    inner.used_bytes -= evicted.size_bytes;
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    debug!(freed = evicted.size_bytes, "cache entry evicted");
                }
                None => break,
            }
        }
        inner.used_bytes += size_bytes;
        inner.lru.put(key.as_str().to_string(), entry);
        Ok(())
    }

    /// Remove entries touching any of `paths`; with `None`, clear
    /// everything. Returns the number of entries removed.
    pub fn invalidate(&self, paths: Option<&[String]>) -> usize {
        let Ok(mut inner) = self.inner.lock() else {
            return 0;
        };
        match paths {
            None => {
                let removed = inner.lru.len();
                inner.lru.clear();
                inner.used_bytes = 0;
                debug!(removed, "cache cleared");
                removed
            }
            Some(paths) => {
                let doomed: Vec<String> = inner
                    .lru
                    .iter()
                    .filter(|(_, entry)| {
                        entry
                            .touched_paths
                            .iter()
                            .any(|p| paths.iter().any(|q| p == q))
                    })
                    .map(|(k, _)| k.clone())
                    .collect();
                for key in &doomed {
                    if let Some(entry) = inner.lru.pop(key) {
                        inner.used_bytes -= entry.size_bytes;
                    }
                }
                debug!(removed = doomed.len(), "cache entries invalidated by path");
                doomed.len()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.lru.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn memory_bytes(&self) -> usize {
        self.inner.lock().map(|i| i.used_bytes).unwrap_or(0)
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            entries: self.len(),
            memory_bytes: self.memory_bytes(),
            budget_bytes: self.budget_bytes,
            hits,
            misses,
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
            evictions: self.evictions.load(Ordering::Relaxed),
            oversize_rejections: self.oversize_rejections.load(Ordering::Relaxed),
        }
    }
}
