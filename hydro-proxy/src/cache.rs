//! Memoizing response bodies for a fixed time.
//!
//! Entries are keyed by a request signature (route path, plus the query
//! string where it matters) and hold a serialized body. Expired entries are
//! swept out whenever a fresh body is stored, so keys that are never asked
//! for again don't linger. Two requests racing on the same cold key may
//! both compute; the later insert wins.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use log::*;

struct CacheEntry {
    body: String,
    expires_at: Instant
}

/// Thread-safe response cache with per-entry expiry.
#[derive(Default)]
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of entries held, live or not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Return the cached body for `key`, or run `compute` and cache its
    /// result for `ttl`.
    ///
    /// Failures from `compute` are passed through and not cached.
    pub fn get_or_compute<F, E>(&self, key: &str, ttl: Duration, compute: F) -> Result<String, E>
        where F: FnOnce() -> Result<String, E> {
        self.get_or_compute_at(key, ttl, Instant::now(), compute)
    }
    /// Like `get_or_compute`, but with an explicit notion of "now".
    pub fn get_or_compute_at<F, E>(&self, key: &str, ttl: Duration, now: Instant, compute: F) -> Result<String, E>
        where F: FnOnce() -> Result<String, E> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                debug!("Cache hit for {}", key);
                return Ok(entry.body.clone());
            }
        }
        if self.entries.remove_if(key, |_, e| e.expires_at <= now).is_some() {
            debug!("Cache entry for {} expired", key);
        }
        debug!("Cache miss for {}", key);
        let body = compute()?;
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        let swept = before.saturating_sub(self.entries.len());
        if swept > 0 {
            debug!("Swept {} expired cache entries", swept);
        }
        self.entries.insert(key.to_owned(), CacheEntry {
            body: body.clone(),
            expires_at: now + ttl
        });
        Ok(body)
    }
}
