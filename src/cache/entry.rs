//! Cache Entry Module
//!
//! Defines the single cached user list together with its expiry.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::upstream::User;

// == Cache Entry ==
/// A snapshot of the upstream user list with its expiration time.
///
/// Entries are immutable: a refresh replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached users, shared with every reader
    pub data: Arc<Vec<User>>,
    /// When the entry was stored
    pub created_at: Instant,
    /// When the entry stops being served
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored now that lives for `ttl`.
    pub fn new(data: Vec<User>, ttl: Duration) -> Self {
        Self::created_at(data, Instant::now(), ttl)
    }

    /// Creates an entry as if stored at `created_at`.
    pub fn created_at(data: Vec<User>, created_at: Instant, ttl: Duration) -> Self {
        Self {
            data: Arc::new(data),
            created_at,
            expires_at: created_at + ttl,
        }
    }

    // == Validity ==
    /// An entry is valid strictly before its expiration time.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at
            .saturating_duration_since(Instant::now())
            .as_millis() as u64
    }
}
