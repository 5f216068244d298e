//! Cache Module
//!
//! Single-entry, TTL-bound cache for the upstream user list.

mod entry;
mod stats;
mod users;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheSnapshot, CacheStats};
pub use users::UserCache;
