//! User Cache Module
//!
//! Single-slot, time-expiring cache in front of the upstream user list.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheSnapshot, CacheStats};
use crate::upstream::{UpstreamClient, UpstreamError, User, UserSource};

#[derive(Debug, Default)]
struct CacheSlot {
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

// == User Cache ==
/// Serves the upstream user list with bounded staleness.
///
/// The slot lock is released while the upstream call is in flight, so
/// concurrent misses each fetch independently and the last write wins.
/// Failed fetches never touch the stored entry and stale data is never
/// served in their place.
#[derive(Debug)]
pub struct UserCache<S = UpstreamClient> {
    source: S,
    ttl: Duration,
    slot: RwLock<CacheSlot>,
}

impl<S: UserSource> UserCache<S> {
    // == Constructor ==
    /// Creates an empty cache over `source` whose entries live for `ttl`.
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: RwLock::new(CacheSlot::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get Users ==
    /// Returns the cached list if still valid, otherwise refreshes it from upstream.
    pub async fn get_users(&self) -> Result<Arc<Vec<User>>, UpstreamError> {
        {
            let mut slot = self.slot.write().await;
            let now = Instant::now();
            let cached = slot
                .entry
                .as_ref()
                .filter(|entry| entry.is_valid_at(now))
                .map(|entry| Arc::clone(&entry.data));

            if let Some(data) = cached {
                slot.stats.record_hit();
                debug!("User cache hit ({} users)", data.len());
                return Ok(data);
            }
            slot.stats.record_miss();
        }

        debug!("User cache miss, fetching from upstream");
        match self.source.fetch_list().await {
            Ok(users) => {
                let entry = CacheEntry::new(users, self.ttl);
                let data = Arc::clone(&entry.data);

                let mut slot = self.slot.write().await;
                slot.entry = Some(entry);
                slot.stats.record_refresh();
                info!(
                    "User cache refreshed with {} users, ttl={}ms",
                    data.len(),
                    self.ttl.as_millis()
                );
                Ok(data)
            }
            Err(err) => {
                self.slot.write().await.stats.record_failure();
                warn!("User cache refresh failed: {}", err);
                Err(err)
            }
        }
    }

    // == Get User By Id ==
    /// Looks a single user up directly upstream. Never cached.
    pub async fn get_user_by_id(&self, id: u64) -> Result<Option<User>, UpstreamError> {
        let user = self.source.fetch_by_id(id).await;
        match &user {
            Ok(None) => debug!("User {} not found upstream", id),
            Err(err) => warn!("Upstream lookup for user {} failed: {}", id, err),
            Ok(Some(_)) => {}
        }
        user
    }

    // == Snapshot ==
    /// Returns counters plus the state of the current entry.
    pub async fn snapshot(&self) -> CacheSnapshot {
        let slot = self.slot.read().await;
        let live = slot.entry.as_ref().filter(|entry| !entry.is_expired());

        CacheSnapshot {
            stats: slot.stats.clone(),
            cached_users: live.map(|entry| entry.data.len()),
            ttl_remaining_ms: live.map(CacheEntry::ttl_remaining_ms),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    const TTL: Duration = Duration::from_secs(60);

    /// Upstream stand-in that counts calls and replays queued list results.
    ///
    /// Once the queue is empty, call `n` answers `[{"call": n}]`.
    #[derive(Default)]
    struct ScriptedSource {
        list_calls: AtomicUsize,
        by_id_calls: AtomicUsize,
        queued: Mutex<VecDeque<Result<Vec<User>, UpstreamError>>>,
        delay: Option<Duration>,
    }

    impl ScriptedSource {
        fn with_delay(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }

        fn push(&self, result: Result<Vec<User>, UpstreamError>) {
            self.queued.lock().unwrap().push_back(result);
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    impl UserSource for ScriptedSource {
        fn fetch_list(&self) -> impl Future<Output = Result<Vec<User>, UpstreamError>> + Send {
            async move {
                let call = self.list_calls.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                let next = self.queued.lock().unwrap().pop_front();
                next.unwrap_or_else(|| Ok(vec![json!({ "call": call })]))
            }
        }

        fn fetch_by_id(
            &self,
            id: u64,
        ) -> impl Future<Output = Result<Option<User>, UpstreamError>> + Send {
            async move {
                self.by_id_calls.fetch_add(1, Ordering::SeqCst);
                if id == 999 {
                    Ok(None)
                } else {
                    Ok(Some(json!({ "id": id })))
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_within_ttl_is_a_hit() {
        let cache = UserCache::new(ScriptedSource::default(), TTL);

        let first = assert_ok!(cache.get_users().await);
        let second = assert_ok!(cache.get_users().await);

        assert_eq!(cache.source().list_calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_valid_just_before_expiry() {
        let cache = UserCache::new(ScriptedSource::default(), TTL);

        cache.get_users().await.unwrap();
        tokio::time::advance(TTL - Duration::from_millis(1)).await;
        cache.get_users().await.unwrap();

        assert_eq!(cache.source().list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refetched() {
        let cache = UserCache::new(ScriptedSource::default(), TTL);

        let first = cache.get_users().await.unwrap();
        tokio::time::advance(TTL).await;
        let second = cache.get_users().await.unwrap();

        assert_eq!(cache.source().list_calls(), 2);
        assert_eq!(first[0]["call"], 1);
        assert_eq!(second[0]["call"], 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_not_cached() {
        let source = ScriptedSource::default();
        source.push(Err(UpstreamError::Status { status: 500 }));
        let cache = UserCache::new(source, TTL);

        let err = assert_err!(cache.get_users().await);
        assert_eq!(err.status(), Some(500));

        let users = assert_ok!(cache.get_users().await);
        assert_eq!(users[0]["call"], 2);
        assert_eq!(cache.source().list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_stale_data_after_failed_refresh() {
        let source = ScriptedSource::default();
        source.push(Ok(vec![json!({ "id": 1, "name": "cached" })]));
        source.push(Err(UpstreamError::Timeout(Duration::from_millis(5000))));
        let cache = UserCache::new(source, TTL);

        cache.get_users().await.unwrap();
        tokio::time::advance(TTL + Duration::from_millis(1)).await;

        let err = assert_err!(cache.get_users().await);
        assert!(err.is_timeout());

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.cached_users, None);
        assert_eq!(snapshot.stats.upstream_failures, 1);

        let users = cache.get_users().await.unwrap();
        assert_eq!(users[0]["call"], 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_user_by_id_bypasses_cache() {
        let cache = UserCache::new(ScriptedSource::default(), TTL);

        let user = cache.get_user_by_id(4).await.unwrap();
        assert_eq!(user, Some(json!({ "id": 4 })));
        cache.get_user_by_id(4).await.unwrap();

        assert_eq!(cache.source().by_id_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.source().list_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_user_by_id_not_found_is_none() {
        let cache = UserCache::new(ScriptedSource::default(), TTL);

        let user = assert_ok!(cache.get_user_by_id(999).await);
        assert!(user.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_each_fetch() {
        let cache = UserCache::new(ScriptedSource::with_delay(Duration::from_millis(100)), TTL);

        let (a, b) = tokio::join!(cache.get_users(), cache.get_users());
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(cache.source().list_calls(), 2);

        // Whichever write landed last is now served.
        cache.get_users().await.unwrap();
        assert_eq!(cache.source().list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_reports_entry_and_counters() {
        let cache = UserCache::new(ScriptedSource::default(), TTL);

        let empty = cache.snapshot().await;
        assert_eq!(empty.cached_users, None);
        assert_eq!(empty.ttl_remaining_ms, None);

        cache.get_users().await.unwrap();
        cache.get_users().await.unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.stats.hits, 1);
        assert_eq!(snapshot.stats.misses, 1);
        assert_eq!(snapshot.stats.refreshes, 1);
        assert_eq!(snapshot.cached_users, Some(1));
        assert_eq!(snapshot.ttl_remaining_ms, Some(50_000));
    }
}
