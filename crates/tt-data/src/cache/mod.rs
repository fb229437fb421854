//! Deduplicating, time-limited cache for upstream fetches
//!
//! Each key is either absent, pending, or ready. Callers that arrive while a
//! fetch is pending join it instead of starting another; a ready value is
//! served until its TTL runs out. A failed fetch removes its key so the next
//! call starts over.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use ahash::AHashMap;
use tokio::time::Instant;

use crate::DataError;

/// Handle to a cached or in-flight fetch.
///
/// Cloning is cheap; every clone resolves to the same result.
pub type CachedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>, DataError>>>;

type Entries<T> = Mutex<AHashMap<String, CacheEntry<T>>>;

enum CacheEntry<T> {
    Pending {
        generation: u64,
        fetch: CachedFetch<T>,
    },
    Ready {
        value: Arc<T>,
        fetched_at: Instant,
    },
}

/// Fetch cache keyed by endpoint
pub struct FetchCache<T> {
    entries: Arc<Entries<T>>,
    generation: AtomicU64,
}

impl<T: Send + Sync + 'static> FetchCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(AHashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the value for `key`, fetching it only when needed.
    ///
    /// - a value younger than `ttl` is returned without calling `fetcher`;
    /// - a pending fetch is joined and the same handle returned;
    /// - otherwise `fetcher` runs when the handle is first polled, and its
    ///   result either becomes the cached value or evicts the key.
    pub fn get_or_fetch<F, Fut>(&self, key: &str, fetcher: F, ttl: Duration) -> CachedFetch<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DataError>> + Send + 'static,
    {
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(CacheEntry::Ready { value, fetched_at }) if fetched_at.elapsed() < ttl => {
                tracing::debug!("Cache hit for {}", key);
                return ready(Arc::clone(value));
            }
            Some(CacheEntry::Pending { fetch, .. }) => {
                tracing::debug!("Joining in-flight fetch for {}", key);
                return fetch.clone();
            }
            _ => {}
        }

        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let fetch = settle(Arc::downgrade(&self.entries), key.to_string(), generation, fetcher);
        entries.insert(
            key.to_string(),
            CacheEntry::Pending {
                generation,
                fetch: fetch.clone(),
            },
        );
        fetch
    }

    /// Drop whatever is stored for `key`
    pub fn invalidate(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    /// Drop everything
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of pending or ready keys
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Whether `key` is currently being fetched
    pub fn is_pending(&self, key: &str) -> bool {
        matches!(self.entries.lock().get(key), Some(CacheEntry::Pending { .. }))
    }
}

impl<T: Send + Sync + 'static> Default for FetchCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn ready<T: Send + Sync + 'static>(value: Arc<T>) -> CachedFetch<T> {
    futures::future::ready(Ok(value)).boxed().shared()
}

/// Wrap `fetcher` so its outcome is written back to the cache.
///
/// The write only happens if the key still holds this generation's pending
/// entry; an invalidation or a newer fetch in the meantime wins.
fn settle<T, F, Fut>(entries: Weak<Entries<T>>, key: String, generation: u64, fetcher: F) -> CachedFetch<T>
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, DataError>> + Send + 'static,
{
    async move {
        tracing::debug!("Fetching {}", key);
        let result = fetcher().await.map(Arc::new);

        if let Some(entries) = entries.upgrade() {
            let mut entries = entries.lock();
            let current = matches!(
                entries.get(&key),
                Some(CacheEntry::Pending { generation: g, .. }) if *g == generation
            );
            if current {
                match &result {
                    Ok(value) => {
                        entries.insert(
                            key.clone(),
                            CacheEntry::Ready {
                                value: Arc::clone(value),
                                fetched_at: Instant::now(),
                            },
                        );
                    }
                    Err(e) => {
                        tracing::error!("Fetch of {} failed: {}", key, e);
                        entries.remove(&key);
                    }
                }
            }
        }

        result
    }
    .boxed()
    .shared()
}
