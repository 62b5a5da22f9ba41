use std::future::Future;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::warn;

use crate::db::DatabaseError;

/// Shared per-entity-type cache. One instance per collection lives in the
/// application state, so concurrent consumers share a single snapshot
/// instead of each fetching their own copy.
///
/// Consumers always receive a valid collection: a failed load is logged and
/// leaves the previous snapshot in place (stale-but-present). Creation
/// never refreshes the snapshot itself; it marks the cache stale so the
/// next read refetches.
pub struct EntityCache<T> {
    state: RwLock<CacheState<T>>,
}

struct CacheState<T> {
    records: Arc<Vec<T>>,
    loading: bool,
    stale: bool,
    refreshed_at: Option<OffsetDateTime>,
}

impl<T: Send + Sync> Default for EntityCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> EntityCache<T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CacheState {
                records: Arc::new(Vec::new()),
                loading: false,
                stale: true,
                refreshed_at: None,
            }),
        }
    }

    /// Current snapshot without triggering a load.
    pub async fn snapshot(&self) -> Arc<Vec<T>> {
        self.state.read().await.records.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn refreshed_at(&self) -> Option<OffsetDateTime> {
        self.state.read().await.refreshed_at
    }

    /// Mark the snapshot stale. The data stays serveable until the next
    /// read reloads it.
    pub async fn invalidate(&self) {
        self.state.write().await.stale = true;
    }

    /// Snapshot, loading first if the cache was never filled or was
    /// invalidated. A load already in flight is not duplicated; the caller
    /// gets the current (possibly stale) snapshot immediately.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Arc<Vec<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, DatabaseError>>,
    {
        {
            let state = self.state.read().await;
            if !state.stale || state.loading {
                return state.records.clone();
            }
        }
        self.refresh(load).await
    }

    /// Unconditional reload — the explicit refetch operation. On failure
    /// the previous snapshot is kept and returned.
    pub async fn refresh<F, Fut>(&self, load: F) -> Arc<Vec<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, DatabaseError>>,
    {
        {
            let mut state = self.state.write().await;
            if state.loading {
                return state.records.clone();
            }
            state.loading = true;
        }

        let result = load().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(records) => {
                state.records = Arc::new(records);
                state.stale = false;
                state.refreshed_at = Some(OffsetDateTime::now_utc());
            }
            Err(error) => {
                warn!("entity cache load failed, keeping previous snapshot: {error}");
            }
        }
        state.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn loader_ok(
        calls: &AtomicUsize,
        records: Vec<u32>,
    ) -> impl Future<Output = Result<Vec<u32>, DatabaseError>> + '_ {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok(records) }
    }

    #[tokio::test]
    async fn first_access_loads_then_serves_from_cache() {
        let cache = EntityCache::<u32>::new();
        let calls = AtomicUsize::new(0);

        let first = cache.get_or_load(|| loader_ok(&calls, vec![1, 2, 3])).await;
        assert_eq!(*first, vec![1, 2, 3]);

        let second = cache.get_or_load(|| loader_ok(&calls, vec![9])).await;
        assert_eq!(*second, vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_snapshot() {
        let cache = EntityCache::<u32>::new();
        let calls = AtomicUsize::new(0);
        cache.refresh(|| loader_ok(&calls, vec![5])).await;

        let after_failure = cache
            .refresh(|| async { Err(DatabaseError::NotFound) })
            .await;
        assert_eq!(*after_failure, vec![5]);
        assert!(!cache.is_loading().await);
    }

    #[tokio::test]
    async fn failed_initial_load_serves_empty_not_error() {
        let cache = EntityCache::<u32>::new();
        let snapshot = cache
            .get_or_load(|| async { Err(DatabaseError::NotFound) })
            .await;
        assert!(snapshot.is_empty());
        assert!(cache.refreshed_at().await.is_none());
    }

    #[tokio::test]
    async fn invalidate_causes_exactly_one_reload() {
        let cache = EntityCache::<u32>::new();
        let calls = AtomicUsize::new(0);

        cache.get_or_load(|| loader_ok(&calls, vec![1])).await;
        cache.invalidate().await;

        let reloaded = cache.get_or_load(|| loader_ok(&calls, vec![1, 2])).await;
        assert_eq!(*reloaded, vec![1, 2]);
        cache.get_or_load(|| loader_ok(&calls, vec![3])).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_snapshot_remains_serveable_before_reload() {
        let cache = EntityCache::<u32>::new();
        let calls = AtomicUsize::new(0);
        cache.get_or_load(|| loader_ok(&calls, vec![7])).await;
        cache.invalidate().await;
        assert_eq!(*cache.snapshot().await, vec![7]);
    }
}
