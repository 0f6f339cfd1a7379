//! Memoization of fetched datasets for the lifetime of the process.

use crate::error::{DataError, Result};
use crate::source::DatasetSource;
use async_trait::async_trait;
use moka::future::Cache;
use polars::prelude::DataFrame;
use tracing::{debug, info};

/// Upper bound on cached datasets. The dashboard only ever reads one.
const DEFAULT_CAPACITY: u64 = 16;

/// A [`DatasetSource`] wrapper that fetches each dataset code once.
///
/// Concurrent readers of a code that is not cached yet share a single
/// upstream fetch. Entries never expire on their own; they are dropped only through
/// [`CachedSource::invalidate`] or [`CachedSource::invalidate_all`].
pub struct CachedSource<S> {
    inner: S,
    cache: Cache<String, DataFrame>,
}

impl<S: DatasetSource> CachedSource<S> {
    /// Wrap a source with the default capacity.
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// Wrap a source, keeping at most `capacity` datasets in memory.
    pub fn with_capacity(inner: S, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// The wrapped source.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Whether a dataset is currently held in memory.
    pub fn is_cached(&self, dataset_code: &str) -> bool {
        self.cache.contains_key(dataset_code)
    }

    /// Drop one dataset so the next read refetches it.
    pub async fn invalidate(&self, dataset_code: &str) {
        self.cache.invalidate(dataset_code).await;
        info!(dataset = dataset_code, "dataset cache entry invalidated");
    }

    /// Drop every cached dataset.
    pub async fn invalidate_all(&self) {
        let codes: Vec<_> = self.cache.iter().map(|(code, _)| code).collect();
        for code in &codes {
            self.cache.invalidate(code.as_str()).await;
        }
        info!(entries = codes.len(), "dataset cache cleared");
    }
}

#[async_trait]
impl<S: DatasetSource> DatasetSource for CachedSource<S> {
    async fn fetch_wide(&self, dataset_code: &str) -> Result<DataFrame> {
        let fetch = async {
            let frame = self.inner.fetch_wide(dataset_code).await?;
            debug!(dataset = dataset_code, "dataset cached");
            Ok::<_, DataError>(frame)
        };

        self.cache
            .try_get_with(dataset_code.to_string(), fetch)
            .await
            .map_err(DataError::from_shared)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CachedSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSource")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAYLOAD: &str = "unit,nrg_bal,geo\\TIME_PERIOD\t2022 \n\
                           PC,REN,SE\t66.0 \n";

    fn cached() -> CachedSource<StaticSource> {
        CachedSource::new(StaticSource::from_tsv(PAYLOAD).unwrap())
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_memory() {
        let source = cached();

        let first = source.fetch_wide("nrg_ind_ren").await.unwrap();
        let second = source.fetch_wide("nrg_ind_ren").await.unwrap();

        assert!(first.equals(&second));
        assert_eq!(source.inner().calls(), 1);
        assert!(source.is_cached("nrg_ind_ren"));
    }

    #[tokio::test]
    async fn test_codes_are_cached_independently() {
        let source = cached();

        source.fetch_wide("nrg_ind_ren").await.unwrap();
        source.fetch_wide("nrg_bal_s").await.unwrap();
        source.fetch_wide("nrg_ind_ren").await.unwrap();

        assert_eq!(source.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = cached();

        source.fetch_wide("nrg_ind_ren").await.unwrap();
        source.invalidate("nrg_ind_ren").await;
        assert!(!source.is_cached("nrg_ind_ren"));

        source.fetch_wide("nrg_ind_ren").await.unwrap();
        assert_eq!(source.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_refetch() {
        let source = cached();

        source.fetch_wide("nrg_ind_ren").await.unwrap();
        source.invalidate_all().await;
        source.fetch_wide("nrg_ind_ren").await.unwrap();

        assert_eq!(source.inner().calls(), 2);
    }

    /// Yields to the runtime a few times before answering, so concurrent
    /// readers all arrive while the first fetch is still in flight.
    #[derive(Default)]
    struct SlowSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DatasetSource for SlowSource {
        async fn fetch_wide(&self, dataset_code: &str) -> Result<DataFrame> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            StaticSource::from_tsv(PAYLOAD)?.fetch_wide(dataset_code).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_cold_reads_share_one_fetch() {
        let source = CachedSource::new(SlowSource::default());

        let (a, b, c) = tokio::join!(
            source.fetch_wide("nrg_ind_ren"),
            source.fetch_wide("nrg_ind_ren"),
            source.fetch_wide("nrg_ind_ren"),
        );

        assert_eq!(a.unwrap().height(), 1);
        assert_eq!(b.unwrap().height(), 1);
        assert_eq!(c.unwrap().height(), 1);
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 1);
    }

    struct FailingSource;

    #[async_trait]
    impl DatasetSource for FailingSource {
        async fn fetch_wide(&self, _dataset_code: &str) -> Result<DataFrame> {
            Err(DataError::Http("HTTP 503 Service Unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let source = CachedSource::new(FailingSource);

        let err = source.fetch_wide("nrg_ind_ren").await.unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
        assert!(!source.is_cached("nrg_ind_ren"));
    }
}
