//! In-process response cache.
//!
//! The dataset is read-mostly, so identical statements within the TTL are
//! answered from memory. Entries are keyed on the finished template plus its
//! bound values and expire lazily on lookup.

use async_trait::async_trait;
use sea_orm::JsonValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::database::QueryExecutor;
use crate::errors::ApiError;
use crate::query::PreparedQuery;

struct CachedRows {
    stored_at: Instant,
    rows: Arc<Vec<JsonValue>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub size: usize,
}

/// Wraps another executor and remembers its results for `ttl`.
pub struct CachedExecutor<E> {
    inner: E,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedRows>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<E: QueryExecutor> CachedExecutor<E> {
    #[must_use]
    pub fn new(inner: E, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn key(query: &PreparedQuery) -> String {
        format!("{}\n{:?}", query.sql(), query.binds())
    }

    fn lookup(&self, key: &str) -> Option<Arc<Vec<JsonValue>>> {
        // a poisoned lock only costs a cache miss
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(cached) if cached.stored_at.elapsed() < self.ttl => Some(Arc::clone(&cached.rows)),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn store(&self, key: String, rows: Arc<Vec<JsonValue>>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CachedRows {
                    stored_at: Instant::now(),
                    rows,
                },
            );
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let size = self.entries.lock().map_or(0, |entries| entries.len());
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size,
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

#[async_trait]
impl<E: QueryExecutor> QueryExecutor for CachedExecutor<E> {
    async fn fetch_all(&self, query: &PreparedQuery) -> Result<Vec<JsonValue>, ApiError> {
        let key = Self::key(query);
        if let Some(rows) = self.lookup(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("response cache hit");
            return Ok(rows.as_ref().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        // errors are never cached
        let rows = self.inner.fetch_all(query).await?;
        self.store(key, Arc::new(rows.clone()));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::continent;
    use crate::params::ParameterSet;
    use serde_json::json;

    /// Counts calls and answers with the call number.
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QueryExecutor for Counting {
        async fn fetch_all(&self, _query: &PreparedQuery) -> Result<Vec<JsonValue>, ApiError> {
            let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
            Ok(vec![json!({ "call": call })])
        }
    }

    fn continent_query(id: &str) -> PreparedQuery {
        continent::find_by_id(&ParameterSet::new().with("id", id)).unwrap()
    }

    #[tokio::test]
    async fn test_repeated_query_is_served_from_memory() {
        let cache = CachedExecutor::new(Counting::default(), Duration::from_secs(60));

        let first = cache.fetch_all(&continent_query("AFR")).await.unwrap();
        let second = cache.fetch_all(&continent_query("AFR")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.inner.calls.load(Ordering::Relaxed), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                size: 1
            }
        );
    }

    #[tokio::test]
    async fn test_different_binds_are_different_entries() {
        let cache = CachedExecutor::new(Counting::default(), Duration::from_secs(60));

        cache.fetch_all(&continent_query("AFR")).await.unwrap();
        let other = cache.fetch_all(&continent_query("ASI")).await.unwrap();
        assert_eq!(other, vec![json!({ "call": 2 })]);
        assert_eq!(cache.stats().size, 2);
    }

    #[tokio::test]
    async fn test_expired_entries_are_refetched() {
        let cache = CachedExecutor::new(Counting::default(), Duration::ZERO);

        cache.fetch_all(&continent_query("AFR")).await.unwrap();
        let again = cache.fetch_all(&continent_query("AFR")).await.unwrap();
        assert_eq!(again, vec![json!({ "call": 2 })]);
        assert_eq!(cache.stats().hits, 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = CachedExecutor::new(Counting::default(), Duration::from_secs(60));
        cache.fetch_all(&continent_query("AFR")).await.unwrap();
        cache.clear();
        assert_eq!(cache.stats().size, 0);
    }
}
