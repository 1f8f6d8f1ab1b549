//! Stale-time query cache for list and detail views.
//!
//! DESIGN
//! ======
//! A cached value is served until it is older than `stale_time`, after which
//! the next read refetches. Mutations invalidate the keys they affect so the
//! following read goes to the server. Locks are released before any fetch
//! runs, so concurrent misses on one key may both fetch; the later write wins.

#[cfg(test)]
#[path = "query_cache_test.rs"]
mod query_cache_test;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::net::types::Book;

/// Identifies one cached query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full book list.
    Books,
    /// A single book by id.
    Book(String),
}

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

/// Keyed cache where entries go stale after a fixed duration.
pub struct QueryCache<K, V> {
    stale_time: Duration,
    entries: Arc<Mutex<HashMap<K, Entry<V>>>>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self { stale_time: self.stale_time, entries: Arc::clone(&self.entries) }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self { stale_time, entries: Arc::new(Mutex::new(HashMap::new())) }
    }

    #[must_use]
    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Return the cached value for `key` if it is still fresh.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_time)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, Entry { value, fetched_at: Instant::now() });
    }

    /// Serve a fresh cached value, or run `fetch` and cache its success.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged; failures are never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            tracing::trace!("query cache hit");
            return Ok(value);
        }
        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drop `key`; returns whether an entry was present.
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// The list and detail caches shared by the book pages.
#[derive(Clone)]
pub struct BookQueries {
    pub list: QueryCache<(), Vec<Book>>,
    pub detail: QueryCache<String, Book>,
}

impl BookQueries {
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self { list: QueryCache::new(stale_time), detail: QueryCache::new(stale_time) }
    }

    pub fn invalidate(&self, key: &QueryKey) {
        match key {
            QueryKey::Books => {
                self.list.invalidate(&());
            }
            QueryKey::Book(id) => {
                self.detail.invalidate(id);
            }
        }
    }

    /// Forget everything, e.g. when the session changes.
    pub fn clear(&self) {
        self.list.clear();
        self.detail.clear();
    }
}
