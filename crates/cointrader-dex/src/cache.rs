use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::trace;

/// Read-through response cache, keyed by the arguments of the call it wraps.
///
/// Entries live as long as the cache does; there is no expiry.
#[derive(Debug, Clone)]
pub struct Cache<K, V> {
    data: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.data.lock().await.get(key).cloned()
    }

    pub async fn insert(&self, key: K, value: V) {
        self.data.lock().await.insert(key, value);
    }

    pub async fn len(&self) -> usize {
        self.data.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.lock().await.is_empty()
    }

    /// Return the cached value for `key`, or run `fetch`, store and return its output.
    ///
    /// The lock is not held while `fetch` runs.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(hit) = self.get(&key).await {
            trace!("cache hit: {key:?}");
            return hit;
        }
        trace!("cache miss: {key:?}");
        let value = fetch().await;
        self.insert(key, value.clone()).await;
        value
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
