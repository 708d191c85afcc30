use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::memo_cache::ANONYMOUS;

#[cfg(feature = "stats")]
use crate::CacheStats;
#[cfg(feature = "stats")]
use std::sync::Arc;

/// Grow-only cache that can be read and filled through a shared reference.
///
/// Same write-once semantics as [`MemoCache`](crate::MemoCache), with the map
/// behind a `parking_lot::RwLock`: lookups take the read lock and may run
/// concurrently, inserts take the write lock. `SharedMemoCache<K, V>` is
/// `Send + Sync` whenever `K` and `V` are.
///
/// Locks are held only for the map operation itself, never across a getter
/// call made by [`SharedMemoized`](crate::SharedMemoized).
///
/// # Examples
///
/// ```
/// use memofn_core::SharedMemoCache;
/// use std::sync::Arc;
/// use std::thread;
///
/// let cache: Arc<SharedMemoCache<u32, u32>> = Arc::new(SharedMemoCache::new());
///
/// let writer = Arc::clone(&cache);
/// thread::spawn(move || writer.insert(1, 10)).join().unwrap();
///
/// assert_eq!(cache.get(&1), Some(10));
/// assert!(!cache.insert(1, 20));
/// ```
pub struct SharedMemoCache<K, V> {
    map: RwLock<HashMap<K, V>>,
    name: Option<String>,
    #[cfg(feature = "stats")]
    stats: Arc<CacheStats>,
}

impl<K, V> SharedMemoCache<K, V> {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            name: None,
            #[cfg(feature = "stats")]
            stats: Arc::new(CacheStats::new()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Names the cache for logging and, with `stats`, registers its statistics.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        #[cfg(feature = "stats")]
        {
            crate::stats_registry::register(&name, Arc::clone(&self.stats));
            log::debug!("registered stats for shared cache `{}`", name);
        }
        self.name = Some(name);
    }

    fn label(&self) -> &str {
        self.name().unwrap_or(ANONYMOUS)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<K: Eq + Hash, V: Clone> SharedMemoCache<K, V> {
    /// Looks up `key` under the read lock and records a hit or a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // Read lock released at the end of the statement
        let value = self.map.read().get(key).cloned();

        #[cfg(feature = "stats")]
        {
            if value.is_some() {
                self.stats.record_hit();
            } else {
                self.stats.record_miss();
            }
        }

        if value.is_some() {
            log::trace!("shared cache `{}`: hit", self.label());
        } else {
            log::trace!("shared cache `{}`: miss", self.label());
        }

        value
    }

    /// Stores `value` under `key` unless another value got there first.
    ///
    /// Returns `true` if this call inserted the entry.
    pub fn insert(&self, key: K, value: V) -> bool {
        let mut map = self.map.write();
        match map.entry(key) {
            Entry::Occupied(_) => {
                log::trace!("shared cache `{}`: entry already filled", self.label());
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.read().contains_key(key)
    }
}

impl<K, V> Default for SharedMemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
