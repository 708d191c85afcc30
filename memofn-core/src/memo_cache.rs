use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "stats")]
use crate::CacheStats;
#[cfg(feature = "stats")]
use std::sync::Arc;

/// Label used in log lines for caches that were never named.
pub(crate) const ANONYMOUS: &str = "<anonymous>";

/// Grow-only map from keys to previously computed values.
///
/// `MemoCache` is the storage behind [`Memoized`](crate::Memoized) and
/// [`HashedMemoized`](crate::HashedMemoized). Each cache is owned by exactly
/// one wrapper and lives as long as that wrapper does.
///
/// Entries are write-once: [`insert`](Self::insert) on a key that is already
/// present leaves the stored value alone. There is no way to remove or
/// replace an entry, so every key moves from *absent* to *present* at most
/// once.
///
/// The cache uses no synchronization. Mutation requires `&mut self`; for a
/// cache that can be shared across threads see
/// [`SharedMemoCache`](crate::SharedMemoCache).
///
/// # Examples
///
/// ```
/// use memofn_core::MemoCache;
///
/// let mut cache: MemoCache<String, u32> = MemoCache::new();
/// assert_eq!(cache.get("answer"), None);
///
/// assert!(cache.insert("answer".to_string(), 42));
/// assert!(!cache.insert("answer".to_string(), 7)); // first value stays
/// assert_eq!(cache.get("answer"), Some(42));
/// ```
pub struct MemoCache<K, V> {
    entries: HashMap<K, V>,
    name: Option<String>,
    #[cfg(feature = "stats")]
    stats: Arc<CacheStats>,
}

impl<K, V> MemoCache<K, V> {
    /// Creates an empty, unnamed cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            name: None,
            #[cfg(feature = "stats")]
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// The name given with [`set_name`](Self::set_name), if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Names the cache.
    ///
    /// The name shows up in log output. With the `stats` feature enabled the
    /// cache's statistics are also registered in the
    /// [`stats_registry`](crate::stats_registry) under this name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        #[cfg(feature = "stats")]
        {
            crate::stats_registry::register(&name, Arc::clone(&self.stats));
            log::debug!("registered stats for cache `{}`", name);
        }
        self.name = Some(name);
    }

    pub(crate) fn label(&self) -> &str {
        self.name().unwrap_or(ANONYMOUS)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit/miss statistics of this cache.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<K: Eq + Hash, V: Clone> MemoCache<K, V> {
    /// Looks up `key`, returning a clone of the stored value.
    ///
    /// Every lookup counts as a hit or a miss in [`stats`](Self::stats).
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.entries.get(key).cloned();

        #[cfg(feature = "stats")]
        {
            if value.is_some() {
                self.stats.record_hit();
            } else {
                self.stats.record_miss();
            }
        }

        if value.is_some() {
            log::trace!("cache `{}`: hit", self.label());
        } else {
            log::trace!("cache `{}`: miss", self.label());
        }

        value
    }

    /// Stores `value` under `key` unless the key is already present.
    ///
    /// Returns `true` if the entry was inserted, `false` if an earlier value
    /// was kept.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Whether `key` has an entry. Does not count towards statistics.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_insert_get() {
        let mut cache = MemoCache::new();
        cache.insert(1u32, "one".to_string());
        assert_eq!(cache.get(&1), Some("one".to_string()));
    }

    #[test]
    fn test_missing_key() {
        let cache: MemoCache<u32, u32> = MemoCache::new();
        assert_eq!(cache.get(&7), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_existing_key_is_not_replaced() {
        let mut cache = MemoCache::new();
        assert!(cache.insert("key", 1));
        assert!(!cache.insert("key", 2));
        assert_eq!(cache.get("key"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut cache = MemoCache::new();
        cache.insert("owned".to_string(), 5);
        assert!(cache.contains_key("owned"));
        assert_eq!(cache.get("owned"), Some(5));
    }

    #[test]
    fn test_unnamed_cache_label() {
        let cache: MemoCache<u8, u8> = MemoCache::default();
        assert_eq!(cache.name(), None);
        assert_eq!(cache.label(), ANONYMOUS);
    }

    #[test]
    #[cfg(feature = "stats")]
    fn test_stats_hits_and_misses() {
        let mut cache: MemoCache<u8, u8> = MemoCache::new();
        let _ = cache.get(&1u8);
        cache.insert(1u8, 10u8);
        let _ = cache.get(&1u8);
        let _ = cache.get(&1u8);

        assert_eq!(cache.stats().hits(), 2);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    #[cfg(feature = "stats")]
    fn test_contains_key_does_not_record() {
        let mut cache = MemoCache::new();
        cache.insert(1u8, 1u8);
        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));
        assert_eq!(cache.stats().total_accesses(), 0);
    }

    #[test]
    #[cfg(feature = "stats")]
    #[serial_test::serial]
    fn test_set_name_registers_stats() {
        let mut cache: MemoCache<u8, u8> = MemoCache::new();
        cache.set_name("memo_cache_named");
        assert_eq!(cache.name(), Some("memo_cache_named"));

        let _ = cache.get(&3);
        let registered = crate::stats_registry::get_arc("memo_cache_named").unwrap();
        assert_eq!(registered.misses(), 1);
    }
}
