//! Process-wide lookup of cache statistics by name.
//!
//! A memoized function shows up here once it is given a name with
//! `with_name`. The registry holds an `Arc` to the same [`CacheStats`] the
//! cache records into, so readings stay live for as long as the entry is
//! registered, even after the wrapper itself has been dropped.
//!
//! ```
//! use memofn_core::{stats_registry, Memoized};
//!
//! let mut square = Memoized::new(|n: &u32| Ok::<_, ()>(n * n)).with_name("docs_square");
//! square.call(4).unwrap();
//! square.call(4).unwrap();
//!
//! let stats = stats_registry::get("docs_square").unwrap();
//! assert_eq!(stats.hits(), 1);
//! assert_eq!(stats.misses(), 1);
//! ```

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::CacheStats;

static STATS_REGISTRY: Lazy<RwLock<HashMap<String, Arc<CacheStats>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers `stats` under `name`, replacing whatever was registered there before.
pub fn register(name: &str, stats: Arc<CacheStats>) {
    let mut registry = STATS_REGISTRY.write();
    if registry.insert(name.to_string(), stats).is_some() {
        log::debug!("stats for cache `{}` replaced a previous registration", name);
    }
}

/// Returns a snapshot of the statistics registered under `name`.
pub fn get(name: &str) -> Option<CacheStats> {
    let registry = STATS_REGISTRY.read();
    registry.get(name).map(|stats| (**stats).clone())
}

/// Returns the live statistics registered under `name`.
pub fn get_arc(name: &str) -> Option<Arc<CacheStats>> {
    let registry = STATS_REGISTRY.read();
    registry.get(name).cloned()
}

/// Names of every registered cache, in no particular order.
pub fn list() -> Vec<String> {
    let registry = STATS_REGISTRY.read();
    registry.keys().cloned().collect()
}

/// Drops every registration. The statistics themselves are left as they are.
pub fn clear() {
    STATS_REGISTRY.write().clear();
}

/// Zeroes the counters registered under `name`.
///
/// Returns `false` if nothing is registered under that name.
pub fn reset(name: &str) -> bool {
    let registry = STATS_REGISTRY.read();
    match registry.get(name) {
        Some(stats) => {
            stats.reset();
            true
        }
        None => false,
    }
}
