//! # memofn core
//!
//! Building blocks for memoizing fallible unary functions.
//!
//! A memoized function wraps a *getter* `Fn(&I) -> Result<O, E>` and a
//! grow-only cache. Successful outputs are cached and replayed; errors are
//! passed through untouched and never cached, so a failed input is retried on
//! its next call.
//!
//! ## Features
//!
//! - **Identity keys**: [`Memoized`] / [`memoize`] key the cache by the input
//! - **Derived keys**: [`HashedMemoized`] / [`memoize_with_hasher`] key it by
//!   a caller-supplied function of the input
//! - **Address keys**: [`ByAddress`] keys pointer inputs by what they point at
//!   rather than by their content
//! - **Opt-in thread safety**: [`SharedMemoized`] and friends, backed by a
//!   `parking_lot::RwLock`
//! - **Statistics**: hit/miss counters and a named [`stats_registry`]
//!   (`stats` feature)
//!
//! ## Module Organization
//!
//! - [`MemoCache`] - write-once map owned by a single wrapper
//! - [`SharedMemoCache`] - the same behind a read/write lock
//! - [`Memoized`], [`HashedMemoized`] - single-threaded wrappers
//! - [`SharedMemoized`], [`SharedHashedMemoized`] - thread-safe wrappers
//! - [`ByAddress`] - identity-key adapter
//!
//! There is no eviction, expiry or invalidation: an entry lives as long as
//! the wrapper that owns it.
mod by_address;
mod hashed;
mod memo_cache;
mod memoized;
mod shared;
mod shared_cache;

#[cfg(feature = "stats")]
mod stats;

#[cfg(feature = "stats")]
pub mod stats_registry;

pub use by_address::ByAddress;
pub use hashed::{memoize_with_hasher, HashedMemoized};
pub use memo_cache::MemoCache;
pub use memoized::{memoize, Memoized};
pub use shared::{
    memoize_shared, memoize_shared_with_hasher, SharedHashedMemoized, SharedMemoized,
};
pub use shared_cache::SharedMemoCache;

#[cfg(feature = "stats")]
pub use stats::CacheStats;
