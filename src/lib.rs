//! # memofn
//!
//! Memoization for fallible unary functions.
//!
//! Hand [`memoize`] a function `Fn(&I) -> Result<O, E>` and get back a
//! function of the same shape that remembers every successful output.
//! Repeating an input skips the computation; an `Err` is returned as-is and
//! never remembered, so the next call with that input computes again.
//!
//! ## Quick Start
//!
//! ```rust
//! use memofn::memoize;
//! use std::cell::Cell;
//!
//! #[derive(PartialEq, Eq, Hash)]
//! struct Payload {
//!     a: i32,
//!     b: i32,
//! }
//!
//! let calls = Cell::new(0);
//! let mut sum = memoize(|p: &Payload| {
//!     calls.set(calls.get() + 1);
//!     Ok::<_, String>(p.a + p.b)
//! });
//!
//! assert_eq!(sum(Payload { a: 1, b: 2 }), Ok(3));
//! assert_eq!(sum(Payload { a: 1, b: 2 }), Ok(3));
//! assert_eq!(calls.get(), 1);
//! ```
//!
//! ## Derived Keys
//!
//! When the input is not hashable, or several inputs should share one
//! entry, key the cache with a function of the input:
//!
//! ```rust
//! use memofn::memoize_with_hasher;
//!
//! struct Pair {
//!     a: u8,
//!     b: u8,
//! }
//!
//! let mut sum = memoize_with_hasher(
//!     |p: &Pair| Ok::<_, ()>(p.a as i32 + p.b as i32),
//!     |p: &Pair| (p.a as i16) << 8 | p.b as i16,
//! );
//!
//! assert_eq!(sum(Pair { a: 1, b: 2 }), Ok(3));
//! ```
//!
//! The hasher runs on every call. Inputs that derive the same key get the
//! same cached output, whichever of them computed it.
//!
//! ## Keying by Address
//!
//! References, `Box`, `Rc` and `Arc` compare by content. Wrap them in
//! [`ByAddress`] to cache per allocation instead:
//!
//! ```rust
//! use memofn::{ByAddress, Memoized};
//!
//! struct Payload {
//!     a: i32,
//!     b: i32,
//! }
//!
//! let p0 = Payload { a: 1, b: 2 };
//! let p1 = Payload { a: 1, b: 2 };
//! let mut sum = Memoized::new(|p: &ByAddress<&Payload>| Ok::<_, ()>(p.a + p.b));
//!
//! sum.call(ByAddress(&p0)).unwrap();
//! sum.call(ByAddress(&p1)).unwrap();
//! assert_eq!(sum.len(), 2);
//! ```
//!
//! ## Threads
//!
//! [`memoize`] and [`memoize_with_hasher`] return `FnMut` closures with no
//! locking. [`memoize_shared`] and [`memoize_shared_with_hasher`] return `Fn`
//! closures over a lock-guarded cache that may be shared between threads.
//!
//! ## Error Handling
//!
//! The wrappers add no error type of their own:
//!
//! ```rust
//! use memofn::memoize;
//!
//! let mut parse = memoize(|s: &String| s.parse::<i32>());
//!
//! assert!(parse("x".to_string()).is_err()); // not cached
//! assert_eq!(parse("42".to_string()), Ok(42)); // cached
//! ```

pub use memofn_core::*;

/// Snapshot of the statistics of the memoized function named `name`.
///
/// Functions are named with `with_name`; unnamed ones are not tracked here.
///
/// # Examples
///
/// ```rust
/// use memofn::{stats_for, Memoized};
///
/// let mut double = Memoized::new(|n: &u32| Ok::<_, ()>(n * 2)).with_name("docs_double");
/// double.call(1).unwrap();
///
/// let stats = stats_for("docs_double").unwrap();
/// assert_eq!(stats.misses(), 1);
/// ```
#[cfg(feature = "stats")]
pub fn stats_for(name: &str) -> Option<CacheStats> {
    stats_registry::get(name)
}

/// Zeroes the statistics of the memoized function named `name`.
///
/// Returns `false` if no function was registered under that name. The cached
/// entries themselves are kept.
#[cfg(feature = "stats")]
pub fn reset_stats(name: &str) -> bool {
    stats_registry::reset(name)
}
