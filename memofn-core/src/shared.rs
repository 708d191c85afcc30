//! Thread-safe memoizing wrappers.
//!
//! [`Memoized`](crate::Memoized) and [`HashedMemoized`](crate::HashedMemoized)
//! need `&mut self` and so cannot be called from several threads at once.
//! The wrappers here take `&self`, keep their entries in a
//! [`SharedMemoCache`], and can be put behind an `Arc` or a `static`.
//!
//! The getter runs without any lock held. Two threads that miss on the same
//! key at the same time may therefore both run the getter; the first
//! successful insert is kept and later ones are dropped. Each caller still
//! gets the output its own getter call produced.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::SharedMemoCache;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// Thread-safe counterpart of [`Memoized`](crate::Memoized).
///
/// # Examples
///
/// ```
/// use memofn_core::SharedMemoized;
/// use std::sync::Arc;
/// use std::thread;
///
/// let cube = Arc::new(SharedMemoized::new(|n: &u64| Ok::<_, ()>(n * n * n)));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let cube = Arc::clone(&cube);
///         thread::spawn(move || cube.call(3))
///     })
///     .collect();
///
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), Ok(27));
/// }
/// assert_eq!(cube.len(), 1);
/// ```
pub struct SharedMemoized<I, O, G> {
    getter: G,
    cache: SharedMemoCache<I, O>,
}

impl<I, O, G> SharedMemoized<I, O, G>
where
    I: Eq + Hash,
    O: Clone,
{
    pub fn new<E>(getter: G) -> Self
    where
        G: Fn(&I) -> Result<O, E>,
    {
        Self {
            getter,
            cache: SharedMemoCache::new(),
        }
    }

    /// Names the wrapper for logging and the stats registry.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cache.set_name(name);
        self
    }

    /// Same contract as [`Memoized::call`](crate::Memoized::call), through `&self`.
    pub fn call<E>(&self, input: I) -> Result<O, E>
    where
        G: Fn(&I) -> Result<O, E>,
    {
        if let Some(output) = self.cache.get(&input) {
            return Ok(output);
        }

        let output = (self.getter)(&input)?;
        self.cache.insert(input, output.clone());
        Ok(output)
    }

    pub fn into_fn<E>(self) -> impl Fn(I) -> Result<O, E>
    where
        G: Fn(&I) -> Result<O, E>,
    {
        move |input| self.call(input)
    }

    pub fn is_cached<Q>(&self, input: &Q) -> bool
    where
        I: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.contains_key(input)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.cache.name()
    }

    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

/// Thread-safe counterpart of [`HashedMemoized`](crate::HashedMemoized).
///
/// The hasher runs once per call, hit or miss, outside of any lock.
pub struct SharedHashedMemoized<K, O, G, H> {
    getter: G,
    hasher: H,
    cache: SharedMemoCache<K, O>,
}

impl<K, O, G, H> SharedHashedMemoized<K, O, G, H>
where
    K: Eq + Hash,
    O: Clone,
{
    pub fn new<I, E>(getter: G, hasher: H) -> Self
    where
        G: Fn(&I) -> Result<O, E>,
        H: Fn(&I) -> K,
    {
        Self {
            getter,
            hasher,
            cache: SharedMemoCache::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cache.set_name(name);
        self
    }

    /// Same contract as [`HashedMemoized::call`](crate::HashedMemoized::call), through `&self`.
    pub fn call<I, E>(&self, input: I) -> Result<O, E>
    where
        G: Fn(&I) -> Result<O, E>,
        H: Fn(&I) -> K,
    {
        let key = (self.hasher)(&input);
        if let Some(output) = self.cache.get(&key) {
            return Ok(output);
        }

        let output = (self.getter)(&input)?;
        self.cache.insert(key, output.clone());
        Ok(output)
    }

    pub fn into_fn<I, E>(self) -> impl Fn(I) -> Result<O, E>
    where
        G: Fn(&I) -> Result<O, E>,
        H: Fn(&I) -> K,
    {
        move |input| self.call(input)
    }

    pub fn is_cached_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.cache.name()
    }

    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

/// Thread-safe [`memoize`](crate::memoize): the returned closure is `Fn` and
/// is `Send + Sync` whenever the getter, input and output types are.
pub fn memoize_shared<I, O, E, G>(getter: G) -> impl Fn(I) -> Result<O, E>
where
    I: Eq + Hash,
    O: Clone,
    G: Fn(&I) -> Result<O, E>,
{
    SharedMemoized::new(getter).into_fn()
}

/// Thread-safe [`memoize_with_hasher`](crate::memoize_with_hasher).
pub fn memoize_shared_with_hasher<I, K, O, E, G, H>(
    getter: G,
    hasher: H,
) -> impl Fn(I) -> Result<O, E>
where
    K: Eq + Hash,
    O: Clone,
    G: Fn(&I) -> Result<O, E>,
    H: Fn(&I) -> K,
{
    SharedHashedMemoized::new(getter, hasher).into_fn()
}
