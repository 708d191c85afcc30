use std::borrow::Borrow;
use std::hash::Hash;

use crate::MemoCache;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// Memoized function whose cache is keyed by a key derived from the input.
///
/// Works like [`Memoized`](crate::Memoized), except that the cache key for an
/// input is `hasher(&input)` rather than the input itself. The input type
/// therefore needs no `Eq` or `Hash` of its own, and nothing about the
/// original input is retained once the call returns.
///
/// The hasher runs exactly once per [`call`](Self::call), on hits as well as
/// misses, because the key has to exist before the cache can be consulted.
/// It must be deterministic.
///
/// Two inputs that derive the same key share one entry: whichever succeeds
/// first fills it, and later inputs with that key get the stored output
/// without the getter running for them. Choosing a hasher without unwanted
/// collisions is up to the caller.
///
/// # Examples
///
/// ```
/// use memofn_core::HashedMemoized;
///
/// struct Pair {
///     a: u8,
///     b: u8,
/// }
///
/// let mut sum = HashedMemoized::new(
///     |p: &Pair| Ok::<_, ()>(p.a as i32 + p.b as i32),
///     |p: &Pair| (p.a as i16) << 8 | p.b as i16,
/// );
///
/// assert_eq!(sum.call(Pair { a: 1, b: 2 }), Ok(3));
/// assert!(sum.is_cached_key(&0x0102));
/// ```
pub struct HashedMemoized<K, O, G, H> {
    getter: G,
    hasher: H,
    cache: MemoCache<K, O>,
}

impl<K, O, G, H> HashedMemoized<K, O, G, H>
where
    K: Eq + Hash,
    O: Clone,
{
    /// Wraps `getter`, keying its cache with `hasher`.
    pub fn new<I, E>(getter: G, hasher: H) -> Self
    where
        G: FnMut(&I) -> Result<O, E>,
        H: Fn(&I) -> K,
    {
        Self {
            getter,
            hasher,
            cache: MemoCache::new(),
        }
    }

    /// Names the wrapper for logging and the stats registry.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cache.set_name(name);
        self
    }

    /// Derives the key for `input`, then answers from the cache or from the
    /// getter.
    ///
    /// Errors come straight from the getter and are never cached.
    pub fn call<I, E>(&mut self, input: I) -> Result<O, E>
    where
        G: FnMut(&I) -> Result<O, E>,
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

    /// Turns the wrapper into a plain closure with the getter's call shape.
    pub fn into_fn<I, E>(mut self) -> impl FnMut(I) -> Result<O, E>
    where
        G: FnMut(&I) -> Result<O, E>,
        H: Fn(&I) -> K,
    {
        move |input| self.call(input)
    }

    /// Whether an output is cached under the derived `key`.
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

/// Wraps `getter` in a cache keyed by `hasher(&input)`.
///
/// See [`HashedMemoized`] for the caching and collision rules.
///
/// ```
/// use memofn_core::memoize_with_hasher;
///
/// // Case-insensitive lookups share one entry.
/// let mut len = memoize_with_hasher(
///     |s: &String| Ok::<_, ()>(s.len()),
///     |s: &String| s.to_lowercase(),
/// );
///
/// assert_eq!(len("Hello".to_string()), Ok(5));
/// assert_eq!(len("HELLO".to_string()), Ok(5));
/// ```
pub fn memoize_with_hasher<I, K, O, E, G, H>(getter: G, hasher: H) -> impl FnMut(I) -> Result<O, E>
where
    K: Eq + Hash,
    O: Clone,
    G: FnMut(&I) -> Result<O, E>,
    H: Fn(&I) -> K,
{
    HashedMemoized::new(getter, hasher).into_fn()
}
