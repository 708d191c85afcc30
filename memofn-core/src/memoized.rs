use std::borrow::Borrow;
use std::hash::Hash;

use crate::MemoCache;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// A fallible unary function whose successful results are cached by input.
///
/// `Memoized` owns a *getter*, a `FnMut(&I) -> Result<O, E>` that computes
/// the real result, and a [`MemoCache`] keyed by the input value itself.
/// Each [`call`](Self::call):
///
/// 1. returns the stored output if the input was computed successfully
///    before, without invoking the getter;
/// 2. otherwise invokes the getter. An `Err` is handed back untouched and
///    nothing is stored, so the next call with the same input tries again.
///    An `Ok` output is stored under the input and returned.
///
/// Keys compare with the input type's own `Eq`/`Hash`. To key reference-like
/// inputs by address instead of by content, pass them wrapped in
/// [`ByAddress`](crate::ByAddress).
///
/// `call` takes `&mut self`; the wrapper does no locking of its own. Use
/// [`SharedMemoized`](crate::SharedMemoized) when the memoized function has to
/// be called from several threads.
///
/// # Examples
///
/// ```
/// use memofn_core::Memoized;
///
/// #[derive(PartialEq, Eq, Hash)]
/// struct Payload {
///     a: i32,
///     b: i32,
/// }
///
/// let mut sum = Memoized::new(|p: &Payload| Ok::<_, String>(p.a + p.b));
///
/// assert_eq!(sum.call(Payload { a: 1, b: 2 }), Ok(3));
/// assert_eq!(sum.call(Payload { a: 1, b: 2 }), Ok(3)); // served from the cache
/// assert_eq!(sum.len(), 1);
/// ```
pub struct Memoized<I, O, G> {
    getter: G,
    cache: MemoCache<I, O>,
}

impl<I, O, G> Memoized<I, O, G>
where
    I: Eq + Hash,
    O: Clone,
{
    /// Wraps `getter` with an empty cache.
    pub fn new<E>(getter: G) -> Self
    where
        G: FnMut(&I) -> Result<O, E>,
    {
        Self {
            getter,
            cache: MemoCache::new(),
        }
    }

    /// Names the wrapper for logging and the stats registry.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cache.set_name(name);
        self
    }

    /// Returns the cached output for `input`, computing and caching it first
    /// if needed.
    ///
    /// Errors come straight from the getter and are never cached.
    pub fn call<E>(&mut self, input: I) -> Result<O, E>
    where
        G: FnMut(&I) -> Result<O, E>,
    {
        if let Some(output) = self.cache.get(&input) {
            return Ok(output);
        }

        let output = (self.getter)(&input)?;
        self.cache.insert(input, output.clone());
        Ok(output)
    }

    /// Turns the wrapper into a plain closure with the getter's call shape.
    pub fn into_fn<E>(mut self) -> impl FnMut(I) -> Result<O, E>
    where
        G: FnMut(&I) -> Result<O, E>,
    {
        move |input| self.call(input)
    }

    /// Whether a successful result for `input` is cached.
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

/// Wraps `getter` in a cache keyed by its input.
///
/// The returned closure has the same shape as the getter except that it takes
/// the input by value, since a successful call moves the input into the
/// cache as its key. See [`Memoized`] for the caching rules.
///
/// ```
/// use memofn_core::memoize;
/// use std::cell::Cell;
///
/// let calls = Cell::new(0);
/// let mut double = memoize(|n: &u64| {
///     calls.set(calls.get() + 1);
///     Ok::<_, ()>(n * 2)
/// });
///
/// assert_eq!(double(21), Ok(42));
/// assert_eq!(double(21), Ok(42));
/// assert_eq!(calls.get(), 1);
/// ```
pub fn memoize<I, O, E, G>(getter: G) -> impl FnMut(I) -> Result<O, E>
where
    I: Eq + Hash,
    O: Clone,
    G: FnMut(&I) -> Result<O, E>,
{
    Memoized::new(getter).into_fn()
}
