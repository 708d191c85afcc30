use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// Compares and hashes a pointer by the address it points to.
///
/// Rust's `&T`, `Box<T>`, `Rc<T>` and `Arc<T>` all compare by the *content*
/// of the pointee. Wrapping such a pointer in `ByAddress` switches a cache
/// key over to identity: two distinct allocations holding equal values are
/// different keys, while clones of one `Rc`/`Arc` (or copies of one `&T`)
/// are the same key.
///
/// `ByAddress` derefs to the pointee, so a getter written against `&T` reads
/// fields through it unchanged. The pointee needs neither `Eq` nor `Hash`.
///
/// A key only stays meaningful while its allocation is alive. Owning
/// pointers (`Box`, `Rc`, `Arc`) moved into the cache keep it alive for the
/// cache's lifetime; with plain references the borrow checker does the same.
///
/// # Examples
///
/// ```
/// use memofn_core::{ByAddress, Memoized};
///
/// struct Payload {
///     a: i32,
///     b: i32,
/// }
///
/// let p0 = Payload { a: 1, b: 2 };
/// let p1 = Payload { a: 1, b: 2 };
///
/// let mut sum = Memoized::new(|p: &ByAddress<&Payload>| Ok::<_, ()>(p.a + p.b));
///
/// sum.call(ByAddress(&p0)).unwrap();
/// sum.call(ByAddress(&p1)).unwrap(); // equal content, different address
/// sum.call(ByAddress(&p0)).unwrap(); // cached
/// assert_eq!(sum.len(), 2);
/// ```
#[derive(Clone, Copy, Default)]
pub struct ByAddress<P>(pub P);

impl<P: Deref> ByAddress<P> {
    pub fn new(pointer: P) -> Self {
        ByAddress(pointer)
    }

    pub fn into_inner(self) -> P {
        self.0
    }

    /// Address of the pointee with any pointer metadata stripped.
    fn addr(&self) -> *const () {
        (&*self.0 as *const P::Target).cast::<()>()
    }
}

impl<P: Deref> Deref for ByAddress<P> {
    type Target = P::Target;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P: Deref> PartialEq for ByAddress<P> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<P: Deref> Eq for ByAddress<P> {}

impl<P: Deref> Hash for ByAddress<P> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.addr().hash(state);
    }
}

impl<P> fmt::Debug for ByAddress<P>
where
    P: Deref,
    P::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByAddress").field(&&*self.0).finish()
    }
}

impl<P: Deref> From<P> for ByAddress<P> {
    fn from(pointer: P) -> Self {
        ByAddress(pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Payload {
        a: i32,
        b: i32,
    }

    #[test]
    fn test_equal_content_different_address() {
        let p0 = Payload { a: 1, b: 2 };
        let p1 = Payload { a: 1, b: 2 };
        assert_eq!(p0, p1);
        assert_ne!(ByAddress(&p0), ByAddress(&p1));
    }

    #[test]
    fn test_same_reference_is_equal() {
        let p0 = Payload { a: 1, b: 2 };
        let first = &p0;
        let second = &p0;
        assert_eq!(ByAddress(first), ByAddress(second));
    }

    #[test]
    fn test_rc_clones_share_identity() {
        let shared = Rc::new(Payload { a: 3, b: 4 });
        let other = Rc::new(Payload { a: 3, b: 4 });

        let mut keys = HashSet::new();
        keys.insert(ByAddress(Rc::clone(&shared)));
        assert!(keys.contains(&ByAddress(Rc::clone(&shared))));
        assert!(!keys.contains(&ByAddress(other)));
    }

    #[test]
    fn test_arc_and_box() {
        let arc = Arc::new(5u64);
        assert_eq!(ByAddress(Arc::clone(&arc)), ByAddress(arc));

        let boxed = Box::new(5u64);
        let ptr: &u64 = &boxed;
        assert_eq!(ByAddress::new(ptr), ByAddress(&*boxed));
    }

    #[test]
    fn test_deref_reaches_pointee() {
        let p = Payload { a: 10, b: 20 };
        let key = ByAddress::from(&p);
        assert_eq!(key.a + key.b, 30);
        assert_eq!(key.into_inner(), &p);
    }

    #[test]
    fn test_unsized_pointee() {
        let text = String::from("shared");
        let slice: &str = &text;
        let copy = String::from("shared");

        assert_eq!(ByAddress(slice), ByAddress(&text[..]));
        assert_ne!(ByAddress(slice), ByAddress(&copy[..]));
    }

    #[test]
    fn test_debug_shows_pointee() {
        let p = Payload { a: 1, b: 2 };
        assert_eq!(
            format!("{:?}", ByAddress(&p)),
            "ByAddress(Payload { a: 1, b: 2 })"
        );
    }
}
