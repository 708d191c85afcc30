// Tests for keying by address
//
// Pointer inputs wrapped in ByAddress are cached per allocation: equal
// content behind different pointers is computed again, the same pointer is not.

use memofn::{memoize, ByAddress, Memoized};
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

struct Payload {
    a: i32,
    b: i32,
}

// Test 1: distinct references with equal content are different keys
static CALL_COUNT_1: AtomicU32 = AtomicU32::new(0);

#[test]
fn test_reference_identity() {
    let p0 = Payload { a: 1, b: 2 };
    let p1 = Payload { a: 1, b: 2 };

    let mut memoized_sum = Memoized::new(|input: &ByAddress<&Payload>| {
        CALL_COUNT_1.fetch_add(1, Ordering::SeqCst);
        Ok::<_, ()>(input.a + input.b)
    });

    // First call
    assert_eq!(memoized_sum.call(ByAddress(&p0)), Ok(3));
    assert_eq!(CALL_COUNT_1.load(Ordering::SeqCst), 1);

    // Different reference, same content: not memoized
    assert_eq!(memoized_sum.call(ByAddress(&p1)), Ok(3));
    assert_eq!(CALL_COUNT_1.load(Ordering::SeqCst), 2);

    // Same reference as the first call: memoized
    assert_eq!(memoized_sum.call(ByAddress(&p0)), Ok(3));
    assert_eq!(CALL_COUNT_1.load(Ordering::SeqCst), 2);
}

// Test 2: Rc clones point at the same allocation
static CALL_COUNT_2: AtomicU32 = AtomicU32::new(0);

#[test]
fn test_rc_identity() {
    let shared = Rc::new(Payload { a: 4, b: 5 });
    let lookalike = Rc::new(Payload { a: 4, b: 5 });

    let mut product = memoize(|input: &ByAddress<Rc<Payload>>| {
        CALL_COUNT_2.fetch_add(1, Ordering::SeqCst);
        Ok::<_, ()>(input.a * input.b)
    });

    assert_eq!(product(ByAddress(Rc::clone(&shared))), Ok(20));
    assert_eq!(product(ByAddress(Rc::clone(&shared))), Ok(20));
    assert_eq!(CALL_COUNT_2.load(Ordering::SeqCst), 1);

    assert_eq!(product(ByAddress(lookalike)), Ok(20));
    assert_eq!(CALL_COUNT_2.load(Ordering::SeqCst), 2);
}

// Test 3: the cache keeps owning pointers alive
#[test]
fn test_cached_arc_keeps_allocation_alive() {
    let data = Arc::new(vec![1u64, 2, 3]);

    let mut total =
        Memoized::new(|v: &ByAddress<Arc<Vec<u64>>>| Ok::<_, ()>(v.iter().sum::<u64>()));
    assert_eq!(total.call(ByAddress(Arc::clone(&data))), Ok(6));

    // One strong count held here, one by the cache key
    assert_eq!(Arc::strong_count(&data), 2);
    assert!(total.is_cached(&ByAddress(Arc::clone(&data))));
}

// Test 4: without ByAddress, references compare by content
static CALL_COUNT_4: AtomicU32 = AtomicU32::new(0);

#[test]
fn test_plain_references_compare_by_value() {
    let s0 = String::from("same");
    let s1 = String::from("same");

    let mut len = memoize(|s: &&String| {
        CALL_COUNT_4.fetch_add(1, Ordering::SeqCst);
        Ok::<_, ()>(s.len())
    });

    assert_eq!(len(&s0), Ok(4));
    assert_eq!(len(&s1), Ok(4));
    assert_eq!(CALL_COUNT_4.load(Ordering::SeqCst), 1);
}
