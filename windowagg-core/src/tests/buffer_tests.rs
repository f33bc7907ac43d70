use super::*;

#[test]
fn test_fills_before_evicting() {
    let mut ring = RingBuffer::with_capacity(3);
    assert!(ring.is_empty());
    assert_eq!(ring.push(1), None);
    assert_eq!(ring.push(2), None);
    assert!(!ring.is_full());
    assert_eq!(ring.push(3), None);
    assert!(ring.is_full());
    assert_eq!(ring.len(), 3);
    assert_eq!(ring.to_vec(), vec![1, 2, 3]);
}

#[test]
fn test_evicts_oldest_first() {
    let mut ring = RingBuffer::with_capacity(3);
    for v in 1..=3 {
        ring.push(v);
    }
    assert_eq!(ring.push(4), Some(1));
    assert_eq!(ring.push(5), Some(2));
    assert_eq!(ring.len(), 3);
    assert_eq!(ring.to_vec(), vec![3, 4, 5]);
    assert_eq!(ring.newest(), Some(&5));
}

#[test]
fn test_iteration_stays_in_arrival_order_across_wraps() {
    let mut ring = RingBuffer::with_capacity(4);
    for v in 0..11 {
        ring.push(v);
    }
    assert_eq!(ring.to_vec(), vec![7, 8, 9, 10]);
    let (older, newer) = ring.as_slices();
    assert_eq!([older, newer].concat(), vec![7, 8, 9, 10]);
    let collected: Vec<_> = (&ring).into_iter().copied().collect();
    assert_eq!(collected, vec![7, 8, 9, 10]);
}

#[test]
fn test_zero_capacity_retains_nothing() {
    let mut ring = RingBuffer::with_capacity(0);
    assert_eq!(ring.push("a"), Some("a"));
    assert!(ring.is_empty());
    assert!(!ring.is_full());
}

#[test]
fn test_clear_resets_write_pointer() {
    let mut ring = RingBuffer::with_capacity(2);
    for v in 0..5 {
        ring.push(v);
    }
    ring.clear();
    assert!(ring.is_empty());
    ring.push(10);
    ring.push(11);
    assert_eq!(ring.to_vec(), vec![10, 11]);
    assert_eq!(ring.capacity(), 2);
}
