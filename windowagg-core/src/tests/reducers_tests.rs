use approx::assert_relative_eq;

use super::*;

fn fold_all<IN, ACC, AC: Accumulate<IN, ACC>>(f: &AC, samples: Vec<IN>) -> ACC {
    samples
        .into_iter()
        .fold(f.zero(), |acc, sample| f.accumulate(acc, sample))
}

fn ring<T>(capacity: usize, values: Vec<T>) -> RingBuffer<T> {
    let mut ring = RingBuffer::with_capacity(capacity);
    for v in values {
        ring.push(v);
    }
    ring
}

#[test]
fn test_sum_accumulates_integers_and_floats() {
    assert_eq!(fold_all(&Sum, vec![1i64, 2, 3]), 6);
    assert_relative_eq!(fold_all(&Sum, vec![0.5f64, 0.25]), 0.75);
    assert_eq!(Accumulate::<i32, i32>::zero(&Sum), 0);
}

#[test]
fn test_collect_keeps_arrival_order() {
    assert_eq!(fold_all(&Collect, vec!["c", "a", "b"]), vec!["c", "a", "b"]);
    assert!(Accumulate::<u8, Vec<u8>>::zero(&Collect).is_empty());
}

#[test]
fn test_min_max_start_empty() {
    assert_eq!(fold_all(&Min, Vec::<i32>::new()), None);
    assert_eq!(fold_all(&Min, vec![4, -2, 7]), Some(-2));
    assert_eq!(fold_all(&Max, vec![4, -2, 7]), Some(7));
}

#[test]
fn test_count_ignores_sample_values() {
    assert_eq!(fold_all(&Count, vec!["x", "y", "z"]), 3);
}

#[test]
fn test_single_average_uses_actual_count() {
    assert_eq!(SingleAverage.aggregate(15i64, 5), 3);
    // Integer division truncates.
    assert_eq!(SingleAverage.aggregate(25i64, 2), 12);
    assert_relative_eq!(SingleAverage.aggregate(25.0f64, 2), 12.5);
}

#[test]
fn test_single_average_of_empty_block_is_zero() {
    assert_eq!(SingleAverage.aggregate(0i64, 0), 0);
    assert_relative_eq!(SingleAverage.aggregate(0.0f64, 0), 0.0);
}

#[test]
fn test_single_average_count_not_representable_is_zero() {
    assert_eq!(SingleAverage.aggregate(100i8, 300), 0);
}

#[test]
fn test_identity_passes_accumulator_through() {
    assert_eq!(Identity.aggregate(vec![1, 2, 3], 3), vec![1, 2, 3]);
    assert_eq!(Identity.aggregate(Some(4), 1), Some(4));
}

#[test]
fn test_blocks_average_over_history() {
    assert_eq!(BlocksAverage.aggregate(&ring(5, vec![1i64, 2, 3, 4, 5])), 3);
    assert_eq!(BlocksAverage.aggregate(&ring(3, vec![15i64, 10, 5, 30])), 15);
    assert_eq!(BlocksAverage.aggregate(&RingBuffer::<i64>::with_capacity(3)), 0);
}

#[test]
fn test_blocks_sum_min_max() {
    let history = ring(4, vec![3.0f64, -1.0, 8.0, 2.0]);
    assert_relative_eq!(BlocksSum.aggregate(&history), 12.0);
    assert_eq!(BlocksMin.aggregate(&history), Some(-1.0));
    assert_eq!(BlocksMax.aggregate(&history), Some(8.0));
    assert_eq!(BlocksMin.aggregate(&RingBuffer::<f64>::with_capacity(2)), None);
}

#[test]
fn test_contents_and_flatten_preserve_order() {
    assert_eq!(Contents.aggregate(&ring(2, vec![1, 2, 3])), vec![2, 3]);
    let blocks = ring(2, vec![vec![1, 2], vec![3], vec![4, 5]]);
    assert_eq!(Flatten.aggregate(&blocks), vec![3, 4, 5]);
}
