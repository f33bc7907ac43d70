//! Reference accumulate and aggregate functions.
//!
//! - accumulate: [`Sum`], [`Collect`], [`Min`], [`Max`], [`Count`]
//! - aggregate (one window or block): [`SingleAverage`], [`Identity`]
//! - history aggregate (sliding variants): [`BlocksAverage`], [`BlocksSum`],
//!   [`BlocksMin`], [`BlocksMax`], [`Contents`], [`Flatten`]
//!
//! Averages divide in `T`, so integer samples truncate like any integer
//! division. An average over nothing is zero.

use std::ops::Div;

use num_traits::{NumCast, Zero};

use crate::buffer::RingBuffer;
use crate::window::{Accumulate, Aggregate, HistoryAggregate};

// ── Accumulate ────────────────────────────────────────────────────────────────

/// Running numeric total.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<T: Zero> Accumulate<T, T> for Sum {
    fn zero(&self) -> T {
        T::zero()
    }

    fn accumulate(&self, acc: T, sample: T) -> T {
        acc + sample
    }
}

/// Appends every sample to an ordered list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collect;

impl<T> Accumulate<T, Vec<T>> for Collect {
    fn zero(&self) -> Vec<T> {
        Vec::new()
    }

    fn accumulate(&self, mut acc: Vec<T>, sample: T) -> Vec<T> {
        acc.push(sample);
        acc
    }
}

/// Smallest sample seen; `None` until the first sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl<T: PartialOrd> Accumulate<T, Option<T>> for Min {
    fn zero(&self) -> Option<T> {
        None
    }

    fn accumulate(&self, acc: Option<T>, sample: T) -> Option<T> {
        match acc {
            Some(current) if current <= sample => Some(current),
            _ => Some(sample),
        }
    }
}

/// Largest sample seen; `None` until the first sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl<T: PartialOrd> Accumulate<T, Option<T>> for Max {
    fn zero(&self) -> Option<T> {
        None
    }

    fn accumulate(&self, acc: Option<T>, sample: T) -> Option<T> {
        match acc {
            Some(current) if current >= sample => Some(current),
            _ => Some(sample),
        }
    }
}

/// Number of samples, whatever their type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl<T> Accumulate<T, usize> for Count {
    fn zero(&self) -> usize {
        0
    }

    fn accumulate(&self, acc: usize, _sample: T) -> usize {
        acc + 1
    }
}

// ── Aggregate ─────────────────────────────────────────────────────────────────

/// Divides a block total by the number of samples actually folded into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleAverage;

impl<T> Aggregate<T, T> for SingleAverage
where
    T: Zero + Div<Output = T> + NumCast,
{
    fn aggregate(&self, acc: T, count: usize) -> T {
        mean_of(acc, count)
    }
}

/// Emits the accumulator unchanged. Pairs with [`Collect`], [`Sum`], [`Min`],
/// [`Max`] and [`Count`] when the accumulator already is the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<ACC> Aggregate<ACC, ACC> for Identity {
    fn aggregate(&self, acc: ACC, _count: usize) -> ACC {
        acc
    }
}

// ── HistoryAggregate ──────────────────────────────────────────────────────────

/// Arithmetic mean of the history entries: raw samples for a sliding window,
/// block values for a sliding time window.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksAverage;

impl<T> HistoryAggregate<T, T> for BlocksAverage
where
    T: Zero + Clone + Div<Output = T> + NumCast,
{
    fn aggregate(&self, history: &RingBuffer<T>) -> T {
        let total = history.iter().cloned().fold(T::zero(), |acc, v| acc + v);
        mean_of(total, history.len())
    }
}

/// Total of the history entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksSum;

impl<T> HistoryAggregate<T, T> for BlocksSum
where
    T: Zero + Clone,
{
    fn aggregate(&self, history: &RingBuffer<T>) -> T {
        history.iter().cloned().fold(T::zero(), |acc, v| acc + v)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksMin;

impl<T> HistoryAggregate<T, Option<T>> for BlocksMin
where
    T: PartialOrd + Clone,
{
    fn aggregate(&self, history: &RingBuffer<T>) -> Option<T> {
        history
            .iter()
            .cloned()
            .fold(None, |acc, v| Accumulate::<T, Option<T>>::accumulate(&Min, acc, v))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksMax;

impl<T> HistoryAggregate<T, Option<T>> for BlocksMax
where
    T: PartialOrd + Clone,
{
    fn aggregate(&self, history: &RingBuffer<T>) -> Option<T> {
        history
            .iter()
            .cloned()
            .fold(None, |acc, v| Accumulate::<T, Option<T>>::accumulate(&Max, acc, v))
    }
}

/// The history itself, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Contents;

impl<T: Clone> HistoryAggregate<T, Vec<T>> for Contents {
    fn aggregate(&self, history: &RingBuffer<T>) -> Vec<T> {
        history.to_vec()
    }
}

/// Concatenates collected blocks in arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl<T: Clone> HistoryAggregate<Vec<T>, Vec<T>> for Flatten {
    fn aggregate(&self, history: &RingBuffer<Vec<T>>) -> Vec<T> {
        history.iter().flatten().cloned().collect()
    }
}

/// `total / count` in `T`; zero when there is nothing to divide by or `count`
/// does not fit in `T`.
fn mean_of<T>(total: T, count: usize) -> T
where
    T: Zero + Div<Output = T> + NumCast,
{
    match <T as NumCast>::from(count) {
        Some(n) if count > 0 => total / n,
        _ => T::zero(),
    }
}

#[cfg(test)]
#[path = "tests/reducers_tests.rs"]
mod tests;
