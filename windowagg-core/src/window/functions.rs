use super::*;

// ── Accumulate ────────────────────────────────────────────────────────────────

/// Incremental reduction step folding one sample into an accumulator.
///
/// The accumulator is passed by value and the new one returned; windows hand
/// out a fresh [`zero`](Accumulate::zero) at every window or block boundary
/// instead of clearing the old accumulator in place.
pub trait Accumulate<IN, ACC>: Send {
    /// Accumulator for a window or block that has seen no samples.
    fn zero(&self) -> ACC;
    /// Fold `sample` into `acc`.
    fn accumulate(&self, acc: ACC, sample: IN) -> ACC;
}

/// [`Accumulate`] built from a pair of closures, see [`accumulate_fn`].
#[derive(Clone, Copy)]
pub struct FnAccumulate<Z, F> {
    zero: Z,
    fold: F,
}

/// Lift a `zero` constructor and a `fold` step into an [`Accumulate`].
///
/// ```
/// use windowagg_core::config::WindowSettings;
/// use windowagg_core::window::{CountWindow, TumblingWindow, accumulate_fn};
///
/// let longest = accumulate_fn(|| 0usize, |acc: usize, s: &str| acc.max(s.len()));
/// let mut window =
///     TumblingWindow::new(longest, |acc: usize, _n: usize| acc, WindowSettings::new(2)).unwrap();
/// assert_eq!(window.add_sample("tumbling"), None);
/// assert_eq!(window.add_sample("window"), Some(8));
/// ```
pub fn accumulate_fn<Z, F>(zero: Z, fold: F) -> FnAccumulate<Z, F> {
    FnAccumulate { zero, fold }
}

impl<IN, ACC, Z, F> Accumulate<IN, ACC> for FnAccumulate<Z, F>
where
    Z: Fn() -> ACC + Send,
    F: Fn(ACC, IN) -> ACC + Send,
{
    fn zero(&self) -> ACC {
        (self.zero)()
    }

    fn accumulate(&self, acc: ACC, sample: IN) -> ACC {
        (self.fold)(acc, sample)
    }
}

// ── Aggregate ─────────────────────────────────────────────────────────────────

/// Finalization step applied once when a window or block closes.
///
/// `count` is the number of samples folded into `acc`; it is zero for an
/// empty block.
pub trait Aggregate<ACC, OUT>: Send {
    fn aggregate(&self, acc: ACC, count: usize) -> OUT;
}

impl<ACC, OUT, F> Aggregate<ACC, OUT> for F
where
    F: Fn(ACC, usize) -> OUT + Send,
{
    fn aggregate(&self, acc: ACC, count: usize) -> OUT {
        self(acc, count)
    }
}

// ── HistoryAggregate ──────────────────────────────────────────────────────────

/// Finalization step for sliding windows, evaluated over the retained history
/// (raw samples or closed-block values) oldest first.
pub trait HistoryAggregate<V, OUT>: Send {
    fn aggregate(&self, history: &RingBuffer<V>) -> OUT;
}

impl<V, OUT, F> HistoryAggregate<V, OUT> for F
where
    F: Fn(&RingBuffer<V>) -> OUT + Send,
{
    fn aggregate(&self, history: &RingBuffer<V>) -> OUT {
        self(history)
    }
}
