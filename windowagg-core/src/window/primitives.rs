use super::*;

/// A window whose boundaries are defined by sample counts.
///
/// Implemented by [`TumblingWindow`] and [`SlidingWindow`]; emission is
/// decided inside [`add_sample`](CountWindow::add_sample).
pub trait CountWindow<IN, OUT> {
    /// Feed one sample, returning the aggregate if this sample completed a window.
    fn add_sample(&mut self, sample: IN) -> Emission<OUT>;

    /// Feed samples in order. Equivalent to calling
    /// [`add_sample`](CountWindow::add_sample) for each one; returns every
    /// emission produced along the way.
    fn add_samples<I>(&mut self, samples: I) -> Vec<OUT>
    where
        I: IntoIterator<Item = IN>,
        Self: Sized,
    {
        samples
            .into_iter()
            .filter_map(|sample| self.add_sample(sample))
            .collect()
    }
}

/// A window whose boundaries are signalled by the caller.
///
/// Implemented by [`TumblingTimeWindow`] and [`SlidingTimeWindow`]. Samples
/// only accumulate; the caller's own timer decides when a block ends by
/// calling [`next_block`](BlockWindow::next_block).
pub trait BlockWindow<IN, OUT> {
    /// Fold one sample into the open block. Never emits.
    fn add_sample(&mut self, sample: IN);

    fn add_samples<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = IN>,
        Self: Sized,
    {
        for sample in samples {
            self.add_sample(sample);
        }
    }

    /// Close the open block and start a new one.
    fn next_block(&mut self) -> Emission<OUT>;
}

impl<IN, OUT, W> CountWindow<IN, OUT> for Box<W>
where
    W: CountWindow<IN, OUT> + ?Sized,
{
    fn add_sample(&mut self, sample: IN) -> Emission<OUT> {
        self.as_mut().add_sample(sample)
    }
}

impl<IN, OUT, W> BlockWindow<IN, OUT> for Box<W>
where
    W: BlockWindow<IN, OUT> + ?Sized,
{
    fn add_sample(&mut self, sample: IN) {
        self.as_mut().add_sample(sample)
    }

    fn next_block(&mut self) -> Emission<OUT> {
        self.as_mut().next_block()
    }
}

// ── OpenBlock ─────────────────────────────────────────────────────────────────

/// Accumulator and sample count of the window or block currently being filled.
///
/// The accumulator is created lazily on the first sample so that closing a
/// block moves it out without building a replacement up front.
#[derive(Debug)]
pub(crate) struct OpenBlock<ACC> {
    acc: Option<ACC>,
    count: usize,
}

impl<ACC> OpenBlock<ACC> {
    pub(crate) fn new() -> Self {
        Self {
            acc: None,
            count: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn fold<IN, AC>(&mut self, accumulate: &AC, sample: IN)
    where
        AC: Accumulate<IN, ACC>,
    {
        let acc = self.acc.take().unwrap_or_else(|| accumulate.zero());
        self.acc = Some(accumulate.accumulate(acc, sample));
        self.count += 1;
    }

    /// Take the accumulator and sample count, leaving the block empty.
    /// An empty block yields the accumulate function's zero.
    pub(crate) fn close<IN, AC>(&mut self, accumulate: &AC) -> (ACC, usize)
    where
        AC: Accumulate<IN, ACC>,
    {
        let acc = self.acc.take().unwrap_or_else(|| accumulate.zero());
        (acc, std::mem::take(&mut self.count))
    }
}
