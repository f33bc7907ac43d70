use super::*;

// ── TumblingWindow ────────────────────────────────────────────────────────────

/// Count-bounded, non-overlapping window.
///
/// Folds every sample into an accumulator and emits the aggregate of exactly
/// `size` samples, then starts over from a fresh accumulator. A trailing
/// window that never reaches `size` never emits.
pub struct TumblingWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: Aggregate<ACC, OUT>,
{
    settings: WindowSettings,
    accumulate: AC,
    aggregate: AG,
    block: OpenBlock<ACC>,
    windows_emitted: u64,
    _phantom: PhantomData<fn(IN) -> OUT>,
}

impl<IN, ACC, OUT, AC, AG> TumblingWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: Aggregate<ACC, OUT>,
{
    pub fn new(
        accumulate: AC,
        aggregate: AG,
        settings: WindowSettings,
    ) -> Result<Self, WindowConfigError> {
        settings.validate_for(WindowKind::Tumbling)?;
        debug!(size = settings.size, "created tumbling window");
        Ok(Self {
            settings,
            accumulate,
            aggregate,
            block: OpenBlock::new(),
            windows_emitted: 0,
            _phantom: PhantomData,
        })
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Samples folded into the window that is still open.
    pub fn pending(&self) -> usize {
        self.block.len()
    }

    pub fn windows_emitted(&self) -> u64 {
        self.windows_emitted
    }
}

impl<IN, ACC, OUT, AC, AG> CountWindow<IN, OUT> for TumblingWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: Aggregate<ACC, OUT>,
{
    fn add_sample(&mut self, sample: IN) -> Emission<OUT> {
        self.block.fold(&self.accumulate, sample);
        if self.block.len() < self.settings.size {
            return None;
        }
        let (acc, count) = self.block.close::<IN, AC>(&self.accumulate);
        self.windows_emitted += 1;
        trace!(window = self.windows_emitted, count, "tumbling window closed");
        Some(self.aggregate.aggregate(acc, count))
    }
}

// ── TumblingTimeWindow ────────────────────────────────────────────────────────

/// Externally clocked tumbling window.
///
/// Samples accumulate into the open block until the caller invokes
/// [`next_block`](BlockWindow::next_block), which always emits, including for
/// a block that received no samples. The aggregate is handed the block's
/// actual sample count, so averages are per observed sample; `size` is only
/// the nominal block length and never triggers emission.
pub struct TumblingTimeWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: Aggregate<ACC, OUT>,
{
    settings: WindowSettings,
    accumulate: AC,
    aggregate: AG,
    block: OpenBlock<ACC>,
    blocks_closed: u64,
    _phantom: PhantomData<fn(IN) -> OUT>,
}

impl<IN, ACC, OUT, AC, AG> TumblingTimeWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: Aggregate<ACC, OUT>,
{
    pub fn new(
        accumulate: AC,
        aggregate: AG,
        settings: WindowSettings,
    ) -> Result<Self, WindowConfigError> {
        settings.validate_for(WindowKind::TimeTumbling)?;
        debug!(size = settings.size, "created tumbling time window");
        Ok(Self {
            settings,
            accumulate,
            aggregate,
            block: OpenBlock::new(),
            blocks_closed: 0,
            _phantom: PhantomData,
        })
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Samples folded into the open block.
    pub fn pending(&self) -> usize {
        self.block.len()
    }

    pub fn blocks_closed(&self) -> u64 {
        self.blocks_closed
    }
}

impl<IN, ACC, OUT, AC, AG> BlockWindow<IN, OUT> for TumblingTimeWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: Aggregate<ACC, OUT>,
{
    fn add_sample(&mut self, sample: IN) {
        self.block.fold(&self.accumulate, sample);
    }

    fn next_block(&mut self) -> Emission<OUT> {
        let (acc, count) = self.block.close::<IN, AC>(&self.accumulate);
        self.blocks_closed += 1;
        trace!(block = self.blocks_closed, count, "tumbling time block closed");
        Some(self.aggregate.aggregate(acc, count))
    }
}
