use super::*;

// ── SlidingWindow ─────────────────────────────────────────────────────────────

/// Count-bounded moving window of length `size` advancing by `resolution`
/// samples.
///
/// Keeps the last `size` raw samples in a [`RingBuffer`]. Emits the history
/// aggregate when the buffer first fills, then every `resolution` samples,
/// so consecutive windows overlap by `size - resolution` samples.
pub struct SlidingWindow<IN, OUT, AG>
where
    AG: HistoryAggregate<IN, OUT>,
{
    settings: WindowSettings,
    aggregate: AG,
    samples: RingBuffer<IN>,
    since_emit: usize,
    samples_seen: u64,
    _phantom: PhantomData<fn() -> OUT>,
}

impl<IN, OUT, AG> SlidingWindow<IN, OUT, AG>
where
    AG: HistoryAggregate<IN, OUT>,
{
    pub fn new(aggregate: AG, settings: WindowSettings) -> Result<Self, WindowConfigError> {
        settings.validate_for(WindowKind::Sliding)?;
        debug!(
            size = settings.size,
            resolution = settings.resolution,
            "created sliding window"
        );
        Ok(Self {
            settings,
            aggregate,
            samples: RingBuffer::with_capacity(settings.size),
            since_emit: 0,
            samples_seen: 0,
            _phantom: PhantomData,
        })
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Total samples ever added.
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Samples added since the last emission, or since construction while
    /// the buffer is still filling.
    pub fn pending(&self) -> usize {
        if self.samples.is_full() {
            self.since_emit
        } else {
            self.samples.len()
        }
    }

    /// The retained samples, oldest first.
    pub fn history(&self) -> &RingBuffer<IN> {
        &self.samples
    }
}

impl<IN, OUT, AG> CountWindow<IN, OUT> for SlidingWindow<IN, OUT, AG>
where
    AG: HistoryAggregate<IN, OUT>,
{
    fn add_sample(&mut self, sample: IN) -> Emission<OUT> {
        let was_full = self.samples.is_full();
        self.samples.push(sample);
        self.samples_seen += 1;
        if !self.samples.is_full() {
            return None;
        }
        if was_full {
            self.since_emit += 1;
            if self.since_emit < self.settings.resolution {
                return None;
            }
        }
        self.since_emit = 0;
        trace!(samples_seen = self.samples_seen, "sliding window emitted");
        Some(self.aggregate.aggregate(&self.samples))
    }
}

// ── SlidingTimeWindow ─────────────────────────────────────────────────────────

/// Externally clocked sliding window over closed blocks.
///
/// Each [`next_block`](BlockWindow::next_block) turns the open block's
/// accumulator into a block value and pushes it into a history of
/// `ceil(size / resolution)` blocks. Nothing is emitted until the history is
/// full; from then on every closed block emits the history aggregate, the
/// window sliding by one block per call.
pub struct SlidingTimeWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: HistoryAggregate<ACC, OUT>,
{
    settings: WindowSettings,
    accumulate: AC,
    aggregate: AG,
    block: OpenBlock<ACC>,
    blocks: RingBuffer<ACC>,
    blocks_closed: u64,
    _phantom: PhantomData<fn(IN) -> OUT>,
}

impl<IN, ACC, OUT, AC, AG> SlidingTimeWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: HistoryAggregate<ACC, OUT>,
{
    pub fn new(
        accumulate: AC,
        aggregate: AG,
        settings: WindowSettings,
    ) -> Result<Self, WindowConfigError> {
        settings.validate_for(WindowKind::TimeSliding)?;
        let capacity = settings.history_capacity();
        debug!(
            size = settings.size,
            resolution = settings.resolution,
            blocks = capacity,
            "created sliding time window"
        );
        Ok(Self {
            settings,
            accumulate,
            aggregate,
            block: OpenBlock::new(),
            blocks: RingBuffer::with_capacity(capacity),
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

    /// Values of the most recently closed blocks, oldest first.
    pub fn history(&self) -> &RingBuffer<ACC> {
        &self.blocks
    }
}

impl<IN, ACC, OUT, AC, AG> BlockWindow<IN, OUT> for SlidingTimeWindow<IN, ACC, OUT, AC, AG>
where
    AC: Accumulate<IN, ACC>,
    AG: HistoryAggregate<ACC, OUT>,
{
    fn add_sample(&mut self, sample: IN) {
        self.block.fold(&self.accumulate, sample);
    }

    fn next_block(&mut self) -> Emission<OUT> {
        let (block_value, count) = self.block.close::<IN, AC>(&self.accumulate);
        self.blocks.push(block_value);
        self.blocks_closed += 1;
        trace!(block = self.blocks_closed, count, "sliding time block closed");
        if !self.blocks.is_full() {
            return None;
        }
        Some(self.aggregate.aggregate(&self.blocks))
    }
}
