//! # Aggregator
//!
//! A numeric window chosen at runtime by name, for hosts that configure the
//! aggregation step from a settings file rather than from code.
//!
//! [`AggregateSettings`] names a window type and an aggregate function;
//! [`Aggregator::new`] resolves the pair to one of the generic windows in
//! [`crate::window`] wired with functions from [`crate::reducers`], and boxes
//! it behind the [`CountWindow`] or [`BlockWindow`] trait so every
//! combination presents the same `f64`-in, [`AggregateValue`]-out surface.
//!
//! | function     | tumbling / timeTumbling | sliding                 | timeSliding             |
//! |--------------|-------------------------|-------------------------|-------------------------|
//! | `avg`        | mean of the window      | mean of the last `size` | mean over all samples   |
//! | `sum`        | total                   | total                   | total over the blocks   |
//! | `min`/`max`  | extreme sample          | extreme sample          | extreme over the blocks |
//! | `count`      | samples in the window   | samples in the window   | samples over the blocks |
//! | `accumulate` | the samples             | the samples             | samples of all blocks   |

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::RingBuffer;
use crate::config::{WindowConfigError, WindowSettings};
use crate::reducers::{
    BlocksAverage, BlocksMax, BlocksMin, BlocksSum, Collect, Contents, Count, Flatten, Max, Min,
    SingleAverage, Sum,
};
use crate::types::{Emission, WindowKind};
use crate::window::{
    Accumulate, Aggregate, BlockWindow, CountWindow, HistoryAggregate, SlidingTimeWindow,
    SlidingWindow, TumblingTimeWindow, TumblingWindow, accumulate_fn,
};

/// Named aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateFn {
    Avg,
    Sum,
    Min,
    Max,
    Count,
    Accumulate,
}

impl AggregateFn {
    pub const ALL: [AggregateFn; 6] = [
        AggregateFn::Avg,
        AggregateFn::Sum,
        AggregateFn::Min,
        AggregateFn::Max,
        AggregateFn::Count,
        AggregateFn::Accumulate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AggregateFn::Avg => "avg",
            AggregateFn::Sum => "sum",
            AggregateFn::Min => "min",
            AggregateFn::Max => "max",
            AggregateFn::Count => "count",
            AggregateFn::Accumulate => "accumulate",
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateFn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match AggregateFn::ALL
            .into_iter()
            .find(|func| func.as_str().eq_ignore_ascii_case(s))
        {
            Some(func) => Ok(func),
            None => bail!(
                "unknown aggregate function '{s}', expected one of: \
                 avg, sum, min, max, count, accumulate"
            ),
        }
    }
}

fn default_proceed_only_on_emit() -> bool {
    true
}

/// Settings for an [`Aggregator`], typically loaded from JSON:
///
/// ```json
/// { "function": "avg", "windowType": "sliding", "windowSize": 5, "resolution": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSettings {
    pub function: AggregateFn,
    pub window_type: WindowKind,
    pub window_size: usize,
    #[serde(default)]
    pub resolution: usize,
    /// Only report calls that produced an aggregate.
    #[serde(default = "default_proceed_only_on_emit")]
    pub proceed_only_on_emit: bool,
}

impl AggregateSettings {
    pub fn new(function: AggregateFn, window_type: WindowKind, window_size: usize) -> Self {
        Self {
            function,
            window_type,
            window_size,
            resolution: 0,
            proceed_only_on_emit: true,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Settings for the underlying window. The external timer flag follows
    /// from the window type.
    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            size: self.window_size,
            resolution: self.resolution,
            external_timer: self.window_type.is_externally_clocked(),
        }
    }
}

/// A value emitted by an [`Aggregator`].
///
/// Serializes untagged: a number, an array of numbers, or `null` for the
/// minimum or maximum of a window that saw no samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateValue {
    Number(f64),
    Samples(Vec<f64>),
    Empty,
}

impl AggregateValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AggregateValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_samples(&self) -> Option<&[f64]> {
        match self {
            AggregateValue::Samples(samples) => Some(samples),
            _ => None,
        }
    }
}

impl From<f64> for AggregateValue {
    fn from(n: f64) -> Self {
        AggregateValue::Number(n)
    }
}

impl From<usize> for AggregateValue {
    fn from(n: usize) -> Self {
        AggregateValue::Number(n as f64)
    }
}

impl From<Option<f64>> for AggregateValue {
    fn from(n: Option<f64>) -> Self {
        n.map_or(AggregateValue::Empty, AggregateValue::Number)
    }
}

impl From<Vec<f64>> for AggregateValue {
    fn from(samples: Vec<f64>) -> Self {
        AggregateValue::Samples(samples)
    }
}

/// Output record of one aggregator call, shaped for a downstream step:
/// `report` says whether `result` carries a fresh aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub report: bool,
    pub result: Option<AggregateValue>,
}

type BoxedCountWindow = Box<dyn CountWindow<f64, AggregateValue> + Send>;
type BoxedBlockWindow = Box<dyn BlockWindow<f64, AggregateValue> + Send>;

enum Engine {
    Count(BoxedCountWindow),
    Block(BoxedBlockWindow),
}

/// A runtime-selected `f64` window.
pub struct Aggregator {
    settings: AggregateSettings,
    engine: Engine,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Build the window described by `settings`.
    pub fn new(settings: AggregateSettings) -> Result<Self> {
        let window = settings.window_settings();
        let engine = match settings.window_type {
            WindowKind::Tumbling | WindowKind::TimeTumbling => {
                tumbling_engine(settings.window_type, settings.function, window)
            }
            WindowKind::Sliding => sliding_engine(settings.function, window).map(Engine::Count),
            WindowKind::TimeSliding => {
                sliding_time_engine(settings.function, window).map(Engine::Block)
            }
        }
        .with_context(|| {
            format!(
                "cannot build {} {} aggregator",
                settings.window_type, settings.function
            )
        })?;
        debug!(
            function = %settings.function,
            window_type = %settings.window_type,
            size = settings.window_size,
            resolution = settings.resolution,
            "aggregator ready"
        );
        Ok(Self { settings, engine })
    }

    /// Parse [`AggregateSettings`] from JSON and build the aggregator.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: AggregateSettings =
            serde_json::from_str(json).context("invalid aggregate settings")?;
        Self::new(settings)
    }

    pub fn settings(&self) -> &AggregateSettings {
        &self.settings
    }

    /// Return true if blocks are closed by [`next_block`](Self::next_block)
    /// rather than by sample counts.
    pub fn is_externally_clocked(&self) -> bool {
        matches!(self.engine, Engine::Block(_))
    }

    /// Feed one sample. Externally clocked windows only accumulate and
    /// always return `None`.
    pub fn add(&mut self, sample: f64) -> Emission<AggregateValue> {
        match &mut self.engine {
            Engine::Count(window) => window.add_sample(sample),
            Engine::Block(window) => {
                window.add_sample(sample);
                None
            }
        }
    }

    /// Close the current block. Fails for count-bounded windows, whose
    /// boundaries are not the caller's to signal.
    pub fn next_block(&mut self) -> Result<Emission<AggregateValue>> {
        match &mut self.engine {
            Engine::Block(window) => Ok(window.next_block()),
            Engine::Count(_) => bail!(
                "{} window is count-bounded and has no block boundary to close",
                self.settings.window_type
            ),
        }
    }

    /// Wrap an emission for output, or `None` when nothing should be
    /// reported because nothing was emitted and
    /// [`proceed_only_on_emit`](AggregateSettings::proceed_only_on_emit) is set.
    pub fn report(&self, emission: Emission<AggregateValue>) -> Option<AggregateReport> {
        match emission {
            Some(value) => Some(AggregateReport {
                report: true,
                result: Some(value),
            }),
            None if self.settings.proceed_only_on_emit => None,
            None => Some(AggregateReport {
                report: false,
                result: None,
            }),
        }
    }
}

// ── engine construction ───────────────────────────────────────────────────────

fn tumbling_engine(
    kind: WindowKind,
    function: AggregateFn,
    settings: WindowSettings,
) -> Result<Engine, WindowConfigError> {
    match function {
        AggregateFn::Avg => single(
            kind,
            Sum,
            |total: f64, count: usize| {
                AggregateValue::Number(SingleAverage.aggregate(total, count))
            },
            settings,
        ),
        AggregateFn::Sum => single(
            kind,
            Sum,
            |total: f64, _count: usize| AggregateValue::Number(total),
            settings,
        ),
        AggregateFn::Min => single(kind, Min, extreme, settings),
        AggregateFn::Max => single(kind, Max, extreme, settings),
        AggregateFn::Count => single(
            kind,
            Count,
            |n: usize, _count: usize| AggregateValue::from(n),
            settings,
        ),
        AggregateFn::Accumulate => single(
            kind,
            Collect,
            |samples: Vec<f64>, _count: usize| AggregateValue::Samples(samples),
            settings,
        ),
    }
}

fn extreme(acc: Option<f64>, _count: usize) -> AggregateValue {
    AggregateValue::from(acc)
}

fn single<ACC, AC, AG>(
    kind: WindowKind,
    accumulate: AC,
    aggregate: AG,
    settings: WindowSettings,
) -> Result<Engine, WindowConfigError>
where
    ACC: Send + 'static,
    AC: Accumulate<f64, ACC> + 'static,
    AG: Aggregate<ACC, AggregateValue> + 'static,
{
    if kind.is_externally_clocked() {
        let window = TumblingTimeWindow::new(accumulate, aggregate, settings)?;
        Ok(Engine::Block(Box::new(window)))
    } else {
        let window = TumblingWindow::new(accumulate, aggregate, settings)?;
        Ok(Engine::Count(Box::new(window)))
    }
}

fn sliding_engine(
    function: AggregateFn,
    settings: WindowSettings,
) -> Result<BoxedCountWindow, WindowConfigError> {
    fn boxed<AG>(
        aggregate: AG,
        settings: WindowSettings,
    ) -> Result<BoxedCountWindow, WindowConfigError>
    where
        AG: HistoryAggregate<f64, AggregateValue> + 'static,
    {
        Ok(Box::new(SlidingWindow::new(aggregate, settings)?))
    }

    match function {
        AggregateFn::Avg => boxed(
            |history: &RingBuffer<f64>| AggregateValue::Number(BlocksAverage.aggregate(history)),
            settings,
        ),
        AggregateFn::Sum => boxed(
            |history: &RingBuffer<f64>| AggregateValue::Number(BlocksSum.aggregate(history)),
            settings,
        ),
        AggregateFn::Min => boxed(
            |history: &RingBuffer<f64>| AggregateValue::from(BlocksMin.aggregate(history)),
            settings,
        ),
        AggregateFn::Max => boxed(
            |history: &RingBuffer<f64>| AggregateValue::from(BlocksMax.aggregate(history)),
            settings,
        ),
        AggregateFn::Count => boxed(
            |history: &RingBuffer<f64>| AggregateValue::from(history.len()),
            settings,
        ),
        AggregateFn::Accumulate => boxed(
            |history: &RingBuffer<f64>| AggregateValue::Samples(Contents.aggregate(history)),
            settings,
        ),
    }
}

fn sliding_time_engine(
    function: AggregateFn,
    settings: WindowSettings,
) -> Result<BoxedBlockWindow, WindowConfigError> {
    fn boxed<ACC, AC, AG>(
        accumulate: AC,
        aggregate: AG,
        settings: WindowSettings,
    ) -> Result<BoxedBlockWindow, WindowConfigError>
    where
        ACC: Send + 'static,
        AC: Accumulate<f64, ACC> + 'static,
        AG: HistoryAggregate<ACC, AggregateValue> + 'static,
    {
        Ok(Box::new(SlidingTimeWindow::new(
            accumulate, aggregate, settings,
        )?))
    }

    match function {
        AggregateFn::Avg => boxed(
            accumulate_fn(
                || (0.0, 0usize),
                |(total, n): (f64, usize), sample: f64| (total + sample, n + 1),
            ),
            |blocks: &RingBuffer<(f64, usize)>| {
                let (total, n) = blocks
                    .iter()
                    .fold((0.0, 0usize), |(total, n), &(block_total, block_n)| {
                        (total + block_total, n + block_n)
                    });
                AggregateValue::Number(SingleAverage.aggregate(total, n))
            },
            settings,
        ),
        AggregateFn::Sum => boxed(
            Sum,
            |blocks: &RingBuffer<f64>| AggregateValue::Number(BlocksSum.aggregate(blocks)),
            settings,
        ),
        AggregateFn::Min => boxed(Min, extreme_block(Min), settings),
        AggregateFn::Max => boxed(Max, extreme_block(Max), settings),
        AggregateFn::Count => boxed(
            Count,
            |blocks: &RingBuffer<usize>| AggregateValue::from(BlocksSum.aggregate(blocks)),
            settings,
        ),
        AggregateFn::Accumulate => boxed(
            Collect,
            |blocks: &RingBuffer<Vec<f64>>| AggregateValue::Samples(Flatten.aggregate(blocks)),
            settings,
        ),
    }
}

/// Reduce per-block minima (or maxima) to the extreme over the whole history,
/// skipping blocks that saw no samples.
fn extreme_block<AC>(pick: AC) -> impl HistoryAggregate<Option<f64>, AggregateValue>
where
    AC: Accumulate<f64, Option<f64>>,
{
    move |blocks: &RingBuffer<Option<f64>>| -> AggregateValue {
        blocks
            .iter()
            .flatten()
            .fold(pick.zero(), |acc, &v| pick.accumulate(acc, v))
            .into()
    }
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
