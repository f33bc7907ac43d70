//! # windowagg core
//!
//! Windowed aggregation over sample streams, meant to be embedded in a larger
//! pipeline that owns the sample source, the sink for emitted aggregates and,
//! for time-based windows, the clock.
//!
//! - [`window`]: the four window variants and the function contracts that
//!   parameterize them:
//!   [`TumblingWindow`](window::TumblingWindow) and
//!   [`SlidingWindow`](window::SlidingWindow) emit on sample counts
//!   ([`CountWindow`](window::CountWindow));
//!   [`TumblingTimeWindow`](window::TumblingTimeWindow) and
//!   [`SlidingTimeWindow`](window::SlidingTimeWindow) emit when the caller
//!   closes a block ([`BlockWindow`](window::BlockWindow)).
//! - [`reducers`]: reference accumulate/aggregate functions (sum, collect,
//!   averages, min/max, count).
//! - [`config`]: [`WindowSettings`](config::WindowSettings) and its validation.
//! - [`buffer`]: the fixed-capacity [`RingBuffer`](buffer::RingBuffer) behind
//!   sliding history.
//! - [`aggregator`]: an `f64` window selected at runtime by window type and
//!   function name.
//!
//! ## Quick Start
//!
//! ```rust
//! use windowagg_core::config::WindowSettings;
//! use windowagg_core::reducers::{SingleAverage, Sum};
//! use windowagg_core::window::{CountWindow, TumblingWindow};
//!
//! let mut window = TumblingWindow::new(Sum, SingleAverage, WindowSettings::new(3)).unwrap();
//! assert_eq!(window.add_sample(1), None);
//! assert_eq!(window.add_sample(2), None);
//! assert_eq!(window.add_sample(3), Some(2));
//! ```
//!
//! Every window is synchronous and owns its state exclusively; nothing here
//! spawns tasks or reads a clock.

pub mod aggregator;
pub mod buffer;
pub mod config;
pub mod reducers;
pub mod types;
pub mod window;

pub use aggregator::{AggregateFn, AggregateReport, AggregateSettings, AggregateValue, Aggregator};
pub use config::{WindowConfigError, WindowSettings};
pub use types::{Emission, WindowKind};
