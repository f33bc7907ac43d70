use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::buffer::RingBuffer;
use crate::config::{WindowConfigError, WindowSettings};
use crate::types::{Emission, WindowKind};

mod functions;
mod primitives;
mod sliding;
mod tumbling;

pub use functions::*;
pub use primitives::{BlockWindow, CountWindow};
pub(crate) use primitives::OpenBlock;
pub use sliding::*;
pub use tumbling::*;

#[cfg(test)]
#[path = "tests/window_tests.rs"]
mod tests;
