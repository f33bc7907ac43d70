use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Result of feeding a window: `Some(value)` when a window or block closed
/// and produced an aggregate, `None` otherwise.
///
/// There is no value to observe when nothing was emitted, and an emission
/// the caller ignores is gone; windows never buffer unconsumed results.
pub type Emission<T> = Option<T>;

/// The four window variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowKind {
    /// Count-bounded, non-overlapping.
    Tumbling,
    /// Count-bounded, overlapping with a hop of `resolution` samples.
    Sliding,
    /// Externally clocked, one emission per closed block.
    TimeTumbling,
    /// Externally clocked, aggregates a history of closed blocks.
    TimeSliding,
}

impl WindowKind {
    pub const ALL: [WindowKind; 4] = [
        WindowKind::Tumbling,
        WindowKind::Sliding,
        WindowKind::TimeTumbling,
        WindowKind::TimeSliding,
    ];

    /// Return true if block boundaries come from the caller rather than a
    /// sample count.
    pub fn is_externally_clocked(self) -> bool {
        matches!(self, WindowKind::TimeTumbling | WindowKind::TimeSliding)
    }

    /// Return true if this variant reads `resolution` from its settings.
    pub fn uses_resolution(self) -> bool {
        matches!(self, WindowKind::Sliding | WindowKind::TimeSliding)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindowKind::Tumbling => "tumbling",
            WindowKind::Sliding => "sliding",
            WindowKind::TimeTumbling => "timeTumbling",
            WindowKind::TimeSliding => "timeSliding",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match WindowKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
        {
            Some(kind) => Ok(kind),
            None => bail!(
                "unknown window type '{s}', expected one of: \
                 tumbling, sliding, timeTumbling, timeSliding"
            ),
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
