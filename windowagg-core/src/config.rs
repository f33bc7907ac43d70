//! Window settings and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::WindowKind;

/// Why a set of [`WindowSettings`] cannot build a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowConfigError {
    #[error("window size must be greater than zero")]
    ZeroSize,

    #[error("{kind} window requires a resolution greater than zero")]
    ZeroResolution { kind: WindowKind },

    #[error("resolution {resolution} exceeds window size {size}")]
    ResolutionExceedsSize { resolution: usize, size: usize },

    #[error("{kind} window closes blocks on an external timer; externalTimer must be set")]
    ExternalTimerRequired { kind: WindowKind },

    #[error("{kind} window is count-bounded and cannot be driven by an external timer")]
    ExternalTimerNotSupported { kind: WindowKind },
}

/// Immutable configuration shared by all window variants.
///
/// - `size`: samples per window for count-bounded variants; nominal window
///   span for block-based variants.
/// - `resolution`: hop length for the sliding window, blocks-per-window
///   divisor for the sliding time window. Ignored by tumbling variants.
/// - `external_timer`: the caller closes blocks through `next_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSettings {
    pub size: usize,
    #[serde(default)]
    pub resolution: usize,
    #[serde(default)]
    pub external_timer: bool,
}

impl WindowSettings {
    /// Settings for a window of `size` with no resolution and no external timer.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            resolution: 0,
            external_timer: false,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_external_timer(mut self) -> Self {
        self.external_timer = true;
        self
    }

    /// Check these settings against the requirements of `kind`.
    pub fn validate_for(&self, kind: WindowKind) -> Result<(), WindowConfigError> {
        if self.size == 0 {
            return Err(WindowConfigError::ZeroSize);
        }
        if kind.uses_resolution() {
            if self.resolution == 0 {
                return Err(WindowConfigError::ZeroResolution { kind });
            }
            if self.resolution > self.size {
                return Err(WindowConfigError::ResolutionExceedsSize {
                    resolution: self.resolution,
                    size: self.size,
                });
            }
        }
        match (kind.is_externally_clocked(), self.external_timer) {
            (true, false) => Err(WindowConfigError::ExternalTimerRequired { kind }),
            (false, true) => Err(WindowConfigError::ExternalTimerNotSupported { kind }),
            _ => Ok(()),
        }
    }

    /// Number of closed blocks needed to span one window: `ceil(size / resolution)`.
    ///
    /// Only meaningful once the settings validate for a variant that uses
    /// `resolution`.
    pub fn history_capacity(&self) -> usize {
        self.size.div_ceil(self.resolution.max(1))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
