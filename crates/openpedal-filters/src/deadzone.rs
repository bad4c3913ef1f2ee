//! End-of-travel deadzones
//!
//! Snaps values near the ends of the scale to exactly 0 or 100.

use openpedal_config::PedalConfig;

use crate::{AxisFrame, PERCENT_MAX, PERCENT_MIN};

/// Deadzone widths, in percent of travel.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeadzoneState {
    /// Inputs at or below this snap to 0.
    pub bottom_percent: f32,
    /// Inputs at or above `100 - top_percent` snap to 100.
    pub top_percent: f32,
}

impl DeadzoneState {
    /// Create a deadzone with explicit widths.
    ///
    /// # Example
    ///
    /// ```
    /// use openpedal_filters::DeadzoneState;
    ///
    /// let state = DeadzoneState::new(5.0, 10.0);
    /// assert!((state.top_threshold() - 90.0).abs() < f32::EPSILON);
    /// ```
    pub fn new(bottom_percent: f32, top_percent: f32) -> Self {
        Self {
            bottom_percent,
            top_percent,
        }
    }

    /// Take the widths from a configuration.
    pub fn from_config(config: &PedalConfig) -> Self {
        Self::new(config.deadzone_bottom_percent, config.deadzone_top_percent)
    }

    /// No deadzone at either end.
    pub fn disabled() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Lowest value that snaps to 100.
    #[inline]
    pub fn top_threshold(&self) -> f32 {
        PERCENT_MAX - self.top_percent
    }
}

impl Default for DeadzoneState {
    fn default() -> Self {
        Self::from_config(&PedalConfig::default())
    }
}

/// Apply the bottom deadzone, then the top one.
///
/// With the default 10% on each side, 91 becomes 100, 89.9 is left alone and
/// 10 becomes 0.
#[inline]
pub fn deadzone_filter(frame: &mut AxisFrame, state: &DeadzoneState) {
    if frame.output <= state.bottom_percent {
        frame.output = PERCENT_MIN;
    }
    if frame.output >= state.top_threshold() {
        frame.output = PERCENT_MAX;
    }
}
