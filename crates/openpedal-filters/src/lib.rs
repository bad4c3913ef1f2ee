//! Shaping filters for pedal axes
//!
//! Turns a normalized 0–100 percentage into the value the virtual device
//! should report. Two filters run per axis, in order:
//!
//! - **Deadzone**: values near either end snap to exactly 0 or 100, so a
//!   released pedal reads fully released and a floored pedal reads fully
//!   pressed despite sensor noise.
//! - **Adaptive smoothing**: an exponential moving average whose alpha grows
//!   with the size of the jump. Small jitter is smoothed heavily while a fast
//!   stab on the pedal passes through with little lag.
//!
//! Filters follow the same shape: a small `#[repr(C)]` state built once from
//! [`PedalConfig`](openpedal_config::PedalConfig), and a free function that
//! rewrites an [`AxisFrame`] in place. Nothing here allocates.
//!
//! # Example
//!
//! ```
//! use openpedal_filters::prelude::*;
//!
//! let deadzone = DeadzoneState::new(10.0, 10.0);
//! let mut smoothing = SmoothingState::new(0.2, 10.0, 0.5);
//!
//! let mut frame = AxisFrame::from_percent(50.0);
//! shape_filter(&mut frame, &deadzone, &mut smoothing);
//! assert!((frame.output - 50.0).abs() < 1e-4);
//!
//! let mut frame = AxisFrame::from_percent(52.0);
//! shape_filter(&mut frame, &deadzone, &mut smoothing);
//! assert!((frame.output - 50.4).abs() < 1e-4);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod deadzone;
pub mod prelude;
pub mod smoothing;

pub use deadzone::{DeadzoneState, deadzone_filter};
pub use smoothing::{SmoothingState, adaptive_alpha, adaptive_smoothing_filter};

/// Lowest percentage an axis can report.
pub const PERCENT_MIN: f32 = 0.0;
/// Highest percentage an axis can report.
pub const PERCENT_MAX: f32 = 100.0;

/// One axis value on its way through the shaping filters.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisFrame {
    /// Normalized input, as handed over by the range tracker or the source.
    pub input: f32,
    /// Value after the filters that have run so far.
    pub output: f32,
}

impl AxisFrame {
    /// Frame whose output starts equal to its input.
    pub fn from_percent(percent: f32) -> Self {
        Self {
            input: percent,
            output: percent,
        }
    }
}

/// Clamp a finite percentage to `[0, 100]`; `None` for NaN and infinities.
#[inline]
pub fn sanitize_percent(value: f32) -> Option<f32> {
    value
        .is_finite()
        .then(|| value.clamp(PERCENT_MIN, PERCENT_MAX))
}

/// Run the complete shaping chain for one axis.
///
/// A non-finite input is replaced by the held value (the last smoothed
/// output, or 0 before the first valid sample) and leaves the smoothing
/// state untouched. Otherwise the input is clamped, passed through the
/// deadzone, then smoothed.
#[inline]
pub fn shape_filter(frame: &mut AxisFrame, deadzone: &DeadzoneState, smoothing: &mut SmoothingState) {
    let Some(percent) = sanitize_percent(frame.input) else {
        frame.output = smoothing.held();
        return;
    };

    frame.output = percent;
    deadzone_filter(frame, deadzone);
    adaptive_smoothing_filter(frame, smoothing);
}
