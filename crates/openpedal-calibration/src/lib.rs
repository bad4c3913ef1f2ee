//! Debounced auto-ranging calibration
//!
//! Pedal tilt sensors have no known travel limits: the angle at rest and at
//! full press depends on how each sensor is mounted. This crate learns the
//! limits while the pedals are used. Each axis keeps a running `[min, max]`
//! that only widens after a new extreme has persisted for a debounce window,
//! so a single I2C glitch or a vibration spike cannot corrupt the scale.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use openpedal_calibration::RangeTracker;
//!
//! let mut tracker = RangeTracker::with_debounce(0, Duration::from_millis(1000));
//! let t0 = Instant::now();
//!
//! // A single known point reports full scale.
//! assert_eq!(tracker.update(42.0, t0), Some(100.0));
//!
//! // A new minimum held past the debounce window is committed.
//! tracker.update(10.0, t0 + Duration::from_millis(10));
//! tracker.update(10.0, t0 + Duration::from_millis(1100));
//!
//! let pct = tracker.update(26.0, t0 + Duration::from_millis(1110));
//! assert_eq!(pct, Some(50.0));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod range;
pub mod tracker;

pub use range::{Extreme, RangeSnapshot, RangeState};
pub use tracker::RangeTracker;

/// Percentage reported while the learned range has zero width.
///
/// A single observed point cannot tell rest from travel; it is reported as
/// fully pressed.
pub const DEGENERATE_RANGE_PERCENT: f32 = 100.0;
