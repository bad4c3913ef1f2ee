//! Prelude for the filters crate.
//!
//! ```
//! use openpedal_filters::prelude::*;
//!
//! let deadzone = DeadzoneState::disabled();
//! let mut smoothing = SmoothingState::default();
//! let mut frame = AxisFrame::from_percent(30.0);
//!
//! shape_filter(&mut frame, &deadzone, &mut smoothing);
//! ```

pub use crate::deadzone::{DeadzoneState, deadzone_filter};
pub use crate::smoothing::{SmoothingState, adaptive_alpha, adaptive_smoothing_filter};
pub use crate::{AxisFrame, sanitize_percent, shape_filter};
