//! Per-axis processing for OpenPedal
//!
//! Connects the range tracker and the shaping filters into the chain every
//! decoded frame goes through:
//!
//! ```text
//! SampleFrame ─┬─ axis 0: [invert → RangeTracker] → deadzone → adaptive EMA → percent_to_output
//!              ├─ axis 1: ...                                                        │
//!              └─ axis N: ...                                                        ▼
//!                                                                               OutputFrame
//! ```
//!
//! The range tracker only runs when `track_range` is set; otherwise the
//! incoming values are already percentages. A [`Tick::NoSample`] leaves every
//! axis untouched, and so does a non-finite value for a single axis.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use openpedal_config::{AxisCode, PedalConfig};
//! use openpedal_pipeline::prelude::*;
//!
//! let mut pipeline = PedalPipeline::new(&PedalConfig::default());
//! let frame = SampleFrame::new(vec![5.0, 95.0, 40.0], Instant::now());
//!
//! let output = pipeline.process(&frame);
//! assert_eq!(output.value(AxisCode::X), Some(0));
//! assert_eq!(output.value(AxisCode::Y), Some(255));
//! assert_eq!(output.value(AxisCode::Rz), Some(102));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod axis;
pub mod executor;
pub mod output;
pub mod prelude;
pub mod types;

pub use axis::AxisPipeline;
pub use executor::PedalPipeline;
pub use output::percent_to_output;
pub use types::{AxisOutput, OutputFrame, SampleFrame, Tick};
