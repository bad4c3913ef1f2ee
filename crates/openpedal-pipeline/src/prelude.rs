//! Prelude for the pipeline crate.

pub use crate::axis::AxisPipeline;
pub use crate::executor::PedalPipeline;
pub use crate::output::percent_to_output;
pub use crate::types::{AxisOutput, OutputFrame, SampleFrame, Tick};
