//! Prelude for the engine crate.

pub use crate::engine::{Engine, TickOutcome};
pub use crate::observer::{AxisSnapshot, ChannelObserver, NullObserver, Observer, Snapshot};
pub use crate::stats::EngineStats;
pub use openpedal_io::{OutputSink, SampleSource};
pub use openpedal_pipeline::{OutputFrame, Tick};
