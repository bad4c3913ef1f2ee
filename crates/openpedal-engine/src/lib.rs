//! Driving loop for OpenPedal
//!
//! One thread runs the whole bridge:
//!
//! ```text
//! loop until stop flag:
//!     source.read_frame()        bounded by the read timeout
//!       NoSample → hold, nothing written
//!       Frame    → pipeline.process → sink.commit(whole frame)
//!     observer.observe(snapshot) at most once per redraw interval
//!     sleep(tick_interval)
//! close source and sink
//! ```
//!
//! The only state shared with other threads is the stop flag (an
//! [`AtomicBool`](std::sync::atomic::AtomicBool)) and, optionally, the
//! bounded snapshot channel behind [`ChannelObserver`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//! use openpedal_config::PedalConfig;
//! use openpedal_engine::Engine;
//! use openpedal_io::mock::{RecordingSink, ScriptedSource};
//!
//! let stop = Arc::new(AtomicBool::new(false));
//! let source = ScriptedSource::new(3).stop_on_drain(Arc::clone(&stop));
//! source.push_values(&[20.0, 50.0, 80.0]);
//! let sink = RecordingSink::new();
//!
//! let config = PedalConfig { tick_interval_ms: 0, ..PedalConfig::default() };
//! let mut engine = Engine::new(&config, source, sink.clone());
//! let stats = engine.run(&stop)?;
//!
//! assert_eq!(stats.frames, 1);
//! assert_eq!(sink.commits().len(), 1);
//! assert!(sink.is_closed());
//! # Ok::<(), openpedal_errors::PedalError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod engine;
pub mod observer;
pub mod prelude;
pub mod stats;

pub use engine::{Engine, TickOutcome};
pub use observer::{AxisSnapshot, ChannelObserver, NullObserver, Observer, RedrawThrottle, Snapshot};
pub use stats::EngineStats;
