//! Centralized error types for OpenPedal
//!
//! The bridge distinguishes three failure classes that matter to callers:
//!
//! - [`device`]: sample source and output sink acquisition/transport errors
//! - [`config`]: configuration file errors
//! - [`common`]: the top-level [`PedalError`], its classification and the
//!   process exit code each class maps to
//!
//! Transient read failures (malformed frames, timeouts) are never errors at
//! this level; they surface as "no sample this tick" inside the engine.
//!
//! # Example
//!
//! ```
//! use openpedal_errors::prelude::*;
//!
//! fn open_port(path: &str) -> Result<()> {
//!     Err(SourceError::not_found(path).into())
//! }
//!
//! let err = open_port("/dev/ttyUSB9").unwrap_err();
//! assert_eq!(err.exit_code(), EXIT_SOURCE_UNAVAILABLE);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod device;
pub mod prelude;

pub use common::{ErrorCategory, ErrorSeverity, PedalError};
pub use config::ConfigError;
pub use device::{SinkError, SourceError};

/// A specialized `Result` type for OpenPedal operations.
pub type Result<T> = std::result::Result<T, PedalError>;

/// Exit status for any failure without a dedicated class.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status when the sample source cannot be acquired.
pub const EXIT_SOURCE_UNAVAILABLE: u8 = 2;

/// Exit status when the output sink cannot be acquired.
pub const EXIT_SINK_UNAVAILABLE: u8 = 3;

/// Exit status for an unreadable or malformed configuration file.
pub const EXIT_INVALID_CONFIG: u8 = 4;
