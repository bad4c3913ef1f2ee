//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use openpedal_errors::prelude::*;
//!
//! fn create_device(name: &str) -> Result<()> {
//!     Err(SinkError::permission_denied(name).into())
//! }
//!
//! assert!(create_device("ESP32 Pedals").is_err());
//! ```

pub use crate::{
    EXIT_FAILURE, EXIT_INVALID_CONFIG, EXIT_SINK_UNAVAILABLE, EXIT_SOURCE_UNAVAILABLE, Result,
    common::{ErrorCategory, ErrorSeverity, PedalError},
    config::ConfigError,
    device::{SinkError, SourceError},
};
