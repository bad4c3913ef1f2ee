//! Shared runtime configuration for OpenPedal.
//!
//! A single [`PedalConfig`] value is built at startup (defaults, then an
//! optional YAML/JSON file, then command-line overrides), passed through
//! [`PedalConfig::sanitized`], and handed by reference to the range tracker,
//! the shaping filters and the engine. Nothing reads module-level constants
//! at runtime, so the stages can never disagree about a parameter.
//!
//! Out-of-range or non-finite values are clamped to the nearest valid bound
//! (or replaced by the default) instead of being rejected.
//!
//! # Example
//!
//! ```
//! use openpedal_config::PedalConfig;
//!
//! let config = PedalConfig {
//!     base_alpha: 3.0,
//!     deadzone_top_percent: -5.0,
//!     ..PedalConfig::default()
//! }
//! .sanitized();
//!
//! assert!((config.base_alpha - 1.0).abs() < f32::EPSILON);
//! assert!(config.deadzone_top_percent.abs() < f32::EPSILON);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod axis;
pub mod loader;
pub mod pedal;

pub use axis::{AxisCode, AxisConfig, default_axes};
pub use loader::ConfigFormat;
pub use pedal::{OutputRange, PedalConfig, SourceConfig};
