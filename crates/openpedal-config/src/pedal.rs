//! The process-wide pedal configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::axis::{AxisConfig, default_axes};

/// Default base EMA alpha (lower = smoother).
pub const DEFAULT_BASE_ALPHA: f32 = 0.2;
/// Default top deadzone: values at or above 90% snap to 100%.
pub const DEFAULT_DEADZONE_TOP_PERCENT: f32 = 10.0;
/// Default bottom deadzone: values at or below 10% snap to 0%.
pub const DEFAULT_DEADZONE_BOTTOM_PERCENT: f32 = 10.0;
/// Default growth rate of the adaptive alpha past the threshold.
pub const DEFAULT_ADAPTIVE_SENSITIVITY: f32 = 0.5;
/// Default jump size (percent) before the adaptive alpha kicks in.
pub const DEFAULT_DIFF_THRESHOLD_PERCENT: f32 = 10.0;
/// Default debounce before a new extreme is committed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
/// Default idle sleep between ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2;
/// Default dashboard refresh interval (~50 Hz).
pub const DEFAULT_REDRAW_INTERVAL_MS: u64 = 20;
/// Default bound on a single blocking read.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;
/// Default serial line speed.
pub const DEFAULT_BAUD: u32 = 115_200;
/// Default virtual device name.
pub const DEFAULT_DEVICE_NAME: &str = "ESP32 Pedals";

/// Upper bound for the diff threshold; keeps `100 - threshold` away from zero.
pub const MAX_DIFF_THRESHOLD_PERCENT: f32 = 99.0;
/// Upper bound for the adaptive sensitivity.
pub const MAX_ADAPTIVE_SENSITIVITY: f32 = 100.0;
/// Upper bound for the debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;
/// Upper bound for the idle sleep between ticks.
pub const MAX_TICK_INTERVAL_MS: u64 = 100;
/// Redraw interval bounds.
pub const REDRAW_INTERVAL_RANGE_MS: (u64, u64) = (1, 10_000);
/// Read timeout bounds. Serial timeouts have decisecond granularity and a
/// single-byte ceiling, hence 100 ms .. 25.5 s.
pub const READ_TIMEOUT_RANGE_MS: (u64, u64) = (100, 25_500);
/// Lowest accepted baud rate.
pub const MIN_BAUD: u32 = 1200;
/// The kernel truncates uinput names past this many bytes (including NUL).
pub const MAX_DEVICE_NAME_BYTES: usize = 79;

/// Integer range of the virtual device axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRange {
    /// Value reported at 0%.
    pub min: i32,
    /// Value reported at 100%.
    pub max: i32,
}

impl OutputRange {
    /// Create an output range.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Width of the range as a float.
    pub fn span(&self) -> f64 {
        f64::from(self.max) - f64::from(self.min)
    }
}

impl Default for OutputRange {
    fn default() -> Self {
        Self { min: 0, max: 255 }
    }
}

/// Where samples come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Serial port path; auto-detected when unset.
    pub port: Option<PathBuf>,
    /// Line speed.
    pub baud: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: DEFAULT_BAUD,
        }
    }
}

/// Process-wide configuration, read-only once the engine starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedalConfig {
    /// Base smoothing factor in `[0, 1]`.
    pub base_alpha: f32,
    /// Inputs at or above `100 - top` snap to 100.
    pub deadzone_top_percent: f32,
    /// Inputs at or below `bottom` snap to 0.
    pub deadzone_bottom_percent: f32,
    /// How fast the adaptive alpha approaches 1 as the jump grows.
    pub adaptive_sensitivity: f32,
    /// Jumps up to this size use the base alpha.
    pub diff_threshold_percent: f32,
    /// Integer range written to the virtual device.
    pub output_range: OutputRange,
    /// Time a candidate extreme must persist before it is committed.
    pub debounce_ms: u64,
    /// Idle sleep between ticks.
    pub tick_interval_ms: u64,
    /// Minimum interval between dashboard refreshes.
    pub redraw_interval_ms: u64,
    /// Bound on a single blocking read from the source.
    pub read_timeout_ms: u64,
    /// Run the range tracker on incoming values (raw sensor streams).
    /// Disabled when the source already reports percentages.
    pub track_range: bool,
    /// Name of the virtual device.
    pub device_name: String,
    /// Sample source settings.
    pub source: SourceConfig,
    /// Axes in frame order.
    pub axes: Vec<AxisConfig>,
}

impl Default for PedalConfig {
    fn default() -> Self {
        Self {
            base_alpha: DEFAULT_BASE_ALPHA,
            deadzone_top_percent: DEFAULT_DEADZONE_TOP_PERCENT,
            deadzone_bottom_percent: DEFAULT_DEADZONE_BOTTOM_PERCENT,
            adaptive_sensitivity: DEFAULT_ADAPTIVE_SENSITIVITY,
            diff_threshold_percent: DEFAULT_DIFF_THRESHOLD_PERCENT,
            output_range: OutputRange::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            redraw_interval_ms: DEFAULT_REDRAW_INTERVAL_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            track_range: false,
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            source: SourceConfig::default(),
            axes: default_axes(),
        }
    }
}

impl PedalConfig {
    /// Clamp every field into its valid range.
    ///
    /// Non-finite floats fall back to their default, an empty or inverted
    /// output range falls back to the default range, and an empty axis list
    /// falls back to the default pedal set.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.base_alpha = clamp_or(self.base_alpha, 0.0, 1.0, DEFAULT_BASE_ALPHA);
        self.deadzone_top_percent = clamp_or(
            self.deadzone_top_percent,
            0.0,
            100.0,
            DEFAULT_DEADZONE_TOP_PERCENT,
        );
        self.deadzone_bottom_percent = clamp_or(
            self.deadzone_bottom_percent,
            0.0,
            100.0,
            DEFAULT_DEADZONE_BOTTOM_PERCENT,
        );
        self.adaptive_sensitivity = clamp_or(
            self.adaptive_sensitivity,
            0.0,
            MAX_ADAPTIVE_SENSITIVITY,
            DEFAULT_ADAPTIVE_SENSITIVITY,
        );
        self.diff_threshold_percent = clamp_or(
            self.diff_threshold_percent,
            0.0,
            MAX_DIFF_THRESHOLD_PERCENT,
            DEFAULT_DIFF_THRESHOLD_PERCENT,
        );

        if self.output_range.min >= self.output_range.max {
            tracing::warn!(
                min = self.output_range.min,
                max = self.output_range.max,
                "empty output range, using default"
            );
            self.output_range = OutputRange::default();
        }

        self.debounce_ms = self.debounce_ms.min(MAX_DEBOUNCE_MS);
        self.tick_interval_ms = self.tick_interval_ms.min(MAX_TICK_INTERVAL_MS);
        self.redraw_interval_ms = self
            .redraw_interval_ms
            .clamp(REDRAW_INTERVAL_RANGE_MS.0, REDRAW_INTERVAL_RANGE_MS.1);
        self.read_timeout_ms = self
            .read_timeout_ms
            .clamp(READ_TIMEOUT_RANGE_MS.0, READ_TIMEOUT_RANGE_MS.1);
        self.source.baud = self.source.baud.max(MIN_BAUD);

        let name = self.device_name.trim();
        self.device_name = if name.is_empty() {
            DEFAULT_DEVICE_NAME.to_string()
        } else {
            truncate_utf8(name, MAX_DEVICE_NAME_BYTES).to_string()
        };

        if self.axes.is_empty() {
            self.axes = default_axes();
        }

        self
    }

    /// Number of configured axes.
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Idle sleep between ticks as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Dashboard refresh interval as a `Duration`.
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }

    /// Read timeout as a `Duration`.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn clamp_or(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    s.get(..end).unwrap_or(s)
}
