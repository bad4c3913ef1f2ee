//! Per-axis configuration.

use serde::{Deserialize, Serialize};

/// Absolute axis a pedal is reported on by the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisCode {
    /// `ABS_X`
    X,
    /// `ABS_Y`
    Y,
    /// `ABS_Z`
    Z,
    /// `ABS_RX`
    Rx,
    /// `ABS_RY`
    Ry,
    /// `ABS_RZ`
    Rz,
    /// `ABS_THROTTLE`
    Throttle,
    /// `ABS_RUDDER`
    Rudder,
    /// `ABS_GAS`
    Gas,
    /// `ABS_BRAKE`
    Brake,
}

/// One logical pedal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Human-readable label shown by the dashboard.
    pub label: String,
    /// Output axis on the virtual device.
    pub code: AxisCode,
    /// Negate the raw scalar before range tracking (sensor mounted upside down).
    /// Ignored when range tracking is off: percentages arrive already oriented.
    #[serde(default)]
    pub invert: bool,
}

impl AxisConfig {
    /// Create a non-inverted axis.
    pub fn new(label: impl Into<String>, code: AxisCode) -> Self {
        Self {
            label: label.into(),
            code,
            invert: false,
        }
    }

    /// Mark the raw scalar of this axis as inverted.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }
}

/// Clutch, gas and brake on `X`, `Y` and `RZ`.
///
/// Clutch and brake sensors are mounted mirrored relative to the gas sensor,
/// so their raw tilt is inverted before tracking.
pub fn default_axes() -> Vec<AxisConfig> {
    vec![
        AxisConfig::new("Clutch", AxisCode::X).inverted(),
        AxisConfig::new("Gas", AxisCode::Y),
        AxisConfig::new("Brake", AxisCode::Rz).inverted(),
    ]
}
