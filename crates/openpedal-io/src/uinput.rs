//! Virtual joystick through Linux uinput (`evdev`).

use std::io;
use std::path::Path;
use std::process::Command;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, BusType, EventType, InputEvent, InputId, Key,
    UinputAbsSetup,
};
use openpedal_config::{AxisCode, PedalConfig};
use openpedal_errors::SinkError;
use openpedal_pipeline::OutputFrame;
use tracing::{debug, info, warn};

use crate::sink::OutputSink;

/// Path of the uinput control node.
pub const UINPUT_PATH: &str = "/dev/uinput";

/// Device version reported to the input subsystem.
pub const DEVICE_VERSION: u16 = 3;

/// Virtual joystick with one absolute axis per configured pedal.
pub struct UinputSink {
    name: String,
    device: Option<VirtualDevice>,
    events: Vec<InputEvent>,
}

impl std::fmt::Debug for UinputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UinputSink")
            .field("name", &self.name)
            .field("open", &self.device.is_some())
            .finish()
    }
}

impl UinputSink {
    /// Create the virtual device described by `config`.
    ///
    /// Loads the uinput module first if its device node is missing. The
    /// device also advertises `BTN_0`: without a button, games do not
    /// enumerate it as a joystick.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::PermissionDenied`] without access to
    /// `/dev/uinput`, [`SinkError::Unavailable`] when uinput is missing and
    /// [`SinkError::CreateFailed`] otherwise.
    pub fn create(config: &PedalConfig) -> Result<Self, SinkError> {
        ensure_uinput_module();

        let name = config.device_name.clone();
        let device = build_device(config).map_err(|e| SinkError::from_create(&name, &e))?;
        info!(name = %name, axes = config.axis_count(), "virtual device created");

        Ok(Self {
            name,
            device: Some(device),
            events: Vec::with_capacity(config.axis_count()),
        })
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn build_device(config: &PedalConfig) -> io::Result<VirtualDevice> {
    let mut keys = AttributeSet::<Key>::new();
    keys.insert(Key::BTN_0);

    let range = config.output_range;
    let mut builder = VirtualDeviceBuilder::new()?
        .name(&config.device_name)
        .input_id(InputId::new(BusType::BUS_USB, 0, 0, DEVICE_VERSION))
        .with_keys(&keys)?;

    for axis in &config.axes {
        let info = AbsInfo::new(range.min, range.min, range.max, 0, 0, 0);
        builder = builder.with_absolute_axis(&UinputAbsSetup::new(abs_axis(axis.code), info))?;
    }

    builder.build()
}

/// Kernel axis for an [`AxisCode`].
pub fn abs_axis(code: AxisCode) -> AbsoluteAxisType {
    match code {
        AxisCode::X => AbsoluteAxisType::ABS_X,
        AxisCode::Y => AbsoluteAxisType::ABS_Y,
        AxisCode::Z => AbsoluteAxisType::ABS_Z,
        AxisCode::Rx => AbsoluteAxisType::ABS_RX,
        AxisCode::Ry => AbsoluteAxisType::ABS_RY,
        AxisCode::Rz => AbsoluteAxisType::ABS_RZ,
        AxisCode::Throttle => AbsoluteAxisType::ABS_THROTTLE,
        AxisCode::Rudder => AbsoluteAxisType::ABS_RUDDER,
        AxisCode::Gas => AbsoluteAxisType::ABS_GAS,
        AxisCode::Brake => AbsoluteAxisType::ABS_BRAKE,
    }
}

/// Try `modprobe uinput` when the device node is missing. Failure is only
/// logged; device creation reports the real error.
pub fn ensure_uinput_module() {
    if Path::new(UINPUT_PATH).exists() {
        return;
    }

    debug!("{UINPUT_PATH} missing, loading uinput module");
    match Command::new("modprobe").arg("uinput").status() {
        Ok(status) if status.success() => info!("loaded uinput kernel module"),
        Ok(status) => warn!(%status, "modprobe uinput failed"),
        Err(e) => warn!(error = %e, "could not run modprobe"),
    }
}

impl OutputSink for UinputSink {
    fn commit(&mut self, frame: &OutputFrame) -> Result<(), SinkError> {
        let device = self.device.as_mut().ok_or(SinkError::Closed)?;

        self.events.clear();
        self.events.extend(frame.axes().iter().map(|axis| {
            InputEvent::new(EventType::ABSOLUTE, abs_axis(axis.code).0, axis.value)
        }));

        // `emit` appends the SYN_REPORT after the batch.
        device
            .emit(&self.events)
            .map_err(|e| SinkError::WriteFailed(e.to_string()))
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if self.device.take().is_some() {
            info!(name = %self.name, "virtual device destroyed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axis_mapping() {
        assert_eq!(abs_axis(AxisCode::X), AbsoluteAxisType::ABS_X);
        assert_eq!(abs_axis(AxisCode::Y), AbsoluteAxisType::ABS_Y);
        assert_eq!(abs_axis(AxisCode::Rz), AbsoluteAxisType::ABS_RZ);
    }

    #[test]
    fn test_axis_codes_distinct() {
        let codes = [
            AxisCode::X,
            AxisCode::Y,
            AxisCode::Z,
            AxisCode::Rx,
            AxisCode::Ry,
            AxisCode::Rz,
            AxisCode::Throttle,
            AxisCode::Rudder,
            AxisCode::Gas,
            AxisCode::Brake,
        ];
        let mut raw: Vec<u16> = codes.iter().map(|c| abs_axis(*c).0).collect();
        raw.sort_unstable();
        raw.dedup();
        assert_eq!(raw.len(), codes.len());
    }
}
