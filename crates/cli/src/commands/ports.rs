//! Serial port discovery.

use anyhow::{Context, Result};
use openpedal_io::{FALLBACK_PORT, list_serial_ports};

use crate::output;

/// List candidate serial ports, the one `run` would pick first.
pub fn execute(json: bool) -> Result<()> {
    let ports = list_serial_ports().context("listing /dev")?;
    output::print_ports(&ports, FALLBACK_PORT, json);
    Ok(())
}
