//! Serial port discovery.

use std::io;
use std::path::{Path, PathBuf};

/// Port used when nothing is detected.
pub const FALLBACK_PORT: &str = "/dev/ttyUSB0";

/// Device name prefixes, in order of preference.
const PORT_PREFIXES: [&str; 2] = ["ttyUSB", "ttyACM"];

/// Baud rates the serial source can configure.
pub const SUPPORTED_BAUD_RATES: [u32; 12] = [
    1200, 2400, 4800, 9600, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 500_000, 921_600,
];

/// Serial ports under `/dev`, USB-serial adapters first, then CDC-ACM.
///
/// # Errors
///
/// Returns an error if `/dev` cannot be listed.
pub fn list_serial_ports() -> io::Result<Vec<PathBuf>> {
    list_serial_ports_in(Path::new("/dev"))
}

/// Serial ports in `dir`, ordered like [`list_serial_ports`].
///
/// # Errors
///
/// Returns an error if `dir` cannot be listed.
pub fn list_serial_ports_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut ports: Vec<(usize, u32, String)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        for (rank, prefix) in PORT_PREFIXES.iter().enumerate() {
            if let Some(index) = name.strip_prefix(prefix) {
                let Ok(index) = index.parse::<u32>() else {
                    break;
                };
                ports.push((rank, index, name.clone()));
                break;
            }
        }
    }

    ports.sort();
    Ok(ports.into_iter().map(|(_, _, name)| dir.join(name)).collect())
}

/// First detected port, or [`FALLBACK_PORT`].
pub fn find_serial_port() -> PathBuf {
    list_serial_ports()
        .ok()
        .and_then(|ports| ports.into_iter().next())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_PORT))
}

/// Closest rate in [`SUPPORTED_BAUD_RATES`].
pub fn nearest_baud_rate(requested: u32) -> u32 {
    SUPPORTED_BAUD_RATES
        .iter()
        .copied()
        .min_by_key(|rate| rate.abs_diff(requested))
        .unwrap_or(requested)
}
