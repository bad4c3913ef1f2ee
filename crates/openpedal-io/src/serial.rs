//! Serial port sample source (termios via `nix`).

use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::time::Duration;

use nix::fcntl::OFlag;
use nix::sys::termios::{
    self, BaudRate, ControlFlags, FlushArg, SetArg, SpecialCharacterIndices,
};
use openpedal_errors::SourceError;
use tracing::{info, warn};

use crate::ports::nearest_baud_rate;
use crate::source::LineSource;

/// Line source reading from a tty.
pub type SerialSource = LineSource<File>;

/// Open `port` read-only in raw mode at the closest supported `baud`.
///
/// Each read returns after at most `timeout` (rounded to deciseconds,
/// 0.1–25.5 s) with whatever bytes have arrived. An empty read that comes
/// back well before that is a hang-up and surfaces as
/// [`SourceError::Disconnected`].
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] or [`SourceError::PermissionDenied`]
/// when the port cannot be opened, and [`SourceError::ConfigureFailed`]
/// when the line settings are rejected.
pub fn open_serial(
    port: &Path,
    baud: u32,
    timeout: Duration,
    axis_count: usize,
) -> Result<SerialSource, SourceError> {
    let name = port.display().to_string();

    let file = OpenOptions::new()
        .read(true)
        .custom_flags(OFlag::O_NOCTTY.bits())
        .open(port)
        .map_err(|e| SourceError::from_open(&name, &e))?;

    let rate = nearest_baud_rate(baud);
    if rate != baud {
        warn!(requested = baud, using = rate, "unsupported baud rate, using nearest");
    }

    configure(&file, rate, timeout).map_err(|e| SourceError::configure_failed(&name, e.to_string()))?;
    info!(port = %name, baud = rate, "serial port opened");

    Ok(LineSource::new(name, file, axis_count, timeout)
        .hang_up_on_early_eof(early_eof_window(deciseconds(timeout))))
}

fn configure(file: &File, baud: u32, timeout: Duration) -> nix::Result<()> {
    let mut tty = termios::tcgetattr(file)?;
    termios::cfmakeraw(&mut tty);
    tty.control_flags |= ControlFlags::CLOCAL | ControlFlags::CREAD;
    termios::cfsetspeed(&mut tty, baud_rate(baud))?;

    if let Some(vmin) = tty.control_chars.get_mut(SpecialCharacterIndices::VMIN as usize) {
        *vmin = 0;
    }
    if let Some(vtime) = tty.control_chars.get_mut(SpecialCharacterIndices::VTIME as usize) {
        *vtime = deciseconds(timeout);
    }

    termios::tcsetattr(file, SetArg::TCSANOW, &tty)?;
    termios::tcflush(file, FlushArg::TCIFLUSH)
}

/// VTIME value for `timeout`: tenths of a second, 1..=255.
fn deciseconds(timeout: Duration) -> u8 {
    let tenths = (timeout.as_millis() / 100).clamp(1, 255);
    u8::try_from(tenths).unwrap_or(u8::MAX)
}

/// Empty reads faster than half the VTIME timer are hang-ups.
fn early_eof_window(vtime: u8) -> Duration {
    Duration::from_millis(50).saturating_mul(u32::from(vtime))
}

fn baud_rate(rate: u32) -> BaudRate {
    match rate {
        1200 => BaudRate::B1200,
        2400 => BaudRate::B2400,
        4800 => BaudRate::B4800,
        9600 => BaudRate::B9600,
        19_200 => BaudRate::B19200,
        38_400 => BaudRate::B38400,
        57_600 => BaudRate::B57600,
        230_400 => BaudRate::B230400,
        460_800 => BaudRate::B460800,
        500_000 => BaudRate::B500000,
        921_600 => BaudRate::B921600,
        _ => BaudRate::B115200,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deciseconds() {
        assert_eq!(deciseconds(Duration::from_millis(1000)), 10);
        assert_eq!(deciseconds(Duration::from_millis(20)), 1);
        assert_eq!(deciseconds(Duration::from_secs(60)), 255);
    }

    #[test]
    fn test_early_eof_window_is_half_the_read_timer() {
        assert_eq!(early_eof_window(10), Duration::from_millis(500));
        assert_eq!(early_eof_window(1), Duration::from_millis(50));
        assert_eq!(early_eof_window(deciseconds(Duration::from_secs(60))), Duration::from_millis(12_750));
    }

    #[test]
    fn test_missing_port_is_not_found() {
        let result = open_serial(
            Path::new("/dev/openpedal-test-no-such-port"),
            115_200,
            Duration::from_secs(1),
            3,
        );
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }

    #[test]
    fn test_regular_file_fails_configuration() -> Result<(), Box<dyn std::error::Error>> {
        let file = tempfile::NamedTempFile::new()?;
        let result = open_serial(file.path(), 115_200, Duration::from_secs(1), 3);
        assert!(matches!(result, Err(SourceError::ConfigureFailed { .. })));
        Ok(())
    }
}
