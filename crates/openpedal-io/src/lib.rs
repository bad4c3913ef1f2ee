//! Sample sources and output sinks for OpenPedal
//!
//! The engine talks to hardware through two small traits:
//!
//! - [`SampleSource`]: yields one [`Tick`](openpedal_pipeline::Tick) per
//!   bounded read. The serial implementation reads newline-terminated text
//!   frames from a tty configured with `nix` termios.
//! - [`OutputSink`]: commits a whole
//!   [`OutputFrame`](openpedal_pipeline::OutputFrame) at once. The uinput
//!   implementation creates a virtual joystick with `evdev`.
//!
//! [`mock`] provides scripted doubles for both.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod codec;
pub mod mock;
pub mod ports;
#[cfg(target_os = "linux")]
pub mod serial;
pub mod sink;
pub mod source;
#[cfg(target_os = "linux")]
pub mod uinput;

pub use codec::decode_frame;
pub use ports::{FALLBACK_PORT, find_serial_port, list_serial_ports, nearest_baud_rate};
#[cfg(target_os = "linux")]
pub use serial::{SerialSource, open_serial};
pub use sink::OutputSink;
pub use source::{LineReader, LineSource, SampleSource};
#[cfg(target_os = "linux")]
pub use uinput::{UinputSink, ensure_uinput_module};
