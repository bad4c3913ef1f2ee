//! Fuzzes the serial frame decoder.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_decode_frame

#![deny(static_mut_refs)]
#![no_main]

use libfuzzer_sys::fuzz_target;
use openpedal_io::decode_frame;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    for axis_count in 0..4 {
        if let Some(values) = decode_frame(line, axis_count) {
            assert!(values.len() >= axis_count);
            assert!(values.iter().all(|v| v.is_finite()));
        }
    }
});
