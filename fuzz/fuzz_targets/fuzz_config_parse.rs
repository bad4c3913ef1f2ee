//! Fuzzes configuration parsing and clamping.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_config_parse

#![deny(static_mut_refs)]
#![no_main]

use libfuzzer_sys::fuzz_target;
use openpedal_config::{ConfigFormat, PedalConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for format in [ConfigFormat::Yaml, ConfigFormat::Json] {
        if let Ok(config) = PedalConfig::parse(text, format) {
            let config = config.sanitized();
            assert!((0.0..=1.0).contains(&config.base_alpha));
            assert!(config.output_range.min < config.output_range.max);
            assert!(!config.axes.is_empty());
        }
    }
});
