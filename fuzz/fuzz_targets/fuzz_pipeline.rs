//! Fuzzes the track and shape pipeline with arbitrary sample streams.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_pipeline

#![deny(static_mut_refs)]
#![no_main]

use std::time::{Duration, Instant};

use libfuzzer_sys::fuzz_target;
use openpedal_config::PedalConfig;
use openpedal_pipeline::{PedalPipeline, SampleFrame};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let config = PedalConfig {
        track_range: flags & 1 == 1,
        debounce_ms: u64::from(flags >> 1),
        ..PedalConfig::default()
    };
    let range = config.output_range;
    let mut pipeline = PedalPipeline::new(&config);
    let t0 = Instant::now();

    for (i, chunk) in rest.chunks_exact(12).enumerate() {
        let values = chunk
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        let at = t0 + Duration::from_millis(i as u64);
        let output = pipeline.process(&SampleFrame::new(values, at));
        for axis in output.axes() {
            assert!((range.min..=range.max).contains(&axis.value));
        }
    }
});
