//! End-to-end tests of the track → shape → map chain.

use std::time::{Duration, Instant};

use openpedal_config::{AxisCode, AxisConfig, OutputRange, PedalConfig};
use openpedal_pipeline::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn single_axis(track_range: bool) -> PedalConfig {
    PedalConfig {
        track_range,
        axes: vec![AxisConfig::new("Gas", AxisCode::Y)],
        ..PedalConfig::default()
    }
}

fn frame(values: &[f32], at: Instant) -> Tick {
    Tick::Frame(SampleFrame::new(values.to_vec(), at))
}

#[test]
fn learned_range_drives_output() -> TestResult {
    let config = PedalConfig {
        deadzone_bottom_percent: 0.0,
        deadzone_top_percent: 0.0,
        base_alpha: 1.0,
        ..single_axis(true)
    };
    let mut pipeline = PedalPipeline::new(&config);
    let t0 = Instant::now();
    let at = |ms: u64| t0 + Duration::from_millis(ms);

    let first = pipeline.apply(&frame(&[42.0], at(0))).ok_or("no output")?;
    assert_eq!(first.value(AxisCode::Y), Some(255));

    for ms in (10..=1100).step_by(10) {
        pipeline.apply(&frame(&[10.0], at(ms)));
    }
    let range = pipeline.axes().first().and_then(AxisPipeline::range).ok_or("no range")?;
    assert!((range.min - 10.0).abs() < f32::EPSILON);

    let mid = pipeline.apply(&frame(&[26.0], at(1200))).ok_or("no output")?;
    let value = mid.value(AxisCode::Y).ok_or("missing axis")?;
    assert!(value > 0 && value < 255, "value {value}");
    assert_eq!(value, 128);
    Ok(())
}

#[test]
fn three_bad_frames_then_recovery() -> TestResult {
    let mut pipeline = PedalPipeline::new(&PedalConfig::default());
    let now = Instant::now();

    let settled = pipeline
        .apply(&frame(&[50.0, 50.0, 50.0], now))
        .ok_or("no output")?
        .clone();

    for _ in 0..3 {
        assert!(pipeline.apply(&Tick::NoSample).is_none());
        assert_eq!(pipeline.output(), &settled);
    }

    let recovered = pipeline
        .apply(&frame(&[52.0, 52.0, 52.0], now))
        .ok_or("no output")?;
    // 50 → 52 with alpha 0.2 gives 50.4%, i.e. 128.52 → 129.
    assert_eq!(recovered.value(AxisCode::Y), Some(129));
    Ok(())
}

#[test]
fn non_finite_axis_holds_only_that_axis() -> TestResult {
    let mut pipeline = PedalPipeline::new(&PedalConfig::default());
    let now = Instant::now();

    pipeline.apply(&frame(&[30.0, 30.0, 30.0], now));
    let output = pipeline
        .apply(&frame(&[f32::NAN, 30.0, 31.0], now))
        .ok_or("no output")?;

    assert_eq!(output.value(AxisCode::X), Some(77));
    assert_eq!(output.value(AxisCode::Y), Some(77));
    assert_eq!(output.value(AxisCode::Rz), Some(77));
    Ok(())
}

#[test]
fn custom_output_range() -> TestResult {
    let config = PedalConfig {
        output_range: OutputRange::new(-1000, 1000),
        ..single_axis(false)
    };
    let mut pipeline = PedalPipeline::new(&config);
    let output = pipeline
        .apply(&frame(&[50.0], Instant::now()))
        .ok_or("no output")?;
    assert_eq!(output.value(AxisCode::Y), Some(0));
    Ok(())
}

#[cfg(test)]
mod proptest_pipeline {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn single_dropout_never_changes_output(
            values in proptest::collection::vec(0.0f32..=100.0, 1..40),
            track in any::<bool>(),
        ) {
            let mut pipeline = PedalPipeline::new(&single_axis(track));
            let t0 = Instant::now();

            for (i, value) in values.iter().enumerate() {
                let at = t0 + Duration::from_millis(10 * i as u64);
                pipeline.apply(&frame(&[*value], at));

                let before = pipeline.output().clone();
                prop_assert!(pipeline.apply(&Tick::NoSample).is_none());
                prop_assert_eq!(pipeline.output(), &before);
            }
        }

        #[test]
        fn output_within_device_range(
            values in proptest::collection::vec(proptest::num::f32::ANY, 1..40),
            min in -5000i32..0,
            max in 1i32..5000,
            track in any::<bool>(),
        ) {
            let config = PedalConfig {
                output_range: OutputRange::new(min, max),
                ..single_axis(track)
            };
            let mut pipeline = PedalPipeline::new(&config);
            let t0 = Instant::now();

            for (i, value) in values.iter().enumerate() {
                let at = t0 + Duration::from_millis(3 * i as u64);
                let output = pipeline.process(&SampleFrame::new(vec![*value], at));
                for axis in output.axes() {
                    prop_assert!(axis.value >= min && axis.value <= max);
                }
            }
        }
    }
}
