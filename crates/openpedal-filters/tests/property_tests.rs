//! Property-based tests for the shaping filters.

use openpedal_filters::prelude::*;

fn ticks_to_settle(state: &mut SmoothingState, from: f32, to: f32, tolerance: f32) -> usize {
    let mut frame = AxisFrame::from_percent(from);
    adaptive_smoothing_filter(&mut frame, state);

    let mut ticks = 0;
    while (state.smoothed - to).abs() > tolerance && ticks < 10_000 {
        let mut frame = AxisFrame::from_percent(to);
        adaptive_smoothing_filter(&mut frame, state);
        ticks += 1;
    }
    ticks
}

#[test]
fn adaptive_jump_settles_faster_than_base() {
    // Same 40% jump; only the threshold decides whether the alpha adapts.
    let mut adaptive = SmoothingState::new(0.2, 10.0, 0.5);
    let mut base_only = SmoothingState::new(0.2, 50.0, 0.5);

    let fast = ticks_to_settle(&mut adaptive, 0.0, 40.0, 0.5);
    let slow = ticks_to_settle(&mut base_only, 0.0, 40.0, 0.5);

    assert!(fast < slow, "adaptive {fast} ticks, base {slow} ticks");
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn output_stays_in_percent_range(
            inputs in proptest::collection::vec(proptest::num::f32::ANY, 1..100),
            alpha in 0.0f32..=1.0,
            threshold in 0.0f32..99.0,
            sensitivity in 0.0f32..100.0,
            bottom in 0.0f32..=100.0,
            top in 0.0f32..=100.0,
        ) {
            let deadzone = DeadzoneState::new(bottom, top);
            let mut smoothing = SmoothingState::new(alpha, threshold, sensitivity);

            for input in inputs {
                let mut frame = AxisFrame::from_percent(input);
                shape_filter(&mut frame, &deadzone, &mut smoothing);
                prop_assert!(frame.output.is_finite());
                prop_assert!((0.0..=100.0).contains(&frame.output),
                    "output {} out of range", frame.output);
            }
        }

        #[test]
        fn adaptive_alpha_bounded(
            base in 0.0f32..=1.0,
            diff in 0.0f32..=100.0,
            threshold in 0.0f32..99.0,
            sensitivity in 0.0f32..100.0,
        ) {
            let alpha = adaptive_alpha(base, diff, threshold, sensitivity);
            prop_assert!(alpha >= base - 1e-6);
            prop_assert!(alpha <= 1.0 + 1e-6);
        }

        #[test]
        fn constant_input_converges_exactly(
            start in 0.0f32..=100.0,
            target in 0.0f32..=100.0,
            alpha in 0.05f32..=1.0,
        ) {
            let mut state = SmoothingState::new(alpha, 10.0, 0.5);
            let mut frame = AxisFrame::from_percent(start);
            adaptive_smoothing_filter(&mut frame, &mut state);

            for _ in 0..2000 {
                let mut frame = AxisFrame::from_percent(target);
                adaptive_smoothing_filter(&mut frame, &mut state);
            }
            prop_assert_eq!(state.smoothed.to_bits(), target.to_bits());
        }

        #[test]
        fn smoothed_moves_toward_input(
            start in 0.0f32..=100.0,
            target in 0.0f32..=100.0,
        ) {
            let mut state = SmoothingState::default();
            let mut frame = AxisFrame::from_percent(start);
            adaptive_smoothing_filter(&mut frame, &mut state);

            let mut frame = AxisFrame::from_percent(target);
            adaptive_smoothing_filter(&mut frame, &mut state);

            let lo = start.min(target) - 1e-3;
            let hi = start.max(target) + 1e-3;
            prop_assert!(state.smoothed >= lo && state.smoothed <= hi);
        }

        #[test]
        fn deadzone_snaps_ends(
            value in 0.0f32..=100.0,
            width in 0.0f32..50.0,
        ) {
            let state = DeadzoneState::new(width, width);
            let mut frame = AxisFrame::from_percent(value);
            deadzone_filter(&mut frame, &state);

            if value <= width {
                prop_assert!(frame.output.abs() < f32::EPSILON);
            } else if value >= 100.0 - width {
                prop_assert!((frame.output - 100.0).abs() < f32::EPSILON);
            } else {
                prop_assert!((frame.output - value).abs() < f32::EPSILON);
            }
        }
    }
}
