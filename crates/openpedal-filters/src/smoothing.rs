//! Adaptive exponential moving average
//!
//! A plain EMA with a fixed alpha either lags behind fast pedal strokes or
//! lets sensor jitter through. This filter uses the base alpha for small
//! changes and raises it toward 1 once the jump from the smoothed value
//! exceeds a threshold.

use openpedal_config::PedalConfig;

use crate::{AxisFrame, PERCENT_MAX, PERCENT_MIN};

/// Distance below which the smoothed value is considered to have arrived.
pub const CONVERGENCE_EPSILON: f32 = 1e-4;

/// Smoothing parameters plus the per-axis running value.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothingState {
    /// Alpha used for jumps up to `diff_threshold`.
    pub base_alpha: f32,
    /// Jump size, in percent, above which the alpha adapts.
    pub diff_threshold: f32,
    /// How quickly the alpha approaches 1 past the threshold.
    pub adaptive_sensitivity: f32,
    /// Current smoothed value.
    pub smoothed: f32,
    /// False until the first valid sample.
    pub initialized: bool,
}

impl SmoothingState {
    /// Create an uninitialized smoother.
    ///
    /// # Example
    ///
    /// ```
    /// use openpedal_filters::SmoothingState;
    ///
    /// let state = SmoothingState::new(0.2, 10.0, 0.5);
    /// assert!(!state.initialized);
    /// ```
    pub fn new(base_alpha: f32, diff_threshold: f32, adaptive_sensitivity: f32) -> Self {
        Self {
            base_alpha,
            diff_threshold,
            adaptive_sensitivity,
            smoothed: 0.0,
            initialized: false,
        }
    }

    /// Take the parameters from a configuration.
    pub fn from_config(config: &PedalConfig) -> Self {
        Self::new(
            config.base_alpha,
            config.diff_threshold_percent,
            config.adaptive_sensitivity,
        )
    }

    /// Value to report when the current sample is unusable.
    #[inline]
    pub fn held(&self) -> f32 {
        if self.initialized { self.smoothed } else { PERCENT_MIN }
    }
}

impl Default for SmoothingState {
    fn default() -> Self {
        Self::from_config(&PedalConfig::default())
    }
}

/// Effective alpha for a jump of `diff` percent.
///
/// Equal to `base_alpha` up to `threshold`; beyond it the alpha moves toward
/// 1 in proportion to how far the jump exceeds the threshold, scaled by
/// `sensitivity` and saturating at 1.
///
/// ```
/// use openpedal_filters::adaptive_alpha;
///
/// assert!((adaptive_alpha(0.2, 2.0, 10.0, 0.5) - 0.2).abs() < 1e-6);
/// assert!((adaptive_alpha(0.2, 45.0, 10.0, 0.5) - 16.0 / 45.0).abs() < 1e-5);
/// assert!((adaptive_alpha(0.2, 100.0, 10.0, 10.0) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn adaptive_alpha(base_alpha: f32, diff: f32, threshold: f32, sensitivity: f32) -> f32 {
    if diff <= threshold {
        return base_alpha;
    }

    let headroom = PERCENT_MAX - threshold;
    if headroom <= 0.0 {
        return 1.0;
    }

    let scale = ((diff - threshold) / headroom * sensitivity).min(1.0);
    base_alpha + (1.0 - base_alpha) * scale
}

/// Adaptive EMA over `frame.output`.
///
/// The first sample seeds the running value and passes through unchanged.
/// Later samples move the running value toward the input by the adaptive
/// alpha; once within [`CONVERGENCE_EPSILON`], or once a step no longer
/// changes it, the running value lands exactly on the input. The output is
/// clamped to `[0, 100]`.
#[inline]
pub fn adaptive_smoothing_filter(frame: &mut AxisFrame, state: &mut SmoothingState) {
    let target = frame.output;

    if !state.initialized {
        state.smoothed = target;
        state.initialized = true;
        frame.output = target.clamp(PERCENT_MIN, PERCENT_MAX);
        return;
    }

    let previous = state.smoothed;
    let diff = (target - previous).abs();
    let alpha = adaptive_alpha(
        state.base_alpha,
        diff,
        state.diff_threshold,
        state.adaptive_sensitivity,
    );

    let next = alpha * target + (1.0 - alpha) * previous;
    let stalled = next.to_bits() == previous.to_bits();
    state.smoothed = if alpha > 0.0 && ((target - next).abs() < CONVERGENCE_EPSILON || stalled) {
        target
    } else {
        next
    };

    frame.output = state.smoothed.clamp(PERCENT_MIN, PERCENT_MAX);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: &mut SmoothingState, value: f32) -> f32 {
        let mut frame = AxisFrame::from_percent(value);
        adaptive_smoothing_filter(&mut frame, state);
        frame.output
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut state = SmoothingState::new(0.2, 10.0, 0.5);
        assert!((step(&mut state, 73.0) - 73.0).abs() < f32::EPSILON);
        assert!(state.initialized);
    }

    #[test]
    fn test_small_jump_uses_base_alpha() {
        let mut state = SmoothingState::new(0.2, 10.0, 0.5);
        step(&mut state, 50.0);
        let out = step(&mut state, 52.0);
        assert!((out - 50.4).abs() < 1e-4, "got {out}");
    }

    #[test]
    fn test_large_jump_uses_adaptive_alpha() {
        let mut state = SmoothingState::new(0.2, 10.0, 0.5);
        step(&mut state, 50.0);
        let out = step(&mut state, 95.0);
        assert!((out - 66.0).abs() < 1e-3, "got {out}");
    }

    #[test]
    fn test_constant_input_converges_exactly() {
        let mut state = SmoothingState::new(0.2, 10.0, 0.5);
        step(&mut state, 0.0);

        let mut ticks = 0;
        while state.smoothed.to_bits() != 37.5f32.to_bits() {
            step(&mut state, 37.5);
            ticks += 1;
            assert!(ticks < 1000, "no convergence, smoothed = {}", state.smoothed);
        }
    }

    #[test]
    fn test_tiny_alpha_still_converges() {
        let mut state = SmoothingState::new(0.01, 100.0, 0.0);
        step(&mut state, 99.0);

        for _ in 0..5000 {
            step(&mut state, 1.0);
        }
        assert_eq!(state.smoothed.to_bits(), 1.0f32.to_bits());
    }

    #[test]
    fn test_zero_alpha_freezes_value() {
        let mut state = SmoothingState::new(0.0, 100.0, 0.0);
        step(&mut state, 40.0);
        for _ in 0..10 {
            step(&mut state, 80.0);
        }
        assert!((state.smoothed - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_alpha_saturates_at_one() {
        let mut state = SmoothingState::new(0.2, 10.0, 50.0);
        step(&mut state, 0.0);
        let out = step(&mut state, 100.0);
        assert!((out - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_held_value() {
        let mut state = SmoothingState::default();
        assert!(state.held().abs() < f32::EPSILON);
        step(&mut state, 12.0);
        assert!((state.held() - 12.0).abs() < f32::EPSILON);
    }
}
