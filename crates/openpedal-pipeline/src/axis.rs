//! Track, shape and hold for a single axis.

use std::time::Instant;

use openpedal_calibration::{RangeSnapshot, RangeTracker};
use openpedal_config::{AxisCode, AxisConfig, PedalConfig};
use openpedal_filters::{AxisFrame, DeadzoneState, SmoothingState, shape_filter};

/// Processing chain of one logical pedal.
///
/// Owns the axis' tracker (when range tracking is on) and smoothing state.
/// Axes never share state.
#[derive(Debug, Clone)]
pub struct AxisPipeline {
    label: String,
    code: AxisCode,
    invert: bool,
    tracker: Option<RangeTracker>,
    deadzone: DeadzoneState,
    smoothing: SmoothingState,
    percent: f32,
}

impl AxisPipeline {
    /// Build the chain for axis number `index`.
    pub fn new(index: usize, axis: &AxisConfig, config: &PedalConfig) -> Self {
        Self {
            label: axis.label.clone(),
            code: axis.code,
            invert: axis.invert,
            tracker: config
                .track_range
                .then(|| RangeTracker::new(index, config)),
            deadzone: DeadzoneState::from_config(config),
            smoothing: SmoothingState::from_config(config),
            percent: 0.0,
        }
    }

    /// Feed one raw scalar and return the shaped percentage.
    ///
    /// A value the tracker rejects, or a non-finite one, returns the
    /// previous shaped percentage without touching any state.
    pub fn process(&mut self, raw: f32, now: Instant) -> f32 {
        let normalized = match self.tracker.as_mut() {
            Some(tracker) => {
                let value = if self.invert { -raw } else { raw };
                match tracker.update(value, now) {
                    Some(percent) => percent,
                    None => return self.percent,
                }
            }
            None => raw,
        };

        let mut frame = AxisFrame::from_percent(normalized);
        shape_filter(&mut frame, &self.deadzone, &mut self.smoothing);
        self.percent = frame.output;
        self.percent
    }

    /// Label shown to the user.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Output axis.
    pub fn code(&self) -> AxisCode {
        self.code
    }

    /// Last shaped percentage (0 before the first sample).
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Learned range, when range tracking is on and a sample has arrived.
    pub fn range(&self) -> Option<RangeSnapshot> {
        self.tracker.as_ref().and_then(RangeTracker::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tracking_config() -> PedalConfig {
        PedalConfig {
            track_range: true,
            deadzone_bottom_percent: 0.0,
            deadzone_top_percent: 0.0,
            base_alpha: 1.0,
            ..PedalConfig::default()
        }
    }

    #[test]
    fn test_passthrough_without_tracker() {
        let config = PedalConfig::default();
        let mut axis = AxisPipeline::new(1, &AxisConfig::new("Gas", AxisCode::Y), &config);

        assert!((axis.process(55.0, Instant::now()) - 55.0).abs() < 1e-4);
        assert!(axis.range().is_none());
    }

    #[test]
    fn test_invert_applies_before_tracking() {
        let config = tracking_config();
        let mut axis = AxisPipeline::new(0, &AxisConfig::new("Clutch", AxisCode::X).inverted(), &config);
        let t0 = Instant::now();

        axis.process(10.0, t0);
        axis.process(30.0, t0 + Duration::from_millis(1));
        axis.process(30.0, t0 + Duration::from_millis(1100));

        // Raw 30 inverted is -30: a new minimum.
        let range = axis.range();
        assert_eq!(range.map(|r| r.min), Some(-30.0));
        assert_eq!(range.map(|r| r.max), Some(-10.0));
        assert!(axis.process(30.0, t0 + Duration::from_millis(1110)).abs() < 1e-4);
    }

    #[test]
    fn test_nan_holds_previous_percent() {
        let config = tracking_config();
        let mut axis = AxisPipeline::new(2, &AxisConfig::new("Brake", AxisCode::Rz), &config);
        let t0 = Instant::now();

        let first = axis.process(4.0, t0);
        let held = axis.process(f32::NAN, t0 + Duration::from_millis(5));

        assert!((first - held).abs() < f32::EPSILON);
        assert_eq!(axis.range().map(|r| r.span()), Some(0.0));
    }
}
