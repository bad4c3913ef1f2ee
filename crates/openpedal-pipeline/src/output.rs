//! Percent to device value mapping.

use openpedal_config::OutputRange;
use openpedal_filters::sanitize_percent;

/// Map a percentage onto the device's integer range.
///
/// `round(min + pct / 100 * (max - min))`, with `pct` clamped to `[0, 100]`
/// first and the result clamped to `[min, max]`. Non-finite input maps to
/// `min`.
///
/// ```
/// use openpedal_config::OutputRange;
/// use openpedal_pipeline::percent_to_output;
///
/// let range = OutputRange::default();
/// assert_eq!(percent_to_output(0.0, &range), 0);
/// assert_eq!(percent_to_output(50.0, &range), 128);
/// assert_eq!(percent_to_output(100.0, &range), 255);
/// ```
pub fn percent_to_output(percent: f32, range: &OutputRange) -> i32 {
    let percent = sanitize_percent(percent).unwrap_or(0.0);
    let lo = f64::from(range.min);
    let hi = f64::from(range.max);
    let value = (lo + f64::from(percent) / 100.0 * range.span()).round();

    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is clamped to an i32 range first"
    )]
    let out = value.max(lo).min(hi) as i32;
    out
}
