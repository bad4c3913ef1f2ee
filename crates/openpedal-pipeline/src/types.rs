//! Values flowing into and out of the pipeline.

use std::time::Instant;

use openpedal_config::AxisCode;

/// One decoded frame: a scalar per axis, in axis order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFrame {
    /// Raw scalars. Extra trailing values are ignored.
    pub values: Vec<f32>,
    /// When the frame was read.
    pub at: Instant,
    /// Source text, kept for the dashboard.
    pub raw: Option<String>,
}

impl SampleFrame {
    /// Frame without source text.
    pub fn new(values: Vec<f32>, at: Instant) -> Self {
        Self {
            values,
            at,
            raw: None,
        }
    }

    /// Attach the text the frame was decoded from.
    #[must_use]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

/// Outcome of one source read.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// A complete, decoded frame.
    Frame(SampleFrame),
    /// Timeout, malformed or short frame. Outputs hold.
    NoSample,
}

impl Tick {
    /// Whether this tick carries a frame.
    pub fn is_sample(&self) -> bool {
        matches!(self, Tick::Frame(_))
    }
}

/// Device value for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOutput {
    /// Absolute axis on the virtual device.
    pub code: AxisCode,
    /// Integer value within the configured output range.
    pub value: i32,
}

/// Every axis value of one tick, committed to the sink as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFrame {
    axes: Vec<AxisOutput>,
}

impl OutputFrame {
    /// Build a frame from per-axis values.
    pub fn new(axes: Vec<AxisOutput>) -> Self {
        Self { axes }
    }

    /// Axis values in configuration order.
    pub fn axes(&self) -> &[AxisOutput] {
        &self.axes
    }

    /// Mutable access for in-place updates.
    pub(crate) fn axes_mut(&mut self) -> &mut [AxisOutput] {
        &mut self.axes
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// True when the frame carries no axis.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Value written to `code`, if that axis is part of the frame.
    pub fn value(&self, code: AxisCode) -> Option<i32> {
        self.axes.iter().find(|a| a.code == code).map(|a| a.value)
    }
}

impl FromIterator<AxisOutput> for OutputFrame {
    fn from_iter<I: IntoIterator<Item = AxisOutput>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
