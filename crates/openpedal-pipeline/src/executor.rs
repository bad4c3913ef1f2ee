//! Whole-frame processing across all axes.

use openpedal_config::{OutputRange, PedalConfig};
use tracing::trace;

use crate::axis::AxisPipeline;
use crate::output::percent_to_output;
use crate::types::{AxisOutput, OutputFrame, SampleFrame, Tick};

/// Per-axis pipelines plus the output frame they fill.
///
/// Built once from a [`PedalConfig`]; the tracker and the shaper of every
/// axis read their parameters from that same instance.
#[derive(Debug, Clone)]
pub struct PedalPipeline {
    axes: Vec<AxisPipeline>,
    output_range: OutputRange,
    output: OutputFrame,
}

impl PedalPipeline {
    /// Build one axis pipeline per configured axis.
    pub fn new(config: &PedalConfig) -> Self {
        let axes: Vec<AxisPipeline> = config
            .axes
            .iter()
            .enumerate()
            .map(|(index, axis)| AxisPipeline::new(index, axis, config))
            .collect();

        let output = axes
            .iter()
            .map(|axis| AxisOutput {
                code: axis.code(),
                value: percent_to_output(axis.percent(), &config.output_range),
            })
            .collect();

        Self {
            axes,
            output_range: config.output_range,
            output,
        }
    }

    /// Number of axes a frame must carry.
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Run a decoded frame through every axis and return the full output.
    ///
    /// An axis with no value in `frame` holds its previous output.
    pub fn process(&mut self, frame: &SampleFrame) -> &OutputFrame {
        for (index, (axis, out)) in self
            .axes
            .iter_mut()
            .zip(self.output.axes_mut())
            .enumerate()
        {
            let percent = match frame.values.get(index) {
                Some(&raw) => axis.process(raw, frame.at),
                None => axis.percent(),
            };
            out.value = percent_to_output(percent, &self.output_range);
        }

        trace!(output = ?self.output, "frame processed");
        &self.output
    }

    /// Process a tick. `None` on [`Tick::NoSample`]: nothing changes and
    /// nothing should be written.
    pub fn apply(&mut self, tick: &Tick) -> Option<&OutputFrame> {
        match tick {
            Tick::Frame(frame) => Some(self.process(frame)),
            Tick::NoSample => None,
        }
    }

    /// Output of the last processed frame.
    pub fn output(&self) -> &OutputFrame {
        &self.output
    }

    /// Per-axis pipelines, in configuration order.
    pub fn axes(&self) -> &[AxisPipeline] {
        &self.axes
    }
}
