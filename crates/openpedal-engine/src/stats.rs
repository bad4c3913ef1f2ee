//! Loop counters.

use serde::{Deserialize, Serialize};

/// Counters kept by the engine over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Loop iterations.
    pub ticks: u64,
    /// Frames committed to the sink.
    pub frames: u64,
    /// Ticks without a usable sample.
    pub dropouts: u64,
    /// Commits the sink rejected.
    pub sink_errors: u64,
}

impl EngineStats {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a committed frame.
    pub fn record_frame(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
        self.frames = self.frames.saturating_add(1);
    }

    /// Count a tick without a sample.
    pub fn record_dropout(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
        self.dropouts = self.dropouts.saturating_add(1);
    }

    /// Count a frame the sink rejected.
    pub fn record_sink_error(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
        self.sink_errors = self.sink_errors.saturating_add(1);
    }

    /// Share of ticks without a sample, in `[0, 1]`.
    pub fn dropout_ratio(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "ratio for display; counts far below 2^52"
        )]
        let ratio = self.dropouts as f64 / self.ticks as f64;
        ratio
    }
}
