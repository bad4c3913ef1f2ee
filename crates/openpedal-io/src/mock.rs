//! In-memory source and sink for tests.
//!
//! Both are cheap to clone; clones share state, so a test can keep a handle
//! while the engine owns the other one.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use openpedal_errors::{SinkError, SourceError};
use openpedal_pipeline::{OutputFrame, SampleFrame, Tick};

use crate::codec::decode_frame;
use crate::sink::OutputSink;
use crate::source::SampleSource;

/// One scripted read.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// A decoded frame.
    Values(Vec<f32>),
    /// A text line, decoded like a serial line.
    Line(String),
    /// A read that timed out.
    NoSample,
    /// The source goes away.
    Disconnect,
}

#[derive(Debug, Default)]
struct SourceState {
    steps: VecDeque<ScriptStep>,
    reads: usize,
    closed: bool,
}

/// Source replaying a fixed script, then reporting no samples.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    axis_count: usize,
    state: Arc<Mutex<SourceState>>,
    stop_on_drain: Option<Arc<AtomicBool>>,
}

impl ScriptedSource {
    pub fn new(axis_count: usize) -> Self {
        Self {
            axis_count,
            state: Arc::new(Mutex::new(SourceState::default())),
            stop_on_drain: None,
        }
    }

    /// Raise `flag` once the script has been consumed.
    #[must_use]
    pub fn stop_on_drain(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_on_drain = Some(flag);
        self
    }

    pub fn push(&self, step: ScriptStep) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.steps.push_back(step);
    }

    pub fn push_values(&self, values: &[f32]) {
        self.push(ScriptStep::Values(values.to_vec()));
    }

    pub fn push_line(&self, line: impl Into<String>) {
        self.push(ScriptStep::Line(line.into()));
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).reads
    }

    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).steps.len()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }
}

impl SampleSource for ScriptedSource {
    fn read_frame(&mut self) -> Result<Tick, SourceError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.reads = state.reads.saturating_add(1);

        let step = state.steps.pop_front();
        if state.steps.is_empty()
            && let Some(flag) = &self.stop_on_drain
        {
            flag.store(true, Ordering::SeqCst);
        }

        match step {
            Some(ScriptStep::Values(values)) => Ok(Tick::Frame(SampleFrame::new(values, Instant::now()))),
            Some(ScriptStep::Line(line)) => Ok(decode_frame(&line, self.axis_count)
                .map_or(Tick::NoSample, |values| {
                    Tick::Frame(SampleFrame::new(values, Instant::now()).with_raw(line))
                })),
            Some(ScriptStep::NoSample) | None => Ok(Tick::NoSample),
            Some(ScriptStep::Disconnect) => Err(SourceError::disconnected("scripted")),
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed = true;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SinkState {
    commits: Vec<OutputFrame>,
    fail_next: usize,
    failed: usize,
    closed: bool,
}

/// Sink recording every committed frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` commits fail with a write error.
    pub fn fail_next_commits(&self, count: usize) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fail_next = count;
    }

    pub fn commits(&self) -> Vec<OutputFrame> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).commits.clone()
    }

    pub fn failed_commits(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failed
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }
}

impl OutputSink for RecordingSink {
    fn commit(&mut self, frame: &OutputFrame) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return Err(SinkError::Closed);
        }
        if state.fail_next > 0 {
            state.fail_next = state.fail_next.saturating_sub(1);
            state.failed = state.failed.saturating_add(1);
            return Err(SinkError::WriteFailed("injected failure".to_string()));
        }
        state.commits.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpedal_config::AxisCode;
    use openpedal_pipeline::AxisOutput;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_scripted_source_replays() -> TestResult {
        let mut source = ScriptedSource::new(2);
        source.push_values(&[1.0, 2.0]);
        source.push_line("[1, oops]");
        source.push(ScriptStep::Disconnect);

        assert!(source.read_frame()?.is_sample());
        assert_eq!(source.read_frame()?, Tick::NoSample);
        assert!(source.read_frame().is_err());
        assert_eq!(source.read_frame()?, Tick::NoSample);
        assert_eq!(source.reads(), 4);
        Ok(())
    }

    #[test]
    fn test_stop_on_drain() -> TestResult {
        let stop = Arc::new(AtomicBool::new(false));
        let mut source = ScriptedSource::new(1).stop_on_drain(Arc::clone(&stop));
        source.push_values(&[1.0]);
        source.push_values(&[2.0]);

        source.read_frame()?;
        assert!(!stop.load(Ordering::SeqCst));
        source.read_frame()?;
        assert!(stop.load(Ordering::SeqCst));
        Ok(())
    }

    #[test]
    fn test_recording_sink_failures_and_close() -> TestResult {
        let mut sink = RecordingSink::new();
        let handle = sink.clone();
        let frame = OutputFrame::new(vec![AxisOutput {
            code: AxisCode::X,
            value: 7,
        }]);

        handle.fail_next_commits(1);
        assert!(matches!(sink.commit(&frame), Err(SinkError::WriteFailed(_))));
        sink.commit(&frame)?;
        sink.close()?;
        assert!(matches!(sink.commit(&frame), Err(SinkError::Closed)));

        assert_eq!(handle.commits(), vec![frame]);
        assert_eq!(handle.failed_commits(), 1);
        assert!(handle.is_closed());
        Ok(())
    }
}
