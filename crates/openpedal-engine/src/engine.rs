//! The driving loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use openpedal_config::PedalConfig;
use openpedal_errors::{ErrorSeverity, PedalError};
use openpedal_io::{OutputSink, SampleSource};
use openpedal_pipeline::{PedalPipeline, Tick};
use tracing::{debug, error, info, warn};

use crate::observer::{NullObserver, Observer, RedrawThrottle, Snapshot};
use crate::stats::EngineStats;

/// What a single [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was processed and committed.
    Emitted,
    /// No usable sample; nothing was written.
    Dropout,
    /// A frame was processed but the sink rejected it. The next frame is
    /// committed as usual.
    SinkFailed,
}

/// Single-threaded read → track → shape → emit loop.
///
/// Owns its source and sink and closes both exactly once: when [`run`]
/// returns, whatever the reason, or when the engine is dropped.
///
/// [`run`]: Engine::run
pub struct Engine<S: SampleSource, K: OutputSink, O: Observer = NullObserver> {
    source: S,
    sink: K,
    observer: O,
    pipeline: PedalPipeline,
    throttle: RedrawThrottle,
    tick_interval: Duration,
    stats: EngineStats,
    last_raw: Option<String>,
    closed: bool,
}

impl<S: SampleSource, K: OutputSink, O: Observer> std::fmt::Debug for Engine<S, K, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("pipeline", &self.pipeline)
            .field("tick_interval", &self.tick_interval)
            .field("stats", &self.stats)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl<S: SampleSource, K: OutputSink> Engine<S, K, NullObserver> {
    /// Engine without an observer.
    pub fn new(config: &PedalConfig, source: S, sink: K) -> Self {
        Engine::with_observer(config, source, sink, NullObserver)
    }
}

impl<S: SampleSource, K: OutputSink, O: Observer> Engine<S, K, O> {
    /// Engine that reports snapshots to `observer` at most once per
    /// redraw interval.
    pub fn with_observer(config: &PedalConfig, source: S, sink: K, observer: O) -> Self {
        Self {
            source,
            sink,
            observer,
            pipeline: PedalPipeline::new(config),
            throttle: RedrawThrottle::new(config.redraw_interval()),
            tick_interval: config.tick_interval(),
            stats: EngineStats::new(),
            last_raw: None,
            closed: false,
        }
    }

    /// One iteration: read, process, commit, observe.
    ///
    /// # Errors
    ///
    /// Returns an error when the source goes away or the sink fails in a
    /// way that retrying cannot fix. A rejected write is not an error here;
    /// it is counted and reported as [`TickOutcome::SinkFailed`].
    pub fn tick(&mut self) -> Result<TickOutcome, PedalError> {
        if self.closed {
            return Err(openpedal_errors::SinkError::Closed.into());
        }

        let outcome = match self.source.read_frame()? {
            Tick::NoSample => {
                self.stats.record_dropout();
                TickOutcome::Dropout
            }
            Tick::Frame(frame) => {
                let output = self.pipeline.process(&frame);
                let outcome = match self.sink.commit(output) {
                    Ok(()) => {
                        self.stats.record_frame();
                        TickOutcome::Emitted
                    }
                    Err(e) if e.is_transient() => {
                        warn!(error = %e, "frame not written, retrying next tick");
                        self.stats.record_sink_error();
                        TickOutcome::SinkFailed
                    }
                    Err(e) => return Err(e.into()),
                };
                if frame.raw.is_some() {
                    self.last_raw = frame.raw;
                }
                outcome
            }
        };

        if self.throttle.ready(Instant::now()) {
            let snapshot = Snapshot::capture(&self.pipeline, self.last_raw.as_deref(), self.stats);
            self.observer.observe(snapshot);
        }

        Ok(outcome)
    }

    /// Tick until `stop` is raised or a fatal error occurs, sleeping
    /// `tick_interval` between iterations. Source and sink are closed
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error from [`tick`](Self::tick).
    pub fn run(&mut self, stop: &AtomicBool) -> Result<EngineStats, PedalError> {
        info!(
            axes = self.pipeline.axis_count(),
            tick_interval_ms = self.tick_interval.as_millis(),
            "engine started"
        );

        let result = self.run_loop(stop);
        self.close();

        match &result {
            Ok(stats) => info!(
                ticks = stats.ticks,
                frames = stats.frames,
                dropouts = stats.dropouts,
                sink_errors = stats.sink_errors,
                "engine stopped"
            ),
            Err(e) if e.severity() >= ErrorSeverity::Critical => {
                error!(error = %e, stats = ?self.stats, "engine stopped, device lost");
            }
            Err(e) => warn!(error = %e, stats = ?self.stats, "engine stopped on error"),
        }
        result
    }

    fn run_loop(&mut self, stop: &AtomicBool) -> Result<EngineStats, PedalError> {
        while !stop.load(Ordering::SeqCst) {
            self.tick()?;
            if !self.tick_interval.is_zero() {
                std::thread::sleep(self.tick_interval);
            }
        }
        debug!("stop requested");
        Ok(self.stats)
    }

    /// Close source and sink. Later calls do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.source.close() {
            warn!(error = %e, "closing sample source failed");
        }
        if let Err(e) = self.sink.close() {
            warn!(error = %e, "closing output sink failed");
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// The per-axis pipeline state.
    pub fn pipeline(&self) -> &PedalPipeline {
        &self.pipeline
    }

    /// The observer snapshots are sent to.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<S: SampleSource, K: OutputSink, O: Observer> Drop for Engine<S, K, O> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpedal_io::mock::{RecordingSink, ScriptStep, ScriptedSource};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn config() -> PedalConfig {
        PedalConfig {
            tick_interval_ms: 0,
            ..PedalConfig::default()
        }
    }

    #[test]
    fn test_tick_outcomes() -> TestResult {
        let source = ScriptedSource::new(3);
        source.push_values(&[50.0, 50.0, 50.0]);
        source.push(ScriptStep::NoSample);
        source.push_values(&[60.0, 60.0, 60.0]);
        let sink = RecordingSink::new();
        let mut engine = Engine::new(&config(), source, sink.clone());

        assert_eq!(engine.tick()?, TickOutcome::Emitted);
        assert_eq!(engine.tick()?, TickOutcome::Dropout);

        sink.fail_next_commits(1);
        assert_eq!(engine.tick()?, TickOutcome::SinkFailed);

        let stats = engine.stats();
        assert_eq!((stats.ticks, stats.frames, stats.dropouts, stats.sink_errors), (3, 1, 1, 1));
        assert_eq!(sink.commits().len(), 1);
        Ok(())
    }

    #[test]
    fn test_drop_closes_both_ends() {
        let source = ScriptedSource::new(3);
        let sink = RecordingSink::new();
        {
            let _engine = Engine::new(&config(), source.clone(), sink.clone());
        }
        assert!(source.is_closed());
        assert!(sink.is_closed());
    }

    #[test]
    fn test_tick_after_close_fails() {
        let mut engine = Engine::new(&config(), ScriptedSource::new(3), RecordingSink::new());
        engine.close();
        assert!(engine.is_closed());
        assert!(engine.tick().is_err());
    }
}
