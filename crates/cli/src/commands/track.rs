//! Range-tracking reporter.
//!
//! Reads raw tilt frames and prints each one normalized to 0..100 against
//! the learned range, one list per line, in the format `run` consumes. This
//! is what the sensor board does when it normalizes on-device; running it on
//! the host lets a raw-reporting board feed a second bridge or a log file.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use openpedal_calibration::RangeTracker;
use openpedal_config::PedalConfig;
use openpedal_io::SampleSource;
use openpedal_pipeline::Tick;
use tracing::info;

use super::TrackArgs;
use crate::settings;

/// Per-axis trackers and the last reported percentages.
#[derive(Debug, Clone)]
pub struct Reporter {
    axes: Vec<(RangeTracker, bool)>,
    percents: Vec<f32>,
}

impl Reporter {
    pub fn new(config: &PedalConfig) -> Self {
        let axes = config
            .axes
            .iter()
            .enumerate()
            .map(|(index, axis)| (RangeTracker::new(index, config), axis.invert))
            .collect();
        Self {
            axes,
            percents: vec![0.0; config.axis_count()],
        }
    }

    /// Normalize one raw frame. An axis with no usable value keeps its
    /// previous percentage.
    pub fn report(&mut self, values: &[f32], now: Instant) -> &[f32] {
        for (((tracker, invert), percent), raw) in self
            .axes
            .iter_mut()
            .zip(self.percents.iter_mut())
            .zip(values.iter())
        {
            let value = if *invert { -*raw } else { *raw };
            if let Some(normalized) = tracker.update(value, now) {
                *percent = normalized;
            }
        }
        &self.percents
    }
}

/// `[12.5, 40.0, 99.1]`: each value rounded to two decimals.
pub fn format_frame(percents: &[f32]) -> String {
    let items: Vec<String> = percents
        .iter()
        .map(|p| format!("{:?}", (p * 100.0).round() / 100.0))
        .collect();
    format!("[{}]", items.join(", "))
}

/// Print a line per frame until `stop` is raised, `limit` lines have been
/// printed, or the source fails. Returns the number of lines printed.
pub fn report_frames<S: SampleSource, W: Write>(
    source: &mut S,
    reporter: &mut Reporter,
    out: &mut W,
    stop: &AtomicBool,
    limit: Option<u64>,
) -> Result<u64> {
    let mut printed: u64 = 0;
    while !stop.load(Ordering::SeqCst) && limit.is_none_or(|n| printed < n) {
        let tick = source.read_frame().map_err(openpedal_errors::PedalError::from)?;
        if let Tick::Frame(frame) = tick {
            let line = format_frame(reporter.report(&frame.values, frame.at));
            writeln!(out, "{line}").context("writing report")?;
            out.flush().context("writing report")?;
            printed = printed.saturating_add(1);
        }
    }
    Ok(printed)
}

/// Run the reporter on the configured serial port.
#[cfg(target_os = "linux")]
pub fn execute(args: &TrackArgs) -> Result<()> {
    let config = settings::resolve(&args.source, None)?;
    let port = settings::serial_port(&config);
    let stop = super::run::install_stop_handler()?;

    let mut source = openpedal_io::open_serial(
        &port,
        config.source.baud,
        config.read_timeout(),
        config.axis_count(),
    )
    .map_err(openpedal_errors::PedalError::from)?;

    let mut reporter = Reporter::new(&config);
    let stdout = std::io::stdout();
    let result = report_frames(&mut source, &mut reporter, &mut stdout.lock(), &stop, args.count);
    source.close().map_err(openpedal_errors::PedalError::from)?;

    let printed = result?;
    info!(port = %source.name(), frames = printed, "reporter stopped");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn execute(args: &TrackArgs) -> Result<()> {
    let _config = settings::resolve(&args.source, None)?;
    info!("serial ports are only supported on Linux");
    Err(openpedal_errors::PedalError::from(openpedal_errors::SourceError::not_found(
        openpedal_io::FALLBACK_PORT,
    ))
    .into())
}
