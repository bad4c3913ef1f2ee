//! The bridge: serial port in, virtual joystick out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use openpedal_config::PedalConfig;
use openpedal_engine::{ChannelObserver, Engine, EngineStats, NullObserver, Observer};
use openpedal_errors::PedalError;
use openpedal_io::{OutputSink, SampleSource};
use tracing::{info, warn};

use super::RunArgs;
use crate::{dashboard, output, settings};

/// Stop flag raised by Ctrl-C or SIGTERM.
pub fn install_stop_handler() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("installing Ctrl-C handler")?;
    Ok(stop)
}

/// Acquire the port and the virtual device, then run until Ctrl-C.
pub fn execute(args: &RunArgs, json: bool) -> Result<()> {
    let config = settings::resolve(&args.source, Some(&args.shaping))?;
    let port = settings::serial_port(&config);
    let stop = install_stop_handler()?;

    let (source, sink) = acquire(&config, &port)?;
    info!(
        port = %port.display(),
        baud = config.source.baud,
        device = %config.device_name,
        track_range = config.track_range,
        "bridge starting, press Ctrl-C to quit"
    );

    let stats = if args.no_dashboard || json {
        drive(&config, source, sink, NullObserver, &stop)?
    } else {
        let header = format!(
            "{}  serial {} @ {} baud",
            config.device_name,
            settings::port_label(&port),
            config.source.baud
        );
        let (observer, snapshots) = ChannelObserver::bounded(1);
        let renderer = dashboard::spawn(snapshots, header).context("starting dashboard")?;

        let result = drive(&config, source, sink, observer, &stop);
        if renderer.join().is_err() {
            warn!("dashboard thread panicked");
        }
        result?
    };

    output::print_stats(&stats, json);
    Ok(())
}

/// Run the engine to completion. The engine, and with it the observer, is
/// dropped before returning so a dashboard thread sees its channel close.
fn drive<S, K, O>(
    config: &PedalConfig,
    source: S,
    sink: K,
    observer: O,
    stop: &AtomicBool,
) -> Result<EngineStats, PedalError>
where
    S: SampleSource,
    K: OutputSink,
    O: Observer,
{
    let mut engine = Engine::with_observer(config, source, sink, observer);
    engine.run(stop)
}

#[cfg(target_os = "linux")]
fn acquire(
    config: &PedalConfig,
    port: &std::path::Path,
) -> Result<(openpedal_io::SerialSource, openpedal_io::UinputSink), PedalError> {
    let source = openpedal_io::open_serial(
        port,
        config.source.baud,
        config.read_timeout(),
        config.axis_count(),
    )?;
    let sink = openpedal_io::UinputSink::create(config)?;
    tracing::debug!(port = %source.name(), device = %sink.name(), "bridge endpoints ready");
    Ok((source, sink))
}

#[cfg(not(target_os = "linux"))]
fn acquire(
    _config: &PedalConfig,
    _port: &std::path::Path,
) -> Result<(openpedal_io::mock::ScriptedSource, openpedal_io::mock::RecordingSink), PedalError> {
    Err(openpedal_errors::SinkError::unavailable("virtual joysticks need Linux uinput").into())
}
