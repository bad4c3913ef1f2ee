//! Terminal dashboard.
//!
//! Runs on its own thread and draws whatever snapshot the engine last
//! managed to hand over. It exits once the engine drops its end of the
//! channel.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use colored::Colorize;
use crossbeam::channel::Receiver;
use openpedal_engine::Snapshot;

/// Width of a bar in terminal cells.
pub const BAR_WIDTH: usize = 40;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Green bar, `width` cells wide, filled in proportion to `percent`.
pub fn render_bar(percent: f32, width: usize) -> String {
    let filled = filled_cells(percent, width);
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        " ".repeat(width.saturating_sub(filled))
    )
}

fn filled_cells(percent: f32, width: usize) -> usize {
    let fraction = if percent.is_finite() {
        f64::from(percent.clamp(0.0, 100.0)) / 100.0
    } else {
        0.0
    };
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "fraction is in [0, 1] and terminal widths are small"
    )]
    let cells = (fraction * width as f64).floor() as usize;
    cells.min(width)
}

/// One full screen for `snapshot`, without the clear-screen prefix.
pub fn render(snapshot: &Snapshot, header: &str) -> String {
    let mut lines = vec![header.bold().to_string(), String::new()];

    lines.push(match &snapshot.raw {
        Some(raw) => format!("raw: {raw}"),
        None => format!("raw: {}", "<no data>".dimmed()),
    });
    lines.push(String::new());

    for axis in &snapshot.axes {
        lines.push(render_bar(axis.percent, BAR_WIDTH));
        let mut label = format!("{} {:6.2}%  ({})", axis.label, axis.percent, axis.value);
        if let Some(range) = &axis.range {
            let learned = format!("range {:.2} .. {:.2}", range.min, range.max);
            label = format!("{label}  {}", learned.dimmed());
        }
        lines.push(label);
        lines.push(String::new());
    }

    let stats = &snapshot.stats;
    let counters = format!(
        "frames {}  dropouts {}  sink errors {}",
        stats.frames, stats.dropouts, stats.sink_errors
    );
    lines.push(counters.dimmed().to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Start the render thread.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn(receiver: Receiver<Snapshot>, header: String) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("dashboard".into())
        .spawn(move || {
            let stdout = io::stdout();
            for snapshot in receiver.iter() {
                let screen = render(&snapshot, &header);
                let mut out = stdout.lock();
                if write!(out, "{CLEAR_SCREEN}{screen}")
                    .and_then(|()| out.flush())
                    .is_err()
                {
                    break;
                }
            }
        })
}
