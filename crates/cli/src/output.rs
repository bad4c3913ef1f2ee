//! Output formatting for CLI responses

use std::path::PathBuf;

use anyhow::Error;
use colored::Colorize;
use openpedal_engine::EngineStats;
use openpedal_errors::ErrorSeverity;
use serde_json::json;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "exit_code": crate::error::exit_code(error),
            "severity": crate::error::severity(error).to_string(),
            "causes": error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    let label = match crate::error::severity(error) {
        ErrorSeverity::Critical => "Fatal:",
        _ => "Error:",
    };
    eprintln!("{} {}", label.red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the counters of a finished run.
pub fn print_stats(stats: &EngineStats, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "stats": stats,
            "dropout_ratio": stats.dropout_ratio(),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format stats as JSON: {e}"),
        }
        return;
    }

    eprintln!("{}", "Stopped.".bold());
    eprintln!(
        "  ticks {}  frames {}  dropouts {} ({:.1}%)  sink errors {}",
        stats.ticks,
        stats.frames,
        stats.dropouts,
        stats.dropout_ratio() * 100.0,
        stats.sink_errors
    );
}

/// Print detected serial ports.
pub fn print_ports(ports: &[PathBuf], fallback: &str, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "ports": ports,
            "selected": ports.first().map_or_else(|| fallback.to_string(), |p| p.display().to_string()),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format port list as JSON: {e}"),
        }
        return;
    }

    if ports.is_empty() {
        println!("{}", "No serial ports found".yellow());
        println!("  default: {}", fallback.dimmed());
        return;
    }

    println!("{}", "Serial ports:".bold());
    for (i, port) in ports.iter().enumerate() {
        let marker = if i == 0 { "●".green() } else { "○".dimmed() };
        println!("  {} {}", marker, port.display());
    }
}
