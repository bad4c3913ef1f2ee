//! Command-line overrides on top of the configuration file.

use std::path::{Path, PathBuf};

use clap::Args;
use openpedal_config::PedalConfig;
use openpedal_errors::ConfigError;
use openpedal_io::find_serial_port;

/// Where samples come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, env = "PEDALCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Serial port (auto-detected if omitted)
    #[arg(short, long)]
    pub port: Option<PathBuf>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// How long a new extreme must persist before the range widens
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

/// How values are shaped and published.
#[derive(Args, Debug, Clone, Default)]
pub struct ShapingArgs {
    /// Base EMA alpha, 0..1 (lower is smoother)
    #[arg(long, allow_negative_numbers = true)]
    pub alpha: Option<f32>,

    /// Top deadzone percent (values >= 100 - deadzone snap to 100)
    #[arg(long, allow_negative_numbers = true)]
    pub deadzone: Option<f32>,

    /// Bottom deadzone percent (values <= deadzone snap to 0)
    #[arg(long, allow_negative_numbers = true)]
    pub deadzone_bottom: Option<f32>,

    /// Virtual device name
    #[arg(long)]
    pub name: Option<String>,

    /// Learn each pedal's range from raw sensor values instead of expecting
    /// percentages
    #[arg(long)]
    pub track: bool,
}

impl SourceArgs {
    fn apply(&self, config: &mut PedalConfig) {
        if let Some(port) = &self.port {
            config.source.port = Some(port.clone());
        }
        if let Some(baud) = self.baud {
            config.source.baud = baud;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
    }
}

impl ShapingArgs {
    fn apply(&self, config: &mut PedalConfig) {
        if let Some(alpha) = self.alpha {
            config.base_alpha = alpha;
        }
        if let Some(top) = self.deadzone {
            config.deadzone_top_percent = top;
        }
        if let Some(bottom) = self.deadzone_bottom {
            config.deadzone_bottom_percent = bottom;
        }
        if let Some(name) = &self.name {
            config.device_name = name.clone();
        }
        if self.track {
            config.track_range = true;
        }
    }
}

/// Load the configuration file (or the defaults), apply the overrides and
/// clamp the result.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded.
pub fn resolve(source: &SourceArgs, shaping: Option<&ShapingArgs>) -> Result<PedalConfig, ConfigError> {
    let mut config = match &source.config {
        Some(path) => PedalConfig::load(path)?,
        None => PedalConfig::default(),
    };

    source.apply(&mut config);
    if let Some(shaping) = shaping {
        shaping.apply(&mut config);
    }

    Ok(config.sanitized())
}

/// Configured port, or the first detected one.
pub fn serial_port(config: &PedalConfig) -> PathBuf {
    config
        .source
        .port
        .clone()
        .unwrap_or_else(find_serial_port)
}

/// Display form of a port path.
pub fn port_label(port: &Path) -> String {
    port.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpedal_config::pedal::{DEFAULT_BAUD, DEFAULT_DEVICE_NAME};
    use std::io::Write;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_defaults_without_overrides() -> TestResult {
        let config = resolve(&SourceArgs::default(), Some(&ShapingArgs::default()))?;
        assert_eq!(config, PedalConfig::default());
        Ok(())
    }

    #[test]
    fn test_out_of_range_overrides_are_clamped() -> TestResult {
        let shaping = ShapingArgs {
            alpha: Some(3.0),
            deadzone: Some(-5.0),
            deadzone_bottom: Some(250.0),
            name: Some("  ".into()),
            track: true,
        };
        let config = resolve(&SourceArgs::default(), Some(&shaping))?;

        assert!((config.base_alpha - 1.0).abs() < f32::EPSILON);
        assert!(config.deadzone_top_percent.abs() < f32::EPSILON);
        assert!((config.deadzone_bottom_percent - 100.0).abs() < f32::EPSILON);
        assert_eq!(config.device_name, DEFAULT_DEVICE_NAME);
        assert!(config.track_range);
        Ok(())
    }

    #[test]
    fn test_flags_override_config_file() -> TestResult {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "base_alpha: 0.5")?;
        writeln!(file, "source:")?;
        writeln!(file, "  port: /dev/ttyACM3")?;
        writeln!(file, "  baud: 57600")?;

        let source = SourceArgs {
            config: Some(file.path().to_path_buf()),
            baud: Some(9600),
            ..SourceArgs::default()
        };
        let config = resolve(&source, None)?;

        assert!((config.base_alpha - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.source.port, Some(PathBuf::from("/dev/ttyACM3")));
        assert_eq!(config.source.baud, 9600);
        assert_eq!(serial_port(&config), PathBuf::from("/dev/ttyACM3"));
        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let source = SourceArgs {
            config: Some(PathBuf::from("/nonexistent/pedals.yaml")),
            ..SourceArgs::default()
        };
        assert!(matches!(resolve(&source, None), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_source_overrides_only() -> TestResult {
        let source = SourceArgs {
            debounce_ms: Some(250),
            ..SourceArgs::default()
        };
        let config = resolve(&source, None)?;
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.source.baud, DEFAULT_BAUD);
        Ok(())
    }
}
