//! Loading and rendering configuration files.

use std::path::Path;

use openpedal_errors::ConfigError;
use tracing::debug;

use crate::PedalConfig;

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

impl PedalConfig {
    /// Load a configuration file and sanitize it.
    ///
    /// Missing fields take their defaults; out-of-range values are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// or does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.into()))?;

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.into(),
            source,
        })?;

        let config = Self::parse(&content, format).map_err(|reason| ConfigError::parse(path, reason))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config.sanitized())
    }

    /// Parse configuration text in the given format without sanitizing it.
    ///
    /// # Errors
    ///
    /// Returns the parser message on failure.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Render the configuration in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("pedals.YML")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("pedals.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("pedals.toml")), None);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("pedals")), None);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<(), String> {
        let config = PedalConfig::parse("base_alpha: 0.5\n", ConfigFormat::Yaml)?;
        assert!((config.base_alpha - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.debounce_ms, crate::pedal::DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.axis_count(), 3);
        Ok(())
    }

    #[test]
    fn test_render_parse_yaml() -> Result<(), Box<dyn std::error::Error>> {
        let config = PedalConfig::default();
        let text = config.render(ConfigFormat::Yaml)?;
        assert!(text.contains("device_name"));
        assert_eq!(PedalConfig::parse(&text, ConfigFormat::Yaml)?, config);
        Ok(())
    }
}
