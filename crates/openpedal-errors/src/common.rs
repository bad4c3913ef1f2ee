//! Top-level error type and classification shared by every OpenPedal crate.

use core::fmt;

use crate::{
    ConfigError, EXIT_INVALID_CONFIG, EXIT_SINK_UNAVAILABLE, EXIT_SOURCE_UNAVAILABLE, SinkError,
    SourceError,
};

/// Top-level error type that can wrap all OpenPedal sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum PedalError {
    /// Sample source errors
    #[error("Sample source error: {0}")]
    Source(#[from] SourceError),

    /// Output sink errors
    #[error("Output sink error: {0}")]
    Sink(#[from] SinkError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PedalError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PedalError::Source(_) => ErrorCategory::Source,
            PedalError::Sink(_) => ErrorCategory::Sink,
            PedalError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PedalError::Source(e) => e.severity(),
            PedalError::Sink(e) => e.severity(),
            PedalError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// Process exit status for this error.
    ///
    /// Source and sink failures get distinct codes so wrapper scripts can
    /// tell a missing serial adapter from a missing uinput permission.
    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Sample source (serial port, stream)
    Source = 0,
    /// Output sink (virtual input device)
    Sink = 1,
    /// Configuration errors
    Config = 2,
}

impl ErrorCategory {
    /// Exit status associated with the category.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::Source => EXIT_SOURCE_UNAVAILABLE,
            ErrorCategory::Sink => EXIT_SINK_UNAVAILABLE,
            ErrorCategory::Config => EXIT_INVALID_CONFIG,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Source => write!(f, "Source"),
            ErrorCategory::Sink => write!(f, "Sink"),
            ErrorCategory::Config => write!(f, "Config"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, recovered on the next tick
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the bridge cannot continue
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXIT_FAILURE;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Source.to_string(), "Source");
        assert_eq!(ErrorCategory::Sink.to_string(), "Sink");
        assert_eq!(ErrorCategory::Config.to_string(), "Config");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        let codes = [
            ErrorCategory::Source.exit_code(),
            ErrorCategory::Sink.exit_code(),
            ErrorCategory::Config.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
            assert_ne!(*a, 0);
            assert_ne!(*a, EXIT_FAILURE);
        }
    }

    #[test]
    fn test_pedal_error_category() {
        let err: PedalError = SourceError::not_found("/dev/ttyUSB0").into();
        assert_eq!(err.category(), ErrorCategory::Source);

        let err: PedalError = SinkError::unavailable("no /dev/uinput").into();
        assert_eq!(err.category(), ErrorCategory::Sink);
    }

    #[test]
    fn test_pedal_error_is_std_error() {
        let err: PedalError = SinkError::permission_denied("ESP32 Pedals").into();
        let _: &dyn std::error::Error = &err;
    }
}
