//! Sample source and output sink error types.
//!
//! Acquisition failures (open, create, permission) are fatal at startup.
//! Read timeouts and malformed frames never reach these types; the engine
//! treats them as "no sample this tick".

use crate::common::ErrorSeverity;

/// Errors raised by a sample source (serial port or other line stream).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Port does not exist
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// Port exists but cannot be opened by this user
    #[error("Permission denied opening {0} (add your user to the dialout group or run with sudo)")]
    PermissionDenied(String),

    /// Opening the port failed for another reason
    #[error("Failed to open serial port {port}: {reason}")]
    OpenFailed {
        /// Port path
        port: String,
        /// Failure reason
        reason: String,
    },

    /// Port opened but line settings could not be applied
    #[error("Failed to configure serial port {port}: {reason}")]
    ConfigureFailed {
        /// Port path
        port: String,
        /// Failure reason
        reason: String,
    },

    /// The device went away while running
    #[error("Sample source disconnected: {0}")]
    Disconnected(String),
}

impl SourceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SourceError::NotFound(_)
            | SourceError::PermissionDenied(_)
            | SourceError::OpenFailed { .. }
            | SourceError::ConfigureFailed { .. } => ErrorSeverity::Error,
            SourceError::Disconnected(_) => ErrorSeverity::Critical,
        }
    }

    /// Map an `open(2)` failure on `port` to the matching variant.
    pub fn from_open(port: impl Into<String>, err: &std::io::Error) -> Self {
        let port = port.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(port),
            std::io::ErrorKind::PermissionDenied => SourceError::PermissionDenied(port),
            _ => SourceError::OpenFailed {
                port,
                reason: err.to_string(),
            },
        }
    }

    /// Create a not found error.
    pub fn not_found(port: impl Into<String>) -> Self {
        SourceError::NotFound(port.into())
    }

    /// Create a configuration failure error.
    pub fn configure_failed(port: impl Into<String>, reason: impl Into<String>) -> Self {
        SourceError::ConfigureFailed {
            port: port.into(),
            reason: reason.into(),
        }
    }

    /// Create a disconnected error.
    pub fn disconnected(port: impl Into<String>) -> Self {
        SourceError::Disconnected(port.into())
    }
}

/// Errors raised by an output sink (virtual analog input device).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The platform facility is missing (e.g. no `/dev/uinput`)
    #[error("Output device unavailable: {0}")]
    Unavailable(String),

    /// Creating the device is not permitted for this user
    #[error("Permission denied creating virtual device {0} (run with sudo or grant access to /dev/uinput)")]
    PermissionDenied(String),

    /// Device creation failed for another reason
    #[error("Failed to create virtual device {name}: {reason}")]
    CreateFailed {
        /// Device name
        name: String,
        /// Failure reason
        reason: String,
    },

    /// Writing a frame failed
    #[error("Failed to write to virtual device: {0}")]
    WriteFailed(String),

    /// The device has been closed
    #[error("Virtual device closed")]
    Closed,
}

impl SinkError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SinkError::Unavailable(_)
            | SinkError::PermissionDenied(_)
            | SinkError::CreateFailed { .. } => ErrorSeverity::Error,
            SinkError::WriteFailed(_) => ErrorSeverity::Warning,
            SinkError::Closed => ErrorSeverity::Critical,
        }
    }

    /// Check if retrying on the next tick might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SinkError::WriteFailed(_))
    }

    /// Map a device creation failure to the matching variant.
    pub fn from_create(name: impl Into<String>, err: &std::io::Error) -> Self {
        let name = name.into();
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => SinkError::PermissionDenied(name),
            std::io::ErrorKind::NotFound => SinkError::Unavailable(err.to_string()),
            _ => SinkError::CreateFailed {
                name,
                reason: err.to_string(),
            },
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SinkError::Unavailable(reason.into())
    }

    /// Create a permission denied error.
    pub fn permission_denied(name: impl Into<String>) -> Self {
        SinkError::PermissionDenied(name.into())
    }
}
