//! Exit status and severity for a failed command.

use openpedal_errors::{
    ConfigError, EXIT_FAILURE, EXIT_INVALID_CONFIG, EXIT_SINK_UNAVAILABLE,
    EXIT_SOURCE_UNAVAILABLE, ErrorSeverity, PedalError, SinkError, SourceError,
};

/// Map an error to the process exit status.
///
/// The first OpenPedal error found in the chain decides; anything else is a
/// generic failure.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<PedalError>() {
            return e.exit_code();
        }
        if cause.is::<SourceError>() {
            return EXIT_SOURCE_UNAVAILABLE;
        }
        if cause.is::<SinkError>() {
            return EXIT_SINK_UNAVAILABLE;
        }
        if cause.is::<ConfigError>() {
            return EXIT_INVALID_CONFIG;
        }
    }
    EXIT_FAILURE
}

/// Severity of the first OpenPedal error in the chain, `Error` otherwise.
pub fn severity(error: &anyhow::Error) -> ErrorSeverity {
    error
        .chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<PedalError>()
                .map(PedalError::severity)
                .or_else(|| cause.downcast_ref::<SourceError>().map(SourceError::severity))
                .or_else(|| cause.downcast_ref::<SinkError>().map(SinkError::severity))
        })
        .unwrap_or(ErrorSeverity::Error)
}
