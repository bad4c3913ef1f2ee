//! Output sinks: where shaped frames end up.

use openpedal_errors::SinkError;
use openpedal_pipeline::OutputFrame;

/// A virtual analog input device.
pub trait OutputSink {
    /// Write every axis of `frame`, then a single synchronization marker,
    /// so readers never observe a partially updated frame.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::WriteFailed`] when the write did not go through,
    /// or [`SinkError::Closed`] after [`close`](Self::close).
    fn commit(&mut self, frame: &OutputFrame) -> Result<(), SinkError>;

    /// Destroy the device.
    ///
    /// # Errors
    ///
    /// Returns an error if teardown fails.
    fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
