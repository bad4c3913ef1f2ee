//! Sample sources: anything that yields one [`Tick`] per bounded read.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use openpedal_errors::SourceError;
use openpedal_pipeline::{SampleFrame, Tick};
use tracing::{debug, trace};

use crate::codec::decode_frame;

/// Longest line kept while waiting for a newline. Longer input is noise.
pub const MAX_LINE_BYTES: usize = 1024;

const READ_CHUNK_BYTES: usize = 256;

/// A stream of sample frames.
///
/// `read_frame` must return within a bounded time. A timeout or a frame
/// that does not decode is `Ok(Tick::NoSample)`; `Err` is reserved for the
/// source going away.
pub trait SampleSource {
    /// Read the next frame, bounded by the source's timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the source is no longer usable.
    fn read_frame(&mut self) -> Result<Tick, SourceError>;

    /// Release the underlying handle.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing fails.
    fn close(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Splits a byte stream into text lines without blocking past a deadline.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    pending: Vec<u8>,
    timeout: Duration,
    hang_up_within: Option<Duration>,
}

impl<R: Read> LineReader<R> {
    /// Wrap a reader. `timeout` bounds one call to [`read_line`](Self::read_line)
    /// on top of the reader's own per-read bound.
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(MAX_LINE_BYTES),
            timeout,
            hang_up_within: None,
        }
    }

    /// Treat an empty read that returns sooner than `window` as a hang-up.
    ///
    /// A tty in raw mode with VMIN=0 returns no data only after its VTIME
    /// timer expires. An empty read before that means the line is gone, and
    /// every later read will return immediately too. Readers without this
    /// setting report an empty read as "no line yet".
    pub fn hang_up_on_early_eof(mut self, window: Duration) -> Self {
        self.hang_up_within = Some(window);
        self
    }

    /// Next complete line, trimmed. `Ok(None)` when no line completed in time
    /// or the reader returned no data.
    ///
    /// # Errors
    ///
    /// Propagates read errors other than interruptions and timeouts, and
    /// returns [`io::ErrorKind::UnexpectedEof`] when an early empty read
    /// signals a hang-up (see [`hang_up_on_early_eof`](Self::hang_up_on_early_eof)).
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let deadline = Instant::now().checked_add(self.timeout);
        let mut chunk = [0u8; READ_CHUNK_BYTES];

        loop {
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }

            let started = Instant::now();
            match self.inner.read(&mut chunk) {
                Ok(0) => {
                    if self
                        .hang_up_within
                        .is_some_and(|window| started.elapsed() < window)
                    {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "device hung up",
                        ));
                    }
                    return Ok(None);
                }
                Ok(n) => {
                    self.pending
                        .extend_from_slice(chunk.get(..n).unwrap_or_default());
                    if self.pending.len() > MAX_LINE_BYTES && !self.pending.contains(&b'\n') {
                        debug!(bytes = self.pending.len(), "dropping over-long partial line");
                        self.pending.clear();
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=end).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }
}

/// Line-oriented text source: one decoded frame per line.
#[derive(Debug)]
pub struct LineSource<R> {
    name: String,
    reader: LineReader<R>,
    axis_count: usize,
}

impl<R: Read> LineSource<R> {
    /// Wrap a reader. `name` identifies the source in errors and logs.
    pub fn new(name: impl Into<String>, inner: R, axis_count: usize, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            reader: LineReader::new(inner, timeout),
            axis_count,
        }
    }

    /// Report an early empty read as a disconnect.
    /// See [`LineReader::hang_up_on_early_eof`].
    pub fn hang_up_on_early_eof(mut self, window: Duration) -> Self {
        self.reader = self.reader.hang_up_on_early_eof(window);
        self
    }

    /// Name given at construction (the port path for serial sources).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R: Read> SampleSource for LineSource<R> {
    fn read_frame(&mut self) -> Result<Tick, SourceError> {
        let line = match self.reader.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(Tick::NoSample),
            Err(e) => return Err(SourceError::disconnected(format!("{} ({e})", self.name))),
        };

        match decode_frame(&line, self.axis_count) {
            Some(values) => Ok(Tick::Frame(
                SampleFrame::new(values, Instant::now()).with_raw(line),
            )),
            None => {
                trace!(source = %self.name, line = %line, "discarding malformed frame");
                Ok(Tick::NoSample)
            }
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        debug!(source = %self.name, "sample source closed");
        Ok(())
    }
}
