// src/common/hal_traits.rs

use core::fmt::Debug;

use super::config::PortConfig;

/// Why an [`ByteChannel::open`] call failed.
///
/// Access-denied failures get one forced close-and-reopen from the channel
/// guard; any other failure is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError<E> {
    /// The OS refused access to the port (typically a stale handle).
    AccessDenied(E),
    /// Any other open failure.
    Other(E),
}

impl<E> OpenError<E> {
    pub fn into_inner(self) -> E {
        match self {
            OpenError::AccessDenied(e) | OpenError::Other(e) => e,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, OpenError::AccessDenied(_))
    }
}

/// Abstraction for the half-duplex serial link to the measurement board.
///
/// The physical transport (UART, virtual port, socket) lives outside this
/// crate. Implementations enforce their own read/write timeouts and report
/// them as errors.
pub trait ByteChannel {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Port name used in diagnostic lines (e.g. `COM3`, `/dev/ttyUSB0`).
    fn name(&self) -> &str;

    fn is_open(&self) -> bool;

    /// Opens the port. Opening an already open port is not expected.
    fn open(&mut self) -> Result<(), OpenError<Self::Error>>;

    fn close(&mut self) -> Result<(), Self::Error>;

    /// Attempts to write bytes, returning how many were accepted.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if nothing could be accepted yet.
    /// `Ok(0)` for a non-empty `bytes` means the port stopped accepting data
    /// and fails the write.
    fn write(&mut self, bytes: &[u8]) -> nb::Result<usize, Self::Error>;

    /// Attempts to read into `buffer`, returning how many bytes were read.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet.
    /// `Ok(0)` means the far end is gone.
    fn read(&mut self, buffer: &mut [u8]) -> nb::Result<usize, Self::Error>;

    /// Applies port settings. Only called while the port is closed.
    fn set_config(&mut self, config: &PortConfig) -> Result<(), Self::Error>;
}

/// Display tag for a diagnostic line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Severity {
    /// Port lifecycle messages.
    Info,
    /// Hex echo of written bytes.
    Echo,
    /// Failed operations.
    Error,
}

/// Receives the human-readable status lines the link produces.
///
/// The UI label of the desktop application is one implementation; [`LogSink`]
/// is another.
pub trait DiagnosticSink {
    fn report(&self, severity: Severity, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Severity, &str),
{
    fn report(&self, severity: Severity, message: &str) {
        self(severity, message)
    }
}

/// Forwards diagnostic lines to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!("{message}"),
            Severity::Echo => log::debug!("[TX] {message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}
