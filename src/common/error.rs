// src/common/error.rs

use super::hex::HexError;

/// Errors raised by the packet codec and the channel guard.
///
/// `E` is the transport's own error type. Pure codec functions use the
/// default `()` since they cannot fail on I/O.
#[derive(Debug, thiserror::Error)]
pub enum LinkError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Outbound command was not a valid hex string. Nothing was written.
    #[error("Invalid command encoding: {0}")]
    InvalidEncoding(#[from] HexError),

    /// A packet window ended before its payload did.
    #[error("Truncated payload: needed {needed} bytes, {available} available")]
    TruncatedPayload { needed: usize, available: usize },

    /// Channel could not be opened, even after the access-denied reopen.
    #[error("Channel unavailable: {0:?}")]
    ChannelUnavailable(E),

    /// A receive block could not be completed. `cause` is `None` when the
    /// channel was closed or reported end of stream.
    #[error("Channel read failed after {got} of {needed} bytes: {cause:?}")]
    ChannelReadFailure {
        needed: usize,
        got: usize,
        cause: Option<E>,
    },

    /// The transport accepted zero bytes before the command was fully written.
    #[error("Write stalled after {written} of {needed} bytes")]
    WriteStalled { written: usize, needed: usize },

    /// Write, close or reconfiguration failure from the transport.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A port setting could not be parsed.
    #[error("Invalid port configuration value for '{field}'")]
    InvalidConfig { field: &'static str },
}

impl<E: core::fmt::Debug> LinkError<E> {
    /// True for failures that came from the transport rather than from the
    /// data handed to the codec.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LinkError::ChannelUnavailable(_)
                | LinkError::ChannelReadFailure { .. }
                | LinkError::WriteStalled { .. }
                | LinkError::Io(_)
        )
    }
}
