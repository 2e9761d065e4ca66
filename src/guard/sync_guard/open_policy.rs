// src/guard/sync_guard/open_policy.rs

use super::ChannelGuard;
use crate::common::{
    error::LinkError,
    hal_traits::{ByteChannel, DiagnosticSink, OpenError, Severity},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl<C, D> ChannelGuard<C, D>
where
    C: ByteChannel,
    D: DiagnosticSink,
{
    /// Opens `channel` unless it already is, with the single reopen on
    /// access-denied. Must be called with the section held.
    pub(super) fn open_locked(&self, channel: &mut C) -> Result<(), LinkError<C::Error>> {
        if channel.is_open() {
            return Ok(());
        }

        match channel.open() {
            Ok(()) => {}
            Err(OpenError::AccessDenied(e)) => {
                log::warn!("[LINK] Access to {} denied ({e:?}), reopening", channel.name());
                // A stale handle from an earlier session holds the port.
                channel.close().map_err(LinkError::ChannelUnavailable)?;
                self.port_line(channel.name(), "closed");
                channel
                    .open()
                    .map_err(|e| LinkError::ChannelUnavailable(e.into_inner()))?;
            }
            Err(OpenError::Other(e)) => return Err(LinkError::ChannelUnavailable(e)),
        }

        self.port_line(channel.name(), "opened");
        Ok(())
    }

    /// Closes `channel` if it is open. Must be called with the section held.
    pub(super) fn close_locked(&self, channel: &mut C) -> Result<(), LinkError<C::Error>> {
        if !channel.is_open() {
            return Ok(());
        }
        channel.close().map_err(LinkError::Io)?;
        self.port_line(channel.name(), "closed");
        Ok(())
    }

    /// "Port COM3 is opened at 2024-05-01 12:00:00"
    fn port_line(&self, name: &str, state: &str) {
        let now = jiff::Zoned::now();
        let message = format!("Port {name} is {state} at {}", now.strftime(TIMESTAMP_FORMAT));
        log::info!("[LINK] {message}");
        self.diagnostics.report(Severity::Info, &message);
    }
}
