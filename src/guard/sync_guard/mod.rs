// src/guard/sync_guard/mod.rs

mod io_helpers;
mod open_policy;

#[cfg(test)]
mod mock;

use crate::common::{
    config::PortConfig,
    error::LinkError,
    hal_traits::{ByteChannel, DiagnosticSink, LogSink, Severity},
    hex::{decode_to_hex, encode_command},
    packet::{decode_block, PACKETS_PER_BLOCK},
    register::TemperatureRegister,
    types::{SensorKind, SensorReading},
};
use arrayvec::ArrayVec;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Readings decoded from one receive block.
pub type BlockReadings = ArrayVec<SensorReading, PACKETS_PER_BLOCK>;

/// Serialises all traffic on one shared serial channel.
///
/// Outbound commands ([`send`](Self::send)) and the transport's
/// data-available handler ([`on_data_received`](Self::on_data_received)) run
/// on different threads. Both go through the same mutex, so a write and a
/// block read never interleave on the wire. Share the guard as
/// `Arc<ChannelGuard<..>>`.
///
/// The diagnostic sink is called with the section held and must not call
/// back into the guard.
pub struct ChannelGuard<C, D = LogSink>
where
    C: ByteChannel,
    D: DiagnosticSink,
{
    channel: Mutex<C>,
    diagnostics: D,
    register: Arc<TemperatureRegister>,
}

impl<C, D> ChannelGuard<C, D>
where
    C: ByteChannel,
    D: DiagnosticSink,
{
    pub fn new(channel: C, diagnostics: D, register: Arc<TemperatureRegister>) -> Self {
        ChannelGuard {
            channel: Mutex::new(channel),
            diagnostics,
            register,
        }
    }

    /// Register receiving decoded temperatures.
    pub fn register(&self) -> &Arc<TemperatureRegister> {
        &self.register
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }

    /// Opens the channel if it is closed.
    ///
    /// An access-denied failure forces a close and exactly one more open
    /// attempt. Any failure left after that is `ChannelUnavailable`.
    pub fn open(&self) -> Result<(), LinkError<C::Error>> {
        let mut channel = self.lock();
        self.open_locked(&mut channel).map_err(|e| self.fail(e))
    }

    /// Closes the channel. Closing a closed channel does nothing.
    pub fn close(&self) -> Result<(), LinkError<C::Error>> {
        let mut channel = self.lock();
        self.close_locked(&mut channel).map_err(|e| self.fail(e))
    }

    /// Applies new port settings, closing the channel first if it is open.
    /// The next [`send`](Self::send) reopens it.
    pub fn configure(&self, config: &PortConfig) -> Result<(), LinkError<C::Error>> {
        let mut channel = self.lock();
        self.close_locked(&mut channel).map_err(|e| self.fail(e))?;
        channel
            .set_config(config)
            .map_err(|e| self.fail(LinkError::Io(e)))?;
        log::info!("[LINK] {} configured: {}", channel.name(), config);
        Ok(())
    }

    /// Sends a hex command such as `"A0 00 00 80 3F 00"`.
    ///
    /// The command is validated before the channel is touched: an
    /// `InvalidEncoding` error never opens or writes. Otherwise the channel is
    /// opened if needed, every byte is written and the hex echo of what was
    /// written goes to the diagnostic sink, all inside the section.
    pub fn send(&self, command_hex: &str) -> Result<(), LinkError<C::Error>> {
        let bytes = encode_command(command_hex).map_err(|e| self.fail(e.into()))?;

        let mut channel = self.lock();
        self.open_locked(&mut channel).map_err(|e| self.fail(e))?;
        io_helpers::write_all(&mut *channel, &bytes).map_err(|e| self.fail(e))?;

        let echo = decode_to_hex(&bytes);
        log::debug!("[LINK] {} <- {}", channel.name(), echo.trim_end());
        self.diagnostics.report(Severity::Echo, &echo);
        Ok(())
    }

    /// Data-available handler: reads one 24-byte block and decodes it.
    ///
    /// Every temperature reading is stored in the register before the
    /// section is released; the last one in the block wins. All readings,
    /// accelerometer axes included, are returned for the caller to use.
    ///
    /// Blocks the calling thread until the block is complete or the
    /// transport fails. On failure nothing is decoded and the register is
    /// left untouched.
    pub fn on_data_received(&self) -> Result<BlockReadings, LinkError<C::Error>> {
        let mut channel = self.lock();
        let block = io_helpers::read_block(&mut *channel).map_err(|e| self.fail(e))?;

        let readings = decode_block(&block);
        for reading in &readings {
            log::debug!("[LINK] {} -> {}", channel.name(), reading);
            if reading.kind() == SensorKind::Temperature {
                self.register.set(reading.value());
            }
        }
        Ok(readings)
    }

    /// Consumes the guard, returning the channel.
    pub fn into_inner(self) -> C {
        self.channel.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // A panic while the section was held leaves the channel no worse than a
    // transport error would, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, C> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reports `err` to the sink and the log, then hands it back.
    fn fail(&self, err: LinkError<C::Error>) -> LinkError<C::Error> {
        let message = err.to_string();
        log::error!("[LINK] {message}");
        self.diagnostics.report(Severity::Error, &message);
        err
    }
}
