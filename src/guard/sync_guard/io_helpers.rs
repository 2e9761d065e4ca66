// src/guard/sync_guard/io_helpers.rs

use crate::common::{
    error::LinkError,
    hal_traits::ByteChannel,
    packet::RECEIVE_BLOCK_SIZE,
};
use std::thread;
use std::time::Duration;

/// Pause between `WouldBlock` retries. One byte takes ~520us at 19200 baud.
const RETRY_DELAY: Duration = Duration::from_micros(100);

/// Writes every byte of `bytes`, retrying partial writes and `WouldBlock`.
///
/// Must be called with the channel section held. Timeouts are the
/// transport's: it reports them as `nb::Error::Other`. A write that accepts
/// nothing fails with `WriteStalled`.
pub(super) fn write_all<C: ByteChannel>(channel: &mut C, bytes: &[u8]) -> Result<(), LinkError<C::Error>> {
    let mut written = 0;
    while written < bytes.len() {
        match channel.write(&bytes[written..]) {
            Ok(0) => {
                return Err(LinkError::WriteStalled {
                    written,
                    needed: bytes.len(),
                })
            }
            Ok(n) => written += n.min(bytes.len() - written),
            Err(nb::Error::WouldBlock) => thread::sleep(RETRY_DELAY),
            Err(nb::Error::Other(e)) => return Err(LinkError::Io(e)),
        }
    }
    Ok(())
}

/// Reads exactly one receive block, accumulating short reads.
///
/// Fails with `ChannelReadFailure` if the channel is closed, reports end of
/// stream (`Ok(0)`) or returns an error before the block is complete.
pub(super) fn read_block<C: ByteChannel>(
    channel: &mut C,
) -> Result<[u8; RECEIVE_BLOCK_SIZE], LinkError<C::Error>> {
    let failure = |got: usize, cause: Option<C::Error>| LinkError::ChannelReadFailure {
        needed: RECEIVE_BLOCK_SIZE,
        got,
        cause,
    };

    if !channel.is_open() {
        return Err(failure(0, None));
    }

    let mut block = [0u8; RECEIVE_BLOCK_SIZE];
    let mut got = 0;
    while got < RECEIVE_BLOCK_SIZE {
        match channel.read(&mut block[got..]) {
            Ok(0) => return Err(failure(got, None)),
            Ok(n) => got += n.min(RECEIVE_BLOCK_SIZE - got),
            Err(nb::Error::WouldBlock) => thread::sleep(RETRY_DELAY),
            Err(nb::Error::Other(e)) => return Err(failure(got, Some(e))),
        }
    }
    Ok(block)
}
