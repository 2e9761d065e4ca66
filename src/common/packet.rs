// src/common/packet.rs

//! Fixed-size sensor packets.
//!
//! packet structure : header(1) + payload(4, f32 LE) + reserved(1)
//!
//! Frames carry no delimiter or CRC. The boundary is positional: byte `i` of
//! a receive buffer starts a packet iff `i % PACKET_SIZE == 0`.

use super::error::LinkError;
use super::types::{SensorKind, SensorReading};
use arrayvec::ArrayVec;
use core::slice::ChunksExact;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Size of one packet on the wire.
pub const PACKET_SIZE: usize = 6;
/// Offset of the little-endian f32 payload inside a packet.
pub const PAYLOAD_OFFSET: usize = 1;
/// Size of the payload.
pub const PAYLOAD_SIZE: usize = 4;
/// Bytes read per data-available notification.
pub const RECEIVE_BLOCK_SIZE: usize = 24;
/// Packets in one receive block.
pub const PACKETS_PER_BLOCK: usize = RECEIVE_BLOCK_SIZE / PACKET_SIZE;

const HEADER_AND_PAYLOAD: usize = PAYLOAD_OFFSET + PAYLOAD_SIZE;

/// One wire packet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Packet {
    pub kind: SensorKind,
    pub value: f32,
}

impl Packet {
    pub fn new(kind: SensorKind, value: f32) -> Self {
        Self { kind, value }
    }

    /// Decodes a single packet window.
    ///
    /// Only header and payload are required; the reserved trailing byte may be
    /// missing. Bytes past the first packet are ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(packet))` for a known header.
    /// * `Ok(None)` for an unknown header (including an empty window).
    /// * `Err(LinkError::TruncatedPayload)` for a known header whose payload is cut short.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>, LinkError> {
        let Some(kind) = bytes.first().copied().and_then(SensorKind::from_code) else {
            return Ok(None);
        };

        if bytes.len() < HEADER_AND_PAYLOAD {
            return Err(LinkError::TruncatedPayload {
                needed: HEADER_AND_PAYLOAD,
                available: bytes.len(),
            });
        }

        Ok(Some(read_window(kind, bytes)))
    }

    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut bytes = [0u8; PACKET_SIZE];
        bytes[0] = self.kind.code();
        bytes[PAYLOAD_OFFSET..HEADER_AND_PAYLOAD].copy_from_slice(&self.value.to_le_bytes());
        bytes
    }
}

impl From<Packet> for SensorReading {
    fn from(packet: Packet) -> Self {
        SensorReading::new(packet.kind, packet.value)
    }
}

#[inline]
fn read_window(kind: SensorKind, window: &[u8]) -> Packet {
    let mut payload = [0u8; PAYLOAD_SIZE];
    payload.copy_from_slice(&window[PAYLOAD_OFFSET..HEADER_AND_PAYLOAD]);
    Packet::new(kind, f32::from_le_bytes(payload))
}

/// Decodes one complete window; unknown headers yield `None`.
#[inline]
fn decode_window(window: &[u8]) -> Option<SensorReading> {
    SensorKind::from_code(window[0]).map(|kind| read_window(kind, window).into())
}

/// Lazy iterator over the readings in a receive buffer. See [`decode_frame`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    windows: ChunksExact<'a, u8>,
}

impl<'a> Frames<'a> {
    /// Bytes at the end of the buffer that do not fill a whole packet.
    pub fn remainder(&self) -> &'a [u8] {
        self.windows.remainder()
    }
}

impl Iterator for Frames<'_> {
    type Item = SensorReading;

    fn next(&mut self) -> Option<Self::Item> {
        self.windows.by_ref().find_map(decode_window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.windows.size_hint().1)
    }
}

/// Decodes every recognised packet in `buffer`, in order.
///
/// Windows with an unknown header produce nothing. A trailing incomplete
/// window is ignored. This never fails.
pub fn decode_frame(buffer: &[u8]) -> Frames<'_> {
    Frames {
        windows: buffer.chunks_exact(PACKET_SIZE),
    }
}

/// Decodes one receive block without allocating.
pub fn decode_block(block: &[u8; RECEIVE_BLOCK_SIZE]) -> ArrayVec<SensorReading, PACKETS_PER_BLOCK> {
    decode_frame(block).collect()
}

/// Like [`decode_frame`], but a trailing partial window with a known header
/// is decoded if its payload is complete and is an error otherwise.
///
/// A trailing partial window with an unknown header is skipped as usual.
#[cfg(feature = "alloc")]
pub fn decode_frame_strict(buffer: &[u8]) -> Result<Vec<SensorReading>, LinkError> {
    let frames = decode_frame(buffer);
    let remainder = frames.remainder();
    let mut readings: Vec<SensorReading> = frames.collect();

    if let Some(packet) = Packet::from_bytes(remainder)? {
        readings.push(packet.into());
    }
    Ok(readings)
}
