// src/lib.rs

//! Packet codec and shared-channel guard for the serial link to a
//! temperature/accelerometer measurement board.
//!
//! The board streams 6-byte packets (header byte, little-endian `f32`,
//! reserved byte) in 24-byte blocks. Commands go the other way as hex text
//! such as `"A0 00 00 80 3F 00"`.
//!
//! ```
//! use thermolink::{decode_frame, encode_command, SensorKind};
//!
//! let bytes = encode_command("04 00 00 80 3F 00").unwrap();
//! let reading = decode_frame(&bytes).next().unwrap();
//! assert_eq!(reading.kind(), SensorKind::Temperature);
//! assert_eq!(reading.value(), 1.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod common;
#[cfg(feature = "std")]
pub mod guard;

// Re-export key types for convenience
pub use common::*;
#[cfg(feature = "std")]
pub use guard::{BlockReadings, ChannelGuard};
