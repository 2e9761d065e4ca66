// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod hex;
pub mod packet;
pub mod register;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs
pub use config::{Parity, PortConfig, StopBits};

// From error.rs
pub use error::LinkError;

// From hal_traits.rs
pub use hal_traits::{ByteChannel, DiagnosticSink, LogSink, OpenError, Severity};

// From hex.rs
pub use hex::{encode_command_into, HexError};

// From packet.rs
pub use packet::{
    decode_block, decode_frame, Frames, Packet, PACKETS_PER_BLOCK, PACKET_SIZE, RECEIVE_BLOCK_SIZE,
};

// From register.rs
pub use register::TemperatureRegister;

// From types.rs
pub use types::{SensorKind, SensorReading};

// --- Feature-gated re-exports ---

// Allocating codec entry points
#[cfg(feature = "alloc")]
pub use hex::{decode_to_hex, encode_command};
#[cfg(feature = "alloc")]
pub use packet::decode_frame_strict;
