// src/guard/mod.rs

// Declare the sub-module
pub mod sync_guard;

// Re-export the public ChannelGuard struct
pub use sync_guard::{BlockReadings, ChannelGuard};
