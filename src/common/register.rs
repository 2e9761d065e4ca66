// src/common/register.rs

use core::sync::atomic::{AtomicU32, Ordering};

/// Latest temperature reported by the measurement board.
///
/// Written by the receive handler, read by an unrelated display poller. The
/// f32 is stored as its bit pattern in one `AtomicU32`, so reads never tear
/// and neither side takes a lock.
#[derive(Debug)]
pub struct TemperatureRegister {
    bits: AtomicU32,
}

impl TemperatureRegister {
    pub fn new(initial: f32) -> Self {
        Self {
            bits: AtomicU32::new(initial.to_bits()),
        }
    }

    pub fn set(&self, temperature: f32) {
        self.bits.store(temperature.to_bits(), Ordering::Release);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Default for TemperatureRegister {
    fn default() -> Self {
        Self::new(0.0)
    }
}
