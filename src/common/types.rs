// src/common/types.rs

use core::fmt;

// --- Sensor identity (packet header byte) ---

/// Which sensor produced a packet, identified by the packet's header byte.
///
/// Codes follow the firmware register map: the top bit marks an accelerometer
/// axis and the low bits select the axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum SensorKind {
    Temperature = 0b0000_0100,
    AccelerationX = 0b1000_0000 | 0b0010_0000,
    AccelerationY = 0b1000_0000 | 0b0001_0000,
    AccelerationZ = 0b1000_0000 | 0b0000_1000,
}

impl SensorKind {
    /// Bit shared by every accelerometer code.
    pub const ACCELEROMETER_FLAG: u8 = 0b1000_0000;

    /// All kinds, in header-code table order.
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Temperature,
        SensorKind::AccelerationX,
        SensorKind::AccelerationY,
        SensorKind::AccelerationZ,
    ];

    /// Looks up a header byte. Unknown codes are `None`, which the frame
    /// decoder treats as "skip this window", not as an error.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x04 => Some(SensorKind::Temperature),
            0xA0 => Some(SensorKind::AccelerationX),
            0x90 => Some(SensorKind::AccelerationY),
            0x88 => Some(SensorKind::AccelerationZ),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_acceleration(self) -> bool {
        self.code() & Self::ACCELEROMETER_FLAG != 0
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorKind::Temperature => "temperature",
            SensorKind::AccelerationX => "acceleration-x",
            SensorKind::AccelerationY => "acceleration-y",
            SensorKind::AccelerationZ => "acceleration-z",
        };
        f.write_str(name)
    }
}

// --- Decoded value ---

/// One decoded measurement. Only produced by decoding a packet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SensorReading {
    kind: SensorKind,
    value: f32,
}

impl SensorReading {
    pub(crate) const fn new(kind: SensorKind, value: f32) -> Self {
        Self { kind, value }
    }

    #[inline]
    pub const fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Returns the value as f32.
    #[inline]
    pub const fn value(&self) -> f32 {
        self.value
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.value)
    }
}
