// src/common/config.rs

use super::error::LinkError;
use core::fmt;

/// Parity setting of the serial link.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
    Mark,
    Space,
}

/// Stop bits of the serial link.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StopBits {
    None,
    #[default]
    One,
    Two,
    OnePointFive,
}

impl Parity {
    /// Accepts the names offered by the port settings dialog, ignoring case,
    /// and their numeric forms (`"0"` for `None` through `"4"` for `Space`).
    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [Parity; 5] = [Parity::None, Parity::Odd, Parity::Even, Parity::Mark, Parity::Space];
        let name = name.trim();
        if let Ok(index) = name.parse::<usize>() {
            return ALL.get(index).copied();
        }
        ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Parity::None => "None",
            Parity::Odd => "Odd",
            Parity::Even => "Even",
            Parity::Mark => "Mark",
            Parity::Space => "Space",
        }
    }
}

impl StopBits {
    /// Accepts the enum names (`"One"`) and the numeric forms (`"1"`, `"1.5"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        match name {
            "0" => return Some(StopBits::None),
            "1" => return Some(StopBits::One),
            "2" => return Some(StopBits::Two),
            "1.5" => return Some(StopBits::OnePointFive),
            _ => {}
        }
        [StopBits::None, StopBits::One, StopBits::Two, StopBits::OnePointFive]
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            StopBits::None => "None",
            StopBits::One => "One",
            StopBits::Two => "Two",
            StopBits::OnePointFive => "OnePointFive",
        }
    }
}

/// Serial settings for the measurement board link. Data bits are fixed at 8.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PortConfig {
    pub baud_rate: u32,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub data_bits: u8,
}

impl PortConfig {
    pub const DEFAULT_BAUD_RATE: u32 = 19_200;
    pub const DATA_BITS: u8 = 8;

    pub const fn new() -> Self {
        PortConfig {
            baud_rate: Self::DEFAULT_BAUD_RATE,
            parity: Parity::None,
            stop_bits: StopBits::One,
            data_bits: Self::DATA_BITS,
        }
    }

    /// Builds a config from the text fields of the settings dialog
    /// (e.g. `"19200"`, `"None"`, `"1"`).
    pub fn parse(baud_rate: &str, parity: &str, stop_bits: &str) -> Result<Self, LinkError> {
        let baud_rate = baud_rate
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|b| *b > 0)
            .ok_or(LinkError::InvalidConfig { field: "baud_rate" })?;
        let parity = Parity::from_name(parity).ok_or(LinkError::InvalidConfig { field: "parity" })?;
        let stop_bits =
            StopBits::from_name(stop_bits).ok_or(LinkError::InvalidConfig { field: "stop_bits" })?;

        Ok(Self::new().baud_rate(baud_rate).parity(parity).stop_bits(stop_bits))
    }

    pub const fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub const fn parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub const fn stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} baud, {} data bits, parity {}, stop bits {}",
            self.baud_rate,
            self.data_bits,
            self.parity.name(),
            self.stop_bits.name()
        )
    }
}
