// src/common/hex.rs

//! ASCII-hex representation of command and echo bytes.
//!
//! Outbound commands are typed as hex pairs, optionally space separated
//! (`"A0 00 00 80 3F 00"`). Written bytes are echoed back to the diagnostic
//! display in the same format, each byte followed by one padding space.

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

#[cfg(feature = "alloc")]
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Error during parsing of a hex command string.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HexError {
    /// Digit count after whitespace removal. Always odd.
    OddLength(usize),
    /// `position` counts digits after whitespace removal.
    InvalidDigit { position: usize, found: char },
    /// Output buffer cannot hold the decoded bytes.
    BufferTooSmall { needed: usize, got: usize },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HexError::*;
        match self {
            OddLength(len) => write!(f, "Odd number of hex digits ({})", len),
            InvalidDigit { position, found } => {
                write!(f, "Invalid hex digit {:?} at position {}", found, position)
            }
            BufferTooSmall { needed, got } => {
                write!(f, "Buffer too small: needed {}, got {}", needed, got)
            }
        }
    }
}

impl core::error::Error for HexError {}

#[inline]
fn nibble(c: char, position: usize) -> Result<u8, HexError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(HexError::InvalidDigit { position, found: c })
}

/// Iterates the non-whitespace characters of a command string.
#[inline]
fn digits(hex: &str) -> impl Iterator<Item = char> + '_ {
    hex.chars().filter(|c| !c.is_ascii_whitespace())
}

/// Validates `hex` and returns the number of bytes it encodes.
fn decoded_len(hex: &str) -> Result<usize, HexError> {
    let mut count = 0;
    for (position, c) in digits(hex).enumerate() {
        nibble(c, position)?;
        count += 1;
    }
    if count % 2 != 0 {
        return Err(HexError::OddLength(count));
    }
    Ok(count / 2)
}

/// Decodes a hex command string into `out`, returning the number of bytes written.
///
/// Whitespace anywhere in the input is ignored. The whole string is validated
/// before anything is written, so `out` is untouched on error.
///
/// # Arguments
///
/// * `hex`: Command text such as `"A0 00 00 80 3F 00"`. Digits are case-insensitive.
/// * `out`: Destination buffer.
///
/// # Returns
///
/// * `Ok(n)` with the first `n` bytes of `out` filled.
/// * `Err(HexError::OddLength)` / `Err(HexError::InvalidDigit)` for malformed input.
/// * `Err(HexError::BufferTooSmall)` if `out` is shorter than the decoded command.
pub fn encode_command_into(hex: &str, out: &mut [u8]) -> Result<usize, HexError> {
    let len = decoded_len(hex)?;
    if out.len() < len {
        return Err(HexError::BufferTooSmall { needed: len, got: out.len() });
    }

    let mut chars = digits(hex).enumerate();
    for slot in out.iter_mut().take(len) {
        // decoded_len already checked both digits of every pair
        let (hi_pos, hi) = chars.next().ok_or(HexError::OddLength(len * 2 - 1))?;
        let (lo_pos, lo) = chars.next().ok_or(HexError::OddLength(len * 2 - 1))?;
        *slot = (nibble(hi, hi_pos)? << 4) | nibble(lo, lo_pos)?;
    }
    Ok(len)
}

/// Decodes a hex command string into bytes.
///
/// Equivalent to [`encode_command_into`] with an exactly sized buffer. No
/// partial result is ever returned.
#[cfg(feature = "alloc")]
pub fn encode_command(hex: &str) -> Result<Vec<u8>, HexError> {
    let mut bytes = alloc::vec![0u8; decoded_len(hex)?];
    encode_command_into(hex, &mut bytes)?;
    Ok(bytes)
}

/// Renders bytes for the diagnostic display: two uppercase hex digits and a
/// padding space per byte (`[0x04, 0xA0]` -> `"04 A0 "`).
///
/// Feeding the result back through [`encode_command`] yields the input bytes.
#[cfg(feature = "alloc")]
pub fn decode_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for byte in bytes {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
        out.push(' ');
    }
    out
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_command_into_spaced_and_packed() {
        let mut buf = [0u8; 8];
        assert_eq!(encode_command_into("A0 00 00 80 3F 00", &mut buf), Ok(6));
        assert_eq!(&buf[..6], &[0xA0, 0x00, 0x00, 0x80, 0x3F, 0x00]);

        let mut buf = [0u8; 8];
        assert_eq!(encode_command_into("a0000080 3f00", &mut buf), Ok(6));
        assert_eq!(&buf[..6], &[0xA0, 0x00, 0x00, 0x80, 0x3F, 0x00]);
    }

    #[test]
    fn test_encode_command_into_rejects_bad_input() {
        let mut buf = [0xEEu8; 8];
        assert_eq!(encode_command_into("A0000", &mut buf), Err(HexError::OddLength(5)));
        assert_eq!(
            encode_command_into("A0 0G", &mut buf),
            Err(HexError::InvalidDigit { position: 3, found: 'G' })
        );
        assert_eq!(
            encode_command_into("-1", &mut buf),
            Err(HexError::InvalidDigit { position: 0, found: '-' })
        );
        // Untouched on error
        assert_eq!(buf, [0xEE; 8]);
    }

    #[test]
    fn test_encode_command_into_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            encode_command_into("01 02 03", &mut buf),
            Err(HexError::BufferTooSmall { needed: 3, got: 2 })
        );
    }

    #[test]
    fn test_encode_command_into_empty() {
        let mut buf = [0u8; 0];
        assert_eq!(encode_command_into("", &mut buf), Ok(0));
        assert_eq!(encode_command_into("   ", &mut buf), Ok(0));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_encode_command() {
        assert_eq!(encode_command("04 00 00 80 3F 00").unwrap(), alloc::vec![0x04, 0x00, 0x00, 0x80, 0x3F, 0x00]);
        assert_eq!(encode_command("ff").unwrap(), alloc::vec![0xFF]);
        assert!(encode_command("").unwrap().is_empty());
        assert_eq!(encode_command("A0 0"), Err(HexError::OddLength(3)));
        assert_eq!(encode_command("ZZ"), Err(HexError::InvalidDigit { position: 0, found: 'Z' }));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_decode_to_hex_format() {
        assert_eq!(decode_to_hex(&[]), "");
        assert_eq!(decode_to_hex(&[0x04]), "04 ");
        assert_eq!(decode_to_hex(&[0xA0, 0x0F, 0x00, 0xff]), "A0 0F 00 FF ");
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_hex_round_trip_all_byte_values() {
        let bytes: alloc::vec::Vec<u8> = (0..=255u8).collect();
        assert_eq!(encode_command(&decode_to_hex(&bytes)).unwrap(), bytes);

        // Also through odd-sized prefixes, including a single byte.
        for len in [1usize, 5, 6, 7, 24, 255] {
            let slice = &bytes[256 - len..];
            assert_eq!(encode_command(&decode_to_hex(slice)).unwrap(), slice);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_hex_error_display() {
        use std::string::ToString;
        assert_eq!(HexError::OddLength(3).to_string(), "Odd number of hex digits (3)");
        assert_eq!(
            HexError::InvalidDigit { position: 1, found: 'x' }.to_string(),
            "Invalid hex digit 'x' at position 1"
        );
    }
}
