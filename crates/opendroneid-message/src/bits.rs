//! Bit, nibble and hex helpers.
//!
//! Every field accessor in the message bodies is built on these. Bit 0 is
//! the least significant bit; the top nibble is bits 4-7.

use crate::{MessageError, Result};

/// Bit and nibble access on a single byte.
pub trait ByteExt: Sized {
    /// Read bit `pos` (0-7) as 0 or 1.
    fn bit(self, pos: u32) -> Result<u8>;

    /// Return a copy with bit `pos` (0-7) set to `value` (0 or 1).
    fn with_bit(self, pos: u32, value: u8) -> Result<Self>;

    /// Upper nibble (bits 4-7).
    fn top4bit(self) -> u8;

    /// Return a copy with the upper nibble replaced by the low 4 bits of `value`.
    fn with_top4bit(self, value: u8) -> Self;

    /// Lower nibble (bits 0-3).
    fn lower4bit(self) -> u8;

    /// Return a copy with the lower nibble replaced by the low 4 bits of `value`.
    fn with_lower4bit(self, value: u8) -> Self;
}

impl ByteExt for u8 {
    fn bit(self, pos: u32) -> Result<u8> {
        if pos > 7 {
            return Err(MessageError::BitPosition(pos));
        }
        Ok((self >> pos) & 0x01)
    }

    fn with_bit(self, pos: u32, value: u8) -> Result<Self> {
        if pos > 7 {
            return Err(MessageError::BitPosition(pos));
        }
        if value > 1 {
            return Err(MessageError::BitValue(value));
        }
        Ok((self & !(1 << pos)) | (value << pos))
    }

    fn top4bit(self) -> u8 {
        (self & 0xF0) >> 4
    }

    fn with_top4bit(self, value: u8) -> Self {
        (self & 0x0F) | ((value & 0x0F) << 4)
    }

    fn lower4bit(self) -> u8 {
        self & 0x0F
    }

    fn with_lower4bit(self, value: u8) -> Self {
        (self & 0xF0) | (value & 0x0F)
    }
}

/// Encode bytes as a lowercase hex string, two characters per byte.
pub fn to_hex_string(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode a hex string into bytes.
///
/// Fails with [`MessageError::OddHexLength`] when the string has an odd
/// number of digits.
pub fn from_hex_str(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(MessageError::OddHexLength(s.len()));
    }
    hex::decode(s).map_err(|e| MessageError::InvalidHex(e.to_string()))
}
