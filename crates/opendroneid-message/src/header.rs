//! The one-byte message header.
//!
//! ```text
//! +---------------+---------------+
//! | type (7..4)   | version (3..0)|
//! +---------------+---------------+
//! ```

use crate::bits::ByteExt;
use crate::{MessageType, Result};

/// Message header: message type in the top nibble, protocol version in the
/// bottom nibble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Header(u8);

impl Header {
    /// Build a header from a message type and protocol version.
    pub fn new(message_type: MessageType, version: u8) -> Self {
        Header(0u8.with_top4bit(message_type.code()).with_lower4bit(version))
    }

    /// Wrap a raw header byte.
    pub fn from_byte(byte: u8) -> Self {
        Header(byte)
    }

    /// The raw header byte.
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Decode the message type; fails for codes outside the supported set.
    pub fn message_type(self) -> Result<MessageType> {
        MessageType::try_from(self.0.top4bit())
    }

    /// Replace the message type.
    pub fn set_message_type(&mut self, message_type: MessageType) {
        self.0 = self.0.with_top4bit(message_type.code());
    }

    /// Protocol version (0-15).
    pub fn version(self) -> u8 {
        self.0.lower4bit()
    }

    /// Replace the protocol version; only the low 4 bits are kept.
    pub fn set_version(&mut self, version: u8) {
        self.0 = self.0.with_lower4bit(version);
    }
}
