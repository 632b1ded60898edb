//! Message Pack: up to ten complete messages in one broadcast.
//!
//! | Byte   | Field                                  |
//! |--------|----------------------------------------|
//! | 0      | message size, always 25                |
//! | 1      | number of messages (0-10)              |
//! | 2..    | messages, 25 bytes each                |

use std::ops::RangeInclusive;

use tracing::debug;

use crate::{Message, MessageError, Result, MESSAGE_SIZE};

/// Largest number of messages in a pack.
pub const MAX_MESSAGES: usize = 10;
/// Legal pack body sizes.
pub const PACK_SIZE_RANGE: RangeInclusive<usize> = 2..=2 + MAX_MESSAGES * MESSAGE_SIZE;

const PACK_HEADER_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePack {
    data: Vec<u8>,
}

impl Default for MessagePack {
    /// Empty pack.
    fn default() -> Self {
        MessagePack {
            data: vec![MESSAGE_SIZE as u8, 0],
        }
    }
}

impl MessagePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a pack body of 2 to 252 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !PACK_SIZE_RANGE.contains(&data.len()) {
            debug!(len = data.len(), "rejecting message pack of wrong length");
            return Err(MessageError::data_length(data.len()));
        }
        Ok(MessagePack {
            data: data.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Size of each contained message as declared on the wire.
    pub fn message_size(&self) -> u8 {
        self.data[0]
    }

    /// Number of contained messages as declared on the wire.
    pub fn message_number(&self) -> u8 {
        self.data[1]
    }

    /// Decode every complete 25-byte message after the pack header.
    pub fn messages(&self) -> Result<Vec<Message>> {
        self.data[PACK_HEADER_SIZE..]
            .chunks_exact(MESSAGE_SIZE)
            .map(Message::parse)
            .collect()
    }

    /// Replace the contents. Rewrites the message size and count.
    pub fn set_messages(&mut self, messages: &[Message]) -> Result<()> {
        if messages.len() > MAX_MESSAGES {
            return Err(MessageError::MessageNumberRange(messages.len()));
        }
        let mut data = Vec::with_capacity(PACK_HEADER_SIZE + messages.len() * MESSAGE_SIZE);
        data.push(MESSAGE_SIZE as u8);
        data.push(messages.len() as u8);
        for message in messages {
            let bytes = message.to_bytes();
            if bytes.len() != MESSAGE_SIZE {
                return Err(MessageError::MessageSize(bytes.len()));
            }
            data.extend_from_slice(&bytes);
        }
        self.data = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicId, LocationVector, MessageType, OperatorId, Payload};

    #[test]
    fn test_empty_pack() {
        let pack = MessagePack::new();
        assert_eq!(pack.as_bytes(), &[0x19, 0x00]);
        assert!(pack.messages().unwrap().is_empty());
    }

    #[test]
    fn test_pack_length_limits() {
        assert!(matches!(
            MessagePack::from_bytes(&[0x19]),
            Err(MessageError::DataLength { len: 1 })
        ));
        assert!(MessagePack::from_bytes(&[0u8; 252]).is_ok());
        assert!(matches!(
            MessagePack::from_bytes(&[0u8; 253]),
            Err(MessageError::DataLength { len: 253 })
        ));
    }

    #[test]
    fn test_set_and_read_messages() {
        let messages = vec![
            Message::new(Payload::BasicId(BasicId::new())),
            Message::new(Payload::LocationVector(LocationVector::new())),
            Message::new(Payload::OperatorId(OperatorId::new())),
        ];
        let mut pack = MessagePack::new();
        pack.set_messages(&messages).unwrap();
        assert_eq!(pack.message_size(), 25);
        assert_eq!(pack.message_number(), 3);
        assert_eq!(pack.as_bytes().len(), 2 + 3 * 25);
        assert_eq!(pack.as_bytes()[2 + 25], 0x10);

        let decoded = pack.messages().unwrap();
        assert_eq!(decoded, messages);
        assert_eq!(decoded[2].header().message_type().unwrap(), MessageType::OperatorId);
    }

    #[test]
    fn test_pack_limits() {
        let mut pack = MessagePack::new();
        let eleven = vec![Message::new(Payload::BasicId(BasicId::new())); 11];
        assert!(matches!(
            pack.set_messages(&eleven),
            Err(MessageError::MessageNumberRange(11))
        ));

        let mut inner = MessagePack::new();
        inner
            .set_messages(&[Message::new(Payload::BasicId(BasicId::new()))])
            .unwrap();
        let nested = Message::new(Payload::MessagePack(inner));
        assert!(matches!(
            pack.set_messages(&[nested]),
            Err(MessageError::MessageSize(28))
        ));
        assert_eq!(pack.as_bytes(), &[0x19, 0x00]);
    }
}
