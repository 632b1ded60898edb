//! Basic ID message body.
//!
//! | Byte  | Field                                   |
//! |-------|-----------------------------------------|
//! | 0     | ID type (bits 7..4), UA type (bits 3..0) |
//! | 1-20  | UAS ID, NUL padded                      |
//! | 21-23 | Reserved                                |

use crate::bits::ByteExt;
use crate::field::fixed_body;
use crate::uas_id::UAS_ID_SIZE;
use crate::{IdType, MessageError, Result, UaType, UasId, BODY_SIZE};

/// Basic ID body backed by its 24 wire bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicId {
    data: [u8; BODY_SIZE],
}

impl Default for BasicId {
    fn default() -> Self {
        BasicId {
            data: [0u8; BODY_SIZE],
        }
    }
}

impl BasicId {
    /// Empty Basic ID (ID type None, UA type None).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(BasicId {
            data: fixed_body(data)?,
        })
    }

    /// The wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// ID type. Follows the last UAS ID assigned; not settable on its own.
    pub fn id_type(&self) -> IdType {
        IdType::from(self.data[0].top4bit())
    }

    /// UA type.
    pub fn ua_type(&self) -> UaType {
        UaType::from(self.data[0].lower4bit())
    }

    /// Set the UA type.
    pub fn set_ua_type(&mut self, ua_type: UaType) {
        self.data[0] = self.data[0].with_lower4bit(ua_type.code());
    }

    /// Decode the UAS ID slot as the variant named by the ID type.
    pub fn uas_id(&self) -> UasId {
        UasId::from_bytes(self.id_type(), &self.data[1..=UAS_ID_SIZE])
    }

    /// Write a UAS ID, zero padding the slot and updating the ID type.
    pub fn set_uas_id(&mut self, uas_id: &UasId) -> Result<()> {
        let bytes = uas_id.as_bytes();
        if bytes.len() > UAS_ID_SIZE {
            return Err(MessageError::UasIdLength(bytes.len()));
        }
        self.data[1..].fill(0);
        self.data[1..1 + bytes.len()].copy_from_slice(bytes);
        self.data[0] = self.data[0].with_top4bit(uas_id.id_type().code());
        Ok(())
    }
}
