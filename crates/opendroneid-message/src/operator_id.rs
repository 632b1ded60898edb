//! Operator ID message body.
//!
//! | Byte  | Field                       |
//! |-------|-----------------------------|
//! | 0     | operator ID type            |
//! | 1-20  | operator ID, NUL padded     |
//! | 21-23 | reserved                    |

use crate::field::{fixed_body, read_text, write_text};
use crate::{MessageError, Result, BODY_SIZE};

/// Largest operator ID in bytes.
pub const OPERATOR_ID_SIZE: usize = 20;

const ID_RANGE: std::ops::Range<usize> = 1..1 + OPERATOR_ID_SIZE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorId {
    data: [u8; BODY_SIZE],
}

impl OperatorId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(OperatorId {
            data: fixed_body(data)?,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Operator ID type; 0 is a CAA-issued operator ID.
    pub fn operator_id_type(&self) -> u8 {
        self.data[0]
    }

    pub fn set_operator_id_type(&mut self, id_type: u8) {
        self.data[0] = id_type;
    }

    pub fn operator_id(&self) -> String {
        read_text(&self.data[ID_RANGE])
    }

    /// Set the operator ID. The reserved bytes are left untouched.
    pub fn set_operator_id(&mut self, operator_id: &str) -> Result<()> {
        let bytes = operator_id.as_bytes();
        if bytes.len() > OPERATOR_ID_SIZE {
            return Err(MessageError::OperatorIdLength(bytes.len()));
        }
        write_text(&mut self.data[ID_RANGE], bytes);
        Ok(())
    }
}
