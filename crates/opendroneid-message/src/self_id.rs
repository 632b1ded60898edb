//! Self ID message body: a free-text description of the flight.
//!
//! | Byte  | Field                     |
//! |-------|---------------------------|
//! | 0     | description type          |
//! | 1-23  | description, NUL padded   |

use crate::field::{fixed_body, read_text, write_text};
use crate::{MessageError, Result, BODY_SIZE};

/// Largest description in bytes.
pub const DESCRIPTION_SIZE: usize = 23;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfId {
    data: [u8; BODY_SIZE],
}

impl SelfId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(SelfId {
            data: fixed_body(data)?,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn description_type(&self) -> u8 {
        self.data[0]
    }

    pub fn set_description_type(&mut self, description_type: u8) {
        self.data[0] = description_type;
    }

    pub fn description(&self) -> String {
        read_text(&self.data[1..])
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        let bytes = description.as_bytes();
        if bytes.len() > DESCRIPTION_SIZE {
            return Err(MessageError::DescriptionLength(bytes.len()));
        }
        write_text(&mut self.data[1..], bytes);
        Ok(())
    }
}
