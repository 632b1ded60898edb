//! UAS identifier variants carried in the Basic ID message.

use std::fmt;

use crate::bits::{from_hex_str, to_hex_string};
use crate::field::read_text;
use crate::{IdType, Result};

/// Size of the UAS ID slot in a Basic ID message.
pub const UAS_ID_SIZE: usize = 20;

/// Number of UAS ID bytes that make up a session UUID.
pub const UUID_SIZE: usize = 16;

/// A UAS identifier. The variant is the ID type written to the message.
///
/// Text variants render as ASCII with NUL padding trimmed; [`UasId::Uuid`]
/// renders as lowercase hex of its first 16 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UasId {
    /// No identifier.
    None(Vec<u8>),
    /// Manufacturer serial number.
    SerialNumber(Vec<u8>),
    /// CAA registration ID.
    RegistrationId(Vec<u8>),
    /// Session UUID.
    Uuid(Vec<u8>),
    /// Identifier under a reserved ID type code.
    Invalid(Vec<u8>),
}

impl UasId {
    /// Empty identifier of type None.
    pub fn none() -> Self {
        UasId::None(vec![0u8; UAS_ID_SIZE])
    }

    /// Serial number from its text form.
    pub fn serial_number(s: &str) -> Self {
        UasId::SerialNumber(s.as_bytes().to_vec())
    }

    /// Registration ID from its text form.
    pub fn registration_id(s: &str) -> Self {
        UasId::RegistrationId(s.as_bytes().to_vec())
    }

    /// UUID from its hex form. Fails on odd-length or non-hex input.
    pub fn uuid(hex: &str) -> Result<Self> {
        Ok(UasId::Uuid(from_hex_str(hex)?))
    }

    /// Build the variant matching `id_type` around raw slot bytes.
    pub fn from_bytes(id_type: IdType, data: &[u8]) -> Self {
        let data = data.to_vec();
        match id_type {
            IdType::None => UasId::None(data),
            IdType::SerialNumber => UasId::SerialNumber(data),
            IdType::RegistrationId => UasId::RegistrationId(data),
            IdType::Uuid => UasId::Uuid(data),
            IdType::Invalid => UasId::Invalid(data),
        }
    }

    /// ID type tag of this variant.
    pub fn id_type(&self) -> IdType {
        match self {
            UasId::None(_) => IdType::None,
            UasId::SerialNumber(_) => IdType::SerialNumber,
            UasId::RegistrationId(_) => IdType::RegistrationId,
            UasId::Uuid(_) => IdType::Uuid,
            UasId::Invalid(_) => IdType::Invalid,
        }
    }

    /// Raw identifier bytes, unpadded.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            UasId::None(data)
            | UasId::SerialNumber(data)
            | UasId::RegistrationId(data)
            | UasId::Uuid(data)
            | UasId::Invalid(data) => data,
        }
    }
}

impl fmt::Display for UasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UasId::None(_) | UasId::Invalid(_) => Ok(()),
            UasId::SerialNumber(data) | UasId::RegistrationId(data) => {
                f.write_str(&read_text(data))
            }
            UasId::Uuid(data) => {
                let end = data.len().min(UUID_SIZE);
                f.write_str(&to_hex_string(&data[..end]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageError;

    #[test]
    fn test_text_variants_trim_padding() {
        let mut data = b"INTCJ123-4567-890".to_vec();
        data.resize(UAS_ID_SIZE, 0);
        let id = UasId::from_bytes(IdType::SerialNumber, &data);
        assert_eq!(id.to_string(), "INTCJ123-4567-890");
        assert_eq!(id.id_type(), IdType::SerialNumber);

        let id = UasId::from_bytes(IdType::RegistrationId, &data);
        assert_eq!(id.to_string(), "INTCJ123-4567-890");
    }

    #[test]
    fn test_none_and_invalid_render_empty() {
        assert_eq!(UasId::none().to_string(), "");
        let id = UasId::from_bytes(IdType::Invalid, b"ABC");
        assert_eq!(id.to_string(), "");
        assert_eq!(id.id_type(), IdType::Invalid);
    }

    #[test]
    fn test_uuid_renders_first_sixteen_bytes() {
        let id = UasId::uuid("550e8400e29b41d4a716446655440000aabbccdd").unwrap();
        assert_eq!(id.as_bytes().len(), 20);
        assert_eq!(id.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_uuid_odd_length() {
        let err = UasId::uuid("001122334455667788990011223344556").unwrap_err();
        assert!(matches!(err, MessageError::OddHexLength(33)));
    }
}
