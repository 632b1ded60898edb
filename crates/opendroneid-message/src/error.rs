//! Error types for opendroneid-message.

use thiserror::Error;

/// Errors that can occur while decoding or building Open Drone ID messages.
///
/// Structural errors come out of parsing, range and length errors out of
/// setters. Getters never fail on a bad field value; they report the
/// field's unknown sentinel instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MessageError {
    /// Buffer length does not fit the message type.
    #[error("Data length error: {len} bytes")]
    DataLength {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// Top nibble of the header byte is not a known message type.
    #[error("Unsupported message type: 0x{0:X}")]
    UnsupportedMessageType(u8),

    /// Bit position outside 0..=7.
    #[error("Bit position range error: {0}")]
    BitPosition(u32),

    /// Bit value other than 0 or 1.
    #[error("Bit value range error: {0}")]
    BitValue(u8),

    /// Track direction outside 0..=359 and not the unknown sentinel.
    #[error("Directional range error: {0}")]
    DirectionRange(u16),

    /// Negative or NaN ground speed.
    #[error("Speed range error: {0}")]
    SpeedRange(f64),

    /// Latitude outside -90..=90.
    #[error("Latitude range error: {0}")]
    LatitudeRange(f64),

    /// Longitude outside -180..=180.
    #[error("Longitude range error: {0}")]
    LongitudeRange(f64),

    /// Altitude outside -999.5..=31767 and not the unknown sentinel.
    #[error("Altitude range error: {0}")]
    AltitudeRange(f64),

    /// Timestamp outside 0..=36000 tenths of a second.
    #[error("Timestamp range error: {0}")]
    TimestampRange(u16),

    /// Timestamp accuracy outside 0.1..=1.5 and not the unknown sentinel.
    #[error("Timestamp Accuracy range error: {0}")]
    TimestampAccuracyRange(f64),

    /// Page number not allowed for the page kind or the builder slots.
    #[error("Page Number range error: {0}")]
    PageNumberRange(u8),

    /// Page count outside 0..=5.
    #[error("Page Count range error: {0}")]
    PageCountRange(u8),

    /// Signature length outside 0..=109.
    #[error("Length range error: {0}")]
    LengthRange(usize),

    /// Unix time outside the representable window.
    #[error("UnixTime range error: {0}")]
    UnixTimeRange(u64),

    /// Area count outside 1..=65000.
    #[error("Area Count range error: {0}")]
    AreaCountRange(u16),

    /// Area radius outside 0..=2.5.
    #[error("Area Radius range error: {0}")]
    AreaRadiusRange(f64),

    /// More than 10 messages in a pack.
    #[error("Message Number range error: {0}")]
    MessageNumberRange(usize),

    /// A message placed in a pack does not serialize to 25 bytes.
    #[error("Message Size error: {0} bytes")]
    MessageSize(usize),

    /// UAS ID data longer than the 20-byte slot.
    #[error("UAS ID length error: {0} bytes")]
    UasIdLength(usize),

    /// Authentication page data of the wrong size.
    #[error("Auth Data length error: expected {expected} bytes, got {actual}")]
    AuthDataLength {
        /// Required size for the page kind.
        expected: usize,
        /// Size that was supplied.
        actual: usize,
    },

    /// Self ID description longer than 23 bytes.
    #[error("Description length error: {0} bytes")]
    DescriptionLength(usize),

    /// Operator ID longer than 20 bytes.
    #[error("Operator ID length error: {0} bytes")]
    OperatorIdLength(usize),

    /// A page slot in the builder carries a different page number.
    #[error("Auth Page Number illegal: slot {index} holds page {page_number}")]
    AuthPageNumber {
        /// Slot being read.
        index: usize,
        /// Page number found in the slot.
        page_number: u8,
    },

    /// Hex string with an odd number of digits.
    #[error("Hex string length odd: {0}")]
    OddHexLength(usize),

    /// Hex string with a non-hex character.
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
}

impl MessageError {
    /// Create a data length error for a rejected buffer.
    pub fn data_length(len: usize) -> Self {
        MessageError::DataLength { len }
    }

    /// Create an auth data length error.
    pub fn auth_data_length(expected: usize, actual: usize) -> Self {
        MessageError::AuthDataLength { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MessageError::data_length(23);
        assert!(err.to_string().starts_with("Data length error"));

        let err = MessageError::UnsupportedMessageType(0x6);
        assert_eq!(err.to_string(), "Unsupported message type: 0x6");

        let err = MessageError::AuthPageNumber {
            index: 2,
            page_number: 1,
        };
        assert!(err.to_string().starts_with("Auth Page Number illegal"));
    }
}
