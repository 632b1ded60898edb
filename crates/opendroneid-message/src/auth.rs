//! Authentication message pages.
//!
//! A signature is split over up to five 24-byte pages. Byte 0 of every page
//! carries the auth type (bits 7..4) and the page number (bits 3..0).
//!
//! Page 0 ([`AuthenticationHeader`]):
//!
//! | Byte  | Field                                      |
//! |-------|--------------------------------------------|
//! | 0     | auth type, page number 0                   |
//! | 1     | reserved (7..4), page count (3..0)         |
//! | 2     | total signature length                     |
//! | 3-6   | seconds since 2019-01-01T00:00:00Z         |
//! | 7-23  | first 17 signature bytes                   |
//!
//! Pages 1-5 ([`AuthenticationAdditional`]):
//!
//! | Byte  | Field                                      |
//! |-------|--------------------------------------------|
//! | 0     | auth type, page number                     |
//! | 1-23  | next 23 signature bytes                    |

use std::ops::RangeInclusive;

use crate::bits::ByteExt;
use crate::field::{fixed_body, read_u32_le, write_u32_le};
use crate::{AuthType, MessageError, Result, BODY_SIZE};

/// Signature bytes carried by page 0.
pub const HEADER_AUTH_DATA_SIZE: usize = 17;
/// Signature bytes carried by each additional page.
pub const ADDITIONAL_AUTH_DATA_SIZE: usize = 23;
/// Largest number of pages in one signature.
pub const MAX_PAGE_COUNT: u8 = 5;
/// Largest total signature length.
pub const MAX_AUTH_DATA_SIZE: usize = 109;
/// Unix time of the protocol epoch, 2019-01-01T00:00:00Z.
pub const UNIX_TIME_EPOCH: u64 = 1_546_300_800;
/// Legal unix time range.
pub const UNIX_TIME_RANGE: RangeInclusive<u64> = UNIX_TIME_EPOCH..=3_693_752_040;
/// Legal page numbers for an additional page.
pub const ADDITIONAL_PAGE_RANGE: RangeInclusive<u8> = 1..=5;

const HEADER_AUTH_DATA_OFFSET: usize = 7;
const ADDITIONAL_AUTH_DATA_OFFSET: usize = 1;
const OFFSET_UNIX_TIME: usize = 3;

/// Check a page's signature slice against its fixed size.
fn check_auth_data(data: &[u8], expected: usize) -> Result<()> {
    if data.len() != expected {
        return Err(MessageError::auth_data_length(expected, data.len()));
    }
    Ok(())
}

/// Page 0 of an authentication signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationHeader {
    data: [u8; BODY_SIZE],
}

impl Default for AuthenticationHeader {
    /// One page holding an empty 17-byte signature slot.
    fn default() -> Self {
        let mut data = [0u8; BODY_SIZE];
        data[1] = 0x01;
        data[2] = HEADER_AUTH_DATA_SIZE as u8;
        AuthenticationHeader { data }
    }
}

impl AuthenticationHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(AuthenticationHeader {
            data: fixed_body(data)?,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn auth_type(&self) -> AuthType {
        AuthType::from(self.data[0].top4bit())
    }

    pub fn set_auth_type(&mut self, auth_type: AuthType) {
        self.data[0] = self.data[0].with_top4bit(auth_type.code());
    }

    /// Page number nibble; 0 for any body that dispatched here.
    pub fn page_number(&self) -> u8 {
        self.data[0].lower4bit()
    }

    /// Number of pages in the whole signature.
    pub fn page_count(&self) -> u8 {
        self.data[1].lower4bit()
    }

    pub fn set_page_count(&mut self, page_count: u8) -> Result<()> {
        if page_count > MAX_PAGE_COUNT {
            return Err(MessageError::PageCountRange(page_count));
        }
        self.data[1] = self.data[1].with_lower4bit(page_count);
        Ok(())
    }

    /// Total signature length in bytes, across all pages.
    pub fn length(&self) -> usize {
        self.data[2] as usize
    }

    pub fn set_length(&mut self, length: usize) -> Result<()> {
        if length > MAX_AUTH_DATA_SIZE {
            return Err(MessageError::LengthRange(length));
        }
        self.data[2] = length as u8;
        Ok(())
    }

    /// Signature timestamp as Unix seconds.
    pub fn unix_time(&self) -> u64 {
        read_u32_le(&self.data, OFFSET_UNIX_TIME) as u64 + UNIX_TIME_EPOCH
    }

    pub fn set_unix_time(&mut self, unix_time: u64) -> Result<()> {
        if !UNIX_TIME_RANGE.contains(&unix_time) {
            return Err(MessageError::UnixTimeRange(unix_time));
        }
        write_u32_le(
            &mut self.data,
            OFFSET_UNIX_TIME,
            (unix_time - UNIX_TIME_EPOCH) as u32,
        );
        Ok(())
    }

    /// The 17 signature bytes carried by this page.
    pub fn auth_data(&self) -> &[u8] {
        &self.data[HEADER_AUTH_DATA_OFFSET..]
    }

    /// Replace the page's signature bytes; exactly 17 are required.
    pub fn set_auth_data(&mut self, data: &[u8]) -> Result<()> {
        check_auth_data(data, HEADER_AUTH_DATA_SIZE)?;
        self.data[HEADER_AUTH_DATA_OFFSET..].copy_from_slice(data);
        Ok(())
    }
}

/// Continuation page of an authentication signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationAdditional {
    data: [u8; BODY_SIZE],
}

impl Default for AuthenticationAdditional {
    /// Page 1 with an empty signature slot.
    fn default() -> Self {
        let mut data = [0u8; BODY_SIZE];
        data[0] = 0x01;
        AuthenticationAdditional { data }
    }
}

impl AuthenticationAdditional {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(AuthenticationAdditional {
            data: fixed_body(data)?,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn auth_type(&self) -> AuthType {
        AuthType::from(self.data[0].top4bit())
    }

    pub fn set_auth_type(&mut self, auth_type: AuthType) {
        self.data[0] = self.data[0].with_top4bit(auth_type.code());
    }

    pub fn page_number(&self) -> u8 {
        self.data[0].lower4bit()
    }

    /// Set the page number (1-5).
    pub fn set_page_number(&mut self, page_number: u8) -> Result<()> {
        if !ADDITIONAL_PAGE_RANGE.contains(&page_number) {
            return Err(MessageError::PageNumberRange(page_number));
        }
        self.data[0] = self.data[0].with_lower4bit(page_number);
        Ok(())
    }

    /// The 23 signature bytes carried by this page.
    pub fn auth_data(&self) -> &[u8] {
        &self.data[ADDITIONAL_AUTH_DATA_OFFSET..]
    }

    /// Replace the page's signature bytes; exactly 23 are required.
    pub fn set_auth_data(&mut self, data: &[u8]) -> Result<()> {
        check_auth_data(data, ADDITIONAL_AUTH_DATA_SIZE)?;
        self.data[ADDITIONAL_AUTH_DATA_OFFSET..].copy_from_slice(data);
        Ok(())
    }
}

/// One authentication page of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    Header(AuthenticationHeader),
    Additional(AuthenticationAdditional),
}

impl Authentication {
    /// Decode a body, choosing the page kind from its page number nibble.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let first = data
            .first()
            .ok_or_else(|| MessageError::data_length(data.len()))?;
        if first.lower4bit() == 0 {
            Ok(Authentication::Header(AuthenticationHeader::from_bytes(data)?))
        } else {
            Ok(Authentication::Additional(
                AuthenticationAdditional::from_bytes(data)?,
            ))
        }
    }

    pub fn auth_type(&self) -> AuthType {
        match self {
            Authentication::Header(page) => page.auth_type(),
            Authentication::Additional(page) => page.auth_type(),
        }
    }

    pub fn set_auth_type(&mut self, auth_type: AuthType) {
        match self {
            Authentication::Header(page) => page.set_auth_type(auth_type),
            Authentication::Additional(page) => page.set_auth_type(auth_type),
        }
    }

    pub fn page_number(&self) -> u8 {
        match self {
            Authentication::Header(page) => page.page_number(),
            Authentication::Additional(page) => page.page_number(),
        }
    }

    /// Set the page number. A header page only accepts 0.
    pub fn set_page_number(&mut self, page_number: u8) -> Result<()> {
        match self {
            Authentication::Header(_) if page_number == 0 => Ok(()),
            Authentication::Header(_) => Err(MessageError::PageNumberRange(page_number)),
            Authentication::Additional(page) => page.set_page_number(page_number),
        }
    }

    /// Signature bytes carried by this page.
    pub fn auth_data(&self) -> &[u8] {
        match self {
            Authentication::Header(page) => page.auth_data(),
            Authentication::Additional(page) => page.auth_data(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Authentication::Header(page) => page.as_bytes(),
            Authentication::Additional(page) => page.as_bytes(),
        }
    }
}

impl From<AuthenticationHeader> for Authentication {
    fn from(page: AuthenticationHeader) -> Self {
        Authentication::Header(page)
    }
}

impl From<AuthenticationAdditional> for Authentication {
    fn from(page: AuthenticationAdditional) -> Self {
        Authentication::Additional(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_defaults() {
        let page = AuthenticationHeader::new();
        assert_eq!(&page.as_bytes()[..3], &[0x00, 0x01, 0x11]);
        assert_eq!(page.page_count(), 1);
        assert_eq!(page.length(), 17);
        assert_eq!(page.unix_time(), UNIX_TIME_EPOCH);
        assert_eq!(page.auth_type(), AuthType::None);
    }

    #[test]
    fn test_header_max_values() {
        let mut page = AuthenticationHeader::new();
        page.set_auth_type(AuthType::NetworkRemoteId);
        page.set_page_count(5).unwrap();
        page.set_length(109).unwrap();
        page.set_unix_time(3_693_752_040).unwrap();
        page.set_auth_data(&[0xFF; 17]).unwrap();

        assert_eq!(page.as_bytes()[0], 0x40);
        assert_eq!(page.as_bytes()[1], 0x05);
        assert_eq!(page.as_bytes()[2], 0x6D);
        assert_eq!(&page.as_bytes()[3..7], &[0x68, 0x81, 0xFF, 0x7F]);
        assert_eq!(page.unix_time(), 3_693_752_040);
    }

    #[test]
    fn test_header_ranges() {
        let mut page = AuthenticationHeader::new();
        assert!(matches!(page.set_page_count(6), Err(MessageError::PageCountRange(6))));
        assert!(matches!(page.set_length(110), Err(MessageError::LengthRange(110))));
        assert!(matches!(
            page.set_unix_time(UNIX_TIME_EPOCH - 1),
            Err(MessageError::UnixTimeRange(_))
        ));
        assert!(page.set_unix_time(3_693_752_041).is_err());
        assert!(matches!(
            page.set_auth_data(&[0u8; 16]),
            Err(MessageError::AuthDataLength { expected: 17, actual: 16 })
        ));
    }

    #[test]
    fn test_additional_page_numbers() {
        let mut page = AuthenticationAdditional::new();
        assert_eq!(page.page_number(), 1);
        for n in ADDITIONAL_PAGE_RANGE {
            page.set_page_number(n).unwrap();
            assert_eq!(page.page_number(), n);
        }
        assert!(matches!(page.set_page_number(0), Err(MessageError::PageNumberRange(0))));
        assert!(matches!(page.set_page_number(6), Err(MessageError::PageNumberRange(6))));
        assert!(page.set_auth_data(&[0u8; 24]).is_err());
    }

    #[test]
    fn test_dispatch_on_page_number() {
        let mut data = [0u8; 24];
        data[0] = 0x20;
        assert!(matches!(
            Authentication::from_bytes(&data).unwrap(),
            Authentication::Header(_)
        ));

        data[0] = 0x43;
        data[1..].fill(0x03);
        let page = Authentication::from_bytes(&data).unwrap();
        assert!(matches!(page, Authentication::Additional(_)));
        assert_eq!(page.page_number(), 3);
        assert_eq!(page.auth_type(), AuthType::NetworkRemoteId);
        assert_eq!(page.auth_data(), &[0x03; 23]);

        assert!(matches!(
            Authentication::from_bytes(&[]),
            Err(MessageError::DataLength { len: 0 })
        ));
    }

    #[test]
    fn test_header_page_number_fixed() {
        let mut page = Authentication::from(AuthenticationHeader::new());
        assert!(page.set_page_number(0).is_ok());
        assert!(matches!(page.set_page_number(1), Err(MessageError::PageNumberRange(1))));
    }
}
