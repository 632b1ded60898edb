//! Reassembly and fragmentation of multi-page authentication signatures.
//!
//! The builder holds one slot per page: slot 0 is the
//! [`AuthenticationHeader`], slots 1-4 are [`AuthenticationAdditional`]
//! pages. Pages received off the air are dropped into their slot with
//! [`AuthBuilder::add`]; a signature to transmit is split with
//! [`AuthBuilder::set_auth_data`].
//!
//! | Length   | Pages |
//! |----------|-------|
//! | 0-17     | 1     |
//! | 18-40    | 2     |
//! | 41-63    | 3     |
//! | 64-86    | 4     |
//! | 87-109   | 5     |

use tracing::debug;

use crate::auth::{
    ADDITIONAL_AUTH_DATA_SIZE, HEADER_AUTH_DATA_SIZE, MAX_AUTH_DATA_SIZE,
};
use crate::{
    AuthType, Authentication, AuthenticationAdditional, AuthenticationHeader, Message,
    MessageError, Payload, Result,
};

const ADDITIONAL_SLOTS: usize = 4;

/// Number of pages a signature of `len` bytes spans.
fn page_count_for(len: usize) -> u8 {
    let rest = len.saturating_sub(HEADER_AUTH_DATA_SIZE);
    (1 + rest.div_ceil(ADDITIONAL_AUTH_DATA_SIZE)) as u8
}

/// Copy `chunk` into a zeroed buffer of `size` bytes.
fn padded(chunk: &[u8], size: usize) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    buf[..chunk.len()].copy_from_slice(chunk);
    buf
}

/// Five-slot view over one authentication signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthBuilder {
    header: AuthenticationHeader,
    additional: [AuthenticationAdditional; ADDITIONAL_SLOTS],
}

impl AuthBuilder {
    /// Empty builder: a one-page signature of 17 zero bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a page into the slot named by its page number.
    pub fn add(&mut self, page: Authentication) -> Result<()> {
        match page {
            Authentication::Header(header) => self.header = header,
            Authentication::Additional(page) => {
                let number = page.page_number();
                let slot = (number as usize)
                    .checked_sub(1)
                    .filter(|&slot| slot < ADDITIONAL_SLOTS)
                    .ok_or(MessageError::PageNumberRange(number))?;
                self.additional[slot] = page;
            }
        }
        Ok(())
    }

    /// Signature kind, as declared on page 0.
    pub fn auth_type(&self) -> AuthType {
        self.header.auth_type()
    }

    /// Set the signature kind on every page.
    pub fn set_auth_type(&mut self, auth_type: AuthType) {
        self.header.set_auth_type(auth_type);
        for page in &mut self.additional {
            page.set_auth_type(auth_type);
        }
    }

    pub fn unix_time(&self) -> u64 {
        self.header.unix_time()
    }

    pub fn set_unix_time(&mut self, unix_time: u64) -> Result<()> {
        self.header.set_unix_time(unix_time)
    }

    /// Page count declared on page 0.
    pub fn page_count(&self) -> u8 {
        self.header.page_count()
    }

    /// Reassemble the signature from the declared pages, truncated to the
    /// declared length.
    ///
    /// Fails if a slot in use holds a page with a different page number,
    /// which is what a missing or misplaced page looks like.
    pub fn auth_data(&self) -> Result<Vec<u8>> {
        let additional_pages = (self.page_count() as usize).saturating_sub(1);
        let mut data = self.header.auth_data().to_vec();
        for (slot, page) in self.additional.iter().enumerate().take(additional_pages) {
            let index = slot + 1;
            if page.page_number() as usize != index {
                debug!(
                    index,
                    page_number = page.page_number(),
                    "authentication page out of place"
                );
                return Err(MessageError::AuthPageNumber {
                    index,
                    page_number: page.page_number(),
                });
            }
            data.extend_from_slice(page.auth_data());
        }
        data.truncate(self.header.length());
        Ok(data)
    }

    /// Split a signature over as many pages as it needs and update the page
    /// count and length on page 0.
    pub fn set_auth_data(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > MAX_AUTH_DATA_SIZE {
            return Err(MessageError::LengthRange(data.len()));
        }
        self.header.set_page_count(page_count_for(data.len()))?;
        self.header.set_length(data.len())?;

        let (first, rest) = data.split_at(data.len().min(HEADER_AUTH_DATA_SIZE));
        self.header
            .set_auth_data(&padded(first, HEADER_AUTH_DATA_SIZE))?;

        for (slot, chunk) in rest.chunks(ADDITIONAL_AUTH_DATA_SIZE).enumerate() {
            let page = &mut self.additional[slot];
            page.set_page_number(slot as u8 + 1)?;
            page.set_auth_data(&padded(chunk, ADDITIONAL_AUTH_DATA_SIZE))?;
        }
        Ok(())
    }

    /// The pages in use, page 0 first.
    pub fn pages(&self) -> Vec<Authentication> {
        let additional_pages =
            (self.page_count() as usize).saturating_sub(1).min(ADDITIONAL_SLOTS);
        std::iter::once(Authentication::Header(self.header.clone()))
            .chain(
                self.additional[..additional_pages]
                    .iter()
                    .cloned()
                    .map(Authentication::Additional),
            )
            .collect()
    }

    /// The pages in use, wrapped as messages ready to broadcast.
    pub fn messages(&self) -> Vec<Message> {
        self.pages()
            .into_iter()
            .map(|page| Message::new(Payload::Authentication(page)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn test_page_count_table() {
        let cases = [
            (0, 1),
            (17, 1),
            (18, 2),
            (40, 2),
            (41, 3),
            (63, 3),
            (64, 4),
            (86, 4),
            (87, 5),
            (109, 5),
        ];
        for (len, pages) in cases {
            assert_eq!(page_count_for(len), pages, "length {len}");
        }
    }

    #[test]
    fn test_full_signature_round_trip() {
        let sig = signature(109);
        let mut builder = AuthBuilder::new();
        builder.set_auth_type(AuthType::UasIdSignature);
        builder.set_unix_time(1_600_000_000).unwrap();
        builder.set_auth_data(&sig).unwrap();

        assert_eq!(builder.page_count(), 5);
        assert_eq!(builder.pages().len(), 5);
        assert_eq!(builder.auth_data().unwrap(), sig);

        let mut rebuilt = AuthBuilder::new();
        for message in builder.messages() {
            match message.payload() {
                Some(Payload::Authentication(page)) => rebuilt.add(page.clone()).unwrap(),
                other => panic!("unexpected payload {other:?}"),
            }
        }
        assert_eq!(rebuilt.auth_data().unwrap(), sig);
        assert_eq!(rebuilt.auth_type(), AuthType::UasIdSignature);
        assert_eq!(rebuilt.unix_time(), 1_600_000_000);
    }

    #[test]
    fn test_short_signature_single_page() {
        let mut builder = AuthBuilder::new();
        builder.set_auth_data(&[0xAA; 5]).unwrap();
        assert_eq!(builder.pages().len(), 1);
        assert_eq!(builder.auth_data().unwrap(), vec![0xAA; 5]);

        let header = &builder.messages()[0];
        assert_eq!(&header.to_bytes()[..4], &[0x20, 0x00, 0x01, 0x05]);
    }

    #[test]
    fn test_final_page_is_zero_padded() {
        let mut builder = AuthBuilder::new();
        builder.set_auth_data(&[0x11; 18]).unwrap();
        let pages = builder.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].auth_data()[0], 0x11);
        assert_eq!(&pages[1].auth_data()[1..], &[0u8; 22]);
    }

    #[test]
    fn test_signature_too_long() {
        let mut builder = AuthBuilder::new();
        assert!(matches!(
            builder.set_auth_data(&signature(110)),
            Err(MessageError::LengthRange(110))
        ));
    }

    #[test]
    fn test_missing_page_detected() {
        let mut sender = AuthBuilder::new();
        sender.set_auth_data(&signature(109)).unwrap();
        let pages = sender.pages();

        let mut receiver = AuthBuilder::new();
        receiver.add(pages[0].clone()).unwrap();
        receiver.add(pages[1].clone()).unwrap();
        receiver.add(pages[3].clone()).unwrap();
        receiver.add(pages[4].clone()).unwrap();

        assert!(matches!(
            receiver.auth_data(),
            Err(MessageError::AuthPageNumber { index: 2, page_number: 1 })
        ));
    }

    #[test]
    fn test_add_rejects_page_five() {
        let mut page = AuthenticationAdditional::new();
        page.set_page_number(5).unwrap();
        let mut builder = AuthBuilder::new();
        assert!(matches!(
            builder.add(Authentication::Additional(page)),
            Err(MessageError::PageNumberRange(5))
        ));
    }
}
