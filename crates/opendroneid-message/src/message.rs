//! The message envelope: a header byte followed by one typed body.

use tracing::{debug, trace};

use crate::bits::{from_hex_str, to_hex_string};
use crate::{
    Authentication, BasicId, Header, LocationVector, MessageError, MessagePack, MessageType,
    OperatorId, Result, SelfId, System, BODY_SIZE,
};

/// A typed message body. The variant is the message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    BasicId(BasicId),
    LocationVector(LocationVector),
    Authentication(Authentication),
    SelfId(SelfId),
    System(System),
    OperatorId(OperatorId),
    MessagePack(MessagePack),
}

impl Payload {
    /// Decode a body of the given message type.
    pub fn decode(message_type: MessageType, body: &[u8]) -> Result<Self> {
        let payload = match message_type {
            MessageType::BasicId => Payload::BasicId(BasicId::from_bytes(body)?),
            MessageType::LocationVector => {
                Payload::LocationVector(LocationVector::from_bytes(body)?)
            }
            MessageType::Authentication => {
                Payload::Authentication(Authentication::from_bytes(body)?)
            }
            MessageType::SelfId => Payload::SelfId(SelfId::from_bytes(body)?),
            MessageType::System => Payload::System(System::from_bytes(body)?),
            MessageType::OperatorId => Payload::OperatorId(OperatorId::from_bytes(body)?),
            MessageType::MessagePack => Payload::MessagePack(MessagePack::from_bytes(body)?),
        };
        Ok(payload)
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Payload::BasicId(_) => MessageType::BasicId,
            Payload::LocationVector(_) => MessageType::LocationVector,
            Payload::Authentication(_) => MessageType::Authentication,
            Payload::SelfId(_) => MessageType::SelfId,
            Payload::System(_) => MessageType::System,
            Payload::OperatorId(_) => MessageType::OperatorId,
            Payload::MessagePack(_) => MessageType::MessagePack,
        }
    }

    /// The body's wire bytes, without the header.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::BasicId(body) => body.as_bytes(),
            Payload::LocationVector(body) => body.as_bytes(),
            Payload::Authentication(body) => body.as_bytes(),
            Payload::SelfId(body) => body.as_bytes(),
            Payload::System(body) => body.as_bytes(),
            Payload::OperatorId(body) => body.as_bytes(),
            Payload::MessagePack(body) => body.as_bytes(),
        }
    }
}

macro_rules! payload_from {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Payload {
                fn from(body: $variant) -> Self {
                    Payload::$variant(body)
                }
            }
        )+
    };
}

payload_from!(BasicId, LocationVector, Authentication, SelfId, System, OperatorId, MessagePack);

/// One Open Drone ID message.
///
/// The header's type nibble is derived from the payload variant, so the two
/// cannot disagree. Only the protocol version is stored separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    version: u8,
    payload: Option<Payload>,
}

impl Message {
    /// Wrap a payload with protocol version 0.
    pub fn new(payload: Payload) -> Self {
        Message {
            version: 0,
            payload: Some(payload),
        }
    }

    /// Decode a complete message: one header byte and its body.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (&first, body) = data.split_first().ok_or_else(|| {
            debug!("rejecting empty message");
            MessageError::data_length(0)
        })?;
        let header = Header::from_byte(first);
        let message_type = header.message_type().map_err(|err| {
            debug!(header = first, "unsupported message type");
            err
        })?;
        trace!(
            %message_type,
            version = header.version(),
            body_len = body.len(),
            "dispatching message body"
        );
        let payload = Payload::decode(message_type, body)?;
        if let Payload::Authentication(page) = &payload {
            trace!(page_number = page.page_number(), "authentication page");
        }
        Ok(Message {
            version: header.version(),
            payload: Some(payload),
        })
    }

    /// Decode a hex-encoded message.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::parse(&from_hex_str(hex)?)
    }

    /// The header byte as it will be serialized. A message without a
    /// payload reports the Basic ID type.
    pub fn header(&self) -> Header {
        let message_type = self
            .payload
            .as_ref()
            .map_or(MessageType::BasicId, Payload::message_type);
        Header::new(message_type, self.version)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Set the protocol version; only the low 4 bits are kept.
    pub fn set_version(&mut self, version: u8) {
        self.version = version & 0x0F;
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn payload_mut(&mut self) -> Option<&mut Payload> {
        self.payload.as_mut()
    }

    /// Replace the payload. The header type follows it.
    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = Some(payload);
    }

    /// Header byte followed by the body, or by 24 zero bytes when no
    /// payload is set.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.header().to_byte()];
        match &self.payload {
            Some(payload) => bytes.extend_from_slice(payload.as_bytes()),
            None => bytes.extend_from_slice(&[0u8; BODY_SIZE]),
        }
        bytes
    }

    /// Lowercase hex of [`Self::to_bytes`].
    pub fn to_hex(&self) -> String {
        to_hex_string(&self.to_bytes())
    }
}
