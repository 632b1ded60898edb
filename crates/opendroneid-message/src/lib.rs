//! Open Drone ID message codec
//!
//! This crate encodes and decodes the ASTM F3411 Open Drone ID message set:
//! the fixed-size messages an unmanned aircraft broadcasts for remote
//! identification. Only the message bytes are handled here; Bluetooth and
//! WiFi advertisement framing belong to the caller.
//!
//! # Message Format
//!
//! Every message is 25 bytes: a header byte followed by a 24-byte body.
//! The Message Pack is the exception, carrying up to ten complete messages.
//!
//! | Type | Body                         | Size (bytes) |
//! |------|------------------------------|--------------|
//! | 0x0  | [`BasicId`]                  | 24           |
//! | 0x1  | [`LocationVector`]           | 24           |
//! | 0x2  | [`Authentication`] page      | 24           |
//! | 0x3  | [`SelfId`]                   | 24           |
//! | 0x4  | [`System`]                   | 24           |
//! | 0x5  | [`OperatorId`]               | 24           |
//! | 0xF  | [`MessagePack`]              | 2-252        |
//!
//! Bodies keep their wire bytes as their only state. Setters validate and
//! encode straight into the buffer; getters decode from it and report a
//! field's "unknown" value rather than failing on a bad raw value.
//!
//! # Example
//!
//! ```rust,ignore
//! use opendroneid_message::{BasicId, Message, UaType, UasId};
//!
//! let mut basic = BasicId::new();
//! basic.set_ua_type(UaType::Helicopter);
//! basic.set_uas_id(&UasId::serial_number("INTCJ123-4567-890"))?;
//! let bytes = Message::new(basic.into()).to_bytes();
//!
//! let decoded = Message::parse(&bytes)?;
//! ```

mod auth;
mod auth_builder;
mod basic_id;
mod bits;
mod error;
mod field;
mod header;
mod location;
mod message;
mod message_pack;
mod operator_id;
mod self_id;
mod system;
mod types;
mod uas_id;

pub use auth::*;
pub use auth_builder::*;
pub use basic_id::*;
pub use bits::*;
pub use error::*;
pub use field::*;
pub use header::*;
pub use location::*;
pub use message::*;
pub use message_pack::*;
pub use operator_id::*;
pub use self_id::*;
pub use system::*;
pub use types::*;
pub use uas_id::*;

/// Size of every message body except the Message Pack.
pub const BODY_SIZE: usize = 24;

/// Size of a complete single message, header included.
pub const MESSAGE_SIZE: usize = 1 + BODY_SIZE;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, MessageError>;
