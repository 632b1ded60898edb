//! Code enums used by the message fields.
//!
//! Apart from [`MessageType`], every enum decodes any 4-bit (or narrower)
//! code without failing: codes the standard leaves undefined map to a
//! designated catch-all variant.

use serde::{Deserialize, Serialize};

use crate::MessageError;

/// Defines a code enum with a catch-all default for undefined codes.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every named variant, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire code of this variant.
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    _ => $name::$default,
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }
    };
}

/// Message type carried in the top nibble of the header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// UAS identification.
    BasicId,
    /// Position and velocity.
    LocationVector,
    /// One page of an authentication signature.
    Authentication,
    /// Free-text operator declaration.
    SelfId,
    /// Operator location and operating area.
    System,
    /// Operator identification.
    OperatorId,
    /// Container for up to 10 messages.
    MessagePack,
}

impl MessageType {
    /// Every message type, in code order.
    pub const ALL: &'static [MessageType] = &[
        MessageType::BasicId,
        MessageType::LocationVector,
        MessageType::Authentication,
        MessageType::SelfId,
        MessageType::System,
        MessageType::OperatorId,
        MessageType::MessagePack,
    ];

    /// Wire code of this message type.
    pub fn code(self) -> u8 {
        match self {
            MessageType::BasicId => 0x0,
            MessageType::LocationVector => 0x1,
            MessageType::Authentication => 0x2,
            MessageType::SelfId => 0x3,
            MessageType::System => 0x4,
            MessageType::OperatorId => 0x5,
            MessageType::MessagePack => 0xF,
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = MessageError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x0 => Ok(MessageType::BasicId),
            0x1 => Ok(MessageType::LocationVector),
            0x2 => Ok(MessageType::Authentication),
            0x3 => Ok(MessageType::SelfId),
            0x4 => Ok(MessageType::System),
            0x5 => Ok(MessageType::OperatorId),
            0xF => Ok(MessageType::MessagePack),
            _ => Err(MessageError::UnsupportedMessageType(code)),
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageType::BasicId => "Basic ID",
            MessageType::LocationVector => "Location/Vector",
            MessageType::Authentication => "Authentication",
            MessageType::SelfId => "Self ID",
            MessageType::System => "System",
            MessageType::OperatorId => "Operator ID",
            MessageType::MessagePack => "Message Pack",
        };
        f.write_str(name)
    }
}

code_enum! {
    /// Kind of identifier carried in a Basic ID message.
    pub enum IdType (default Invalid) {
        /// No identifier.
        None = 0x0,
        /// Manufacturer serial number (ANSI/CTA-2063-A).
        SerialNumber = 0x1,
        /// CAA-assigned registration ID.
        RegistrationId = 0x2,
        /// UTM-assigned session UUID.
        Uuid = 0x3,
        /// Reserved or otherwise unusable code.
        Invalid = 0xF,
    }
}

code_enum! {
    /// Category of unmanned aircraft.
    pub enum UaType (default Other) {
        None = 0x0,
        Aeroplane = 0x1,
        Helicopter = 0x2,
        Gyroplane = 0x3,
        HybridLift = 0x4,
        Ornithopter = 0x5,
        Glider = 0x6,
        Kite = 0x7,
        FreeBalloon = 0x8,
        CaptiveBalloon = 0x9,
        Airship = 0xA,
        FreeFall = 0xB,
        Rocket = 0xC,
        TetheredPoweredAircraft = 0xD,
        GroundObstacle = 0xE,
        Other = 0xF,
    }
}

code_enum! {
    /// Operational status of the aircraft.
    pub enum OperationalStatus (default Reserved) {
        Undeclared = 0x0,
        Ground = 0x1,
        Airborne = 0x2,
        Reserved = 0xF,
    }
}

code_enum! {
    /// Reference for the height field.
    pub enum HeightType (default AboveTakeoff) {
        /// Height above the takeoff location.
        AboveTakeoff = 0,
        /// Height above ground level.
        Agl = 1,
    }
}

code_enum! {
    /// Half of the compass the track direction falls in.
    pub enum DirectionSegment (default East) {
        /// 0-179 degrees.
        East = 0,
        /// 180-359 degrees.
        West = 1,
    }
}

impl DirectionSegment {
    /// Degrees added to the raw direction byte.
    pub fn offset(self) -> u16 {
        match self {
            DirectionSegment::East => 0,
            DirectionSegment::West => 180,
        }
    }
}

code_enum! {
    /// Resolution of the speed byte.
    pub enum SpeedMultiplier (default X025) {
        /// 0.25 m/s per step.
        X025 = 0,
        /// 0.75 m/s per step above 63.75 m/s.
        X075 = 1,
    }
}

code_enum! {
    /// Horizontal position accuracy bound.
    pub enum HorizontalAccuracy (default Reserved) {
        Unknown = 0x0,
        Acc18520m = 0x1,
        Acc7408m = 0x2,
        Acc3704m = 0x3,
        Acc1852m = 0x4,
        Acc926m = 0x5,
        Acc555dp6m = 0x6,
        Acc185dp2m = 0x7,
        Acc92dp6m = 0x8,
        Acc30m = 0x9,
        Acc10m = 0xA,
        Acc3m = 0xB,
        Acc1m = 0xC,
        Reserved = 0xF,
    }
}

code_enum! {
    /// Vertical (geodetic or barometric) accuracy bound.
    pub enum VerticalAccuracy (default Reserved) {
        Unknown = 0x0,
        Acc150m = 0x1,
        Acc45m = 0x2,
        Acc25m = 0x3,
        Acc10m = 0x4,
        Acc3m = 0x5,
        Acc1m = 0x6,
        Reserved = 0xF,
    }
}

code_enum! {
    /// Ground speed accuracy bound.
    pub enum SpeedAccuracy (default Reserved) {
        Unknown = 0x0,
        Acc10mps = 0x1,
        Acc3mps = 0x2,
        Acc1mps = 0x3,
        Acc03mps = 0x4,
        Reserved = 0xF,
    }
}

code_enum! {
    /// Source of the operator location in a System message.
    pub enum OperatorLocationType (default Reserved) {
        TakeOff = 0x0,
        LiveGnss = 0x1,
        FixedLocation = 0x2,
        Reserved = 0x3,
    }
}

code_enum! {
    /// Kind of authentication data.
    pub enum AuthType (default None) {
        None = 0x0,
        UasIdSignature = 0x1,
        OperatorIdSignature = 0x2,
        MessageSetSignature = 0x3,
        NetworkRemoteId = 0x4,
        Reserved05 = 0x5,
        Reserved06 = 0x6,
        Reserved07 = 0x7,
        Reserved08 = 0x8,
        Reserved09 = 0x9,
        PrivateUse0A = 0xA,
        PrivateUse0B = 0xB,
        PrivateUse0C = 0xC,
        PrivateUse0D = 0xD,
        PrivateUse0E = 0xE,
        PrivateUse0F = 0xF,
    }
}
