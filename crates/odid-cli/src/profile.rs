//! Broadcast profiles: YAML descriptions of the messages a beacon emits.
//!
//! ```yaml
//! version: 2
//! basic_id:
//!   id_type: serial_number
//!   ua_type: helicopter
//!   uas_id: INTCJ123-4567-890
//! location:
//!   status: airborne
//!   latitude: 47.6205
//!   longitude: -122.3493
//! ```
//!
//! Every section is optional. Values go through the codec setters, so an
//! out-of-range value is reported with the name of the field it came from.

use std::path::Path;

use opendroneid_message::{
    AuthBuilder, AuthType, BasicId, HeightType, HorizontalAccuracy, IdType, LocationVector,
    Message, MessagePack, OperationalStatus, OperatorId, OperatorLocationType, Payload, SelfId,
    SpeedAccuracy, System, UaType, UasId, VerticalAccuracy,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::CliError;

/// Root of a broadcast profile file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BroadcastProfile {
    /// Protocol version written to every header.
    #[serde(default)]
    pub version: u8,
    pub basic_id: Option<BasicIdProfile>,
    pub location: Option<LocationProfile>,
    pub authentication: Option<AuthenticationProfile>,
    pub self_id: Option<SelfIdProfile>,
    pub system: Option<SystemProfile>,
    pub operator_id: Option<OperatorIdProfile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicIdProfile {
    pub id_type: IdType,
    pub ua_type: UaType,
    /// Text for serial numbers and registration IDs, hex for UUIDs.
    #[serde(default)]
    pub uas_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationProfile {
    pub status: Option<OperationalStatus>,
    pub height_type: Option<HeightType>,
    pub track_direction: Option<u16>,
    pub speed: Option<f64>,
    pub vertical_speed: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pressure_altitude: Option<f64>,
    pub geodetic_altitude: Option<f64>,
    pub height: Option<f64>,
    pub horizontal_accuracy: Option<HorizontalAccuracy>,
    pub vertical_accuracy: Option<VerticalAccuracy>,
    pub baro_altitude_accuracy: Option<VerticalAccuracy>,
    pub speed_accuracy: Option<SpeedAccuracy>,
    pub timestamp: Option<u16>,
    pub timestamp_accuracy: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthenticationProfile {
    pub auth_type: AuthType,
    pub unix_time: u64,
    /// Signature bytes as hex.
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelfIdProfile {
    #[serde(default)]
    pub description_type: u8,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemProfile {
    pub operator_location_type: Option<OperatorLocationType>,
    pub operator_latitude: Option<f64>,
    pub operator_longitude: Option<f64>,
    pub area_count: Option<u16>,
    pub area_radius: Option<f64>,
    pub area_ceiling: Option<f64>,
    pub area_floor: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorIdProfile {
    #[serde(default)]
    pub id_type: u8,
    pub operator_id: String,
}

impl BroadcastProfile {
    /// Parse a profile from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let yaml = std::fs::read_to_string(path)?;
        let profile = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), "loaded broadcast profile");
        Ok(profile)
    }

    /// Build every message the profile describes, in broadcast order.
    pub fn build(&self) -> Result<Vec<Message>, CliError> {
        let mut payloads: Vec<Payload> = Vec::new();
        if let Some(basic_id) = &self.basic_id {
            payloads.push(basic_id.build()?.into());
        }
        if let Some(location) = &self.location {
            payloads.push(location.build()?.into());
        }
        if let Some(auth) = &self.authentication {
            payloads.extend(auth.build()?.pages().into_iter().map(Payload::from));
        }
        if let Some(self_id) = &self.self_id {
            payloads.push(self_id.build()?.into());
        }
        if let Some(system) = &self.system {
            payloads.push(system.build()?.into());
        }
        if let Some(operator_id) = &self.operator_id {
            payloads.push(operator_id.build()?.into());
        }
        if payloads.is_empty() {
            return Err(CliError::EmptyProfile);
        }
        debug!(count = payloads.len(), "built profile messages");

        Ok(payloads
            .into_iter()
            .map(|payload| {
                let mut message = Message::new(payload);
                message.set_version(self.version);
                message
            })
            .collect())
    }
}

/// Wrap messages in a single Message Pack.
pub fn pack_messages(messages: &[Message], version: u8) -> Result<Message, CliError> {
    let mut pack = MessagePack::new();
    pack.set_messages(messages)?;
    let mut message = Message::new(pack.into());
    message.set_version(version);
    Ok(message)
}

impl BasicIdProfile {
    fn build(&self) -> Result<BasicId, CliError> {
        let uas_id = match self.id_type {
            IdType::None => UasId::none(),
            IdType::SerialNumber => UasId::serial_number(&self.uas_id),
            IdType::RegistrationId => UasId::registration_id(&self.uas_id),
            IdType::Uuid => UasId::uuid(&self.uas_id).map_err(CliError::config("basic_id.uas_id"))?,
            IdType::Invalid => UasId::from_bytes(IdType::Invalid, self.uas_id.as_bytes()),
        };
        let mut basic = BasicId::new();
        basic.set_ua_type(self.ua_type);
        basic
            .set_uas_id(&uas_id)
            .map_err(CliError::config("basic_id.uas_id"))?;
        Ok(basic)
    }
}

impl LocationProfile {
    fn build(&self) -> Result<LocationVector, CliError> {
        let mut loc = LocationVector::new();
        if let Some(status) = self.status {
            loc.set_status(status);
        }
        if let Some(height_type) = self.height_type {
            loc.set_height_type(height_type);
        }
        if let Some(direction) = self.track_direction {
            loc.set_track_direction(direction)
                .map_err(CliError::config("location.track_direction"))?;
        }
        if let Some(speed) = self.speed {
            loc.set_speed(speed)
                .map_err(CliError::config("location.speed"))?;
        }
        if let Some(vertical_speed) = self.vertical_speed {
            loc.set_vertical_speed(vertical_speed);
        }
        if let Some(latitude) = self.latitude {
            loc.set_latitude(latitude)
                .map_err(CliError::config("location.latitude"))?;
        }
        if let Some(longitude) = self.longitude {
            loc.set_longitude(longitude)
                .map_err(CliError::config("location.longitude"))?;
        }
        if let Some(altitude) = self.pressure_altitude {
            loc.set_pressure_altitude(altitude)
                .map_err(CliError::config("location.pressure_altitude"))?;
        }
        if let Some(altitude) = self.geodetic_altitude {
            loc.set_geodetic_altitude(altitude)
                .map_err(CliError::config("location.geodetic_altitude"))?;
        }
        if let Some(height) = self.height {
            loc.set_height(height)
                .map_err(CliError::config("location.height"))?;
        }
        if let Some(accuracy) = self.horizontal_accuracy {
            loc.set_horizontal_accuracy(accuracy);
        }
        if let Some(accuracy) = self.vertical_accuracy {
            loc.set_vertical_accuracy(accuracy);
        }
        if let Some(accuracy) = self.baro_altitude_accuracy {
            loc.set_baro_altitude_accuracy(accuracy);
        }
        if let Some(accuracy) = self.speed_accuracy {
            loc.set_speed_accuracy(accuracy);
        }
        if let Some(timestamp) = self.timestamp {
            loc.set_timestamp(timestamp)
                .map_err(CliError::config("location.timestamp"))?;
        }
        if let Some(accuracy) = self.timestamp_accuracy {
            loc.set_timestamp_accuracy(accuracy)
                .map_err(CliError::config("location.timestamp_accuracy"))?;
        }
        Ok(loc)
    }
}

impl AuthenticationProfile {
    fn build(&self) -> Result<AuthBuilder, CliError> {
        let data = opendroneid_message::from_hex_str(&self.data)
            .map_err(CliError::config("authentication.data"))?;
        let mut builder = AuthBuilder::new();
        builder.set_auth_type(self.auth_type);
        builder
            .set_unix_time(self.unix_time)
            .map_err(CliError::config("authentication.unix_time"))?;
        builder
            .set_auth_data(&data)
            .map_err(CliError::config("authentication.data"))?;
        Ok(builder)
    }
}

impl SelfIdProfile {
    fn build(&self) -> Result<SelfId, CliError> {
        let mut self_id = SelfId::new();
        self_id.set_description_type(self.description_type);
        self_id
            .set_description(&self.description)
            .map_err(CliError::config("self_id.description"))?;
        Ok(self_id)
    }
}

impl SystemProfile {
    fn build(&self) -> Result<System, CliError> {
        let mut system = System::new();
        if let Some(location_type) = self.operator_location_type {
            system.set_operator_location_type(location_type);
        }
        if let Some(latitude) = self.operator_latitude {
            system
                .set_operator_latitude(latitude)
                .map_err(CliError::config("system.operator_latitude"))?;
        }
        if let Some(longitude) = self.operator_longitude {
            system
                .set_operator_longitude(longitude)
                .map_err(CliError::config("system.operator_longitude"))?;
        }
        if let Some(count) = self.area_count {
            system
                .set_area_count(count)
                .map_err(CliError::config("system.area_count"))?;
        }
        if let Some(radius) = self.area_radius {
            system
                .set_area_radius(radius)
                .map_err(CliError::config("system.area_radius"))?;
        }
        if let Some(ceiling) = self.area_ceiling {
            system
                .set_area_ceiling(ceiling)
                .map_err(CliError::config("system.area_ceiling"))?;
        }
        if let Some(floor) = self.area_floor {
            system
                .set_area_floor(floor)
                .map_err(CliError::config("system.area_floor"))?;
        }
        Ok(system)
    }
}

impl OperatorIdProfile {
    fn build(&self) -> Result<OperatorId, CliError> {
        let mut operator_id = OperatorId::new();
        operator_id.set_operator_id_type(self.id_type);
        operator_id
            .set_operator_id(&self.operator_id)
            .map_err(CliError::config("operator_id.operator_id"))?;
        Ok(operator_id)
    }
}
