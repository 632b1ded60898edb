//! Decode reports for hex-encoded messages, rendered as JSON or text.

use std::fmt::Write as _;

use clap::ValueEnum;
use opendroneid_message::{
    to_hex_string, AuthBuilder, AuthType, Authentication, BasicId, HeightType,
    HorizontalAccuracy, IdType, Message, OperationalStatus, OperatorLocationType, Payload,
    SpeedAccuracy, UaType, VerticalAccuracy,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::CliError;

/// Output format for `odid decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Everything decoded from one run.
#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub messages: Vec<MessageReport>,
    /// Signature reassembled from the authentication pages seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureReport>,
}

#[derive(Debug, Serialize)]
pub struct MessageReport {
    pub index: usize,
    pub version: u8,
    #[serde(flatten)]
    pub body: BodyReport,
}

#[derive(Debug, Serialize)]
pub struct SignatureReport {
    pub auth_type: AuthType,
    pub unix_time: u64,
    pub data: String,
}

/// Decoded fields of one body, tagged with its message type.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyReport {
    BasicId {
        id_type: IdType,
        ua_type: UaType,
        uas_id: String,
    },
    LocationVector {
        status: OperationalStatus,
        height_type: HeightType,
        track_direction: u16,
        speed: f64,
        vertical_speed: f64,
        latitude: f64,
        longitude: f64,
        pressure_altitude: f64,
        geodetic_altitude: f64,
        height: f64,
        horizontal_accuracy: HorizontalAccuracy,
        vertical_accuracy: VerticalAccuracy,
        baro_altitude_accuracy: VerticalAccuracy,
        speed_accuracy: SpeedAccuracy,
        timestamp: u16,
        timestamp_accuracy: f64,
    },
    AuthenticationHeader {
        auth_type: AuthType,
        page_count: u8,
        length: usize,
        unix_time: u64,
        auth_data: String,
    },
    AuthenticationPage {
        auth_type: AuthType,
        page_number: u8,
        auth_data: String,
    },
    SelfId {
        description_type: u8,
        description: String,
    },
    System {
        operator_location_type: OperatorLocationType,
        operator_latitude: f64,
        operator_longitude: f64,
        area_count: u16,
        area_radius: f64,
        area_ceiling: f64,
        area_floor: f64,
    },
    OperatorId {
        operator_id_type: u8,
        operator_id: String,
    },
    MessagePack {
        message_number: u8,
        messages: Vec<MessageReport>,
    },
}

/// Collects reports and the authentication pages they contain.
#[derive(Default)]
struct Decoder {
    auth: AuthBuilder,
    saw_auth_header: bool,
}

impl Decoder {
    fn report(&mut self, index: usize, message: &Message) -> Result<MessageReport, CliError> {
        // an empty message serializes as a zeroed Basic ID
        let body = match message.payload() {
            Some(payload) => self.body(payload)?,
            None => self.body(&Payload::BasicId(BasicId::new()))?,
        };
        Ok(MessageReport {
            index,
            version: message.version(),
            body,
        })
    }

    fn body(&mut self, payload: &Payload) -> Result<BodyReport, CliError> {
        let body = match payload {
            Payload::BasicId(basic) => BodyReport::BasicId {
                id_type: basic.id_type(),
                ua_type: basic.ua_type(),
                uas_id: basic.uas_id().to_string(),
            },
            Payload::LocationVector(loc) => BodyReport::LocationVector {
                status: loc.status(),
                height_type: loc.height_type(),
                track_direction: loc.track_direction(),
                speed: loc.speed(),
                vertical_speed: loc.vertical_speed(),
                latitude: loc.latitude(),
                longitude: loc.longitude(),
                pressure_altitude: loc.pressure_altitude(),
                geodetic_altitude: loc.geodetic_altitude(),
                height: loc.height(),
                horizontal_accuracy: loc.horizontal_accuracy(),
                vertical_accuracy: loc.vertical_accuracy(),
                baro_altitude_accuracy: loc.baro_altitude_accuracy(),
                speed_accuracy: loc.speed_accuracy(),
                timestamp: loc.timestamp(),
                timestamp_accuracy: loc.timestamp_accuracy(),
            },
            Payload::Authentication(page) => self.auth_page(page),
            Payload::SelfId(self_id) => BodyReport::SelfId {
                description_type: self_id.description_type(),
                description: self_id.description(),
            },
            Payload::System(system) => BodyReport::System {
                operator_location_type: system.operator_location_type(),
                operator_latitude: system.operator_latitude(),
                operator_longitude: system.operator_longitude(),
                area_count: system.area_count(),
                area_radius: system.area_radius(),
                area_ceiling: system.area_ceiling(),
                area_floor: system.area_floor(),
            },
            Payload::OperatorId(op) => BodyReport::OperatorId {
                operator_id_type: op.operator_id_type(),
                operator_id: op.operator_id(),
            },
            Payload::MessagePack(pack) => {
                let mut messages = Vec::new();
                for (index, message) in pack.messages()?.iter().enumerate() {
                    messages.push(self.report(index, message)?);
                }
                BodyReport::MessagePack {
                    message_number: pack.message_number(),
                    messages,
                }
            }
        };
        Ok(body)
    }

    fn auth_page(&mut self, page: &Authentication) -> BodyReport {
        if let Err(err) = self.auth.add(page.clone()) {
            warn!(page_number = page.page_number(), %err, "authentication page not collected");
        }
        match page {
            Authentication::Header(header) => {
                self.saw_auth_header = true;
                BodyReport::AuthenticationHeader {
                    auth_type: header.auth_type(),
                    page_count: header.page_count(),
                    length: header.length(),
                    unix_time: header.unix_time(),
                    auth_data: to_hex_string(header.auth_data()),
                }
            }
            Authentication::Additional(additional) => BodyReport::AuthenticationPage {
                auth_type: additional.auth_type(),
                page_number: additional.page_number(),
                auth_data: to_hex_string(additional.auth_data()),
            },
        }
    }

    fn signature(&self) -> Option<SignatureReport> {
        if !self.saw_auth_header {
            return None;
        }
        match self.auth.auth_data() {
            Ok(data) => Some(SignatureReport {
                auth_type: self.auth.auth_type(),
                unix_time: self.auth.unix_time(),
                data: to_hex_string(&data),
            }),
            Err(err) => {
                warn!(%err, "authentication signature incomplete");
                None
            }
        }
    }
}

/// Decode one hex-encoded message per input.
pub fn decode_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<DecodeReport, CliError> {
    let mut decoder = Decoder::default();
    let mut messages = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let message = Message::from_hex(input.as_ref().trim())
            .map_err(|source| CliError::Decode { index, source })?;
        debug!(index, message_type = ?message.header().message_type(), "decoded input");
        messages.push(decoder.report(index, &message)?);
    }
    Ok(DecodeReport {
        messages,
        signature: decoder.signature(),
    })
}

/// Render a report in the requested format.
pub fn render(report: &DecodeReport, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => render_text(report),
    }
}

fn render_text(report: &DecodeReport) -> Result<String, CliError> {
    let mut out = String::new();
    for message in &report.messages {
        write_message(&mut out, message, 0)?;
    }
    if let Some(signature) = &report.signature {
        let value = serde_json::to_value(signature)?;
        out.push_str("signature\n");
        write_fields(&mut out, &value, 1);
    }
    Ok(out)
}

fn write_message(out: &mut String, message: &MessageReport, depth: usize) -> Result<(), CliError> {
    let value = serde_json::to_value(&message.body)?;
    let kind = value
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}[{}] {kind} v{}", message.index, message.version);
    write_fields(out, &value, depth + 1);
    if let BodyReport::MessagePack { messages, .. } = &message.body {
        for inner in messages {
            write_message(out, inner, depth + 1)?;
        }
    }
    Ok(())
}

fn write_fields(out: &mut String, value: &serde_json::Value, depth: usize) {
    let Some(fields) = value.as_object() else {
        return;
    };
    let indent = "  ".repeat(depth);
    for (key, field) in fields {
        if key == "type" || key == "messages" {
            continue;
        }
        let text = match field {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let _ = writeln!(out, "{indent}{key}: {text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opendroneid_message::{MessagePack, UasId};

    fn basic_id_hex() -> String {
        let mut basic = BasicId::new();
        basic.set_ua_type(UaType::Helicopter);
        basic
            .set_uas_id(&UasId::serial_number("INTCJ123-4567-890"))
            .unwrap();
        Message::new(basic.into()).to_hex()
    }

    #[test]
    fn test_decode_basic_id() {
        let report = decode_inputs(&[basic_id_hex()]).unwrap();
        assert_eq!(report.messages.len(), 1);
        match &report.messages[0].body {
            BodyReport::BasicId {
                id_type,
                ua_type,
                uas_id,
            } => {
                assert_eq!(*id_type, IdType::SerialNumber);
                assert_eq!(*ua_type, UaType::Helicopter);
                assert_eq!(uas_id, "INTCJ123-4567-890");
            }
            other => panic!("unexpected body {other:?}"),
        }
        assert!(report.signature.is_none());
    }

    #[test]
    fn test_json_output() {
        let report = decode_inputs(&[basic_id_hex()]).unwrap();
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["messages"][0]["type"], "basic_id");
        assert_eq!(value["messages"][0]["ua_type"], "helicopter");
        assert_eq!(value["messages"][0]["id_type"], "serial_number");
        assert!(value.get("signature").is_none());
    }

    #[test]
    fn test_text_output() {
        let report = decode_inputs(&[basic_id_hex()]).unwrap();
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.starts_with("[0] basic_id v0\n"));
        assert!(text.contains("  uas_id: INTCJ123-4567-890\n"));
    }

    #[test]
    fn test_signature_reassembled_from_pack() {
        let mut auth = AuthBuilder::new();
        auth.set_auth_type(AuthType::OperatorIdSignature);
        auth.set_auth_data(&[0xAB; 30]).unwrap();
        let mut pack = MessagePack::new();
        pack.set_messages(&auth.messages()).unwrap();
        let hex = Message::new(pack.into()).to_hex();

        let report = decode_inputs(&[hex]).unwrap();
        match &report.messages[0].body {
            BodyReport::MessagePack {
                message_number,
                messages,
            } => {
                assert_eq!(*message_number, 2);
                assert_eq!(messages.len(), 2);
            }
            other => panic!("unexpected body {other:?}"),
        }
        let signature = report.signature.unwrap();
        assert_eq!(signature.auth_type, AuthType::OperatorIdSignature);
        assert_eq!(signature.data, "ab".repeat(30));
    }

    #[test]
    fn test_bad_input_names_index() {
        let err = decode_inputs(&[basic_id_hex(), "60".repeat(25)]).unwrap_err();
        assert!(matches!(err, CliError::Decode { index: 1, .. }));
    }
}
