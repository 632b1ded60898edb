//! Location/Vector message body.
//!
//! | Byte  | Field                                                        |
//! |-------|--------------------------------------------------------------|
//! | 0     | status (7..4), height type (2), E/W segment (1), speed mult (0) |
//! | 1     | track direction                                              |
//! | 2     | speed                                                        |
//! | 3     | vertical speed (signed)                                      |
//! | 4-7   | latitude                                                     |
//! | 8-11  | longitude                                                    |
//! | 12-13 | pressure altitude                                            |
//! | 14-15 | geodetic altitude                                            |
//! | 16-17 | height                                                       |
//! | 18    | horizontal accuracy (7..4), vertical accuracy (3..0)         |
//! | 19    | baro altitude accuracy (7..4), speed accuracy (3..0)         |
//! | 20-21 | timestamp, 1/10 s since the hour                             |
//! | 22    | reserved (7..4), timestamp accuracy (3..0)                   |
//! | 23    | reserved                                                     |

use std::ops::RangeInclusive;

use crate::bits::ByteExt;
use crate::field::{
    altitude_at, fixed_body, latitude_at, longitude_at, read_u16_le, set_altitude_at,
    set_latitude_at, set_longitude_at, write_u16_le, LAT_LON_UNKNOWN,
};
use crate::{
    DirectionSegment, HeightType, HorizontalAccuracy, MessageError, OperationalStatus, Result,
    SpeedAccuracy, SpeedMultiplier, VerticalAccuracy, BODY_SIZE,
};

/// Track direction "not available" value.
pub const TRACK_DIRECTION_UNKNOWN: u16 = 361;
/// Largest valid track direction in degrees.
pub const TRACK_DIRECTION_MAX: u16 = 359;
/// Speed "not available" value.
pub const SPEED_UNKNOWN: f64 = 255.0;
/// Largest encodable speed; faster speeds clamp here.
pub const SPEED_MAX: f64 = 254.25;
/// Vertical speed "not available" value.
pub const VERTICAL_SPEED_UNKNOWN: f64 = 63.0;
/// Encodable vertical speed range; writes outside clamp to the bounds.
pub const VERTICAL_SPEED_RANGE: RangeInclusive<f64> = -62.0..=62.0;
/// Legal timestamp range in tenths of a second.
pub const TIMESTAMP_RANGE: RangeInclusive<u16> = 0..=36000;
/// Legal timestamp accuracy range in seconds.
pub const TIMESTAMP_ACCURACY_RANGE: RangeInclusive<f64> = 0.1..=1.5;
/// Timestamp accuracy "not available" value.
pub const TIMESTAMP_ACCURACY_UNKNOWN: f64 = 0.0;

const SPEED_STEP_LOW: f64 = 0.25;
const SPEED_STEP_HIGH: f64 = 0.75;
// 255 low-resolution steps
const SPEED_HIGH_OFFSET: f64 = 63.75;
const SPEED_RAW_UNKNOWN: u8 = 255;
const SPEED_RAW_MAX: u8 = 254;

const VERTICAL_SPEED_STEP: f64 = 0.5;
const VERTICAL_SPEED_RAW_MAX: i8 = 124;
const VERTICAL_SPEED_RAW_UNKNOWN: i8 = 126;

const OFFSET_LATITUDE: usize = 4;
const OFFSET_LONGITUDE: usize = 8;
const OFFSET_PRESSURE_ALTITUDE: usize = 12;
const OFFSET_GEODETIC_ALTITUDE: usize = 14;
const OFFSET_HEIGHT: usize = 16;
const OFFSET_TIMESTAMP: usize = 20;

const DEFAULT_BODY: [u8; BODY_SIZE] = [
    0x03, // status/height type/segment/multiplier
    0xB5, // track direction
    0xFF, // speed
    0x7E, // vertical speed
    0x00, 0x00, 0x00, 0x00, // latitude
    0x00, 0x00, 0x00, 0x00, // longitude
    0x00, 0x00, // pressure altitude
    0x00, 0x00, // geodetic altitude
    0x00, 0x00, // height
    0x00, // horizontal/vertical accuracy
    0x00, // baro/speed accuracy
    0x00, 0x00, // timestamp
    0x01, // timestamp accuracy
    0x00, // reserved
];

/// Location/Vector body backed by its 24 wire bytes.
///
/// Each accessor decodes from or encodes into the buffer, so a value read
/// back after a write is the quantized value actually on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationVector {
    data: [u8; BODY_SIZE],
}

impl Default for LocationVector {
    /// Every measured field set to its unknown value.
    fn default() -> Self {
        LocationVector { data: DEFAULT_BODY }
    }
}

impl LocationVector {
    /// Location with every measured field unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(LocationVector {
            data: fixed_body(data)?,
        })
    }

    /// The wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    // ------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------

    pub fn status(&self) -> OperationalStatus {
        OperationalStatus::from(self.data[0].top4bit())
    }

    pub fn set_status(&mut self, status: OperationalStatus) {
        self.data[0] = self.data[0].with_top4bit(status.code());
    }

    pub fn height_type(&self) -> HeightType {
        HeightType::from((self.data[0] >> 2) & 0x01)
    }

    pub fn set_height_type(&mut self, height_type: HeightType) {
        self.set_flag(2, height_type.code());
    }

    pub fn direction_segment(&self) -> DirectionSegment {
        DirectionSegment::from((self.data[0] >> 1) & 0x01)
    }

    pub fn set_direction_segment(&mut self, segment: DirectionSegment) {
        self.set_flag(1, segment.code());
    }

    pub fn speed_multiplier(&self) -> SpeedMultiplier {
        SpeedMultiplier::from(self.data[0] & 0x01)
    }

    pub fn set_speed_multiplier(&mut self, multiplier: SpeedMultiplier) {
        self.set_flag(0, multiplier.code());
    }

    fn set_flag(&mut self, pos: u32, value: u8) {
        // one-bit enum codes are always 0 or 1
        self.data[0] = (self.data[0] & !(1 << pos)) | ((value & 0x01) << pos);
    }

    // ------------------------------------------------------------------
    // Direction and speed
    // ------------------------------------------------------------------

    /// Track direction in degrees clockwise from true north, or
    /// [`TRACK_DIRECTION_UNKNOWN`].
    pub fn track_direction(&self) -> u16 {
        let raw = self.data[1] as u16;
        if raw < 180 {
            raw + self.direction_segment().offset()
        } else {
            TRACK_DIRECTION_UNKNOWN
        }
    }

    /// Set the track direction (0-359, or 361 for unknown). Also sets the
    /// direction segment.
    pub fn set_track_direction(&mut self, direction: u16) -> Result<()> {
        if direction > TRACK_DIRECTION_MAX && direction != TRACK_DIRECTION_UNKNOWN {
            return Err(MessageError::DirectionRange(direction));
        }
        if direction < 180 {
            self.data[1] = direction as u8;
            self.set_direction_segment(DirectionSegment::East);
        } else {
            self.data[1] = (direction - 180) as u8;
            self.set_direction_segment(DirectionSegment::West);
        }
        Ok(())
    }

    /// Ground speed in m/s, or [`SPEED_UNKNOWN`].
    pub fn speed(&self) -> f64 {
        let raw = self.data[2] as f64;
        match self.speed_multiplier() {
            SpeedMultiplier::X025 => raw * SPEED_STEP_LOW,
            SpeedMultiplier::X075 => raw * SPEED_STEP_HIGH + SPEED_HIGH_OFFSET,
        }
    }

    /// Set the ground speed in m/s. Picks the multiplier; speeds at or above
    /// [`SPEED_MAX`] clamp to it, except the exact unknown value.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if speed.is_nan() || speed < 0.0 {
            return Err(MessageError::SpeedRange(speed));
        }
        let (raw, multiplier) = if speed == SPEED_UNKNOWN {
            (SPEED_RAW_UNKNOWN, SpeedMultiplier::X075)
        } else if speed <= SPEED_HIGH_OFFSET {
            ((speed / SPEED_STEP_LOW).round() as u8, SpeedMultiplier::X025)
        } else if speed < SPEED_MAX {
            let raw = ((speed - SPEED_HIGH_OFFSET) / SPEED_STEP_HIGH).round() as u8;
            (raw.min(SPEED_RAW_MAX), SpeedMultiplier::X075)
        } else {
            (SPEED_RAW_MAX, SpeedMultiplier::X075)
        };
        self.data[2] = raw;
        self.set_speed_multiplier(multiplier);
        Ok(())
    }

    /// Vertical speed in m/s (up positive), or [`VERTICAL_SPEED_UNKNOWN`].
    pub fn vertical_speed(&self) -> f64 {
        let raw = self.data[3] as i8;
        if raw.unsigned_abs() > VERTICAL_SPEED_RAW_MAX as u8 {
            VERTICAL_SPEED_UNKNOWN
        } else {
            raw as f64 * VERTICAL_SPEED_STEP
        }
    }

    /// Set the vertical speed in m/s. Values outside ±62 clamp to the
    /// nearest bound; [`VERTICAL_SPEED_UNKNOWN`] writes the sentinel.
    pub fn set_vertical_speed(&mut self, speed: f64) {
        let raw = if speed == VERTICAL_SPEED_UNKNOWN || speed.is_nan() {
            VERTICAL_SPEED_RAW_UNKNOWN
        } else {
            let clamped = speed.clamp(*VERTICAL_SPEED_RANGE.start(), *VERTICAL_SPEED_RANGE.end());
            (clamped / VERTICAL_SPEED_STEP).round() as i8
        };
        self.data[3] = raw as u8;
    }

    // ------------------------------------------------------------------
    // Position
    // ------------------------------------------------------------------

    /// Latitude in degrees, or 0.0 when unknown.
    pub fn latitude(&self) -> f64 {
        latitude_at(&self.data, OFFSET_LATITUDE)
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        set_latitude_at(&mut self.data, OFFSET_LATITUDE, latitude)
    }

    /// Longitude in degrees, or 0.0 when unknown.
    pub fn longitude(&self) -> f64 {
        longitude_at(&self.data, OFFSET_LONGITUDE)
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        set_longitude_at(&mut self.data, OFFSET_LONGITUDE, longitude)
    }

    /// True when neither latitude nor longitude is known.
    pub fn is_unknown(&self) -> bool {
        self.latitude() == LAT_LON_UNKNOWN && self.longitude() == LAT_LON_UNKNOWN
    }

    /// Barometric pressure altitude in meters, or -1000.0 when unknown.
    pub fn pressure_altitude(&self) -> f64 {
        altitude_at(&self.data, OFFSET_PRESSURE_ALTITUDE)
    }

    pub fn set_pressure_altitude(&mut self, altitude: f64) -> Result<()> {
        set_altitude_at(&mut self.data, OFFSET_PRESSURE_ALTITUDE, altitude)
    }

    /// Geodetic (WGS-84 HAE) altitude in meters, or -1000.0 when unknown.
    pub fn geodetic_altitude(&self) -> f64 {
        altitude_at(&self.data, OFFSET_GEODETIC_ALTITUDE)
    }

    pub fn set_geodetic_altitude(&mut self, altitude: f64) -> Result<()> {
        set_altitude_at(&mut self.data, OFFSET_GEODETIC_ALTITUDE, altitude)
    }

    /// Height in meters relative to [`Self::height_type`], or -1000.0 when unknown.
    pub fn height(&self) -> f64 {
        altitude_at(&self.data, OFFSET_HEIGHT)
    }

    pub fn set_height(&mut self, height: f64) -> Result<()> {
        set_altitude_at(&mut self.data, OFFSET_HEIGHT, height)
    }

    // ------------------------------------------------------------------
    // Accuracy
    // ------------------------------------------------------------------

    pub fn horizontal_accuracy(&self) -> HorizontalAccuracy {
        HorizontalAccuracy::from(self.data[18].top4bit())
    }

    pub fn set_horizontal_accuracy(&mut self, accuracy: HorizontalAccuracy) {
        self.data[18] = self.data[18].with_top4bit(accuracy.code());
    }

    pub fn vertical_accuracy(&self) -> VerticalAccuracy {
        VerticalAccuracy::from(self.data[18].lower4bit())
    }

    pub fn set_vertical_accuracy(&mut self, accuracy: VerticalAccuracy) {
        self.data[18] = self.data[18].with_lower4bit(accuracy.code());
    }

    pub fn baro_altitude_accuracy(&self) -> VerticalAccuracy {
        VerticalAccuracy::from(self.data[19].top4bit())
    }

    pub fn set_baro_altitude_accuracy(&mut self, accuracy: VerticalAccuracy) {
        self.data[19] = self.data[19].with_top4bit(accuracy.code());
    }

    pub fn speed_accuracy(&self) -> SpeedAccuracy {
        SpeedAccuracy::from(self.data[19].lower4bit())
    }

    pub fn set_speed_accuracy(&mut self, accuracy: SpeedAccuracy) {
        self.data[19] = self.data[19].with_lower4bit(accuracy.code());
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Tenths of a second since the start of the hour; 0 when out of range.
    pub fn timestamp(&self) -> u16 {
        let ts = read_u16_le(&self.data, OFFSET_TIMESTAMP);
        if TIMESTAMP_RANGE.contains(&ts) {
            ts
        } else {
            0
        }
    }

    pub fn set_timestamp(&mut self, timestamp: u16) -> Result<()> {
        if !TIMESTAMP_RANGE.contains(&timestamp) {
            return Err(MessageError::TimestampRange(timestamp));
        }
        write_u16_le(&mut self.data, OFFSET_TIMESTAMP, timestamp);
        Ok(())
    }

    /// Timestamp accuracy in seconds, or 0.0 when unknown.
    pub fn timestamp_accuracy(&self) -> f64 {
        self.data[22].lower4bit() as f64 / 10.0
    }

    pub fn set_timestamp_accuracy(&mut self, accuracy: f64) -> Result<()> {
        if !TIMESTAMP_ACCURACY_RANGE.contains(&accuracy) && accuracy != TIMESTAMP_ACCURACY_UNKNOWN {
            return Err(MessageError::TimestampAccuracyRange(accuracy));
        }
        let raw = (accuracy * 10.0).round() as u8;
        self.data[22] = self.data[22].with_lower4bit(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ALTITUDE_UNKNOWN;

    fn body_with(offset: usize, bytes: &[u8]) -> LocationVector {
        let mut data = [0u8; BODY_SIZE];
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
        LocationVector::from_bytes(&data).unwrap()
    }

    #[test]
    fn test_default_is_unknown() {
        let loc = LocationVector::new();
        assert_eq!(loc.status(), OperationalStatus::Undeclared);
        assert_eq!(loc.track_direction(), TRACK_DIRECTION_UNKNOWN);
        assert_eq!(loc.speed(), SPEED_UNKNOWN);
        assert_eq!(loc.vertical_speed(), VERTICAL_SPEED_UNKNOWN);
        assert_eq!(loc.pressure_altitude(), ALTITUDE_UNKNOWN);
        assert_eq!(loc.timestamp_accuracy(), 0.1);
        assert!(loc.is_unknown());
    }

    #[test]
    fn test_flags() {
        let mut loc = body_with(0, &[0x00]);
        loc.set_status(OperationalStatus::Airborne);
        loc.set_height_type(HeightType::Agl);
        assert_eq!(loc.as_bytes()[0], 0x24);
        loc.set_direction_segment(DirectionSegment::West);
        loc.set_speed_multiplier(SpeedMultiplier::X075);
        assert_eq!(loc.as_bytes()[0], 0x27);
        assert_eq!(loc.height_type(), HeightType::Agl);

        loc.set_height_type(HeightType::AboveTakeoff);
        assert_eq!(loc.as_bytes()[0], 0x23);
        assert_eq!(body_with(0, &[0x30]).status(), OperationalStatus::Reserved);
    }

    #[test]
    fn test_track_direction_decode() {
        assert_eq!(body_with(0, &[0x00, 0x00]).track_direction(), 0);
        assert_eq!(body_with(0, &[0x00, 0xB3]).track_direction(), 179);
        assert_eq!(body_with(0, &[0x00, 0xB4]).track_direction(), 361);
        assert_eq!(body_with(0, &[0x02, 0x00]).track_direction(), 180);
        assert_eq!(body_with(0, &[0x02, 0xB3]).track_direction(), 359);
        assert_eq!(body_with(0, &[0x02, 0xB4]).track_direction(), 361);
        assert_eq!(body_with(0, &[0x02, 0xB5]).track_direction(), 361);
    }

    #[test]
    fn test_track_direction_encode() {
        let mut loc = body_with(0, &[]);
        loc.set_track_direction(179).unwrap();
        assert_eq!(&loc.as_bytes()[..2], &[0x00, 0xB3]);
        loc.set_track_direction(180).unwrap();
        assert_eq!(&loc.as_bytes()[..2], &[0x02, 0x00]);
        loc.set_track_direction(TRACK_DIRECTION_UNKNOWN).unwrap();
        assert_eq!(&loc.as_bytes()[..2], &[0x02, 0xB5]);
        assert_eq!(loc.track_direction(), TRACK_DIRECTION_UNKNOWN);

        assert!(matches!(
            loc.set_track_direction(360),
            Err(MessageError::DirectionRange(360))
        ));
    }

    #[test]
    fn test_speed_decode() {
        assert_eq!(body_with(0, &[0x00, 0x00, 0xE1]).speed(), 56.25);
        assert_eq!(body_with(0, &[0x00, 0x00, 0xFF]).speed(), 63.75);
        assert_eq!(body_with(0, &[0x01, 0x00, 0x00]).speed(), 63.75);
        assert_eq!(body_with(0, &[0x01, 0x00, 0xFE]).speed(), SPEED_MAX);
        assert_eq!(body_with(0, &[0x01, 0x00, 0xFF]).speed(), SPEED_UNKNOWN);
    }

    #[test]
    fn test_speed_encode() {
        let mut loc = body_with(0, &[]);
        loc.set_speed(0.0).unwrap();
        assert_eq!(loc.as_bytes()[2], 0x00);
        assert_eq!(loc.speed_multiplier(), SpeedMultiplier::X025);

        loc.set_speed(56.25).unwrap();
        assert_eq!(loc.as_bytes()[2], 0xE1);
        assert_eq!(loc.speed(), 56.25);

        loc.set_speed(64.5).unwrap();
        assert_eq!(loc.as_bytes()[2], 0x01);
        assert_eq!(loc.speed_multiplier(), SpeedMultiplier::X075);
        assert_eq!(loc.speed(), 64.5);

        loc.set_speed(254.5).unwrap();
        assert_eq!(loc.as_bytes()[2], 0xFE);
        assert_eq!(loc.speed(), SPEED_MAX);

        loc.set_speed(SPEED_UNKNOWN).unwrap();
        assert_eq!(loc.as_bytes()[2], 0xFF);
        assert_eq!(loc.speed(), SPEED_UNKNOWN);

        assert!(matches!(loc.set_speed(-0.25), Err(MessageError::SpeedRange(_))));
    }

    #[test]
    fn test_vertical_speed() {
        assert_eq!(body_with(3, &[0x83]).vertical_speed(), VERTICAL_SPEED_UNKNOWN);
        assert_eq!(body_with(3, &[0x84]).vertical_speed(), -62.0);
        assert_eq!(body_with(3, &[0x7C]).vertical_speed(), 62.0);
        assert_eq!(body_with(3, &[0x7D]).vertical_speed(), VERTICAL_SPEED_UNKNOWN);

        let mut loc = body_with(0, &[]);
        loc.set_vertical_speed(-63.5);
        assert_eq!(loc.as_bytes()[3], 0x84);
        loc.set_vertical_speed(100.0);
        assert_eq!(loc.as_bytes()[3], 0x7C);
        loc.set_vertical_speed(VERTICAL_SPEED_UNKNOWN);
        assert_eq!(loc.as_bytes()[3], 0x7E);
        loc.set_vertical_speed(-1.5);
        assert_eq!(loc.vertical_speed(), -1.5);
    }

    #[test]
    fn test_position() {
        let mut loc = body_with(0, &[]);
        loc.set_latitude(12.3456789).unwrap();
        loc.set_longitude(12.3456789).unwrap();
        assert_eq!(&loc.as_bytes()[4..12], &[0x15, 0xCD, 0x5B, 0x07, 0x15, 0xCD, 0x5B, 0x07]);
        assert_eq!(loc.latitude(), 12.3456789);
        assert!(!loc.is_unknown());

        let over = body_with(4, &[0x01, 0xE9, 0xA4, 0x35]);
        assert_eq!(over.latitude(), LAT_LON_UNKNOWN);
        let over = body_with(8, &[0x01, 0xD2, 0x49, 0x6B]);
        assert_eq!(over.longitude(), LAT_LON_UNKNOWN);
    }

    #[test]
    fn test_altitudes() {
        let mut loc = body_with(0, &[]);
        loc.set_pressure_altitude(-999.5).unwrap();
        loc.set_geodetic_altitude(31767.0).unwrap();
        loc.set_height(120.5).unwrap();
        assert_eq!(&loc.as_bytes()[12..14], &[0x01, 0x00]);
        assert_eq!(&loc.as_bytes()[14..16], &[0xFE, 0xFF]);
        assert_eq!(loc.height(), 120.5);
        assert!(loc.set_height(31767.1).is_err());
    }

    #[test]
    fn test_accuracy_nibbles() {
        let mut loc = body_with(0, &[]);
        loc.set_horizontal_accuracy(HorizontalAccuracy::Acc1m);
        loc.set_vertical_accuracy(VerticalAccuracy::Acc3m);
        loc.set_baro_altitude_accuracy(VerticalAccuracy::Acc150m);
        loc.set_speed_accuracy(SpeedAccuracy::Acc03mps);
        assert_eq!(loc.as_bytes()[18], 0xC5);
        assert_eq!(loc.as_bytes()[19], 0x14);
        assert_eq!(body_with(18, &[0xD7]).horizontal_accuracy(), HorizontalAccuracy::Reserved);
        assert_eq!(body_with(18, &[0xD7]).vertical_accuracy(), VerticalAccuracy::Reserved);
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(body_with(20, &[0xA0, 0x8C]).timestamp(), 36000);
        assert_eq!(body_with(20, &[0xA1, 0x8C]).timestamp(), 0);

        let mut loc = body_with(0, &[]);
        loc.set_timestamp(36000).unwrap();
        assert_eq!(&loc.as_bytes()[20..22], &[0xA0, 0x8C]);
        assert!(matches!(
            loc.set_timestamp(36001),
            Err(MessageError::TimestampRange(36001))
        ));
    }

    #[test]
    fn test_timestamp_accuracy() {
        let mut loc = body_with(0, &[]);
        loc.set_timestamp_accuracy(0.9).unwrap();
        assert_eq!(loc.as_bytes()[22], 0x09);
        assert_eq!(loc.timestamp_accuracy(), 0.9);
        loc.set_timestamp_accuracy(1.5).unwrap();
        assert_eq!(loc.timestamp_accuracy(), 1.5);
        loc.set_timestamp_accuracy(TIMESTAMP_ACCURACY_UNKNOWN).unwrap();
        assert_eq!(loc.as_bytes()[22], 0x00);

        assert!(loc.set_timestamp_accuracy(0.09).is_err());
        assert!(loc.set_timestamp_accuracy(1.51).is_err());
    }
}
