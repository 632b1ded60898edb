//! System message body: operator position and the operating area.
//!
//! | Byte  | Field                                          |
//! |-------|------------------------------------------------|
//! | 0     | reserved (7..2), operator location type (1..0) |
//! | 1-4   | operator latitude                              |
//! | 5-8   | operator longitude                             |
//! | 9-10  | area count                                     |
//! | 11    | area radius, ×0.1                              |
//! | 12-13 | area ceiling                                   |
//! | 14-15 | area floor                                     |
//! | 16-23 | reserved                                       |

use std::ops::RangeInclusive;

use crate::field::{
    altitude_at, fixed_body, latitude_at, longitude_at, read_u16_le, set_altitude_at,
    set_latitude_at, set_longitude_at, write_u16_le,
};
use crate::{MessageError, OperatorLocationType, Result, BODY_SIZE};

/// Legal area count range.
pub const AREA_COUNT_RANGE: RangeInclusive<u16> = 1..=65000;
/// Legal area radius range.
pub const AREA_RADIUS_RANGE: RangeInclusive<f64> = 0.0..=2.5;

const AREA_RADIUS_SCALE: f64 = 10.0;
const LOCATION_TYPE_MASK: u8 = 0x03;

const OFFSET_OPERATOR_LATITUDE: usize = 1;
const OFFSET_OPERATOR_LONGITUDE: usize = 5;
const OFFSET_AREA_COUNT: usize = 9;
const OFFSET_AREA_RADIUS: usize = 11;
const OFFSET_AREA_CEILING: usize = 12;
const OFFSET_AREA_FLOOR: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    data: [u8; BODY_SIZE],
}

impl Default for System {
    /// Zeroed body with a single area.
    fn default() -> Self {
        let mut system = System {
            data: [0u8; BODY_SIZE],
        };
        system.fix_area_count();
        system
    }
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a 24-byte body. An area count of 0 is rewritten to 1.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut system = System {
            data: fixed_body(data)?,
        };
        system.fix_area_count();
        Ok(system)
    }

    fn fix_area_count(&mut self) {
        if read_u16_le(&self.data, OFFSET_AREA_COUNT) == 0 {
            write_u16_le(&mut self.data, OFFSET_AREA_COUNT, 1);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn operator_location_type(&self) -> OperatorLocationType {
        OperatorLocationType::from(self.data[0] & LOCATION_TYPE_MASK)
    }

    /// Set the location type; the reserved bits of byte 0 are kept.
    pub fn set_operator_location_type(&mut self, location_type: OperatorLocationType) {
        self.data[0] =
            (self.data[0] & !LOCATION_TYPE_MASK) | (location_type.code() & LOCATION_TYPE_MASK);
    }

    pub fn operator_latitude(&self) -> f64 {
        latitude_at(&self.data, OFFSET_OPERATOR_LATITUDE)
    }

    pub fn set_operator_latitude(&mut self, latitude: f64) -> Result<()> {
        set_latitude_at(&mut self.data, OFFSET_OPERATOR_LATITUDE, latitude)
    }

    pub fn operator_longitude(&self) -> f64 {
        longitude_at(&self.data, OFFSET_OPERATOR_LONGITUDE)
    }

    pub fn set_operator_longitude(&mut self, longitude: f64) -> Result<()> {
        set_longitude_at(&mut self.data, OFFSET_OPERATOR_LONGITUDE, longitude)
    }

    /// Number of aircraft in the operating area.
    pub fn area_count(&self) -> u16 {
        read_u16_le(&self.data, OFFSET_AREA_COUNT)
    }

    pub fn set_area_count(&mut self, count: u16) -> Result<()> {
        if !AREA_COUNT_RANGE.contains(&count) {
            return Err(MessageError::AreaCountRange(count));
        }
        write_u16_le(&mut self.data, OFFSET_AREA_COUNT, count);
        Ok(())
    }

    pub fn area_radius(&self) -> f64 {
        self.data[OFFSET_AREA_RADIUS] as f64 / AREA_RADIUS_SCALE
    }

    pub fn set_area_radius(&mut self, radius: f64) -> Result<()> {
        if !AREA_RADIUS_RANGE.contains(&radius) {
            return Err(MessageError::AreaRadiusRange(radius));
        }
        self.data[OFFSET_AREA_RADIUS] = (radius * AREA_RADIUS_SCALE).round() as u8;
        Ok(())
    }

    /// Operating area ceiling in meters, or -1000.0 when unknown.
    pub fn area_ceiling(&self) -> f64 {
        altitude_at(&self.data, OFFSET_AREA_CEILING)
    }

    pub fn set_area_ceiling(&mut self, altitude: f64) -> Result<()> {
        set_altitude_at(&mut self.data, OFFSET_AREA_CEILING, altitude)
    }

    /// Operating area floor in meters, or -1000.0 when unknown.
    pub fn area_floor(&self) -> f64 {
        altitude_at(&self.data, OFFSET_AREA_FLOOR)
    }

    pub fn set_area_floor(&mut self, altitude: f64) -> Result<()> {
        set_altitude_at(&mut self.data, OFFSET_AREA_FLOOR, altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ALTITUDE_UNKNOWN, LAT_LON_UNKNOWN};

    #[test]
    fn test_zero_area_count_becomes_one() {
        let system = System::from_bytes(&[0u8; 24]).unwrap();
        assert_eq!(system.area_count(), 1);
        assert_eq!(system.as_bytes()[9], 0x01);
        assert_eq!(System::new(), system);
    }

    #[test]
    fn test_operator_location_type_keeps_reserved_bits() {
        let mut data = [0u8; 24];
        data[0] = 0xFC;
        let mut system = System::from_bytes(&data).unwrap();
        assert_eq!(system.operator_location_type(), OperatorLocationType::TakeOff);
        system.set_operator_location_type(OperatorLocationType::FixedLocation);
        assert_eq!(system.as_bytes()[0], 0xFE);
        assert_eq!(system.operator_location_type(), OperatorLocationType::FixedLocation);
    }

    #[test]
    fn test_operator_position() {
        let mut system = System::new();
        system.set_operator_latitude(-90.0).unwrap();
        system.set_operator_longitude(180.0).unwrap();
        assert_eq!(&system.as_bytes()[1..5], &[0x00, 0x17, 0x5B, 0xCA]);
        assert_eq!(&system.as_bytes()[5..9], &[0x00, 0xD2, 0x49, 0x6B]);
        assert_eq!(system.operator_latitude(), -90.0);
        assert_eq!(system.operator_longitude(), 180.0);
        assert!(system.set_operator_latitude(91.0).is_err());
        assert_eq!(System::new().operator_latitude(), LAT_LON_UNKNOWN);
    }

    #[test]
    fn test_area_fields() {
        let mut system = System::new();
        system.set_area_count(65000).unwrap();
        system.set_area_radius(2.5).unwrap();
        system.set_area_ceiling(31767.0).unwrap();
        system.set_area_floor(-999.5).unwrap();
        assert_eq!(system.area_count(), 65000);
        assert_eq!(system.as_bytes()[11], 25);
        assert_eq!(system.area_radius(), 2.5);
        assert_eq!(system.area_ceiling(), 31767.0);
        assert_eq!(system.area_floor(), -999.5);

        system.set_area_floor(ALTITUDE_UNKNOWN).unwrap();
        assert_eq!(system.area_floor(), ALTITUDE_UNKNOWN);
    }

    #[test]
    fn test_area_ranges() {
        let mut system = System::new();
        assert!(matches!(system.set_area_count(0), Err(MessageError::AreaCountRange(0))));
        assert!(matches!(
            system.set_area_count(65001),
            Err(MessageError::AreaCountRange(65001))
        ));
        assert!(matches!(
            system.set_area_radius(2.6),
            Err(MessageError::AreaRadiusRange(_))
        ));
        assert!(system.set_area_radius(-0.1).is_err());
    }
}
