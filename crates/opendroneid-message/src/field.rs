//! Scaled field encodings shared by several message bodies.
//!
//! ## Encodings
//!
//! | Field     | Wire type      | Value                     | Unknown |
//! |-----------|----------------|---------------------------|---------|
//! | lat/lon   | i32 LE         | raw × 1e-7 degrees        | 0.0     |
//! | altitude  | u16 LE         | raw / 2 - 1000 meters     | -1000.0 |
//!
//! Decoders never fail: a raw value outside the legal range reads as the
//! field's unknown sentinel. Encoders validate and round to the nearest step.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::{MessageError, Result, BODY_SIZE};

/// Fixed-point scale for latitude and longitude.
pub const LAT_LON_SCALE: f64 = 1e7;

/// Legal latitude range in degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
/// Legal longitude range in degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;
/// Latitude/longitude "not available" value.
pub const LAT_LON_UNKNOWN: f64 = 0.0;

/// Legal altitude range in meters.
pub const ALTITUDE_RANGE: RangeInclusive<f64> = -999.5..=31767.0;
/// Altitude "not available" value.
pub const ALTITUDE_UNKNOWN: f64 = -1000.0;
/// Offset added to an altitude before scaling.
pub const ALTITUDE_OFFSET: f64 = 1000.0;

/// Copy a body slice into a fixed buffer, rejecting any other length.
pub(crate) fn fixed_body(data: &[u8]) -> Result<[u8; BODY_SIZE]> {
    data.try_into().map_err(|_| {
        debug!(len = data.len(), "rejecting body of wrong length");
        MessageError::data_length(data.len())
    })
}

pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn write_u16_le(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

pub(crate) fn write_u32_le(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Decode a NUL-padded ASCII slot.
pub(crate) fn read_text(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim_end_matches('\0')
        .to_string()
}

/// Zero a text slot and copy `text` into its start. The caller checks the
/// length.
pub(crate) fn write_text(slot: &mut [u8], text: &[u8]) {
    slot.fill(0);
    slot[..text.len()].copy_from_slice(text);
}

/// Read a raw lat/lon value in degrees, without range checking.
pub fn read_lat_lon(data: &[u8], offset: usize) -> f64 {
    read_u32_le(data, offset) as i32 as f64 / LAT_LON_SCALE
}

/// Write a lat/lon value in degrees, without range checking.
pub fn write_lat_lon(data: &mut [u8], offset: usize, value: f64) {
    let raw = (value * LAT_LON_SCALE).round() as i32;
    write_u32_le(data, offset, raw as u32);
}

/// Read a raw altitude in meters, without range checking.
pub fn read_altitude(data: &[u8], offset: usize) -> f64 {
    read_u16_le(data, offset) as f64 / 2.0 - ALTITUDE_OFFSET
}

/// Write an altitude in meters, without range checking.
pub fn write_altitude(data: &mut [u8], offset: usize, value: f64) {
    let raw = ((value + ALTITUDE_OFFSET) * 2.0).round() as u16;
    write_u16_le(data, offset, raw);
}

/// Decode a latitude, degrading to [`LAT_LON_UNKNOWN`] when out of range.
pub(crate) fn latitude_at(data: &[u8], offset: usize) -> f64 {
    let lat = read_lat_lon(data, offset);
    if LATITUDE_RANGE.contains(&lat) {
        lat
    } else {
        LAT_LON_UNKNOWN
    }
}

/// Encode a latitude, accepting the legal range or the unknown sentinel.
pub(crate) fn set_latitude_at(data: &mut [u8], offset: usize, value: f64) -> Result<()> {
    if !LATITUDE_RANGE.contains(&value) && value != LAT_LON_UNKNOWN {
        return Err(MessageError::LatitudeRange(value));
    }
    write_lat_lon(data, offset, value);
    Ok(())
}

/// Decode a longitude, degrading to [`LAT_LON_UNKNOWN`] when out of range.
pub(crate) fn longitude_at(data: &[u8], offset: usize) -> f64 {
    let lon = read_lat_lon(data, offset);
    if LONGITUDE_RANGE.contains(&lon) {
        lon
    } else {
        LAT_LON_UNKNOWN
    }
}

/// Encode a longitude, accepting the legal range or the unknown sentinel.
pub(crate) fn set_longitude_at(data: &mut [u8], offset: usize, value: f64) -> Result<()> {
    if !LONGITUDE_RANGE.contains(&value) && value != LAT_LON_UNKNOWN {
        return Err(MessageError::LongitudeRange(value));
    }
    write_lat_lon(data, offset, value);
    Ok(())
}

/// Decode an altitude, degrading to [`ALTITUDE_UNKNOWN`] when out of range.
pub(crate) fn altitude_at(data: &[u8], offset: usize) -> f64 {
    let alt = read_altitude(data, offset);
    if ALTITUDE_RANGE.contains(&alt) {
        alt
    } else {
        ALTITUDE_UNKNOWN
    }
}

/// Encode an altitude, accepting the legal range or the unknown sentinel.
pub(crate) fn set_altitude_at(data: &mut [u8], offset: usize, value: f64) -> Result<()> {
    if !ALTITUDE_RANGE.contains(&value) && value != ALTITUDE_UNKNOWN {
        return Err(MessageError::AltitudeRange(value));
    }
    write_altitude(data, offset, value);
    Ok(())
}
