//! Primitive field encoders and decoders
//!
//! Every multi-byte numeric field in a Switcher packet is a 32-bit unsigned
//! little-endian integer written as 8 hex chars. Device names travel in a
//! fixed 32-byte ASCII field, right-padded with zeros.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::{
    Error, Result, DEVICE_NAME_FIELD_SIZE, MIN_DEVICE_NAME_LEN, NOMINAL_LINE_VOLTAGE,
};

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 86_400;

const OVERFLOW_MSG: &str = "'I' format requires 0 <= number <= 4294967295";

/// Packs a value as a little-endian u32 hex field
pub fn u32_to_hex(value: u32) -> String {
    hex::encode(value.to_le_bytes())
}

/// Reads an 8 hex char little-endian u32 field
pub fn hex_to_u32(field: &str) -> Result<u32> {
    let mut bytes = [0u8; 4];
    hex::decode_to_slice(field, &mut bytes)
        .map_err(|e| Error::format(format!("invalid u32 field {field:?}: {e}")))?;
    Ok(u32::from_le_bytes(bytes))
}

fn checked_u32(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::overflow(OVERFLOW_MSG))
}

/// Renders seconds since midnight as `HH:MM:SS`
pub fn seconds_to_clock_string(seconds: i64) -> Result<String> {
    if !(0..SECONDS_PER_DAY).contains(&seconds) {
        return Err(Error::range(format!(
            "seconds must be in 0..{}, got {seconds}",
            SECONDS_PER_DAY - 1
        )));
    }
    Ok(format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    ))
}

/// Encodes a minute count as a seconds field
pub fn minutes_to_hex_seconds(minutes: i64) -> Result<String> {
    let seconds = minutes
        .checked_mul(60)
        .ok_or_else(|| Error::overflow(OVERFLOW_MSG))?;
    Ok(u32_to_hex(checked_u32(seconds)?))
}

/// Encodes a timer duration as a seconds field
///
/// Only durations from one hour up to (but excluding) 24 hours are accepted.
pub fn duration_to_hex_seconds(duration: Duration) -> Result<String> {
    let seconds = duration.as_secs();
    if !(3600..SECONDS_PER_DAY as u64).contains(&seconds) {
        return Err(Error::range("can only handle 1 to 24 hours"));
    }
    // bounded by the range check above
    Ok(u32_to_hex(seconds as u32))
}

/// Encodes a device name into its 32-byte field
pub fn encode_device_name(name: &str) -> Result<String> {
    let len = name.chars().count();
    if !(MIN_DEVICE_NAME_LEN..=DEVICE_NAME_FIELD_SIZE).contains(&len) {
        return Err(Error::range(format!(
            "name length can vary from {MIN_DEVICE_NAME_LEN} to {DEVICE_NAME_FIELD_SIZE}"
        )));
    }
    if !name.is_ascii() {
        return Err(Error::format("device name must be ascii"));
    }
    if name.contains('\0') {
        return Err(Error::format("device name must not contain NUL"));
    }
    let mut field = [0u8; DEVICE_NAME_FIELD_SIZE];
    field[..len].copy_from_slice(name.as_bytes());
    Ok(hex::encode(field))
}

/// Decodes a device name field, dropping the zero padding
pub fn decode_device_name(field: &str) -> Result<String> {
    let bytes =
        hex::decode(field).map_err(|e| Error::format(format!("invalid name field: {e}")))?;
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let name = &bytes[..end];
    if !name.is_ascii() {
        return Err(Error::format("device name must be ascii"));
    }
    // ascii is valid utf-8
    Ok(String::from_utf8_lossy(name).into_owned())
}

/// Encodes a Unix timestamp as a seconds field
pub fn timestamp_to_hex(timestamp: i64) -> Result<String> {
    Ok(u32_to_hex(checked_u32(timestamp)?))
}

/// Encodes the current Unix time as a seconds field
pub fn current_timestamp_hex() -> Result<String> {
    let timestamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before_epoch) => -i64::try_from(before_epoch.duration().as_secs()).unwrap_or(i64::MAX),
    };
    timestamp_to_hex(timestamp)
}

/// Converts power draw to current at the nominal line voltage, one decimal
///
/// Exact halves round to the even digit.
pub fn watts_to_amps(watts: f64) -> f64 {
    (watts / NOMINAL_LINE_VOLTAGE * 10.0).round_ties_even() / 10.0
}
