//! Core types and constants for the Switcher protocol
//!
//! This module contains the fundamental building blocks used throughout the library.

pub mod error;
pub mod serde;
pub mod types;

pub use self::error::{Error, Result};
pub use self::types::{CapabilityKind, DeviceCategory, DeviceType, ValidatorConfig};

/// Timezone the device firmware uses for schedule wall-clock times
pub const VENDOR_TIMEZONE: chrono_tz::Tz = chrono_tz::Asia::Jerusalem;

/// Nominal line voltage used for power to current conversion
pub const NOMINAL_LINE_VOLTAGE: f64 = 220.0;

/// Width of a schedule record in bytes
pub const SCHEDULE_RECORD_SIZE: usize = 16;

/// Width of the device name field in bytes
pub const DEVICE_NAME_FIELD_SIZE: usize = 32;

/// Shortest accepted device name
pub const MIN_DEVICE_NAME_LEN: usize = 2;

/// Key for the token fragment cipher (AES-256)
pub const TOKEN_KEY: &[u8; 32] = b"jzNrAOjc%lpg3pVr5cF!5Le06ZgOdWuJ";

/// Default token validation endpoint
pub const DEFAULT_VALIDATION_ENDPOINT: &str = "https://switcher.co.il/ValidateToken/";
