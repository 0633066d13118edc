//! Protocol building blocks
//!
//! This module provides the field encoders, device capability resolution and
//! token derivation that command packets are assembled from. Length prefixing
//! and signing of a finished packet happen in the transport layer.

pub mod capability;
pub mod encoding;
pub mod token;

pub use self::capability::{
    control_index, discovery_index, light_control_index, light_discovery_index,
    shutter_control_index, shutter_discovery_index, CircuitLayout,
};
pub use self::encoding::{
    current_timestamp_hex, decode_device_name, duration_to_hex_seconds, encode_device_name,
    hex_to_u32, minutes_to_hex_seconds, seconds_to_clock_string, timestamp_to_hex, u32_to_hex,
    watts_to_amps,
};
pub use self::token::token_to_packet_fragment;
