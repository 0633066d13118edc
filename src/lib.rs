//! Switcher protocol core
//!
//! This library implements the binary codec and device capability layer of the
//! Switcher local control protocol: primitive field encoders, per-family
//! circuit slot resolution, token fragment derivation and validation, and
//! decoding of the schedule records stored on a device.
pub mod core;

pub mod network;
pub mod protocol;
pub mod schedule;
pub mod util;

// Re-export commonly used items
pub use crate::core::{CapabilityKind, DeviceType, Error, Result};
pub use crate::network::{validate_token, TokenValidator};
pub use crate::schedule::{ScheduleState, SwitcherSchedule, Weekday};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
