use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Error, Result, DEFAULT_VALIDATION_ENDPOINT};

/// Broad product category of a device family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCategory {
    WaterHeater,
    PowerPlug,
    Thermostat,
    Shutter,
    /// One shutter motor and two light channels
    SingleShutterDualLight,
    /// Two shutter motors and one light channel
    DualShutterSingleLight,
    Light,
}

/// A class of controllable circuit inside a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityKind {
    Shutter,
    Light,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Shutter => write!(f, "shutter"),
            CapabilityKind::Light => write!(f, "light"),
        }
    }
}

/// Hardware model grouped by shared capability shape
///
/// The set of families is closed; per-family data is resolved by matching on
/// the variant, see [`crate::protocol::capability`] for circuit layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Mini,
    PowerPlug,
    Touch,
    V2Esp,
    V2Qca,
    V4,
    Breeze,
    Runner,
    RunnerMini,
    RunnerS11,
    RunnerS12,
    LightSl01,
    LightSl01Mini,
    LightSl02,
    LightSl02Mini,
    LightSl03,
}

impl DeviceType {
    /// Every known device family
    pub const ALL: [DeviceType; 16] = [
        DeviceType::Mini,
        DeviceType::PowerPlug,
        DeviceType::Touch,
        DeviceType::V2Esp,
        DeviceType::V2Qca,
        DeviceType::V4,
        DeviceType::Breeze,
        DeviceType::Runner,
        DeviceType::RunnerMini,
        DeviceType::RunnerS11,
        DeviceType::RunnerS12,
        DeviceType::LightSl01,
        DeviceType::LightSl01Mini,
        DeviceType::LightSl02,
        DeviceType::LightSl02Mini,
        DeviceType::LightSl03,
    ];

    /// Marketing name of the family
    pub fn name(&self) -> &'static str {
        match self {
            DeviceType::Mini => "Switcher Mini",
            DeviceType::PowerPlug => "Switcher Power Plug",
            DeviceType::Touch => "Switcher Touch",
            DeviceType::V2Esp => "Switcher V2 (esp)",
            DeviceType::V2Qca => "Switcher V2 (qualcomm)",
            DeviceType::V4 => "Switcher V4",
            DeviceType::Breeze => "Switcher Breeze",
            DeviceType::Runner => "Switcher Runner",
            DeviceType::RunnerMini => "Switcher Runner Mini",
            DeviceType::RunnerS11 => "Switcher Runner S11",
            DeviceType::RunnerS12 => "Switcher Runner S12",
            DeviceType::LightSl01 => "Switcher Light SL01",
            DeviceType::LightSl01Mini => "Switcher Light SL01 Mini",
            DeviceType::LightSl02 => "Switcher Light SL02",
            DeviceType::LightSl02Mini => "Switcher Light SL02 Mini",
            DeviceType::LightSl03 => "Switcher Light SL03",
        }
    }

    /// Type code the device reports about itself, as 4 hex chars
    pub fn type_code(&self) -> &'static str {
        match self {
            DeviceType::Mini => "030f",
            DeviceType::PowerPlug => "01a8",
            DeviceType::Touch => "030b",
            DeviceType::V2Esp => "01a7",
            DeviceType::V2Qca => "01a1",
            DeviceType::V4 => "0317",
            DeviceType::Breeze => "0e01",
            DeviceType::Runner => "0c01",
            DeviceType::RunnerMini => "0c02",
            DeviceType::RunnerS11 => "0f01",
            DeviceType::RunnerS12 => "0f02",
            DeviceType::LightSl01 => "0f04",
            DeviceType::LightSl01Mini => "0f07",
            DeviceType::LightSl02 => "0f05",
            DeviceType::LightSl02Mini => "0f08",
            DeviceType::LightSl03 => "0f06",
        }
    }

    /// Looks a family up by its reported type code
    pub fn from_type_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|device| device.type_code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::format(format!("unknown device type code {code:?}")))
    }

    /// Product category of this family
    pub fn category(&self) -> DeviceCategory {
        match self {
            DeviceType::Mini
            | DeviceType::Touch
            | DeviceType::V2Esp
            | DeviceType::V2Qca
            | DeviceType::V4 => DeviceCategory::WaterHeater,
            DeviceType::PowerPlug => DeviceCategory::PowerPlug,
            DeviceType::Breeze => DeviceCategory::Thermostat,
            DeviceType::Runner | DeviceType::RunnerMini => DeviceCategory::Shutter,
            DeviceType::RunnerS11 => DeviceCategory::SingleShutterDualLight,
            DeviceType::RunnerS12 => DeviceCategory::DualShutterSingleLight,
            DeviceType::LightSl01
            | DeviceType::LightSl01Mini
            | DeviceType::LightSl02
            | DeviceType::LightSl02Mini
            | DeviceType::LightSl03 => DeviceCategory::Light,
        }
    }

    /// Whether packets for this family must carry a token fragment
    pub fn token_needed(&self) -> bool {
        matches!(
            self.category(),
            DeviceCategory::SingleShutterDualLight
                | DeviceCategory::DualShutterSingleLight
                | DeviceCategory::Light
        )
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for the remote token validator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Validation endpoint URL
    pub endpoint: String,
    /// Upper bound for the whole request/response exchange
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub timeout: Duration,
}

impl ValidatorConfig {
    /// Checks that the configuration can be used for requests
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::config("validation endpoint is empty"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("validation timeout must be positive"));
        }
        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            endpoint: DEFAULT_VALIDATION_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_lookup() {
        for device in DeviceType::ALL {
            assert_eq!(DeviceType::from_type_code(device.type_code()).unwrap(), device);
        }
        assert_eq!(DeviceType::from_type_code("0F04").unwrap(), DeviceType::LightSl01);
        assert!(matches!(
            DeviceType::from_type_code("ffff"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_type_codes_are_unique() {
        let mut codes: Vec<_> = DeviceType::ALL.iter().map(|d| d.type_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), DeviceType::ALL.len());
    }

    #[test]
    fn test_token_needed() {
        assert!(!DeviceType::Runner.token_needed());
        assert!(!DeviceType::V4.token_needed());
        assert!(DeviceType::RunnerS11.token_needed());
        assert!(DeviceType::LightSl03.token_needed());
    }

    #[test]
    fn test_config_validation() {
        assert!(ValidatorConfig::default().validate().is_ok());

        let config = ValidatorConfig {
            endpoint: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ValidatorConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = ValidatorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let decoded: ValidatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.endpoint, config.endpoint);
        assert_eq!(decoded.timeout, Duration::from_secs(10));
    }
}
