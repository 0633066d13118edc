//! Circuit layouts of multi-circuit device families.
//!
//! Shutter and light devices pack the state of every physical circuit into
//! consecutive slots of their packets. The table below lists, per family, the
//! slot each circuit occupies in a discovery response:
//!
//! | Family          | Shutter slots | Light slots |
//! |-----------------|---------------|-------------|
//! | Runner          | 0             | -           |
//! | Runner Mini     | 0             | -           |
//! | Runner S11      | 2             | 0, 1        |
//! | Runner S12      | 1, 2          | 0           |
//! | Light SL01      | -             | 0           |
//! | Light SL01 Mini | -             | 0           |
//! | Light SL02      | -             | 0, 1        |
//! | Light SL02 Mini | -             | 0, 1        |
//! | Light SL03      | -             | 0, 1, 2     |
//!
//! Control (command/response) packets carry one extra leading command byte,
//! so a circuit's control slot is always its discovery slot plus one.

use crate::core::{CapabilityKind, DeviceType, Error, Result};

/// Offset of a control slot relative to its discovery slot
const CONTROL_SLOT_OFFSET: usize = 1;

/// Discovery slots of every circuit in a device family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitLayout {
    pub shutters: &'static [usize],
    pub lights: &'static [usize],
}

impl CircuitLayout {
    const NONE: CircuitLayout = CircuitLayout {
        shutters: &[],
        lights: &[],
    };

    /// Discovery slots for one capability kind
    pub fn slots(&self, kind: CapabilityKind) -> &'static [usize] {
        match kind {
            CapabilityKind::Shutter => self.shutters,
            CapabilityKind::Light => self.lights,
        }
    }
}

impl DeviceType {
    /// Circuit layout of this family
    pub fn layout(&self) -> CircuitLayout {
        match self {
            DeviceType::Runner | DeviceType::RunnerMini => CircuitLayout {
                shutters: &[0],
                lights: &[],
            },
            DeviceType::RunnerS11 => CircuitLayout {
                shutters: &[2],
                lights: &[0, 1],
            },
            DeviceType::RunnerS12 => CircuitLayout {
                shutters: &[1, 2],
                lights: &[0],
            },
            DeviceType::LightSl01 | DeviceType::LightSl01Mini => CircuitLayout {
                shutters: &[],
                lights: &[0],
            },
            DeviceType::LightSl02 | DeviceType::LightSl02Mini => CircuitLayout {
                shutters: &[],
                lights: &[0, 1],
            },
            DeviceType::LightSl03 => CircuitLayout {
                shutters: &[],
                lights: &[0, 1, 2],
            },
            DeviceType::Mini
            | DeviceType::PowerPlug
            | DeviceType::Touch
            | DeviceType::V2Esp
            | DeviceType::V2Qca
            | DeviceType::V4
            | DeviceType::Breeze => CircuitLayout::NONE,
        }
    }

    /// Number of shutter motors
    pub fn shutter_count(&self) -> usize {
        self.layout().shutters.len()
    }

    /// Number of light channels
    pub fn light_count(&self) -> usize {
        self.layout().lights.len()
    }
}

fn missing_capability(kind: CapabilityKind) -> Error {
    match kind {
        CapabilityKind::Shutter => Error::capability("only shutters are allowed"),
        CapabilityKind::Light => Error::capability("only lights are allowed"),
    }
}

/// Slot of a circuit in discovery packets
pub fn discovery_index(device: DeviceType, kind: CapabilityKind, circuit: usize) -> Result<usize> {
    let slots = device.layout().slots(kind);
    if slots.is_empty() {
        return Err(missing_capability(kind));
    }
    slots
        .get(circuit)
        .copied()
        .ok_or_else(|| Error::range("Invalid circuit number"))
}

/// Slot of a circuit in control packets
pub fn control_index(device: DeviceType, kind: CapabilityKind, circuit: usize) -> Result<usize> {
    Ok(discovery_index(device, kind, circuit)? + CONTROL_SLOT_OFFSET)
}

pub fn shutter_discovery_index(device: DeviceType, circuit: usize) -> Result<usize> {
    discovery_index(device, CapabilityKind::Shutter, circuit)
}

pub fn shutter_control_index(device: DeviceType, circuit: usize) -> Result<usize> {
    control_index(device, CapabilityKind::Shutter, circuit)
}

pub fn light_discovery_index(device: DeviceType, circuit: usize) -> Result<usize> {
    discovery_index(device, CapabilityKind::Light, circuit)
}

pub fn light_control_index(device: DeviceType, circuit: usize) -> Result<usize> {
    control_index(device, CapabilityKind::Light, circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [CapabilityKind; 2] = [CapabilityKind::Shutter, CapabilityKind::Light];

    #[test]
    fn test_shutter_discovery_index() {
        let cases = [
            (DeviceType::Runner, 0, 0),
            (DeviceType::RunnerMini, 0, 0),
            (DeviceType::RunnerS11, 0, 2),
            (DeviceType::RunnerS12, 0, 1),
            (DeviceType::RunnerS12, 1, 2),
        ];
        for (device, circuit, index) in cases {
            assert_eq!(shutter_discovery_index(device, circuit).unwrap(), index);
            assert_eq!(shutter_control_index(device, circuit).unwrap(), index + 1);
        }
    }

    #[test]
    fn test_light_discovery_index() {
        let cases = [
            (DeviceType::RunnerS11, 0, 0),
            (DeviceType::RunnerS11, 1, 1),
            (DeviceType::RunnerS12, 0, 0),
            (DeviceType::LightSl01, 0, 0),
            (DeviceType::LightSl01Mini, 0, 0),
            (DeviceType::LightSl02, 0, 0),
            (DeviceType::LightSl02, 1, 1),
            (DeviceType::LightSl02Mini, 0, 0),
            (DeviceType::LightSl02Mini, 1, 1),
            (DeviceType::LightSl03, 0, 0),
            (DeviceType::LightSl03, 1, 1),
            (DeviceType::LightSl03, 2, 2),
        ];
        for (device, circuit, index) in cases {
            assert_eq!(light_discovery_index(device, circuit).unwrap(), index);
            assert_eq!(light_control_index(device, circuit).unwrap(), index + 1);
        }
    }

    #[test]
    fn test_invalid_circuit_number() {
        let shutter_cases = [
            (DeviceType::Runner, 1),
            (DeviceType::RunnerMini, 1),
            (DeviceType::RunnerS11, 1),
            (DeviceType::RunnerS12, 2),
        ];
        for (device, circuit) in shutter_cases {
            for result in [
                shutter_discovery_index(device, circuit),
                shutter_control_index(device, circuit),
            ] {
                let err = result.unwrap_err();
                assert!(matches!(err, Error::Range(_)));
                assert_eq!(err.to_string(), "Invalid circuit number");
            }
        }

        let light_cases = [
            (DeviceType::RunnerS11, 2),
            (DeviceType::RunnerS12, 1),
            (DeviceType::LightSl01, 1),
            (DeviceType::LightSl01Mini, 1),
            (DeviceType::LightSl02, 2),
            (DeviceType::LightSl02Mini, 2),
            (DeviceType::LightSl03, 3),
        ];
        for (device, circuit) in light_cases {
            assert!(matches!(light_discovery_index(device, circuit), Err(Error::Range(_))));
            assert!(matches!(light_control_index(device, circuit), Err(Error::Range(_))));
        }
    }

    #[test]
    fn test_missing_capability() {
        let err = shutter_discovery_index(DeviceType::Touch, 0).unwrap_err();
        assert!(matches!(err, Error::Capability(_)));
        assert_eq!(err.to_string(), "only shutters are allowed");

        let err = light_control_index(DeviceType::Touch, 0).unwrap_err();
        assert_eq!(err.to_string(), "only lights are allowed");

        // capability check comes before the circuit check
        for device in [DeviceType::Runner, DeviceType::RunnerMini, DeviceType::Breeze] {
            for circuit in 0..4 {
                assert!(matches!(
                    light_discovery_index(device, circuit),
                    Err(Error::Capability(_))
                ));
            }
        }
    }

    #[test]
    fn test_control_index_is_discovery_plus_one() {
        for device in DeviceType::ALL {
            for kind in KINDS {
                for circuit in 0..4 {
                    match (
                        discovery_index(device, kind, circuit),
                        control_index(device, kind, circuit),
                    ) {
                        (Ok(discovery), Ok(control)) => assert_eq!(control, discovery + 1),
                        (Err(_), Err(_)) => {}
                        other => panic!("inconsistent results for {device:?}: {other:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_slots_do_not_overlap() {
        for device in DeviceType::ALL {
            let layout = device.layout();
            for slot in layout.shutters {
                assert!(!layout.lights.contains(slot), "{device:?} reuses slot {slot}");
            }
        }
    }

    #[test]
    fn test_circuit_counts() {
        assert_eq!(DeviceType::Runner.shutter_count(), 1);
        assert_eq!(DeviceType::RunnerS11.light_count(), 2);
        assert_eq!(DeviceType::RunnerS12.shutter_count(), 2);
        assert_eq!(DeviceType::LightSl03.light_count(), 3);
        assert_eq!(DeviceType::PowerPlug.shutter_count(), 0);
        assert_eq!(DeviceType::PowerPlug.light_count(), 0);
    }
}
