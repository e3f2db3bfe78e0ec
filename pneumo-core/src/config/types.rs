//! Configuration type definitions
//!
//! These types represent the machine configuration. The firmware embeds a
//! `machine.toml` and parses it at boot; any section left out keeps its
//! default.

use crate::control::{SetpointError, Setpoints};
use crate::control::setpoints::{DEFAULT_HIGH_MPSI, DEFAULT_LOW_MPSI};
use crate::input::DEFAULT_DEBOUNCE_MS;
use crate::panel::machine::DEFAULT_STEP_MPSI;
use crate::sensor::{SensorModel, MAX_FRAME_LEN, MIN_FRAME_LEN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Default sensor polling period
pub const DEFAULT_SAMPLE_PERIOD_MS: u32 = 250;

/// Default bound on bus-idle polls before giving up at startup
pub const DEFAULT_INIT_TIMEOUT_POLLS: u32 = 10_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame length outside the supported range
    FrameLength,
    /// Sampling period of zero
    SamplePeriod,
    /// Edit step below one
    Step,
    /// Setpoint band invalid
    Setpoints(SetpointError),
    /// Bus frequency of zero
    BusFrequency,
}

/// Sensor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Fitted part
    pub model: SensorModel,
    /// Bytes per transaction (2 = pressure, 4 = pressure + temperature)
    pub frame_len: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            model: SensorModel::default(),
            frame_len: MIN_FRAME_LEN as u8,
        }
    }
}

/// Acquisition pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingConfig {
    pub period_ms: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_SAMPLE_PERIOD_MS,
        }
    }
}

/// Initial setpoints and edit step (mpsi)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    pub low_mpsi: i32,
    pub high_mpsi: i32,
    pub step_mpsi: i32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            low_mpsi: DEFAULT_LOW_MPSI,
            high_mpsi: DEFAULT_HIGH_MPSI,
            step_mpsi: DEFAULT_STEP_MPSI,
        }
    }
}

impl ControlConfig {
    /// Validated setpoint band
    pub fn setpoints(&self) -> Result<Setpoints, SetpointError> {
        Setpoints::new(self.low_mpsi, self.high_mpsi)
    }
}

/// Panel switch input settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwitchConfig {
    /// Minimum time between accepted edges of one switch (0 = unfiltered)
    pub debounce_ms: u32,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Sensor bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    pub frequency_hz: u32,
    /// Bus-idle polls before startup gives up
    pub init_timeout_polls: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 100_000,
            init_timeout_polls: DEFAULT_INIT_TIMEOUT_POLLS,
        }
    }
}

/// Valve output polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValveConfig {
    /// Inflate valve is active-low
    pub inflate_inverted: bool,
    /// Deflate valve is active-low
    pub deflate_inverted: bool,
}

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Configuration version for migration
    pub version: u8,
    pub sensor: SensorConfig,
    pub sampling: SamplingConfig,
    pub control: ControlConfig,
    pub switches: SwitchConfig,
    pub bus: BusConfig,
    pub valves: ValveConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            sensor: SensorConfig::default(),
            sampling: SamplingConfig::default(),
            control: ControlConfig::default(),
            switches: SwitchConfig::default(),
            bus: BusConfig::default(),
            valves: ValveConfig::default(),
        }
    }
}

impl MachineConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let frame_len = self.sensor.frame_len as usize;
        if !(MIN_FRAME_LEN..=MAX_FRAME_LEN).contains(&frame_len) {
            return Err(ConfigError::FrameLength);
        }
        if self.sampling.period_ms == 0 {
            return Err(ConfigError::SamplePeriod);
        }
        if self.control.step_mpsi < 1 {
            return Err(ConfigError::Step);
        }
        if self.bus.frequency_hz == 0 {
            return Err(ConfigError::BusFrequency);
        }
        self.control.setpoints().map_err(ConfigError::Setpoints)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MachineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.sampling.period_ms, 250);
        assert_eq!(config.control.low_mpsi, 100);
        assert_eq!(config.control.high_mpsi, 400);
        assert_eq!(config.switches.debounce_ms, 50);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = MachineConfig::default();
        config.sensor.frame_len = 5;
        assert_eq!(config.validate(), Err(ConfigError::FrameLength));

        let mut config = MachineConfig::default();
        config.control.low_mpsi = 500;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Setpoints(SetpointError::Inverted))
        );

        let mut config = MachineConfig::default();
        config.sampling.period_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::SamplePeriod));
    }
}
