//! Valve output and actuator traits

/// Trait for a single solenoid valve output
///
/// Implementations drive the valve via GPIO, a MOSFET or a relay.
pub trait ValveOutput {
    /// Energise or release the valve
    fn set_open(&mut self, open: bool);

    /// Check if the valve is currently energised
    fn is_open(&self) -> bool;
}

/// Which way air moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Inflate,
    Deflate,
}

/// Snapshot of both actuator outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorState {
    pub inflating: bool,
    pub deflating: bool,
}

impl ActuatorState {
    pub const OFF: Self = Self {
        inflating: false,
        deflating: false,
    };
}

/// Owner of the inflate and deflate outputs
///
/// Implementations must never have both outputs energised: a request to
/// energise one output while the other is on is refused and reported as
/// `false`.
pub trait Actuator {
    /// Set the inflate output
    ///
    /// Returns `false` if the request was refused.
    fn set_inflate(&mut self, on: bool) -> bool;

    /// Set the deflate output
    ///
    /// Returns `false` if the request was refused.
    fn set_deflate(&mut self, on: bool) -> bool;

    fn is_inflating(&self) -> bool;

    fn is_deflating(&self) -> bool;

    /// Current output snapshot
    fn state(&self) -> ActuatorState {
        ActuatorState {
            inflating: self.is_inflating(),
            deflating: self.is_deflating(),
        }
    }

    /// Move air in one direction, releasing the opposite output first
    fn drive(&mut self, direction: Direction) {
        match direction {
            Direction::Inflate => {
                self.set_deflate(false);
                self.set_inflate(true);
            }
            Direction::Deflate => {
                self.set_inflate(false);
                self.set_deflate(true);
            }
        }
    }

    /// Release both outputs
    fn all_off(&mut self) {
        self.set_inflate(false);
        self.set_deflate(false);
    }
}
