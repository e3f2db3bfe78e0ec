//! Hysteresis inflate/deflate control law
//!
//! Inflates when pressure falls to the low threshold and deflates when it
//! reaches the high threshold. Inside the band the current action is held,
//! so the valves only reverse at the opposite boundary.

use super::setpoints::Setpoints;
use crate::traits::{Actuator, ActuatorState, Direction};

/// Control state, derived from the actuator outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlState {
    Idle,
    Inflating,
    Deflating,
}

impl From<ActuatorState> for ControlState {
    fn from(state: ActuatorState) -> Self {
        if state.inflating {
            ControlState::Inflating
        } else if state.deflating {
            ControlState::Deflating
        } else {
            ControlState::Idle
        }
    }
}

/// Automatic pressure cycling between the two setpoints
#[derive(Debug, Clone)]
pub struct HysteresisController {
    setpoints: Setpoints,
    cycling: bool,
}

impl HysteresisController {
    /// Create a controller with cycling disabled
    pub fn new(setpoints: Setpoints) -> Self {
        Self {
            setpoints,
            cycling: false,
        }
    }

    pub fn setpoints(&self) -> &Setpoints {
        &self.setpoints
    }

    pub fn setpoints_mut(&mut self) -> &mut Setpoints {
        &mut self.setpoints
    }

    pub fn is_cycling(&self) -> bool {
        self.cycling
    }

    /// Enable or disable automatic cycling
    ///
    /// Disabling releases both outputs immediately.
    pub fn set_cycling<A: Actuator>(&mut self, enabled: bool, actuator: &mut A) {
        let was_cycling = self.cycling;
        self.cycling = enabled;

        if was_cycling && !enabled {
            actuator.all_off();
        }
    }

    /// Flip cycling, returning the new state
    pub fn toggle_cycling<A: Actuator>(&mut self, actuator: &mut A) -> bool {
        self.set_cycling(!self.cycling, actuator);
        self.cycling
    }

    /// Apply the control law to a new pressure value
    ///
    /// Does nothing while cycling is disabled. Returns the new state if the
    /// outputs changed.
    pub fn update<A: Actuator>(
        &mut self,
        value_mpsi: i32,
        actuator: &mut A,
    ) -> Option<ControlState> {
        if !self.cycling {
            return None;
        }

        let before = actuator.state();

        if !before.inflating && value_mpsi <= self.setpoints.low() {
            actuator.drive(Direction::Inflate);
        } else if !before.deflating && value_mpsi >= self.setpoints.high() {
            actuator.drive(Direction::Deflate);
        }

        let after = actuator.state();
        (after != before).then(|| after.into())
    }
}
