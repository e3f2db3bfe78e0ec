//! Hardware-facing traits implemented by the driver crate

pub mod actuator;

pub use actuator::{Actuator, ActuatorState, Direction, ValveOutput};
