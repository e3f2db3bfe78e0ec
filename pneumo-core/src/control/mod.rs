//! Pressure control
//!
//! - [`setpoints`]: the operator's low/high band and its edit rules
//! - [`hysteresis`]: the two-threshold inflate/deflate law

pub mod hysteresis;
pub mod setpoints;

pub use hysteresis::{ControlState, HysteresisController};
pub use setpoints::{Bound, SetpointError, Setpoints};
