//! Board-agnostic core logic for the bladder inflation controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor session handoff and reading decode
//! - Hysteresis control law and setpoints
//! - Latched switch bank
//! - Panel state machine, layout and view
//! - Controller glue tying the above together
//! - Configuration types and the `machine.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod controller;
pub mod input;
pub mod panel;
pub mod sensor;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;
