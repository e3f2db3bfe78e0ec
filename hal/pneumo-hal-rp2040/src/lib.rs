//! RP2040-specific HAL for the bladder inflation controller
//!
//! This crate provides RP2040-specific implementations of the shared
//! `pneumo-hal` traits:
//!
//! - Interrupt-driven I2C master receive on top of the DesignWare I2C block
//! - GPIO output adapter for the valve drivers
//!
//! Pin muxing, pull-ups and bus timing are configured with the regular
//! `embassy-rp` drivers before these adapters take over.

#![no_std]

pub mod gpio;
pub mod i2c;

pub use gpio::RpOutput;
pub use i2c::{I2cError, InterruptI2c};

// Re-export shared traits from pneumo-hal for convenience
pub use pneumo_hal::{I2cMasterReceive, OutputPin};
