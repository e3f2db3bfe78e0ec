//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pneumo-core and pneumo-hal:
//!
//! - SSC pressure sensor sampler (interrupt-driven I2C receive)
//! - GPIO solenoid valves and the interlocked valve pair
//! - Panel switch edge watchers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
pub mod switch;
pub mod valve;
