//! Pressure sensor drivers

pub mod ssc;

pub use ssc::{service_interrupt, SscError, SscSampler};
