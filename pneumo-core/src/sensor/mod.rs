//! Pressure sensor acquisition
//!
//! The sensor is read with an interrupt-driven multi-byte I2C transaction.
//! [`SensorSession`] is the only state shared between the bus interrupt and
//! the main loop; [`PressureTracker`] decodes completed frames and keeps the
//! last valid pressure.

pub mod part;
pub mod reading;
pub mod session;

pub use part::{SensorModel, SensorPart};
pub use reading::{decode, PressureReading, PressureTracker, Status};
pub use session::{Frame, Phase, SensorSession, MAX_FRAME_LEN, MIN_FRAME_LEN};
