//! Solenoid valve drivers

pub mod gpio;
pub mod pair;

pub use gpio::GpioValve;
pub use pair::ValvePair;
