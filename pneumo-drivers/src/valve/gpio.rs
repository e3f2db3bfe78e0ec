//! GPIO valve output
//!
//! Drives a solenoid valve from a GPIO pin (directly or via a MOSFET/relay).

use pneumo_core::traits::ValveOutput;
use pneumo_hal::OutputPin;

/// GPIO valve output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioValve<P> {
    pin: P,
    /// If true, valve open = pin LOW
    inverted: bool,
    /// Current logical state (true = energised)
    open: bool,
}

impl<P: OutputPin> GpioValve<P> {
    /// Create a new GPIO valve, released
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the valve opens when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut valve = Self {
            pin,
            inverted,
            open: false,
        };
        valve.set_open(false);
        valve
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> ValveOutput for GpioValve<P> {
    fn set_open(&mut self, open: bool) {
        self.open = open;
        self.pin.set_state(open != self.inverted);
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
