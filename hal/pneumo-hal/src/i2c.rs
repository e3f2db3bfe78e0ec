//! I2C bus abstractions
//!
//! The pressure sensor is read with an interrupt-driven master receive:
//! the addressing sequence is issued once, then every received byte raises
//! an interrupt and is pulled out of the peripheral one at a time. This
//! trait exposes exactly those steps so the byte-level session can live in
//! board-agnostic code.

/// Interrupt-driven I2C master receiver
///
/// Call order for one transaction of `n` bytes:
///
/// 1. [`begin_receive`](Self::begin_receive) from any context
/// 2. on each receive interrupt, [`read_byte`](Self::read_byte) until it
///    returns `None`
/// 3. [`finish`](Self::finish) once exactly one byte remains outstanding,
///    so the peripheral NAKs the last byte and generates a stop condition
pub trait I2cMasterReceive {
    /// Error type for bus operations
    type Error;

    /// Check whether the bus is currently busy (start seen, no stop yet)
    fn is_bus_busy(&self) -> bool;

    /// Address a device and start a read of `count` bytes
    ///
    /// The final byte is not requested until [`finish`](Self::finish) is
    /// called. Issuing a new receive while a previous one is in flight
    /// restarts the addressing sequence; any bytes of the old transaction
    /// are abandoned.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `count` - Number of bytes the transaction will return
    fn begin_receive(&mut self, address: u8, count: usize) -> Result<(), Self::Error>;

    /// Pull one received byte out of the peripheral, if any is pending
    fn read_byte(&mut self) -> Option<u8>;

    /// Request the final byte, NAKed and followed by a stop condition
    fn finish(&mut self);
}
