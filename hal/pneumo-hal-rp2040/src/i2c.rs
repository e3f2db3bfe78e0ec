//! Interrupt-driven I2C master receive
//!
//! The bus is first brought up with `embassy_rp::i2c::I2c::new_blocking`
//! (pin muxing, pull-ups, SCL timing). [`InterruptI2c`] then drives the
//! controller's command FIFO directly so that each received byte raises
//! `I2C0_IRQ`:
//!
//! ```text
//!   begin_receive(addr, n)   TAR = addr, queue n-1 read commands
//!   RX_FULL irq              read_byte() until the RX FIFO is empty
//!   one byte still owed      finish(): queue the last read with STOP
//! ```
//!
//! The handle is a copy of the register block pointer, so the sample task
//! and the interrupt handler can each hold one.

use embassy_rp::pac;
use pneumo_hal::I2cMasterReceive;

/// Receive engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// The previous transaction was aborted (address NAK, lost arbitration)
    ///
    /// The abort has been cleared; the new transaction was not issued.
    Aborted,
}

/// Register-level receive engine for one I2C controller
#[derive(Clone, Copy)]
pub struct InterruptI2c {
    regs: pac::i2c::I2c,
}

impl InterruptI2c {
    /// Engine for the I2C0 controller
    pub fn i2c0() -> Self {
        Self { regs: pac::I2C0 }
    }

    /// Engine for the I2C1 controller
    pub fn i2c1() -> Self {
        Self { regs: pac::I2C1 }
    }

    /// Raise the controller interrupt on every received byte and on abort
    ///
    /// The NVIC line still has to be unmasked by the caller.
    pub fn enable_rx_interrupt(&mut self) {
        self.regs.ic_rx_tl().write(|w| w.set_rx_tl(0));
        self.regs.ic_intr_mask().write(|w| {
            w.set_m_rx_full(true);
            w.set_m_tx_abrt(true);
        });
    }

    /// Clear a pending transmit abort, returning whether one was pending
    pub fn clear_abort(&mut self) -> bool {
        let aborted = self.regs.ic_raw_intr_stat().read().tx_abrt();
        if aborted {
            // Reading the clear register acknowledges the abort
            let _ = self.regs.ic_clr_tx_abrt().read();
        }
        aborted
    }

    fn queue_read(&mut self, stop: bool) {
        self.regs.ic_data_cmd().write(|w| {
            w.set_cmd(true);
            w.set_stop(stop);
        });
    }
}

impl I2cMasterReceive for InterruptI2c {
    type Error = I2cError;

    fn is_bus_busy(&self) -> bool {
        self.regs.ic_status().read().activity()
    }

    fn begin_receive(&mut self, address: u8, count: usize) -> Result<(), I2cError> {
        if self.clear_abort() {
            return Err(I2cError::Aborted);
        }

        // TAR can only be changed while the controller is disabled; this
        // also flushes anything left of an abandoned transaction.
        self.regs.ic_enable().write(|w| w.set_enable(false));
        self.regs
            .ic_tar()
            .write(|w| w.set_ic_tar(u16::from(address)));
        self.regs.ic_enable().write(|w| w.set_enable(true));

        match count {
            0 => {}
            1 => self.queue_read(true),
            n => {
                for _ in 0..n - 1 {
                    self.queue_read(false);
                }
            }
        }

        Ok(())
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.regs.ic_rxflr().read().rxflr() == 0 {
            return None;
        }
        Some(self.regs.ic_data_cmd().read().dat())
    }

    fn finish(&mut self) {
        self.queue_read(true);
    }
}
