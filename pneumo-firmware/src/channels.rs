//! Shared state between interrupts and tasks
//!
//! The sensor session and switch bank are lock-free cells from
//! pneumo-core; the signals wake the controller task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use pneumo_core::input::{SwitchBank, DEFAULT_DEBOUNCE_MS};
use pneumo_core::sensor::SensorSession;

/// Sensor transaction state, written by `I2C0_IRQ`
pub static SESSION: SensorSession = SensorSession::new();

/// Latched panel switches, set by the switch watchers
pub static SWITCHES: SwitchBank = SwitchBank::new(DEFAULT_DEBOUNCE_MS);

/// Signal that a sensor frame completed
pub static READING_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a switch latch was set
pub static SWITCH_PRESSED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Transactions aborted by the bus (address NAK, lost arbitration)
pub static BUS_ABORTS: AtomicU32 = AtomicU32::new(0);
