//! Operator inputs

pub mod switches;

pub use switches::{SwitchBank, SwitchId, DEFAULT_DEBOUNCE_MS, SWITCH_COUNT};
