//! Panel switch edge watcher
//!
//! Switches close to ground against a pull-up, so a press is a falling
//! edge. Each watcher awaits edges on one pin and latches them into the
//! shared [`SwitchBank`].

use embedded_hal_async::digital::Wait;
use pneumo_core::input::{SwitchBank, SwitchId};

/// Falling-edge watcher for one switch
pub struct EdgeWatcher<W> {
    pin: W,
    id: SwitchId,
}

impl<W: Wait> EdgeWatcher<W> {
    pub fn new(pin: W, id: SwitchId) -> Self {
        Self { pin, id }
    }

    pub fn id(&self) -> SwitchId {
        self.id
    }

    /// Wait for the next press and latch it
    ///
    /// `now_ms` is sampled after the edge. Returns whether the bank accepted
    /// the edge.
    pub async fn wait_press<F>(&mut self, bank: &SwitchBank, now_ms: F) -> Result<bool, W::Error>
    where
        F: FnOnce() -> u32,
    {
        self.pin.wait_for_falling_edge().await?;
        Ok(bank.latch(self.id, now_ms()))
    }
}
