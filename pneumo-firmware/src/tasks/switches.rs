//! Panel switch watchers
//!
//! One task instance per switch. Accepted presses are latched into the
//! shared bank and wake the controller task.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use pneumo_core::input::SwitchId;
use pneumo_drivers::switch::EdgeWatcher;

use crate::channels::{SWITCHES, SWITCH_PRESSED};

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Switch task - latches falling edges on one panel switch
#[embassy_executor::task(pool_size = 6)]
pub async fn switch_task(pin: Input<'static>, id: SwitchId) {
    debug!("Switch watcher started: {}", id);

    let mut watcher = EdgeWatcher::new(pin, id);

    loop {
        match watcher.wait_press(&SWITCHES, now_ms).await {
            Ok(true) => {
                debug!("Switch {} pressed", id);
                SWITCH_PRESSED.signal(());
            }
            Ok(false) => trace!("Switch {} bounce ignored", id),
            Err(_) => warn!("Switch {} edge wait failed", id),
        }
    }
}
