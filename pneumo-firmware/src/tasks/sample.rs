//! Sensor sampling
//!
//! A ticker starts one transaction per sampling period. Bytes are collected
//! by the `I2C0_IRQ` handler below; the handler signals the controller
//! task when a frame completes. A transaction still in flight when the
//! next tick fires is abandoned, so a lost transaction costs one sample.

use defmt::*;
use embassy_rp::interrupt;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use pneumo_drivers::sensor::{service_interrupt, SscError, SscSampler};
use pneumo_hal_rp2040::InterruptI2c;

use crate::channels::{BUS_ABORTS, READING_READY, SESSION};

/// Sampler type driven by the sample task
pub type SscBus = SscSampler<'static, InterruptI2c>;

/// Sample task - starts a sensor transaction every `period_ms`
#[embassy_executor::task]
pub async fn sample_task(mut sampler: SscBus, period_ms: u32) {
    info!(
        "Sample task started: {} at {:#x}, every {} ms",
        sampler.part().name,
        sampler.part().address,
        period_ms
    );

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));
    let mut reported_aborts = 0;

    loop {
        ticker.next().await;

        if let Err(e) = sampler.start() {
            match e {
                SscError::Bus(e) => warn!("Sensor transaction not started: {}", e),
                SscError::BusBusyTimeout => warn!("Sensor bus busy"),
            }
        }

        let aborts = BUS_ABORTS.load(Ordering::Relaxed);
        if aborts != reported_aborts {
            warn!("Sensor bus aborts: {}", aborts);
            reported_aborts = aborts;
        }
    }
}

#[interrupt]
unsafe fn I2C0_IRQ() {
    let mut bus = InterruptI2c::i2c0();

    if bus.clear_abort() {
        BUS_ABORTS.fetch_add(1, Ordering::Relaxed);
    }

    if service_interrupt(&mut bus, &SESSION) {
        READING_READY.signal(());
    }
}
