//! Main controller task
//!
//! Sleeps until a sensor frame completes or a switch is pressed, then runs
//! one iteration: decode and apply the control law, consume switch
//! latches, and repaint what changed.

use defmt::*;
use embassy_futures::select::{select, Either};

use pneumo_core::controller::Controller;
use pneumo_core::panel::Redraw;
use pneumo_core::traits::Actuator;
use pneumo_drivers::valve::{GpioValve, ValvePair};
use pneumo_hal_rp2040::RpOutput;

use crate::channels::{READING_READY, SESSION, SWITCHES, SWITCH_PRESSED};
use crate::display::LogRenderer;

/// Valve pair type owned by the controller task
pub type Valves = ValvePair<GpioValve<RpOutput<'static>>, GpioValve<RpOutput<'static>>>;

/// Controller task - main control loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: Controller, mut valves: Valves) {
    info!("Controller task started");

    let mut renderer = LogRenderer::new();
    renderer.render(&controller.view(&valves), Redraw::FULL);

    loop {
        let woke_by = select(READING_READY.wait(), SWITCH_PRESSED.wait()).await;

        let mut redraw = Redraw::NONE;

        if let Some(frame) = SESSION.take() {
            let before = valves.state();
            redraw |= controller.on_frame(&frame, &mut valves);

            if let Some(reading) = controller.last_reading() {
                if reading.valid {
                    trace!("Pressure {} mpsi", reading.value_mpsi);
                } else {
                    debug!("Sample discarded: {}", reading.status);
                }
            }

            let after = valves.state();
            if after != before {
                info!(
                    "Valves: inflate={} deflate={} at {} mpsi",
                    after.inflating,
                    after.deflating,
                    controller.pressure()
                );
            }
        } else if let Either::First(()) = woke_by {
            debug!("Reading signal without a complete frame");
        }

        // Latches are consumed every iteration, whatever woke us
        let mode_before = controller.mode();
        redraw |= controller.dispatch(&SWITCHES, &mut valves);
        if controller.mode() != mode_before {
            info!("Panel mode: {}", controller.mode());
        }

        if !redraw.is_empty() {
            renderer.render(&controller.view(&valves), redraw);
        }
    }
}
