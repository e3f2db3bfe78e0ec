//! Pneumo - Bladder Inflation Controller Firmware
//!
//! Main firmware binary for RP2040-based pneumatic controllers. Samples a
//! Honeywell SSC pressure sensor over interrupt-driven I2C and holds a
//! bladder between two setpoints with an inflate and a deflate valve.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::peripherals::I2C0;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pneumo_core::config::{parse_config, MachineConfig};
use pneumo_core::controller::Controller;
use pneumo_core::input::SwitchId;
use pneumo_drivers::sensor::SscSampler;
use pneumo_drivers::valve::{GpioValve, ValvePair};
use pneumo_hal_rp2040::{InterruptI2c, RpOutput};

/// Embedded configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

mod channels;
mod display;
mod tasks;

use channels::{SESSION, SWITCHES};

// Owns the pin muxing and clock setup; the transfers themselves go
// through InterruptI2c
static SENSOR_BUS: StaticCell<I2c<'static, I2C0, i2c::Blocking>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pneumo firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    SWITCHES.set_debounce_ms(config.switches.debounce_ms);

    // Valves first, so the outputs are driven released before anything else
    // Pin assignment is fixed by the board (inflate GPIO14, deflate GPIO15)
    let inflate = Output::new(p.PIN_14, released_level(config.valves.inflate_inverted));
    let deflate = Output::new(p.PIN_15, released_level(config.valves.deflate_inverted));
    let valves = ValvePair::new(
        GpioValve::new(RpOutput::new(inflate), config.valves.inflate_inverted),
        GpioValve::new(RpOutput::new(deflate), config.valves.deflate_inverted),
    );
    info!(
        "Valves initialized (inflate_inverted={}, deflate_inverted={})",
        config.valves.inflate_inverted, config.valves.deflate_inverted
    );

    // Sensor bus (SDA GPIO4, SCL GPIO5)
    let mut bus_config = i2c::Config::default();
    bus_config.frequency = config.bus.frequency_hz;
    SENSOR_BUS.init(I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, bus_config));

    let mut engine = InterruptI2c::i2c0();
    engine.enable_rx_interrupt();

    let part = config.sensor.model.part();
    let mut sampler = SscSampler::new(engine, &SESSION, part, usize::from(config.sensor.frame_len));

    if let Err(e) = sampler.init(config.bus.init_timeout_polls) {
        error!("Sensor bus did not go idle: {}", e);
        error!("Valves held released, controller halted");
        park().await;
    }

    unsafe { interrupt::I2C0_IRQ.enable() };
    info!(
        "Sensor initialized: {} at {} Hz, {} byte frames",
        part.name,
        config.bus.frequency_hz,
        config.sensor.frame_len
    );

    // Panel switches, active low with internal pull-ups
    let switch_pins = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
    ];
    for (pin, id) in switch_pins.into_iter().zip(SwitchId::ALL) {
        spawner.spawn(tasks::switch_task(pin, id)).unwrap();
    }
    info!("Switch watchers started");

    let controller = Controller::from_config(&config);
    info!(
        "Setpoints: low={} high={} mpsi, step={}",
        controller.control().setpoints().low(),
        controller.control().setpoints().high(),
        config.control.step_mpsi
    );

    spawner
        .spawn(tasks::sample_task(sampler, config.sampling.period_ms))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(controller, valves))
        .unwrap();

    info!("All tasks spawned, entering main loop");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded (version {})", config.version);
            config
        }
        Err(e) => {
            error!("Invalid embedded configuration: {}, using defaults", e);
            MachineConfig::default()
        }
    }
}

/// Output level that leaves a valve released
fn released_level(inverted: bool) -> Level {
    if inverted {
        Level::High
    } else {
        Level::Low
    }
}

/// Stop here for good; the valve outputs keep their released level
async fn park() -> ! {
    loop {
        embassy_time::Timer::after_secs(3600).await;
    }
}
