//! Main-loop glue
//!
//! [`Controller`] owns everything the main loop mutates: the pressure
//! tracker, the hysteresis law and the panel. The firmware calls
//! [`Controller::on_frame`] when a sensor frame completes and
//! [`Controller::dispatch`] when a switch was pressed, then repaints what
//! the returned [`Redraw`] asks for.

use crate::config::MachineConfig;
use crate::control::{HysteresisController, Setpoints};
use crate::input::{SwitchBank, SwitchId};
use crate::panel::{PanelMode, PanelStateMachine, PanelView, Redraw};
use crate::sensor::{Frame, PressureReading, PressureTracker, SensorPart};
use crate::traits::Actuator;

/// Pressure controller state owned by the main loop
#[derive(Debug, Clone)]
pub struct Controller {
    tracker: PressureTracker,
    control: HysteresisController,
    panel: PanelStateMachine,
    last_reading: Option<PressureReading>,
    /// Value the renderer last painted in the main readout
    shown_mpsi: Option<i32>,
}

impl Controller {
    pub fn new(part: &'static SensorPart, setpoints: Setpoints, step_mpsi: i32) -> Self {
        Self {
            tracker: PressureTracker::new(part),
            control: HysteresisController::new(setpoints),
            panel: PanelStateMachine::new(step_mpsi),
            last_reading: None,
            shown_mpsi: None,
        }
    }

    /// Build from a parsed configuration
    ///
    /// Setpoints that fail validation fall back to the defaults.
    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(
            config.sensor.model.part(),
            config.control.setpoints().unwrap_or_default(),
            config.control.step_mpsi,
        )
    }

    /// Handle a completed sensor frame
    ///
    /// Decodes the frame, runs the control law on valid samples while
    /// cycling, and asks for the readout to be repainted when the displayed
    /// pressure changed.
    pub fn on_frame<A: Actuator>(&mut self, frame: &Frame, actuator: &mut A) -> Redraw {
        let reading = self.tracker.ingest(frame);
        self.last_reading = Some(reading);

        let mut redraw = Redraw::NONE;

        if reading.valid && self.control.update(reading.value_mpsi, actuator).is_some() {
            redraw |= Redraw::widget(SwitchId::LowerLeft) | Redraw::widget(SwitchId::LowerRight);
        }

        if self.panel.mode().is_main() {
            let value = self.tracker.last_value();
            if self.shown_mpsi != Some(value) {
                self.shown_mpsi = Some(value);
                redraw |= Redraw::READOUT;
            }
        }

        redraw
    }

    /// Consume pending switch latches
    pub fn dispatch<A: Actuator>(&mut self, bank: &SwitchBank, actuator: &mut A) -> Redraw {
        let redraw = self.panel.dispatch(bank, &mut self.control, actuator);

        if redraw.full && self.panel.mode().is_main() {
            self.shown_mpsi = Some(self.tracker.last_value());
        }

        redraw
    }

    /// Describe the panel for the renderer
    pub fn view<A: Actuator>(&self, actuator: &A) -> PanelView {
        let mode = self.panel.mode();
        let readout = match mode {
            PanelMode::Main => self.tracker.last_value(),
            PanelMode::Config(target) => self.control.setpoints().get(target),
        };

        PanelView::build(mode, self.control.is_cycling(), actuator.state(), readout)
    }

    /// Most recent valid pressure (mpsi)
    pub fn pressure(&self) -> i32 {
        self.tracker.last_value()
    }

    pub fn last_reading(&self) -> Option<PressureReading> {
        self.last_reading
    }

    pub fn tracker(&self) -> &PressureTracker {
        &self.tracker
    }

    pub fn control(&self) -> &HysteresisController {
        &self.control
    }

    pub fn panel(&self) -> &PanelStateMachine {
        &self.panel
    }

    pub fn mode(&self) -> PanelMode {
        self.panel.mode()
    }
}
