//! Panel state machine
//!
//! Consumes switch latches once per main-loop iteration, applies the bound
//! actions to the control law and actuator, and reports what to repaint.

use super::bindings::{action_for, bindings, Action, EditTarget, PanelMode};
use super::layout::PanelLayout;
use super::redraw::Redraw;
use crate::control::{Bound, HysteresisController};
use crate::input::{SwitchBank, SwitchId};
use crate::traits::Actuator;

/// Default setpoint edit step (mpsi)
pub const DEFAULT_STEP_MPSI: i32 = 1;

/// Panel mode and edit selection
#[derive(Debug, Clone)]
pub struct PanelStateMachine {
    mode: PanelMode,
    /// Bound selected for editing; kept across visits to config mode
    edit_target: EditTarget,
    step_mpsi: i32,
}

impl PanelStateMachine {
    /// Start in main mode with the high bound selected
    pub fn new(step_mpsi: i32) -> Self {
        Self {
            mode: PanelMode::Main,
            edit_target: Bound::High,
            step_mpsi: step_mpsi.max(1),
        }
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn edit_target(&self) -> EditTarget {
        self.edit_target
    }

    pub fn step_mpsi(&self) -> i32 {
        self.step_mpsi
    }

    /// Consume every pending latch
    ///
    /// Bound latches are applied in table order under the mode this call
    /// started in; latches of switches with no binding in that mode are
    /// dropped.
    pub fn dispatch<A: Actuator>(
        &mut self,
        bank: &SwitchBank,
        control: &mut HysteresisController,
        actuator: &mut A,
    ) -> Redraw {
        let mode = self.mode;
        let mut redraw = Redraw::NONE;

        for &(id, action) in bindings(mode) {
            if bank.take(id) {
                redraw |= self.apply(action, control, actuator);
            }
        }

        for id in SwitchId::ALL {
            if action_for(mode, id).is_none() {
                bank.take(id);
            }
        }

        redraw
    }

    /// Apply one action
    ///
    /// Actions that do not belong to the current mode are ignored.
    pub fn apply<A: Actuator>(
        &mut self,
        action: Action,
        control: &mut HysteresisController,
        actuator: &mut A,
    ) -> Redraw {
        match (self.mode, action) {
            (PanelMode::Main, Action::ToggleCycle) => {
                control.toggle_cycling(actuator);
                Redraw::widget(SwitchId::UpperLeft)
                    | Redraw::widget(SwitchId::LowerLeft)
                    | Redraw::widget(SwitchId::LowerRight)
            }
            (PanelMode::Main, Action::ToggleInflate) => {
                let on = !actuator.is_inflating();
                if actuator.set_inflate(on) {
                    Redraw::widget(SwitchId::LowerLeft)
                } else {
                    Redraw::NONE
                }
            }
            (PanelMode::Main, Action::ToggleDeflate) => {
                let on = !actuator.is_deflating();
                if actuator.set_deflate(on) {
                    Redraw::widget(SwitchId::LowerRight)
                } else {
                    Redraw::NONE
                }
            }
            (PanelMode::Main, Action::OpenConfig) => {
                self.mode = PanelMode::Config(self.edit_target);
                Redraw::FULL
            }
            (PanelMode::Config(target), Action::Increment) => {
                if control.setpoints_mut().increment(target, self.step_mpsi) {
                    Redraw::READOUT
                } else {
                    Redraw::NONE
                }
            }
            (PanelMode::Config(target), Action::Decrement) => {
                if control.setpoints_mut().decrement(target, self.step_mpsi) {
                    Redraw::READOUT
                } else {
                    Redraw::NONE
                }
            }
            (PanelMode::Config(target), Action::ToggleHighLow) => {
                self.edit_target = target.toggled();
                self.mode = PanelMode::Config(self.edit_target);
                Redraw::widget(SwitchId::LowerRight) | Redraw::READOUT
            }
            (PanelMode::Config(_), Action::ReturnToMain) => {
                self.mode = PanelMode::Main;
                Redraw::FULL
            }
            _ => Redraw::NONE,
        }
    }

    /// Latch the switch under a touch point
    ///
    /// Returns the switch that was latched, if the touch hit a slot and the
    /// edge passed the bank's gate.
    pub fn touch(
        &self,
        layout: &PanelLayout,
        x: i32,
        y: i32,
        bank: &SwitchBank,
        now_ms: u32,
    ) -> Option<SwitchId> {
        let id = layout.hit_test(x, y)?;
        bank.latch(id, now_ms).then_some(id)
    }
}

impl Default for PanelStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_MPSI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Setpoints;
    use crate::mock::MockActuator;
    use proptest::prelude::*;

    struct Rig {
        panel: PanelStateMachine,
        bank: SwitchBank,
        control: HysteresisController,
        actuator: MockActuator,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                panel: PanelStateMachine::default(),
                bank: SwitchBank::new(0),
                control: HysteresisController::new(Setpoints::default()),
                actuator: MockActuator::new(),
            }
        }

        fn press(&mut self, ids: &[SwitchId]) -> Redraw {
            for &id in ids {
                self.bank.latch(id, 0);
            }
            self.panel
                .dispatch(&self.bank, &mut self.control, &mut self.actuator)
        }
    }

    #[test]
    fn test_open_and_return() {
        let mut rig = Rig::new();

        let redraw = rig.press(&[SwitchId::UpperRight]);
        assert_eq!(rig.panel.mode(), PanelMode::Config(Bound::High));
        assert!(redraw.full);

        let redraw = rig.press(&[SwitchId::UpperRight]);
        assert_eq!(rig.panel.mode(), PanelMode::Main);
        assert!(redraw.full);
    }

    #[test]
    fn test_config_press_and_increment_in_one_pass() {
        let mut rig = Rig::new();

        // Upper-left means Cycle in Main, so it must not increment
        rig.press(&[SwitchId::UpperRight, SwitchId::UpperLeft]);

        assert_eq!(rig.panel.mode(), PanelMode::Config(Bound::High));
        assert!(rig.control.is_cycling());
        assert_eq!(rig.control.setpoints().high(), 400);
        assert!(!rig.bank.any_pending());
    }

    #[test]
    fn test_increment_high_then_low() {
        let mut rig = Rig::new();
        rig.press(&[SwitchId::UpperRight]);

        let redraw = rig.press(&[SwitchId::UpperLeft]);
        assert!(redraw.readout);
        assert_eq!(rig.control.setpoints().high(), 401);

        rig.press(&[SwitchId::LowerRight]);
        assert_eq!(rig.panel.mode(), PanelMode::Config(Bound::Low));

        rig.press(&[SwitchId::LowerLeft]);
        assert_eq!(rig.control.setpoints().low(), 99);
    }

    #[test]
    fn test_rejected_edit_requests_nothing() {
        let mut rig = Rig::new();
        rig.control = HysteresisController::new(Setpoints::new(0, 0).unwrap());
        rig.press(&[SwitchId::UpperRight]);

        assert!(rig.press(&[SwitchId::LowerLeft]).is_empty());
        assert_eq!(rig.control.setpoints().high(), 0);
    }

    #[test]
    fn test_edit_target_persists_across_visits() {
        let mut rig = Rig::new();
        rig.press(&[SwitchId::UpperRight]);
        rig.press(&[SwitchId::LowerRight]);
        rig.press(&[SwitchId::UpperRight]);
        rig.press(&[SwitchId::UpperRight]);

        assert_eq!(rig.panel.mode(), PanelMode::Config(Bound::Low));
    }

    #[test]
    fn test_manual_toggles() {
        let mut rig = Rig::new();

        let redraw = rig.press(&[SwitchId::LowerLeft]);
        assert!(rig.actuator.inflating);
        assert!(redraw.includes(SwitchId::LowerLeft));

        // Refused while inflating
        let redraw = rig.press(&[SwitchId::LowerRight]);
        assert!(!rig.actuator.deflating);
        assert!(redraw.is_empty());

        rig.press(&[SwitchId::LowerLeft]);
        assert!(!rig.actuator.inflating);

        rig.press(&[SwitchId::LowerRight]);
        assert!(rig.actuator.deflating);
    }

    #[test]
    fn test_cycle_off_clears_outputs() {
        let mut rig = Rig::new();
        rig.press(&[SwitchId::UpperLeft]);
        rig.control.update(50, &mut rig.actuator);
        assert!(rig.actuator.inflating);

        let redraw = rig.press(&[SwitchId::UpperLeft]);
        assert!(!rig.control.is_cycling());
        assert!(!rig.actuator.inflating);
        assert!(redraw.includes(SwitchId::UpperLeft));
        assert!(redraw.includes(SwitchId::LowerLeft));
    }

    #[test]
    fn test_unbound_latches_are_discarded() {
        let mut rig = Rig::new();
        let redraw = rig.press(&[SwitchId::MiddleLeft, SwitchId::MiddleRight]);

        assert!(redraw.is_empty());
        assert!(!rig.bank.any_pending());
    }

    #[test]
    fn test_touch_latches_same_switch() {
        let mut rig = Rig::new();
        let layout = PanelLayout::default();
        let rect = layout.slot(SwitchId::UpperRight).unwrap();

        let hit = rig
            .panel
            .touch(&layout, rect.x_min + 1, rect.y_min + 1, &rig.bank, 0);
        assert_eq!(hit, Some(SwitchId::UpperRight));

        rig.panel
            .dispatch(&rig.bank, &mut rig.control, &mut rig.actuator);
        assert_eq!(rig.panel.mode(), PanelMode::Config(Bound::High));
    }

    #[test]
    fn test_touch_outside_slots() {
        let rig = Rig::new();
        let layout = PanelLayout::default();
        assert_eq!(rig.panel.touch(&layout, 64, 5, &rig.bank, 0), None);
        assert!(!rig.bank.any_pending());
    }

    fn switch() -> impl Strategy<Value = SwitchId> {
        (0..SwitchId::ALL.len()).prop_map(|i| SwitchId::ALL[i])
    }

    /// One main-loop event: an operator press or a new pressure sample
    #[derive(Debug, Clone, Copy)]
    enum Step {
        Press(SwitchId),
        Sample(i32),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            switch().prop_map(Step::Press),
            (-1000i32..2000).prop_map(Step::Sample),
        ]
    }

    proptest! {
        #[test]
        fn prop_return_restores_main(presses in proptest::collection::vec(switch(), 0..32)) {
            let mut rig = Rig::new();
            rig.press(&[SwitchId::UpperRight]);

            // Stay in config: drop any press of the return switch
            for id in presses.into_iter().filter(|id| *id != SwitchId::UpperRight) {
                rig.press(&[id]);
                prop_assert!(!rig.panel.mode().is_main());
                let sp = rig.control.setpoints();
                prop_assert!(0 <= sp.low() && sp.low() <= sp.high());
            }

            rig.press(&[SwitchId::UpperRight]);
            prop_assert_eq!(rig.panel.mode(), PanelMode::Main);
        }

        #[test]
        fn prop_outputs_never_both_on(presses in proptest::collection::vec(switch(), 0..64)) {
            let mut rig = Rig::new();
            for id in presses {
                rig.press(&[id]);
                prop_assert!(!(rig.actuator.inflating && rig.actuator.deflating));
            }
        }

        #[test]
        fn prop_manual_and_automatic_never_both_on(
            steps in proptest::collection::vec(step(), 0..128),
        ) {
            let mut rig = Rig::new();
            for step in steps {
                match step {
                    Step::Press(id) => {
                        rig.press(&[id]);
                    }
                    Step::Sample(value) => {
                        rig.control.update(value, &mut rig.actuator);
                    }
                }
                prop_assert!(!(rig.actuator.inflating && rig.actuator.deflating));
            }
        }
    }
}
