//! Inflate/deflate valve pair
//!
//! Owns both valves and enforces that they are never energised together.

use pneumo_core::traits::{Actuator, ValveOutput};

/// Two mutually exclusive valves behind the [`Actuator`] trait
pub struct ValvePair<I, D> {
    inflate: I,
    deflate: D,
    /// Energise requests refused by the interlock
    refused: u32,
}

impl<I: ValveOutput, D: ValveOutput> ValvePair<I, D> {
    /// Take ownership of both valves and release them
    pub fn new(inflate: I, deflate: D) -> Self {
        let mut pair = Self {
            inflate,
            deflate,
            refused: 0,
        };
        pair.inflate.set_open(false);
        pair.deflate.set_open(false);
        pair
    }

    /// Number of energise requests refused because the other valve was open
    pub fn refused_count(&self) -> u32 {
        self.refused
    }

    pub fn inflate_valve(&self) -> &I {
        &self.inflate
    }

    pub fn deflate_valve(&self) -> &D {
        &self.deflate
    }
}

impl<I: ValveOutput, D: ValveOutput> Actuator for ValvePair<I, D> {
    fn set_inflate(&mut self, on: bool) -> bool {
        if on && self.deflate.is_open() {
            self.refused = self.refused.wrapping_add(1);
            return false;
        }
        self.inflate.set_open(on);
        true
    }

    fn set_deflate(&mut self, on: bool) -> bool {
        if on && self.inflate.is_open() {
            self.refused = self.refused.wrapping_add(1);
            return false;
        }
        self.deflate.set_open(on);
        true
    }

    fn is_inflating(&self) -> bool {
        self.inflate.is_open()
    }

    fn is_deflating(&self) -> bool {
        self.deflate.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pneumo_core::control::{HysteresisController, Setpoints};
    use pneumo_core::input::{SwitchBank, SwitchId};
    use pneumo_core::panel::PanelStateMachine;
    use pneumo_core::traits::{ActuatorState, Direction};
    use proptest::prelude::*;

    #[derive(Default)]
    struct MockValve {
        open: bool,
        sets: usize,
    }

    impl ValveOutput for MockValve {
        fn set_open(&mut self, open: bool) {
            self.open = open;
            self.sets += 1;
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    fn pair() -> ValvePair<MockValve, MockValve> {
        let inflate = MockValve {
            open: true,
            ..Default::default()
        };
        ValvePair::new(inflate, MockValve::default())
    }

    #[test]
    fn test_starts_released() {
        let pair = pair();
        assert_eq!(pair.state(), ActuatorState::OFF);
    }

    #[test]
    fn test_refuses_second_valve() {
        let mut pair = pair();

        assert!(pair.set_inflate(true));
        assert!(!pair.set_deflate(true));
        assert!(!pair.is_deflating());
        assert_eq!(pair.refused_count(), 1);

        assert!(pair.set_inflate(false));
        assert!(pair.set_deflate(true));
        assert!(!pair.set_inflate(true));
        assert_eq!(pair.refused_count(), 2);
    }

    #[test]
    fn test_release_always_allowed() {
        let mut pair = pair();
        pair.set_deflate(true);
        assert!(pair.set_inflate(false));
        assert!(pair.set_deflate(false));
    }

    #[test]
    fn test_drive_swaps_direction() {
        let mut pair = pair();

        pair.drive(Direction::Inflate);
        assert!(pair.is_inflating());

        pair.drive(Direction::Deflate);
        assert!(pair.is_deflating());
        assert!(!pair.is_inflating());
        assert_eq!(pair.refused_count(), 0);

        pair.all_off();
        assert_eq!(pair.state(), ActuatorState::OFF);
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Press(SwitchId),
        Sample(i32),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0..SwitchId::ALL.len()).prop_map(|i| Step::Press(SwitchId::ALL[i])),
            (-1000i32..2000).prop_map(Step::Sample),
        ]
    }

    proptest! {
        #[test]
        fn prop_panel_and_control_never_open_both_valves(
            steps in proptest::collection::vec(step(), 0..128),
        ) {
            let mut pair = pair();
            let bank = SwitchBank::new(0);
            let mut panel = PanelStateMachine::default();
            let mut control = HysteresisController::new(Setpoints::default());

            for step in steps {
                match step {
                    Step::Press(id) => {
                        bank.latch(id, 0);
                        panel.dispatch(&bank, &mut control, &mut pair);
                    }
                    Step::Sample(value) => {
                        control.update(value, &mut pair);
                    }
                }
                prop_assert!(!(pair.inflate_valve().is_open() && pair.deflate_valve().is_open()));
                prop_assert!(!(pair.is_inflating() && pair.is_deflating()));
            }
        }
    }
}
