//! Mode-keyed switch bindings

use crate::control::Bound;
use crate::input::SwitchId;

/// Setpoint selected for editing in config mode
pub type EditTarget = Bound;

/// Panel mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelMode {
    /// Monitoring and manual control
    Main,
    /// Setpoint editing
    Config(EditTarget),
}

impl PanelMode {
    pub const fn is_main(self) -> bool {
        matches!(self, PanelMode::Main)
    }
}

/// Semantic panel action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    // Main
    ToggleCycle,
    ToggleInflate,
    ToggleDeflate,
    OpenConfig,
    // Config
    Increment,
    Decrement,
    ToggleHighLow,
    ReturnToMain,
}

impl Action {
    /// True for actions that change the panel mode
    pub const fn switches_mode(self) -> bool {
        matches!(self, Action::OpenConfig | Action::ReturnToMain)
    }
}

/// One switch-to-action entry
pub type Binding = (SwitchId, Action);

// Mode switches come last so every latch taken in one pass is interpreted
// under the mode the pass started in.
const MAIN_BINDINGS: [Binding; 4] = [
    (SwitchId::UpperLeft, Action::ToggleCycle),
    (SwitchId::LowerLeft, Action::ToggleInflate),
    (SwitchId::LowerRight, Action::ToggleDeflate),
    (SwitchId::UpperRight, Action::OpenConfig),
];

const CONFIG_BINDINGS: [Binding; 4] = [
    (SwitchId::UpperLeft, Action::Increment),
    (SwitchId::LowerLeft, Action::Decrement),
    (SwitchId::LowerRight, Action::ToggleHighLow),
    (SwitchId::UpperRight, Action::ReturnToMain),
];

/// Binding table for a mode, in dispatch order
pub fn bindings(mode: PanelMode) -> &'static [Binding] {
    match mode {
        PanelMode::Main => &MAIN_BINDINGS,
        PanelMode::Config(_) => &CONFIG_BINDINGS,
    }
}

/// Action bound to a switch in a mode, if any
pub fn action_for(mode: PanelMode, id: SwitchId) -> Option<Action> {
    bindings(mode)
        .iter()
        .find(|(switch, _)| *switch == id)
        .map(|(_, action)| *action)
}

/// Switch an action is bound to in a mode, if any
pub fn switch_for(mode: PanelMode, action: Action) -> Option<SwitchId> {
    bindings(mode)
        .iter()
        .find(|(_, a)| *a == action)
        .map(|(switch, _)| *switch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_wiring() {
        let m = PanelMode::Main;
        assert_eq!(action_for(m, SwitchId::UpperLeft), Some(Action::ToggleCycle));
        assert_eq!(action_for(m, SwitchId::LowerLeft), Some(Action::ToggleInflate));
        assert_eq!(action_for(m, SwitchId::UpperRight), Some(Action::OpenConfig));
        assert_eq!(action_for(m, SwitchId::LowerRight), Some(Action::ToggleDeflate));
        assert_eq!(action_for(m, SwitchId::MiddleLeft), None);
        assert_eq!(action_for(m, SwitchId::MiddleRight), None);
    }

    #[test]
    fn test_config_wiring() {
        let m = PanelMode::Config(Bound::High);
        assert_eq!(action_for(m, SwitchId::UpperLeft), Some(Action::Increment));
        assert_eq!(action_for(m, SwitchId::LowerLeft), Some(Action::Decrement));
        assert_eq!(action_for(m, SwitchId::UpperRight), Some(Action::ReturnToMain));
        assert_eq!(action_for(m, SwitchId::LowerRight), Some(Action::ToggleHighLow));
    }

    #[test]
    fn test_mode_switch_actions_are_last() {
        for mode in [PanelMode::Main, PanelMode::Config(Bound::Low)] {
            let table = bindings(mode);
            let last = table.len() - 1;
            for (i, (_, action)) in table.iter().enumerate() {
                assert_eq!(action.switches_mode(), i == last);
            }
        }
    }

    #[test]
    fn test_switch_for_inverts_table() {
        assert_eq!(
            switch_for(PanelMode::Main, Action::ToggleDeflate),
            Some(SwitchId::LowerRight)
        );
        assert_eq!(switch_for(PanelMode::Main, Action::Increment), None);
    }
}
