//! Renderer-facing description of the panel
//!
//! The core does not draw anything. It hands the renderer a [`PanelView`]
//! with every label, highlight and the formatted readout; the renderer
//! decides how to paint it.

use core::fmt::Write;

use heapless::{String, Vec};

use super::bindings::{switch_for, Action, PanelMode};
use crate::control::Bound;
use crate::input::SwitchId;
use crate::traits::ActuatorState;

pub const TITLE: &str = "Bladder Control v1.0";
pub const SUBTITLE_MAIN: &str = "Control";
pub const SUBTITLE_CONFIG: &str = "Configuration";

/// Slot that shows the numeric readout
pub const READOUT_SLOT: SwitchId = SwitchId::MiddleLeft;

/// Room for any `i32` formatted with a sign
pub const READOUT_CAPACITY: usize = 12;

/// One labelled button
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Widget {
    pub slot: SwitchId,
    pub label: &'static str,
    pub highlighted: bool,
}

/// Complete panel contents for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub widgets: Vec<Widget, 4>,
    /// Zero-padded, four digits minimum
    pub readout: String<READOUT_CAPACITY>,
}

impl PanelView {
    /// Describe the panel in `mode`
    ///
    /// `readout_mpsi` is the pressure in main mode and the selected bound in
    /// config mode.
    pub fn build(mode: PanelMode, cycling: bool, outputs: ActuatorState, readout_mpsi: i32) -> Self {
        let mut widgets = Vec::new();

        let entries: [(Action, &'static str, bool); 4] = match mode {
            PanelMode::Main => [
                (Action::ToggleCycle, "Cycle", cycling),
                (Action::ToggleInflate, "Inflate", outputs.inflating),
                (Action::ToggleDeflate, "Deflate", outputs.deflating),
                (Action::OpenConfig, "Config", false),
            ],
            PanelMode::Config(target) => [
                (Action::Increment, "+", false),
                (Action::Decrement, "-", false),
                (Action::ToggleHighLow, bound_label(target), false),
                (Action::ReturnToMain, "Main", false),
            ],
        };

        for (action, label, highlighted) in entries {
            if let Some(slot) = switch_for(mode, action) {
                // Capacity matches the entry count
                let _ = widgets.push(Widget {
                    slot,
                    label,
                    highlighted,
                });
            }
        }
        widgets.sort_unstable_by_key(|w: &Widget| w.slot.index());

        Self {
            title: TITLE,
            subtitle: if mode.is_main() {
                SUBTITLE_MAIN
            } else {
                SUBTITLE_CONFIG
            },
            widgets,
            readout: format_readout(readout_mpsi),
        }
    }

    /// Widget at a slot, if any
    pub fn widget(&self, slot: SwitchId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.slot == slot)
    }
}

fn bound_label(bound: Bound) -> &'static str {
    match bound {
        Bound::High => "High",
        Bound::Low => "Low",
    }
}

/// Format a pressure as a zero-padded, at-least-four-digit number
pub fn format_readout(mpsi: i32) -> String<READOUT_CAPACITY> {
    let mut out = String::new();
    // Cannot overflow: an i32 needs at most 11 characters
    let _ = write!(out, "{:04}", mpsi);
    out
}
