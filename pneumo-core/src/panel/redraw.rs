//! Redraw requests accumulated during one main-loop iteration

use core::ops::{BitOr, BitOrAssign};

use crate::input::{SwitchId, SWITCH_COUNT};

/// What the renderer must repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Redraw {
    /// Repaint everything (mode change)
    pub full: bool,
    /// Repaint the numeric readout
    pub readout: bool,
    /// Bit per [`SwitchId::index`] slot to repaint
    widgets: u8,
}

impl Redraw {
    pub const NONE: Self = Self {
        full: false,
        readout: false,
        widgets: 0,
    };

    pub const FULL: Self = Self {
        full: true,
        readout: true,
        widgets: 0,
    };

    pub const READOUT: Self = Self {
        full: false,
        readout: true,
        widgets: 0,
    };

    /// Request a single widget
    pub const fn widget(id: SwitchId) -> Self {
        Self {
            full: false,
            readout: false,
            widgets: 1 << id.index(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.full && !self.readout && self.widgets == 0
    }

    /// Whether a widget needs repainting (always true on a full redraw)
    pub fn includes(&self, id: SwitchId) -> bool {
        self.full || self.widgets & (1 << id.index()) != 0
    }

    /// Widgets explicitly requested, in slot order
    pub fn widgets(&self) -> impl Iterator<Item = SwitchId> + '_ {
        (0..SWITCH_COUNT)
            .filter(move |i| self.widgets & (1 << i) != 0)
            .filter_map(SwitchId::from_index)
    }
}

impl BitOr for Redraw {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            full: self.full || rhs.full,
            readout: self.readout || rhs.readout,
            widgets: self.widgets | rhs.widgets,
        }
    }
}

impl BitOrAssign for Redraw {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
