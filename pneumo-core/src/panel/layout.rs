//! Panel geometry and touch hit-testing
//!
//! Two columns of buttons below a title and subtitle band. The left column
//! has three rows (top, readout, bottom); the right column has a top and a
//! bottom button. Every slot corresponds to the physical switch at the same
//! position, so a touch latches exactly what a press would.

use crate::input::SwitchId;

/// Margin between the display edge and the buttons
pub const DISPLAY_BORDER: i32 = 5;
/// Button width in pixels
pub const BUTTON_WIDTH: i32 = 40;
/// Button height in pixels
pub const BUTTON_HEIGHT: i32 = 10;
/// Height of the title and subtitle bands (font height)
pub const BAND_HEIGHT: i32 = 18;
/// Gap between the subtitle band and the top row
const BAND_GAP: i32 = 5;

/// Axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x + width,
            y_max: y + height,
        }
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Computed panel geometry for one display size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub title: Rect,
    pub subtitle: Rect,
    slots: [(SwitchId, Rect); 5],
}

impl PanelLayout {
    /// Lay out the panel for a `width` x `height` display
    pub fn new(width: i32, height: i32) -> Self {
        let title = Rect::new(0, 0, width, BAND_HEIGHT);
        let subtitle = Rect::new(0, title.y_max + 1, width, BAND_HEIGHT);

        let left_x = DISPLAY_BORDER;
        let right_x = width - DISPLAY_BORDER - BUTTON_WIDTH;
        let top_y = subtitle.y_max + BAND_GAP;
        let bottom_y = height - DISPLAY_BORDER - BUTTON_HEIGHT;
        let spacing = (bottom_y - (top_y + BUTTON_HEIGHT) - BUTTON_HEIGHT) / 2;
        let middle_y = top_y + BUTTON_HEIGHT + spacing;

        let button = |x, y| Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT);

        Self {
            title,
            subtitle,
            slots: [
                (SwitchId::UpperLeft, button(left_x, top_y)),
                (SwitchId::MiddleLeft, button(left_x, middle_y)),
                (SwitchId::LowerLeft, button(left_x, bottom_y)),
                (SwitchId::UpperRight, button(right_x, top_y)),
                (SwitchId::LowerRight, button(right_x, bottom_y)),
            ],
        }
    }

    /// Rectangle of a slot, if the panel has one at that position
    pub fn slot(&self, id: SwitchId) -> Option<Rect> {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, rect)| *rect)
    }

    /// All slots in position order
    pub fn slots(&self) -> &[(SwitchId, Rect)] {
        &self.slots
    }

    /// Map a touch point to the switch at that position
    pub fn hit_test(&self, x: i32, y: i32) -> Option<SwitchId> {
        self.slots
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| *id)
    }
}

impl Default for PanelLayout {
    /// 128 x 128 panel
    fn default() -> Self {
        Self::new(128, 128)
    }
}
