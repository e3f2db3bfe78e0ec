//! Log-backed panel renderer
//!
//! Paints a [`PanelView`] by logging the parts a [`Redraw`] asks for.

use defmt::*;

use pneumo_core::panel::view::READOUT_SLOT;
use pneumo_core::panel::{PanelView, Redraw};

/// Renderer that writes panel updates to the defmt log
pub struct LogRenderer {
    /// Number of repaints issued
    frames: u32,
}

impl LogRenderer {
    pub const fn new() -> Self {
        Self { frames: 0 }
    }

    /// Repaint the requested parts of `view`
    pub fn render(&mut self, view: &PanelView, redraw: Redraw) {
        if redraw.is_empty() {
            return;
        }
        self.frames = self.frames.wrapping_add(1);

        if redraw.full {
            info!("[{}] ── {} ── {}", self.frames, view.title, view.subtitle);
            for widget in &view.widgets {
                self.paint_widget(widget.slot, widget.label, widget.highlighted);
            }
        } else {
            for slot in redraw.widgets() {
                if let Some(widget) = view.widget(slot) {
                    self.paint_widget(widget.slot, widget.label, widget.highlighted);
                }
            }
        }

        if redraw.readout {
            info!("[{}] {}: {}", self.frames, READOUT_SLOT, view.readout.as_str());
        }
    }

    fn paint_widget(&self, slot: pneumo_core::input::SwitchId, label: &str, highlighted: bool) {
        if highlighted {
            info!("[{}] {}: <{}>", self.frames, slot, label);
        } else {
            info!("[{}] {}: {}", self.frames, slot, label);
        }
    }
}
