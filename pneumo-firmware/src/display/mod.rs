//! Panel output
//!
//! The panel graphics driver is not part of this firmware; the renderer
//! logs the panel contents over RTT instead.

pub mod renderer;

pub use renderer::LogRenderer;
