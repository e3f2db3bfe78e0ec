//! Operator panel
//!
//! The panel has two modes. In each mode the same physical switches (and
//! touch regions) carry different meanings:
//!
//! ```text
//!         Main                    Config
//!   ┌─────────┬─────────┐   ┌─────────┬─────────┐
//!   │ Cycle   │ Config  │   │ +       │ Main    │
//!   ├─────────┼─────────┤   ├─────────┼─────────┤
//!   │ 0000    │         │   │ 0400    │         │
//!   ├─────────┼─────────┤   ├─────────┼─────────┤
//!   │ Inflate │ Deflate │   │ -       │High|Low │
//!   └─────────┴─────────┘   └─────────┴─────────┘
//! ```
//!
//! [`bindings`] maps switches to actions per mode, [`machine`] applies them,
//! [`layout`] maps touch points to switches and [`view`] describes what the
//! renderer should draw.

pub mod bindings;
pub mod layout;
pub mod machine;
pub mod redraw;
pub mod view;

pub use bindings::{action_for, bindings, switch_for, Action, Binding, EditTarget, PanelMode};
pub use layout::{PanelLayout, Rect};
pub use machine::PanelStateMachine;
pub use redraw::Redraw;
pub use view::{PanelView, Widget};
