//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod controller;
pub mod sample;
pub mod switches;

pub use controller::{controller_task, Valves};
pub use sample::{sample_task, SscBus};
pub use switches::switch_task;
