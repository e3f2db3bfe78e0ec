//! Test doubles shared by the core test modules

use crate::traits::Actuator;

/// In-memory actuator with the same interlock as the valve pair driver
#[derive(Debug, Default)]
pub struct MockActuator {
    pub inflating: bool,
    pub deflating: bool,
    /// Every accepted output change, in order
    pub log: Vec<(&'static str, bool)>,
}

impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for MockActuator {
    fn set_inflate(&mut self, on: bool) -> bool {
        if on && self.deflating {
            return false;
        }
        self.inflating = on;
        self.log.push(("inflate", on));
        true
    }

    fn set_deflate(&mut self, on: bool) -> bool {
        if on && self.inflating {
            return false;
        }
        self.deflating = on;
        self.log.push(("deflate", on));
        true
    }

    fn is_inflating(&self) -> bool {
        self.inflating
    }

    fn is_deflating(&self) -> bool {
        self.deflating
    }
}
