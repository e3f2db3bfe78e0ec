//! Operator setpoints
//!
//! The pair always satisfies `0 <= low <= high`. Edits that would break
//! that ordering are clamped to the paired bound, and an edit that cannot
//! move the bound at all is a no-op.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default low threshold (mpsi)
pub const DEFAULT_LOW_MPSI: i32 = 100;

/// Default high threshold (mpsi)
pub const DEFAULT_HIGH_MPSI: i32 = 400;

/// Setpoint construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetpointError {
    /// A bound is below zero
    Negative,
    /// Low threshold exceeds high threshold
    Inverted,
}

/// Which threshold an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bound {
    High,
    Low,
}

impl Bound {
    /// The other bound
    pub const fn toggled(self) -> Self {
        match self {
            Bound::High => Bound::Low,
            Bound::Low => Bound::High,
        }
    }
}

/// Low/high pressure band (mpsi)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Setpoints {
    low: i32,
    high: i32,
}

impl Default for Setpoints {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_MPSI,
            high: DEFAULT_HIGH_MPSI,
        }
    }
}

impl Setpoints {
    /// Create a validated band
    pub fn new(low: i32, high: i32) -> Result<Self, SetpointError> {
        if low < 0 || high < 0 {
            return Err(SetpointError::Negative);
        }
        if low > high {
            return Err(SetpointError::Inverted);
        }
        Ok(Self { low, high })
    }

    #[inline]
    pub fn low(&self) -> i32 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> i32 {
        self.high
    }

    /// Value of one bound
    pub fn get(&self, bound: Bound) -> i32 {
        match bound {
            Bound::High => self.high,
            Bound::Low => self.low,
        }
    }

    /// Raise a bound by up to `step`
    ///
    /// `high` is unbounded above; `low` stops at `high`. Returns `true` if
    /// the bound moved.
    pub fn increment(&mut self, bound: Bound, step: i32) -> bool {
        let step = step.max(1);
        match bound {
            Bound::High => {
                let next = self.high.saturating_add(step);
                let moved = next != self.high;
                self.high = next;
                moved
            }
            Bound::Low => {
                if self.low >= self.high {
                    return false;
                }
                self.low = self.low.saturating_add(step).min(self.high);
                true
            }
        }
    }

    /// Lower a bound by up to `step`
    ///
    /// `high` stops at `low`; `low` stops at zero. Returns `true` if the
    /// bound moved.
    pub fn decrement(&mut self, bound: Bound, step: i32) -> bool {
        let step = step.max(1);
        match bound {
            Bound::High => {
                if self.high <= 0 || self.high <= self.low {
                    return false;
                }
                self.high = (self.high - step).max(self.low);
                true
            }
            Bound::Low => {
                if self.low <= 0 {
                    return false;
                }
                self.low = (self.low - step).max(0);
                true
            }
        }
    }
}
