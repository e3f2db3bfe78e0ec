//! Supported Honeywell SSC sensor parts
//!
//! Each part has a fixed I2C address and a transfer function mapping the
//! 14-bit output counts (10%..90% calibration) onto its pressure range.
//! The counts-to-pressure ratio is a Q16 fixed-point constant computed at
//! compile time, so decoding a sample is one multiply and one shift.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fractional bits of the counts-to-pressure ratio
const RATIO_SHIFT: u32 = 16;

/// Output counts at 10% of supply (minimum pressure)
pub const SSC_MIN_COUNTS: u16 = 0x0666;

/// Output counts at 90% of supply (maximum pressure)
pub const SSC_MAX_COUNTS: u16 = 0x3999;

/// Transfer function of one sensor part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPart {
    /// Honeywell order code
    pub name: &'static str,
    /// 7-bit I2C address
    pub address: u8,
    /// Counts reported at minimum pressure
    pub min_counts: u16,
    /// Counts reported at maximum pressure
    pub max_counts: u16,
    /// Minimum pressure (mpsi)
    pub min_mpsi: i32,
    /// Maximum pressure (mpsi)
    pub max_mpsi: i32,
    /// mpsi per count, Q16, rounded to nearest
    ratio_q16: i64,
}

impl SensorPart {
    /// Describe a part and compute its ratio
    ///
    /// `max_counts` must be greater than `min_counts`.
    pub const fn new(
        name: &'static str,
        address: u8,
        min_counts: u16,
        max_counts: u16,
        min_mpsi: i32,
        max_mpsi: i32,
    ) -> Self {
        let span_counts = (max_counts - min_counts) as i64;
        let span_mpsi = (max_mpsi - min_mpsi) as i64;
        let ratio_q16 = ((span_mpsi << RATIO_SHIFT) + span_counts / 2) / span_counts;

        Self {
            name,
            address,
            min_counts,
            max_counts,
            min_mpsi,
            max_mpsi,
            ratio_q16,
        }
    }

    /// Convert raw counts to pressure in mpsi
    ///
    /// Counts outside `[min_counts, max_counts]` are not clamped; the
    /// linear transfer function is extrapolated.
    pub const fn counts_to_mpsi(&self, counts: u16) -> i32 {
        let delta = counts as i64 - self.min_counts as i64;
        let scaled = delta * self.ratio_q16 + (1 << (RATIO_SHIFT - 1));
        (scaled >> RATIO_SHIFT) as i32 + self.min_mpsi
    }
}

/// SSCDANT030PG2A3: 0..30 psi gauge, DIP, address 0x28
pub const SSCDANT030PG2A3: SensorPart =
    SensorPart::new("SSCDANT030PG2A3", 0x28, SSC_MIN_COUNTS, SSC_MAX_COUNTS, 0, 30_000);

/// SSCMRND030PG2A3: 0..30 psi gauge, SMT, address 0x28
pub const SSCMRND030PG2A3: SensorPart =
    SensorPart::new("SSCMRND030PG2A3", 0x28, SSC_MIN_COUNTS, SSC_MAX_COUNTS, 0, 30_000);

/// SSCMRNN015PA3A3: 0..15 psi absolute, SMT, address 0x38
pub const SSCMRNN015PA3A3: SensorPart =
    SensorPart::new("SSCMRNN015PA3A3", 0x38, SSC_MIN_COUNTS, SSC_MAX_COUNTS, 0, 15_000);

/// Sensor model fitted to the board
///
/// Exactly one model is selected per build/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorModel {
    Sscdant030pg2a3,
    #[default]
    Sscmrnd030pg2a3,
    Sscmrnn015pa3a3,
}

impl SensorModel {
    /// Transfer function for this model
    pub const fn part(self) -> &'static SensorPart {
        match self {
            SensorModel::Sscdant030pg2a3 => &SSCDANT030PG2A3,
            SensorModel::Sscmrnd030pg2a3 => &SSCMRND030PG2A3,
            SensorModel::Sscmrnn015pa3a3 => &SSCMRNN015PA3A3,
        }
    }

    /// Look up a model by order code (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        [
            SensorModel::Sscdant030pg2a3,
            SensorModel::Sscmrnd030pg2a3,
            SensorModel::Sscmrnn015pa3a3,
        ]
        .into_iter()
        .find(|model| model.part().name.eq_ignore_ascii_case(name))
    }
}
