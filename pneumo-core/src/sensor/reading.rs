//! SSC frame decode and last-valid-value tracking

use super::part::SensorPart;
use super::session::Frame;

/// Mask of the count bits in the first frame byte
const COUNT_HIGH_MASK: u8 = 0x3F;

/// Sensor status code (top two bits of the first byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Valid, fresh sample
    Normal,
    /// Device is in command mode
    CommandMode,
    /// Sample has already been fetched since the last measurement cycle
    Stale,
    /// Diagnostic condition (e.g. bridge fault)
    Diagnostic,
}

impl Status {
    /// Decode the two status bits
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Status::Normal,
            0b01 => Status::CommandMode,
            0b10 => Status::Stale,
            _ => Status::Diagnostic,
        }
    }

    pub const fn is_normal(self) -> bool {
        matches!(self, Status::Normal)
    }
}

/// One decoded sensor sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureReading {
    /// 14-bit bridge output counts
    pub raw_counts: u16,
    /// Status code reported with the sample
    pub status: Status,
    /// Pressure in mpsi; only meaningful when `valid`
    pub value_mpsi: i32,
    /// True when the status was normal
    pub valid: bool,
}

/// Decode the first two bytes of an SSC frame
///
/// Samples with a non-normal status are reported with `valid == false` and
/// a zero value; callers must not use their value.
pub fn decode(part: &SensorPart, first: u8, second: u8) -> PressureReading {
    let status = Status::from_bits(first >> 6);
    let raw_counts = (u16::from(first & COUNT_HIGH_MASK) << 8) | u16::from(second);
    let valid = status.is_normal();
    let value_mpsi = if valid { part.counts_to_mpsi(raw_counts) } else { 0 };

    PressureReading {
        raw_counts,
        status,
        value_mpsi,
        valid,
    }
}

/// Tracks the most recent valid pressure
///
/// Invalid samples are counted and dropped without touching the stored
/// value.
#[derive(Debug, Clone)]
pub struct PressureTracker {
    part: &'static SensorPart,
    last_mpsi: i32,
    valid_count: u32,
    discarded_count: u32,
}

impl PressureTracker {
    /// Create a tracker; `last_value` reads the part's minimum pressure
    /// until the first valid sample arrives
    pub const fn new(part: &'static SensorPart) -> Self {
        Self {
            part,
            last_mpsi: part.min_mpsi,
            valid_count: 0,
            discarded_count: 0,
        }
    }

    /// Decode a completed frame and update the stored value if valid
    ///
    /// Trailing temperature bytes of 3- and 4-byte frames are ignored.
    pub fn ingest(&mut self, frame: &Frame) -> PressureReading {
        let bytes = frame.bytes();
        let first = bytes.first().copied().unwrap_or(0xFF);
        let second = bytes.get(1).copied().unwrap_or(0xFF);
        let reading = decode(self.part, first, second);

        if reading.valid {
            self.last_mpsi = reading.value_mpsi;
            self.valid_count = self.valid_count.wrapping_add(1);
        } else {
            self.discarded_count = self.discarded_count.wrapping_add(1);
        }

        reading
    }

    /// Most recent valid pressure in mpsi
    #[inline]
    pub fn last_value(&self) -> i32 {
        self.last_mpsi
    }

    pub fn part(&self) -> &'static SensorPart {
        self.part
    }

    /// Number of valid samples decoded
    pub fn valid_count(&self) -> u32 {
        self.valid_count
    }

    /// Number of samples dropped for a non-normal status
    pub fn discarded_count(&self) -> u32 {
        self.discarded_count
    }
}
