//! Interrupt-to-main handoff for one sensor transaction
//!
//! The session is written by exactly one interrupt handler (the I2C receive
//! interrupt) and consumed by exactly one task. All state is atomic, so a
//! `static SensorSession` needs no lock:
//!
//! ```text
//!   sample task            I2C ISR                 controller task
//!   ───────────            ───────                 ───────────────
//!   begin(len) ──────▶ Addressing (bytes dropped)
//!   addressed() ─────▶ AwaitingFirstByte
//!                      on_byte ─▶ AwaitingLastByte
//!                      on_byte ─▶ Complete ──────▶ take() ─▶ Idle
//! ```
//!
//! Received bytes are stored before the phase is published with `Release`
//! and read only after `Complete` has been observed with `Acquire`.

use portable_atomic::{AtomicU8, Ordering};

/// Largest supported transaction (pressure + 16-bit temperature)
pub const MAX_FRAME_LEN: usize = 4;

/// Smallest useful transaction (pressure only)
pub const MIN_FRAME_LEN: usize = 2;

/// Progress of the current transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Phase {
    /// No transaction in flight
    Idle = 0,
    /// Addressed, nothing received yet
    AwaitingFirstByte = 1,
    /// At least one byte received, more outstanding
    AwaitingLastByte = 2,
    /// All bytes received, frame ready for the consumer
    Complete = 3,
    /// Armed, but the bus has not been re-addressed yet
    Addressing = 4,
}

impl Phase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Phase::AwaitingFirstByte,
            2 => Phase::AwaitingLastByte,
            3 => Phase::Complete,
            4 => Phase::Addressing,
            _ => Phase::Idle,
        }
    }

    /// True while the bus still owes bytes
    pub const fn is_receiving(self) -> bool {
        matches!(self, Phase::AwaitingFirstByte | Phase::AwaitingLastByte)
    }
}

/// Bytes of one completed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    len: u8,
}

impl Frame {
    /// Build a frame from received bytes, truncated to [`MAX_FRAME_LEN`]
    pub fn from_slice(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_FRAME_LEN);
        let mut buf = [0; MAX_FRAME_LEN];
        buf[..len].copy_from_slice(&bytes[..len]);
        Self { buf, len: len as u8 }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Lock-free single-producer/single-consumer transaction state
pub struct SensorSession {
    phase: AtomicU8,
    expected: AtomicU8,
    received: AtomicU8,
    buf: [AtomicU8; MAX_FRAME_LEN],
}

impl SensorSession {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Idle as u8),
            expected: AtomicU8::new(0),
            received: AtomicU8::new(0),
            buf: [
                AtomicU8::new(0),
                AtomicU8::new(0),
                AtomicU8::new(0),
                AtomicU8::new(0),
            ],
        }
    }

    /// Arm the session for a new transaction of `len` bytes
    ///
    /// Any transaction in flight is abandoned. Bytes are dropped until
    /// [`addressed`](Self::addressed) confirms the bus was re-addressed, so
    /// leftovers of the old transaction never land in the new frame. `len`
    /// is clamped to `MIN_FRAME_LEN..=MAX_FRAME_LEN`. Returns the length
    /// actually armed.
    pub fn begin(&self, len: usize) -> usize {
        let len = len.clamp(MIN_FRAME_LEN, MAX_FRAME_LEN);

        // Park the ISR before touching the counters
        self.phase.store(Phase::Idle as u8, Ordering::Release);
        self.expected.store(len as u8, Ordering::Relaxed);
        self.received.store(0, Ordering::Relaxed);
        self.phase.store(Phase::Addressing as u8, Ordering::Release);

        len
    }

    /// Start accepting bytes once the new read has been issued
    ///
    /// Returns `false` if the session was not waiting for the address
    /// phase (never armed, or superseded).
    pub fn addressed(&self) -> bool {
        self.phase
            .compare_exchange(
                Phase::Addressing as u8,
                Phase::AwaitingFirstByte as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Abandon the current transaction
    pub fn cancel(&self) {
        self.phase.store(Phase::Idle as u8, Ordering::Release);
    }

    /// Record one byte delivered by the bus interrupt
    ///
    /// Bytes arriving while no transaction is being received (idle,
    /// addressing, or after completion) are ignored. Returns the phase after the byte.
    pub fn on_byte(&self, byte: u8) -> Phase {
        let phase = self.phase();
        if !phase.is_receiving() {
            return phase;
        }

        let expected = self.expected.load(Ordering::Relaxed);
        let index = self.received.load(Ordering::Relaxed);
        if let Some(slot) = self.buf.get(index as usize) {
            slot.store(byte, Ordering::Relaxed);
        }

        let received = index.saturating_add(1);
        self.received.store(received, Ordering::Relaxed);

        let next = if received >= expected {
            Phase::Complete
        } else {
            Phase::AwaitingLastByte
        };
        self.phase.store(next as u8, Ordering::Release);
        next
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Bytes still owed by the bus for the transaction in flight
    pub fn bytes_remaining(&self) -> usize {
        if !self.phase().is_receiving() {
            return 0;
        }
        let expected = self.expected.load(Ordering::Relaxed);
        let received = self.received.load(Ordering::Relaxed);
        expected.saturating_sub(received) as usize
    }

    /// Take the completed frame, returning the session to idle
    ///
    /// Returns `None` unless a frame is complete; a frame is handed out at
    /// most once.
    pub fn take(&self) -> Option<Frame> {
        if self.phase() != Phase::Complete {
            return None;
        }

        let len = (self.expected.load(Ordering::Relaxed) as usize).min(MAX_FRAME_LEN);
        let mut buf = [0; MAX_FRAME_LEN];
        for (dst, src) in buf.iter_mut().zip(&self.buf).take(len) {
            *dst = src.load(Ordering::Relaxed);
        }

        // A superseding begin() between the check and here invalidates the copy
        self.phase
            .compare_exchange(
                Phase::Complete as u8,
                Phase::Idle as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()?;

        Some(Frame {
            buf,
            len: len as u8,
        })
    }
}

impl Default for SensorSession {
    fn default() -> Self {
        Self::new()
    }
}
