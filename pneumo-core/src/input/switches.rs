//! Latched panel switches
//!
//! Edge sources (GPIO watchers, touch hit-tests) set a per-switch latch;
//! the main loop takes each latch exactly once. A press arriving while the
//! latch is still set is coalesced into it.
//!
//! An edge arriving within `debounce_ms` of the previously accepted edge of
//! the same switch is dropped. A gate of zero accepts every edge.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Number of physical panel switches
pub const SWITCH_COUNT: usize = 6;

/// Default minimum time between accepted edges of one switch
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Physical switch positions, two columns of three
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchId {
    UpperLeft,
    MiddleLeft,
    LowerLeft,
    UpperRight,
    MiddleRight,
    LowerRight,
}

impl SwitchId {
    pub const ALL: [SwitchId; SWITCH_COUNT] = [
        SwitchId::UpperLeft,
        SwitchId::MiddleLeft,
        SwitchId::LowerLeft,
        SwitchId::UpperRight,
        SwitchId::MiddleRight,
        SwitchId::LowerRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Latch flags for all panel switches
pub struct SwitchBank {
    latched: [AtomicBool; SWITCH_COUNT],
    last_edge_ms: [AtomicU32; SWITCH_COUNT],
    /// Set once `last_edge_ms` holds a real timestamp
    edge_seen: [AtomicBool; SWITCH_COUNT],
    debounce_ms: AtomicU32,
}

impl SwitchBank {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            latched: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
            last_edge_ms: [
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
            ],
            edge_seen: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
            debounce_ms: AtomicU32::new(debounce_ms),
        }
    }

    /// Change the edge gate (applied from config at boot)
    pub fn set_debounce_ms(&self, debounce_ms: u32) {
        self.debounce_ms.store(debounce_ms, Ordering::Relaxed);
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms.load(Ordering::Relaxed)
    }

    /// Record an edge on `id` at `now_ms`
    ///
    /// Returns `true` if the edge was accepted (it may still have been
    /// coalesced into a pending latch).
    pub fn latch(&self, id: SwitchId, now_ms: u32) -> bool {
        let i = id.index();
        let gate = self.debounce_ms();
        if gate > 0 && self.edge_seen[i].load(Ordering::Acquire) {
            let last = self.last_edge_ms[i].load(Ordering::Relaxed);
            if now_ms.wrapping_sub(last) < gate {
                return false;
            }
        }

        self.last_edge_ms[i].store(now_ms, Ordering::Relaxed);
        self.edge_seen[i].store(true, Ordering::Release);
        self.latched[i].store(true, Ordering::Release);
        true
    }

    /// Check a latch without clearing it
    pub fn is_pending(&self, id: SwitchId) -> bool {
        self.latched[id.index()].load(Ordering::Acquire)
    }

    /// True if any latch is set
    pub fn any_pending(&self) -> bool {
        self.latched.iter().any(|l| l.load(Ordering::Acquire))
    }

    /// Clear a latch, returning whether it was set
    pub fn take(&self, id: SwitchId) -> bool {
        self.latched[id.index()].swap(false, Ordering::AcqRel)
    }

    /// Clear every latch
    pub fn clear_all(&self) {
        for latch in &self.latched {
            latch.store(false, Ordering::Release);
        }
    }
}

impl Default for SwitchBank {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_persists_until_taken() {
        let bank = SwitchBank::new(0);
        assert!(bank.latch(SwitchId::UpperLeft, 0));

        assert!(bank.is_pending(SwitchId::UpperLeft));
        assert!(bank.is_pending(SwitchId::UpperLeft));
        assert!(!bank.is_pending(SwitchId::LowerLeft));

        assert!(bank.take(SwitchId::UpperLeft));
        assert!(!bank.take(SwitchId::UpperLeft));
    }

    #[test]
    fn test_presses_coalesce() {
        let bank = SwitchBank::new(0);
        bank.latch(SwitchId::LowerRight, 10);
        bank.latch(SwitchId::LowerRight, 11);
        bank.latch(SwitchId::LowerRight, 12);

        assert!(bank.take(SwitchId::LowerRight));
        assert!(!bank.take(SwitchId::LowerRight));
    }

    #[test]
    fn test_gate_drops_bounces() {
        let bank = SwitchBank::new(50);

        assert!(bank.latch(SwitchId::UpperRight, 1000));
        assert!(bank.take(SwitchId::UpperRight));

        // Bounce within the window
        assert!(!bank.latch(SwitchId::UpperRight, 1020));
        assert!(!bank.is_pending(SwitchId::UpperRight));

        assert!(bank.latch(SwitchId::UpperRight, 1050));
        assert!(bank.is_pending(SwitchId::UpperRight));
    }

    #[test]
    fn test_gate_is_per_switch() {
        let bank = SwitchBank::new(50);
        assert!(bank.latch(SwitchId::UpperLeft, 100));
        assert!(bank.latch(SwitchId::LowerLeft, 101));
    }

    #[test]
    fn test_gate_handles_timer_wrap() {
        let bank = SwitchBank::new(50);
        assert!(bank.latch(SwitchId::MiddleLeft, u32::MAX - 10));
        assert!(!bank.latch(SwitchId::MiddleLeft, 20));
        assert!(bank.latch(SwitchId::MiddleLeft, 60));
    }

    #[test]
    fn test_gate_holds_after_edge_at_timer_max() {
        let bank = SwitchBank::new(50);
        assert!(bank.latch(SwitchId::UpperLeft, u32::MAX));
        assert!(!bank.latch(SwitchId::UpperLeft, u32::MAX.wrapping_add(10)));
        assert!(bank.latch(SwitchId::UpperLeft, u32::MAX.wrapping_add(50)));
    }

    #[test]
    fn test_first_edge_always_accepted() {
        let bank = SwitchBank::new(50);
        assert!(bank.latch(SwitchId::LowerLeft, 0));
        assert!(bank.latch(SwitchId::LowerRight, 10));
    }

    #[test]
    fn test_zero_gate_accepts_every_edge() {
        let bank = SwitchBank::new(0);
        for t in 0..5 {
            assert!(bank.latch(SwitchId::MiddleRight, t));
        }
    }

    #[test]
    fn test_clear_all() {
        let bank = SwitchBank::new(0);
        for id in SwitchId::ALL {
            bank.latch(id, 0);
        }
        assert!(bank.any_pending());

        bank.clear_all();
        assert!(!bank.any_pending());
    }

    #[test]
    fn test_index_round_trip() {
        for id in SwitchId::ALL {
            assert_eq!(SwitchId::from_index(id.index()), Some(id));
        }
        assert_eq!(SwitchId::from_index(SWITCH_COUNT), None);
    }
}
