//! Honeywell SSC digital pressure sensor (I2C)
//!
//! A sample is fetched with a master read of 2 bytes (pressure) or 4 bytes
//! (pressure + temperature). The sample task arms the shared
//! [`SensorSession`] and addresses the sensor; the I2C interrupt then
//! pulls bytes into the session one at a time and terminates the transfer
//! before the last byte.
//!
//! ```text
//!   byte 0: [S1 S0 P13..P8]   S = status, P = pressure counts
//!   byte 1: [P7 .. P0]
//!   byte 2: [T10 .. T3]       optional temperature, ignored
//!   byte 3: [T2..T0 x x x x x]
//! ```

use pneumo_core::sensor::{Phase, SensorPart, SensorSession};
use pneumo_hal::I2cMasterReceive;

/// Sampler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SscError<E> {
    /// Bus stayed busy for every startup poll
    BusBusyTimeout,
    /// Underlying bus error
    Bus(E),
}

/// SSC sampler bound to one bus and one session
pub struct SscSampler<'a, B> {
    bus: B,
    session: &'a SensorSession,
    part: &'static SensorPart,
    frame_len: usize,
}

impl<'a, B: I2cMasterReceive> SscSampler<'a, B> {
    /// Create a sampler
    ///
    /// # Arguments
    /// - `bus`: Interrupt-driven receive engine the sensor is attached to
    /// - `session`: Session shared with the bus interrupt handler
    /// - `part`: Fitted sensor part (address and transfer function)
    /// - `frame_len`: Bytes per transaction, 2 or 4
    pub fn new(
        bus: B,
        session: &'a SensorSession,
        part: &'static SensorPart,
        frame_len: usize,
    ) -> Self {
        Self {
            bus,
            session,
            part,
            frame_len,
        }
    }

    /// Wait for the bus to go idle before the first transaction
    ///
    /// Polls the busy flag at most `max_polls` times.
    pub fn init(&mut self, max_polls: u32) -> Result<(), SscError<B::Error>> {
        for _ in 0..max_polls {
            if !self.bus.is_bus_busy() {
                return Ok(());
            }
        }
        Err(SscError::BusBusyTimeout)
    }

    /// Start a new sample
    ///
    /// Always re-addresses the sensor. A transaction still in flight is
    /// abandoned and its bytes are discarded. Arming the session and
    /// re-addressing the bus happen in one critical section, so the receive
    /// interrupt never sees a half-restarted transaction.
    pub fn start(&mut self) -> Result<(), SscError<B::Error>> {
        let address = self.part.address;

        critical_section::with(|_| {
            let len = self.session.begin(self.frame_len);
            match self.bus.begin_receive(address, len) {
                Ok(()) => {
                    self.session.addressed();
                    Ok(())
                }
                Err(e) => {
                    self.session.cancel();
                    Err(SscError::Bus(e))
                }
            }
        })
    }

    /// Receive-interrupt entry point; see [`service_interrupt`]
    pub fn on_interrupt(&mut self) -> bool {
        service_interrupt(&mut self.bus, self.session)
    }

    pub fn part(&self) -> &'static SensorPart {
        self.part
    }

    pub fn session(&self) -> &'a SensorSession {
        self.session
    }

    /// Get access to the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }
}

/// Drain received bytes into the session
///
/// Called from the bus receive interrupt. Requests the stop condition once
/// exactly one byte is still owed, and returns `true` if this call
/// completed the frame. Bytes that arrive with no transaction in progress
/// are read and dropped so the receive FIFO never backs up.
pub fn service_interrupt<B: I2cMasterReceive>(bus: &mut B, session: &SensorSession) -> bool {
    let mut completed = false;

    while let Some(byte) = bus.read_byte() {
        if !session.phase().is_receiving() {
            continue;
        }

        match session.on_byte(byte) {
            Phase::Complete => completed = true,
            Phase::AwaitingLastByte if session.bytes_remaining() == 1 => bus.finish(),
            _ => {}
        }
    }

    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pneumo_core::sensor::part::SSCDANT030PG2A3;
    use pneumo_core::sensor::PressureTracker;
    use std::collections::VecDeque;

    /// Scripted receive engine
    #[derive(Default)]
    struct MockBus {
        busy_polls: u32,
        rx: VecDeque<u8>,
        addressed: Vec<(u8, usize)>,
        /// Number of bytes received when `finish` was called, per call
        finishes: Vec<usize>,
        received: usize,
        fail: bool,
    }

    impl MockBus {
        fn deliver(&mut self, bytes: &[u8]) {
            self.rx.extend(bytes);
        }
    }

    impl I2cMasterReceive for MockBus {
        type Error = ();

        fn is_bus_busy(&self) -> bool {
            self.busy_polls > 0
        }

        fn begin_receive(&mut self, address: u8, count: usize) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.addressed.push((address, count));
            // Disabling the controller flushes its FIFOs
            self.rx.clear();
            self.received = 0;
            Ok(())
        }

        fn read_byte(&mut self) -> Option<u8> {
            let byte = self.rx.pop_front()?;
            self.received += 1;
            Some(byte)
        }

        fn finish(&mut self) {
            self.finishes.push(self.received);
        }
    }

    /// Bus that goes idle after a fixed number of polls
    struct SlowBus {
        busy_for: core::cell::Cell<u32>,
    }

    impl I2cMasterReceive for SlowBus {
        type Error = ();

        fn is_bus_busy(&self) -> bool {
            let left = self.busy_for.get();
            self.busy_for.set(left.saturating_sub(1));
            left > 0
        }

        fn begin_receive(&mut self, _: u8, _: usize) -> Result<(), ()> {
            Ok(())
        }

        fn read_byte(&mut self) -> Option<u8> {
            None
        }

        fn finish(&mut self) {}
    }

    #[test]
    fn test_init_succeeds_on_idle_bus() {
        let session = SensorSession::new();
        let mut sampler = SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, 2);
        assert_eq!(sampler.init(10), Ok(()));
    }

    #[test]
    fn test_init_times_out_on_stuck_bus() {
        let session = SensorSession::new();
        let bus = MockBus {
            busy_polls: 1,
            ..Default::default()
        };
        let mut sampler = SscSampler::new(bus, &session, &SSCDANT030PG2A3, 2);
        assert_eq!(sampler.init(100), Err(SscError::BusBusyTimeout));
    }

    #[test]
    fn test_init_waits_for_bus_to_clear() {
        let session = SensorSession::new();
        let bus = SlowBus {
            busy_for: core::cell::Cell::new(5),
        };
        let mut sampler = SscSampler::new(bus, &session, &SSCDANT030PG2A3, 2);
        assert_eq!(sampler.init(5), Err(SscError::BusBusyTimeout));
        assert_eq!(sampler.init(5), Ok(()));
    }

    #[test]
    fn test_two_byte_sample() {
        let session = SensorSession::new();
        let mut sampler = SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, 2);

        sampler.start().unwrap();
        assert_eq!(sampler.bus().addressed, vec![(0x28, 2)]);

        sampler.bus.deliver(&[0x39]);
        assert!(!sampler.on_interrupt());
        sampler.bus.deliver(&[0x99]);
        assert!(sampler.on_interrupt());

        let frame = session.take().unwrap();
        let mut tracker = PressureTracker::new(&SSCDANT030PG2A3);
        let reading = tracker.ingest(&frame);
        assert!(reading.valid);
        assert_eq!(reading.value_mpsi, 30_000);
    }

    #[test]
    fn test_stop_issued_once_before_last_byte() {
        for len in [2usize, 4] {
            let session = SensorSession::new();
            let mut sampler =
                SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, len);
            sampler.start().unwrap();

            // One byte per interrupt
            for i in 0..len {
                sampler.bus.deliver(&[i as u8]);
                sampler.on_interrupt();
            }

            assert_eq!(sampler.bus().finishes, vec![len - 1], "len {len}");
        }
    }

    #[test]
    fn test_burst_in_one_interrupt() {
        let session = SensorSession::new();
        let mut sampler = SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, 4);
        sampler.start().unwrap();

        sampler.bus.deliver(&[1, 2, 3, 4]);
        assert!(sampler.on_interrupt());
        assert_eq!(sampler.bus().finishes, vec![3]);
        assert_eq!(session.take().unwrap().bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_restart_abandons_partial_sample() {
        let session = SensorSession::new();
        let mut sampler = SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, 2);

        sampler.start().unwrap();
        sampler.bus.deliver(&[0xAA]);
        sampler.on_interrupt();

        sampler.start().unwrap();
        assert_eq!(sampler.bus().addressed.len(), 2);
        sampler.bus.deliver(&[0x01, 0x02]);
        assert!(sampler.on_interrupt());
        assert_eq!(session.take().unwrap().bytes(), &[0x01, 0x02]);
    }

    #[test]
    fn test_stray_bytes_are_drained() {
        let session = SensorSession::new();
        let mut bus = MockBus::default();
        bus.deliver(&[0x55, 0x66]);

        assert!(!service_interrupt(&mut bus, &session));
        assert!(bus.rx.is_empty());
        assert!(session.take().is_none());
    }

    #[test]
    fn test_bus_error_propagates() {
        let session = SensorSession::new();
        let bus = MockBus {
            fail: true,
            ..Default::default()
        };
        let mut sampler = SscSampler::new(bus, &session, &SSCDANT030PG2A3, 2);
        assert_eq!(sampler.start(), Err(SscError::Bus(())));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_accepts_bytes_once_addressed() {
        let session = SensorSession::new();
        let mut sampler = SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, 2);

        sampler.start().unwrap();
        assert_eq!(session.phase(), Phase::AwaitingFirstByte);
    }

    #[test]
    fn test_leftover_byte_before_readdress_is_dropped() {
        let session = SensorSession::new();
        let mut bus = MockBus::default();

        // Byte of an abandoned read serviced after arming but before the
        // new read was issued
        bus.deliver(&[0xEE]);
        let len = session.begin(2);
        assert!(!service_interrupt(&mut bus, &session));
        assert!(bus.finishes.is_empty());

        bus.begin_receive(0x28, len).unwrap();
        assert!(session.addressed());

        bus.deliver(&[0x01]);
        assert!(!service_interrupt(&mut bus, &session));
        bus.deliver(&[0x02]);
        assert!(service_interrupt(&mut bus, &session));

        assert_eq!(session.take().unwrap().bytes(), &[0x01, 0x02]);
        assert_eq!(bus.finishes, vec![1]);
    }

    #[test]
    fn test_restart_flushes_pending_bytes() {
        let session = SensorSession::new();
        let mut sampler = SscSampler::new(MockBus::default(), &session, &SSCDANT030PG2A3, 2);

        sampler.bus.deliver(&[0xEE]);
        sampler.start().unwrap();
        sampler.bus.deliver(&[0x01, 0x02]);

        assert!(sampler.on_interrupt());
        assert_eq!(session.take().unwrap().bytes(), &[0x01, 0x02]);
        assert_eq!(sampler.bus().finishes, vec![1]);
    }
}
