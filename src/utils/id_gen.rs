// Copyright (c) 2025 IP Radix Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Time-ordered 64-bit identifiers.
//!
//! Layout, from the most significant bit:
//!
//! ```text
//! 0 | 41 bits millis since epoch | 5 bits datacenter | 5 bits worker | 12 bits sequence
//! ```
//!
//! Each generator is an ordinary value configured with its worker and datacenter
//! ids. Use [`SharedIdGenerator`] when several threads draw from one sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::config::id_gen::IdGenConfig;

/// Thu, 04 Nov 2010 01:42:54 GMT.
pub const DEFAULT_EPOCH_MILLIS: u64 = 1_288_834_974_657;

const WORKER_ID_BITS: u32 = 5;
const DATACENTER_ID_BITS: u32 = 5;
const SEQUENCE_BITS: u32 = 12;

/// Largest accepted worker id.
pub const MAX_WORKER_ID: u64 = (1 << WORKER_ID_BITS) - 1;

/// Largest accepted datacenter id.
pub const MAX_DATACENTER_ID: u64 = (1 << DATACENTER_ID_BITS) - 1;

const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
const DATACENTER_ID_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

/// Errors that can occur while generating identifiers.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum IdGenError {
    /// Worker id outside `0..=max`.
    #[error("Worker id {id} out of range 0..={max}")]
    InvalidWorkerId {
        /// The rejected id.
        id: u64,
        /// The largest accepted id.
        max: u64,
    },

    /// Datacenter id outside `0..=max`.
    #[error("Datacenter id {id} out of range 0..={max}")]
    InvalidDatacenterId {
        /// The rejected id.
        id: u64,
        /// The largest accepted id.
        max: u64,
    },

    /// The clock went backwards since the last id.
    #[error("Clock moved backwards. Refusing to generate id for {millis} milliseconds")]
    ClockMovedBackwards {
        /// How far the clock moved back.
        millis: u64,
    },

    /// The clock reads a time before the configured epoch.
    #[error("Clock reads {now} which is before epoch {epoch}")]
    ClockBeforeEpoch {
        /// Current clock reading.
        now: u64,
        /// Configured epoch.
        epoch: u64,
    },
}

/// Result type for identifier generation.
pub type IdGenResult<T> = Result<T, IdGenError>;

/// Source of wall-clock milliseconds.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// [`Clock`] backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Generator of unique, roughly time-ordered identifiers.
#[derive(Debug)]
pub struct IdGenerator<C: Clock = SystemClock> {
    worker_id: u64,
    datacenter_id: u64,
    epoch: u64,
    sequence: u64,
    last_timestamp: Option<u64>,
    clock: C,
}

impl IdGenerator<SystemClock> {
    /// Creates a generator on the system clock.
    pub fn new(config: &IdGenConfig) -> IdGenResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> IdGenerator<C> {
    /// Creates a generator reading time from `clock`.
    ///
    /// # Errors
    ///
    /// Fails if the worker or datacenter id does not fit in 5 bits.
    pub fn with_clock(config: &IdGenConfig, clock: C) -> IdGenResult<Self> {
        if config.worker_id > MAX_WORKER_ID {
            return Err(IdGenError::InvalidWorkerId {
                id: config.worker_id,
                max: MAX_WORKER_ID,
            });
        }
        if config.datacenter_id > MAX_DATACENTER_ID {
            return Err(IdGenError::InvalidDatacenterId {
                id: config.datacenter_id,
                max: MAX_DATACENTER_ID,
            });
        }

        Ok(Self {
            worker_id: config.worker_id,
            datacenter_id: config.datacenter_id,
            epoch: config.epoch_millis,
            sequence: 0,
            last_timestamp: None,
            clock,
        })
    }

    /// Returns the next identifier.
    ///
    /// Up to 4096 ids are issued per millisecond; past that the call spins until
    /// the clock ticks.
    ///
    /// # Errors
    ///
    /// Fails if the clock moved backwards or reads a time before the epoch.
    pub fn next_id(&mut self) -> IdGenResult<u64> {
        let mut timestamp = self.clock.now_millis();

        match self.last_timestamp {
            Some(last) if timestamp < last => {
                return Err(IdGenError::ClockMovedBackwards {
                    millis: last - timestamp,
                });
            }
            Some(last) if timestamp == last => {
                self.sequence = (self.sequence + 1) & SEQUENCE_MASK;
                if self.sequence == 0 {
                    timestamp = self.til_next_millis(last);
                }
            }
            _ => self.sequence = 0,
        }
        self.last_timestamp = Some(timestamp);

        let elapsed = timestamp
            .checked_sub(self.epoch)
            .ok_or(IdGenError::ClockBeforeEpoch {
                now: timestamp,
                epoch: self.epoch,
            })?;

        Ok((elapsed << TIMESTAMP_SHIFT)
            | (self.datacenter_id << DATACENTER_ID_SHIFT)
            | (self.worker_id << WORKER_ID_SHIFT)
            | self.sequence)
    }

    fn til_next_millis(&self, last: u64) -> u64 {
        let mut timestamp = self.clock.now_millis();
        while timestamp <= last {
            std::hint::spin_loop();
            timestamp = self.clock.now_millis();
        }
        timestamp
    }
}

/// [`IdGenerator`] behind a mutex, for use from several threads.
#[derive(Debug)]
pub struct SharedIdGenerator<C: Clock = SystemClock> {
    inner: Mutex<IdGenerator<C>>,
}

impl<C: Clock> SharedIdGenerator<C> {
    /// Wraps an existing generator.
    pub fn new(generator: IdGenerator<C>) -> Self {
        Self {
            inner: Mutex::new(generator),
        }
    }

    /// Returns the next identifier from the shared sequence.
    pub fn next_id(&self) -> IdGenResult<u64> {
        self.inner.lock().next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn config(worker_id: u64, datacenter_id: u64) -> IdGenConfig {
        IdGenConfig {
            worker_id,
            datacenter_id,
            epoch_millis: 1_000,
        }
    }

    fn fixed_clock(millis: u64) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_now_millis().return_const(millis);
        clock
    }

    #[test]
    fn test_id_layout() {
        let mut generator = IdGenerator::with_clock(&config(3, 5), fixed_clock(1_010)).unwrap();

        let id = generator.next_id().unwrap();
        assert_eq!(id >> TIMESTAMP_SHIFT, 10);
        assert_eq!((id >> DATACENTER_ID_SHIFT) & MAX_DATACENTER_ID, 5);
        assert_eq!((id >> WORKER_ID_SHIFT) & MAX_WORKER_ID, 3);
        assert_eq!(id & SEQUENCE_MASK, 0);

        // Same millisecond bumps the sequence
        let next = generator.next_id().unwrap();
        assert_eq!(next, id + 1);
    }

    #[test]
    fn test_rejects_out_of_range_ids() {
        assert_eq!(
            IdGenerator::with_clock(&config(32, 0), fixed_clock(0)).unwrap_err(),
            IdGenError::InvalidWorkerId { id: 32, max: 31 }
        );
        assert_eq!(
            IdGenerator::with_clock(&config(0, 40), fixed_clock(0)).unwrap_err(),
            IdGenError::InvalidDatacenterId { id: 40, max: 31 }
        );
    }

    #[test]
    fn test_clock_moved_backwards() {
        let readings = Arc::new(AtomicU64::new(0));
        let calls = Arc::clone(&readings);
        let mut clock = MockClock::new();
        clock.expect_now_millis().returning(move || {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => 2_000,
                _ => 1_995,
            }
        });

        let mut generator = IdGenerator::with_clock(&config(0, 0), clock).unwrap();
        generator.next_id().unwrap();
        assert_eq!(
            generator.next_id().unwrap_err(),
            IdGenError::ClockMovedBackwards { millis: 5 }
        );
    }

    #[test]
    fn test_clock_before_epoch() {
        let mut generator = IdGenerator::with_clock(&config(0, 0), fixed_clock(999)).unwrap();
        assert_eq!(
            generator.next_id().unwrap_err(),
            IdGenError::ClockBeforeEpoch { now: 999, epoch: 1_000 }
        );
    }

    #[test]
    fn test_sequence_overflow_waits_for_next_millisecond() {
        // 4096 ids fit in millisecond 1_500; the next reading after overflow ticks over
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let mut clock = MockClock::new();
        clock.expect_now_millis().returning(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n <= SEQUENCE_MASK + 1 {
                1_500
            } else {
                1_501
            }
        });

        let mut generator = IdGenerator::with_clock(&config(0, 0), clock).unwrap();
        let mut ids = HashSet::new();
        for _ in 0..=SEQUENCE_MASK {
            assert!(ids.insert(generator.next_id().unwrap()));
        }

        let rolled = generator.next_id().unwrap();
        assert!(ids.insert(rolled));
        assert_eq!(rolled >> TIMESTAMP_SHIFT, 501);
        assert_eq!(rolled & SEQUENCE_MASK, 0);
    }

    #[test]
    fn test_shared_generator_is_unique_across_threads() {
        const THREAD_COUNT: usize = 4;
        const IDS_PER_THREAD: usize = 500;

        let generator = IdGenerator::new(&IdGenConfig::default()).unwrap();
        let shared = Arc::new(SharedIdGenerator::new(generator));

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    (0..IDS_PER_THREAD)
                        .map(|_| shared.next_id().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(all.len(), THREAD_COUNT * IDS_PER_THREAD);
    }
}
