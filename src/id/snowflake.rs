//! Snowflake id generator.
//!
//! Layout (most significant first): 1 unused sign bit, 41 bits of
//! milliseconds since 2015-01-01T00:00:00Z, 10 bits of worker id and 12 bits
//! of per-millisecond sequence. Callers of one generator are serialised by
//! a mutex; when the sequence is exhausted within a millisecond the caller
//! spins until the clock advances.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use chrono::Utc;
use parking_lot::Mutex;

use super::IdError;

/// 2015-01-01T00:00:00Z in Unix milliseconds.
pub const EPOCH_MS: i64 = 1_420_070_400_000;

pub const TIMESTAMP_BITS: u32 = 41;
pub const WORKER_BITS: u32 = 10;
pub const SEQUENCE_BITS: u32 = 12;

pub const MAX_WORKER_ID: u32 = (1 << WORKER_BITS) - 1;
const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;
const MAX_TIMESTAMP: i64 = (1 << TIMESTAMP_BITS) - 1;

/// The fields packed into a snowflake id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    /// Unix milliseconds
    pub timestamp_ms: i64,
    pub worker_id: u16,
    pub sequence: u16,
}

#[derive(Debug, Default)]
struct State {
    last_ms: i64,
    sequence: u16,
}

#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: Mutex<State>,
}

impl SnowflakeGenerator {
    pub fn new(worker_id: u32) -> Result<Self, IdError> {
        if worker_id > MAX_WORKER_ID {
            return Err(IdError::InvalidWorkerId {
                worker_id,
                max: MAX_WORKER_ID,
            });
        }
        Ok(Self {
            worker_id: worker_id as u16,
            state: Mutex::new(State {
                last_ms: -1,
                sequence: 0,
            }),
        })
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> Result<i64, IdError> {
        self.next_id_with(|| Utc::now().timestamp_millis() - EPOCH_MS)
    }

    /// Allocate using `clock` as the source of milliseconds since the epoch.
    fn next_id_with(&self, mut clock: impl FnMut() -> i64) -> Result<i64, IdError> {
        let mut state = self.state.lock();

        let mut now = clock();
        if now < state.last_ms {
            return Err(IdError::ClockMovedBackwards {
                last_ms: state.last_ms,
                now_ms: now,
            });
        }

        if now == state.last_ms {
            if state.sequence == MAX_SEQUENCE {
                tracing::trace!(
                    worker_id = self.worker_id,
                    "Sequence exhausted, waiting for next millisecond"
                );
                while now <= state.last_ms {
                    std::hint::spin_loop();
                    now = clock();
                }
                state.sequence = 0;
            } else {
                state.sequence += 1;
            }
        } else {
            state.sequence = 0;
        }

        if !(0..=MAX_TIMESTAMP).contains(&now) {
            return Err(IdError::TimestampOverflow { elapsed_ms: now });
        }

        state.last_ms = now;
        Ok((now << (WORKER_BITS + SEQUENCE_BITS))
            | ((self.worker_id as i64) << SEQUENCE_BITS)
            | state.sequence as i64)
    }

    /// Split an id back into its timestamp, worker and sequence.
    pub fn decompose(id: i64) -> IdParts {
        IdParts {
            timestamp_ms: (id >> (WORKER_BITS + SEQUENCE_BITS)) + EPOCH_MS,
            worker_id: ((id >> SEQUENCE_BITS) & MAX_WORKER_ID as i64) as u16,
            sequence: (id & MAX_SEQUENCE as i64) as u16,
        }
    }
}

static GENERATORS: OnceLock<Mutex<HashMap<u32, Arc<SnowflakeGenerator>>>> = OnceLock::new();

/// Next id from the process-wide generator for `worker_id`.
pub fn snowflake_id(worker_id: u32) -> Result<i64, IdError> {
    let generator = {
        let mut registry = GENERATORS.get_or_init(Default::default).lock();
        match registry.entry(worker_id) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                Arc::clone(entry.insert(Arc::new(SnowflakeGenerator::new(worker_id)?)))
            }
        }
    };
    generator.next_id()
}
