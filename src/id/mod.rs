//! Identifier generation: time-ordered snowflake ids and random GUIDs.

pub mod guid;
pub mod snowflake;

pub use guid::{guid_number, guid_string};
pub use snowflake::{snowflake_id, IdParts, SnowflakeGenerator, MAX_WORKER_ID};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("worker id {worker_id} out of range (max {max})")]
    InvalidWorkerId { worker_id: u32, max: u32 },

    #[error("clock moved backwards: last {last_ms}ms, now {now_ms}ms")]
    ClockMovedBackwards { last_ms: i64, now_ms: i64 },

    #[error("timestamp {elapsed_ms}ms since epoch no longer fits in the id")]
    TimestampOverflow { elapsed_ms: i64 },
}
