use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::request::RequestStatus;

/// Error type that captures every leave accounting failure.
#[derive(Debug, Error)]
pub enum LeaveError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("ranges overlap or are out of order at {0}")]
    OverlappingRanges(NaiveDate),
    #[error("unknown employee {0}")]
    UnknownEmployee(Uuid),
    #[error("unknown request {0}")]
    UnknownRequest(Uuid),
    #[error("unknown leave type `{0}`")]
    UnknownLeaveType(String),
    #[error("insufficient balance: requested {requested} days, {available} available")]
    InsufficientBalance { requested: u32, available: u32 },
    #[error("ledger invariant violated: {0}")]
    InvariantViolation(String),
    #[error("request is {actual:?}, expected {expected:?}")]
    StaleState {
        expected: RequestStatus,
        actual: RequestStatus,
    },
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("total {new_total} is below the {committed} days already used or reserved")]
    InvalidAdjustment { new_total: u32, committed: u32 },
    #[error("a holiday is already registered on {0}")]
    DuplicateHoliday(NaiveDate),
    #[error("invalid workweek day index {0}, expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWorkweek(u8),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
