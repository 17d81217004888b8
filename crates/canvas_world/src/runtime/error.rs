//! Error types for the runtime module.

use std::io;

use super::types::{Amount, CellIndex, FactionId};

/// Errors that can occur in world operations.
///
/// Every variant except the persistence ones is caller-correctable: the
/// operation was rejected before any mutation and may be resubmitted fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    InvalidFaction { faction_id: FactionId },
    IndexOutOfRange { index: CellIndex, capacity: u64 },
    InsufficientPayment { required: Amount, paid: Amount },
    InvalidCapacity { requested: u64, current: u64 },
    Unauthorized { account: String },
    MalformedBatch { reason: String },
    JournalMismatch,
    Io(String),
    Serde(String),
}

impl From<serde_json::Error> for WorldError {
    fn from(error: serde_json::Error) -> Self {
        WorldError::Serde(error.to_string())
    }
}

impl From<io::Error> for WorldError {
    fn from(error: io::Error) -> Self {
        WorldError::Io(error.to_string())
    }
}
