//! Outbound reward signals and the external accounting interface.
//!
//! The core never computes entitlements. It queues one signal per committed
//! batch; the external engine drains the queue and owns the weighting
//! formula. Signals carry a versioned integrity digest so relayed copies can
//! be checked against the queue.

use serde::{Deserialize, Serialize};

use super::types::{FactionId, SignalSeq, WorldTime};
use super::util::sha256_hex;

pub const PLACEMENT_SIGNAL_V1_PREFIX: &str = "placesig:v1:";

/// One placement signal: queued exactly once per committed batch, never for
/// aborted batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSignal {
    pub seq: SignalSeq,
    pub beneficiary: String,
    pub faction_id: FactionId,
    pub units: u64,
    pub time: WorldTime,
}

impl RewardSignal {
    /// Versioned digest over the signal payload. The format is stable; its
    /// consumer is outside this crate.
    pub fn digest(&self) -> String {
        let payload = format!(
            "{}|{}|{}|{}|{}",
            self.seq, self.beneficiary, self.faction_id, self.units, self.time
        );
        format!("{PLACEMENT_SIGNAL_V1_PREFIX}{}", sha256_hex(payload.as_bytes()))
    }
}

/// Narrow interface of the external reward/gauge engine.
pub trait RewardAccounting {
    /// Reward asset identifier. Queried once when a grid is wired up.
    fn reward_token(&self) -> String;

    /// Binds a grid instance as this engine's active data source.
    fn bind_source(&mut self, source_id: &str);

    /// Ingest one placement signal.
    fn record_placement(&mut self, signal: &RewardSignal);
}

/// In-memory engine recording everything it ingests. Test double for the
/// external collaborator.
#[derive(Debug, Clone, Default)]
pub struct RecordingRewardEngine {
    pub token: String,
    pub bound_sources: Vec<String>,
    pub recorded: Vec<RewardSignal>,
}

impl RecordingRewardEngine {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            bound_sources: Vec::new(),
            recorded: Vec::new(),
        }
    }
}

impl RewardAccounting for RecordingRewardEngine {
    fn reward_token(&self) -> String {
        self.token.clone()
    }

    fn bind_source(&mut self, source_id: &str) {
        self.bound_sources.push(source_id.to_string());
    }

    fn record_placement(&mut self, signal: &RewardSignal) {
        self.recorded.push(signal.clone());
    }
}
