//! Domain event and journal envelope types.

use serde::{Deserialize, Serialize};

use super::audit::AuditEventKind;
use super::bridge::RewardSignal;
use super::pricing::SettlementRecord;
use super::snapshot::RollbackEvent;
use super::types::{Amount, CellIndex, ColorCode, FactionId, WorldEventId, WorldTime};

/// One cell write inside a committed batch. Later writes to the same index
/// within a batch win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    pub index: CellIndex,
    pub color: ColorCode,
}

/// Events recording every committed state change. Applying a journal of
/// these over a snapshot reconstructs the exact world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    FactionRegistered {
        faction_id: FactionId,
        owner: String,
        name: String,
    },
    FactionMetadataUpserted {
        faction_id: FactionId,
        owner: String,
        name: String,
    },
    UnitPriceSet {
        old_price: Amount,
        new_price: Amount,
    },
    CapacityGrown {
        old_capacity: u64,
        new_capacity: u64,
    },
    AccountCredited {
        account: String,
        amount: Amount,
    },
    BatchPlaced {
        payer: String,
        beneficiary: String,
        faction_id: FactionId,
        writes: Vec<CellWrite>,
        settlement: SettlementRecord,
    },
}

/// A world event with full metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub id: WorldEventId,
    pub time: WorldTime,
    pub body: WorldEventBody,
}

impl WorldEvent {
    pub fn audit_kind(&self) -> AuditEventKind {
        match self.body {
            WorldEventBody::Domain(_) => AuditEventKind::Domain,
            WorldEventBody::SignalQueued(_) => AuditEventKind::SignalQueued,
            WorldEventBody::RollbackApplied(_) => AuditEventKind::RollbackApplied,
        }
    }
}

/// The body/payload of a world event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum WorldEventBody {
    Domain(DomainEvent),
    SignalQueued(RewardSignal),
    RollbackApplied(RollbackEvent),
}
