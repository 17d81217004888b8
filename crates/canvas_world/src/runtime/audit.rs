//! Audit types for event filtering. The journal is the observability
//! surface; there is no separate logging stream.

use serde::{Deserialize, Serialize};

use super::events::{DomainEvent, WorldEvent, WorldEventBody};
use super::types::{FactionId, WorldEventId, WorldTime};

/// Kinds of events for audit purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    Domain,
    SignalQueued,
    RollbackApplied,
}

/// Filter criteria for audit events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AuditFilter {
    pub kinds: Option<Vec<AuditEventKind>>,
    /// Matches events touching this account: payer, beneficiary, or
    /// credited account.
    pub account: Option<String>,
    pub faction_id: Option<FactionId>,
    pub from_time: Option<WorldTime>,
    pub to_time: Option<WorldTime>,
    pub from_event_id: Option<WorldEventId>,
    pub to_event_id: Option<WorldEventId>,
}

impl AuditFilter {
    pub fn matches(&self, event: &WorldEvent) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&event.audit_kind()) {
                return false;
            }
        }
        if let Some(from_time) = self.from_time {
            if event.time < from_time {
                return false;
            }
        }
        if let Some(to_time) = self.to_time {
            if event.time > to_time {
                return false;
            }
        }
        if let Some(from_event_id) = self.from_event_id {
            if event.id < from_event_id {
                return false;
            }
        }
        if let Some(to_event_id) = self.to_event_id {
            if event.id > to_event_id {
                return false;
            }
        }
        if let Some(account) = &self.account {
            if !event_touches_account(event, account) {
                return false;
            }
        }
        if let Some(faction_id) = self.faction_id {
            if event_faction(event) != Some(faction_id) {
                return false;
            }
        }
        true
    }
}

fn event_touches_account(event: &WorldEvent, account: &str) -> bool {
    match &event.body {
        WorldEventBody::Domain(domain) => match domain {
            DomainEvent::FactionRegistered { owner, .. }
            | DomainEvent::FactionMetadataUpserted { owner, .. } => owner == account,
            DomainEvent::AccountCredited { account: credited, .. } => credited == account,
            DomainEvent::BatchPlaced {
                payer, beneficiary, ..
            } => payer == account || beneficiary == account,
            DomainEvent::UnitPriceSet { .. } | DomainEvent::CapacityGrown { .. } => false,
        },
        WorldEventBody::SignalQueued(signal) => signal.beneficiary == account,
        WorldEventBody::RollbackApplied(_) => false,
    }
}

fn event_faction(event: &WorldEvent) -> Option<FactionId> {
    match &event.body {
        WorldEventBody::Domain(domain) => match domain {
            DomainEvent::FactionRegistered { faction_id, .. }
            | DomainEvent::FactionMetadataUpserted { faction_id, .. }
            | DomainEvent::BatchPlaced { faction_id, .. } => Some(*faction_id),
            _ => None,
        },
        WorldEventBody::SignalQueued(signal) => Some(signal.faction_id),
        WorldEventBody::RollbackApplied(_) => None,
    }
}
