//! Runtime module - the grid execution engine.
//!
//! This module contains the World struct and all supporting types for:
//! - Grid state management and atomic batch placement
//! - Faction registry and bulk metadata administration
//! - Fee settlement into the treasury account
//! - Reward signal queueing toward the external accounting engine
//! - Event journaling, snapshot persistence, and recovery
//! - Batched read aggregation

mod aggregator;
mod audit;
mod bridge;
mod error;
mod events;
mod factions;
mod grid;
mod pricing;
mod shared;
mod snapshot;
mod state;
mod types;
mod util;
mod world;

#[cfg(test)]
mod tests;

// Re-export all public types

// Types
pub use types::{
    Amount, CellIndex, ColorCode, FactionId, SignalSeq, WorldEventId, WorldTime, NO_FACTION,
};

// Error
pub use error::WorldError;

// Grid
pub use grid::{Cell, CellSnapshot, BLANK_COLOR, DEFAULT_GRID_CAPACITY};

// Factions
pub use factions::{first_faction_of_owner, FactionRecord};

// Pricing
pub use pricing::{batch_fee, PricingConfig, SettlementRecord, DEFAULT_UNIT_PRICE, TOKEN_UNIT};

// Reward bridge
pub use bridge::{
    RecordingRewardEngine, RewardAccounting, RewardSignal, PLACEMENT_SIGNAL_V1_PREFIX,
};

// Events
pub use events::{CellWrite, DomainEvent, WorldEvent, WorldEventBody};

// State
pub use state::{AccountPlacementStats, WorldState};

// World
pub use world::{World, WorldConfig};

// Snapshot
pub use snapshot::{Journal, RollbackEvent, Snapshot};

// Audit
pub use audit::{AuditEventKind, AuditFilter};

// Read aggregation
pub use aggregator::{AccountStateView, FactionView, GaugeView};

// Concurrency shell
pub use shared::SharedWorld;

// Utilities
pub use util::{hash_json, sha256_hex};
