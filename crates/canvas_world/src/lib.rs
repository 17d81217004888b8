pub mod runtime;

pub use runtime::{
    batch_fee, first_faction_of_owner, hash_json, sha256_hex, AccountPlacementStats,
    AccountStateView, Amount, AuditEventKind, AuditFilter, Cell, CellIndex, CellSnapshot,
    CellWrite, ColorCode, DomainEvent, FactionId, FactionRecord, FactionView, GaugeView, Journal,
    PricingConfig, RecordingRewardEngine, RewardAccounting, RewardSignal, RollbackEvent,
    SettlementRecord, SharedWorld, SignalSeq, Snapshot, World, WorldConfig, WorldError,
    WorldEvent, WorldEventBody, WorldEventId, WorldState, WorldTime, BLANK_COLOR,
    DEFAULT_GRID_CAPACITY, DEFAULT_UNIT_PRICE, NO_FACTION, PLACEMENT_SIGNAL_V1_PREFIX, TOKEN_UNIT,
};
