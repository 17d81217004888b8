//! The World struct - core grid engine.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use super::audit::AuditFilter;
use super::bridge::{RewardAccounting, RewardSignal};
use super::error::WorldError;
use super::events::{CellWrite, DomainEvent, WorldEvent, WorldEventBody};
use super::factions::{first_faction_of_owner, FactionRecord};
use super::grid::{CellSnapshot, DEFAULT_GRID_CAPACITY};
use super::pricing::{batch_fee, SettlementRecord, DEFAULT_UNIT_PRICE};
use super::snapshot::{Journal, RollbackEvent, Snapshot};
use super::state::WorldState;
use super::types::{Amount, CellIndex, ColorCode, FactionId, SignalSeq, WorldEventId, NO_FACTION};
use super::util::{hash_json, write_json_to_path};

/// Construction-time wiring for one grid instance. The vault provisioner is
/// a passive dependency: recorded here, never called on the placement path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub owner: String,
    pub treasury: String,
    pub reward_token: String,
    pub vault_provisioner: String,
    pub initial_capacity: u64,
    pub unit_price: Amount,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            owner: "protocol:owner".to_string(),
            treasury: "protocol:treasury".to_string(),
            reward_token: "reward-token:default".to_string(),
            vault_provisioner: "protocol:vault-provisioner".to_string(),
            initial_capacity: DEFAULT_GRID_CAPACITY,
            unit_price: DEFAULT_UNIT_PRICE,
        }
    }
}

/// The grid engine. All mutating operations validate in full against the
/// current state, then commit as journal events; a rejected operation leaves
/// state, journal, and signal queue untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    config: WorldConfig,
    state: WorldState,
    journal: Journal,
    next_event_id: WorldEventId,
    next_signal_seq: SignalSeq,
    pending_signals: VecDeque<RewardSignal>,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        let mut state = WorldState::default();
        state.capacity = config.initial_capacity;
        state.pricing.unit_price = config.unit_price;
        Self {
            config,
            state,
            journal: Journal::new(),
            next_event_id: 1,
            next_signal_seq: 1,
            pending_signals: VecDeque::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn capacity(&self) -> u64 {
        self.state.capacity
    }

    pub fn unit_price(&self) -> Amount {
        self.state.pricing.unit_price
    }

    pub fn balance_of(&self, account: &str) -> Amount {
        self.state.balance_of(account)
    }

    pub fn treasury_balance(&self) -> Amount {
        self.state.balance_of(&self.config.treasury)
    }

    pub fn faction(&self, faction_id: FactionId) -> Option<&FactionRecord> {
        if faction_id == NO_FACTION {
            return None;
        }
        self.state.factions.get(&faction_id)
    }

    pub fn faction_count(&self) -> u64 {
        self.state.factions.len() as u64
    }

    pub fn pending_signals_len(&self) -> usize {
        self.pending_signals.len()
    }

    /// Advances world time by one tick. The host calls this once per
    /// committed block/slot; event and cell timestamps derive from it.
    pub fn tick(&mut self) {
        self.state.time = self.state.time.saturating_add(1);
    }

    // -------------------------------------------------------------------------
    // Faction registry
    // -------------------------------------------------------------------------

    pub fn register_faction(
        &mut self,
        caller: &str,
        owner: impl Into<String>,
    ) -> Result<FactionId, WorldError> {
        self.require_owner(caller)?;
        let faction_id = self.state.next_faction_id;
        self.append_event(WorldEventBody::Domain(DomainEvent::FactionRegistered {
            faction_id,
            owner: owner.into(),
            name: String::new(),
        }))?;
        Ok(faction_id)
    }

    /// Bulk upsert of parallel owner/name lists. Each pair updates the first
    /// registered faction with that owner or registers a new one.
    pub fn set_factions(
        &mut self,
        caller: &str,
        owners: Vec<String>,
        names: Vec<String>,
    ) -> Result<Vec<FactionId>, WorldError> {
        self.require_owner(caller)?;
        if owners.is_empty() {
            return Err(WorldError::MalformedBatch {
                reason: "empty faction metadata upsert".to_string(),
            });
        }
        if owners.len() != names.len() {
            return Err(WorldError::MalformedBatch {
                reason: format!(
                    "owners/names length mismatch: {} vs {}",
                    owners.len(),
                    names.len()
                ),
            });
        }

        let mut touched = Vec::with_capacity(owners.len());
        for (owner, name) in owners.into_iter().zip(names) {
            let faction_id = first_faction_of_owner(&self.state.factions, &owner)
                .unwrap_or(self.state.next_faction_id);
            self.append_event(WorldEventBody::Domain(DomainEvent::FactionMetadataUpserted {
                faction_id,
                owner,
                name,
            }))?;
            touched.push(faction_id);
        }
        Ok(touched)
    }

    // -------------------------------------------------------------------------
    // Pricing and capacity administration
    // -------------------------------------------------------------------------

    pub fn set_unit_price(&mut self, caller: &str, new_price: Amount) -> Result<(), WorldError> {
        self.require_owner(caller)?;
        let old_price = self.state.pricing.unit_price;
        self.append_event(WorldEventBody::Domain(DomainEvent::UnitPriceSet {
            old_price,
            new_price,
        }))?;
        Ok(())
    }

    /// Grows the addressable index range. Capacity never shrinks.
    pub fn set_capacity(&mut self, caller: &str, new_capacity: u64) -> Result<(), WorldError> {
        self.require_owner(caller)?;
        let current = self.state.capacity;
        if new_capacity <= current {
            return Err(WorldError::InvalidCapacity {
                requested: new_capacity,
                current,
            });
        }
        self.append_event(WorldEventBody::Domain(DomainEvent::CapacityGrown {
            old_capacity: current,
            new_capacity,
        }))?;
        Ok(())
    }

    /// Deposit surface of the host: funds an account's placement balance.
    pub fn credit_account(
        &mut self,
        caller: &str,
        account: impl Into<String>,
        amount: Amount,
    ) -> Result<(), WorldError> {
        self.require_owner(caller)?;
        self.append_event(WorldEventBody::Domain(DomainEvent::AccountCredited {
            account: account.into(),
            amount,
        }))?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    /// Places a batch of cells. The whole batch commits or nothing does:
    /// settlement, cell writes, and the reward signal are one atomic unit.
    ///
    /// Exactly `unit_price * indices.len()` is debited; declared payment
    /// above the requirement stays with the payer.
    pub fn place_batch(
        &mut self,
        payer: &str,
        beneficiary: &str,
        faction_id: FactionId,
        indices: Vec<CellIndex>,
        colors: Vec<ColorCode>,
        payment: Amount,
    ) -> Result<(), WorldError> {
        if indices.is_empty() {
            return Err(WorldError::MalformedBatch {
                reason: "empty batch".to_string(),
            });
        }
        if indices.len() != colors.len() {
            return Err(WorldError::MalformedBatch {
                reason: format!(
                    "indices/colors length mismatch: {} vs {}",
                    indices.len(),
                    colors.len()
                ),
            });
        }
        if faction_id != NO_FACTION && !self.state.factions.contains_key(&faction_id) {
            return Err(WorldError::InvalidFaction { faction_id });
        }
        for &index in &indices {
            if index >= self.state.capacity {
                return Err(WorldError::IndexOutOfRange {
                    index,
                    capacity: self.state.capacity,
                });
            }
        }
        let unit_price = self.state.pricing.unit_price;
        let required = batch_fee(unit_price, indices.len())?;
        if payment < required {
            return Err(WorldError::InsufficientPayment {
                required,
                paid: payment,
            });
        }
        let available = self.state.balance_of(payer);
        if available < required {
            return Err(WorldError::InsufficientPayment {
                required,
                paid: available,
            });
        }

        let units = indices.len() as u64;
        let writes: Vec<CellWrite> = indices
            .into_iter()
            .zip(colors)
            .map(|(index, color)| CellWrite { index, color })
            .collect();
        let settlement = SettlementRecord {
            payer: payer.to_string(),
            treasury: self.config.treasury.clone(),
            unit_price,
            units,
            fee: required,
        };
        self.append_event(WorldEventBody::Domain(DomainEvent::BatchPlaced {
            payer: payer.to_string(),
            beneficiary: beneficiary.to_string(),
            faction_id,
            writes,
            settlement,
        }))?;

        let signal = RewardSignal {
            seq: self.next_signal_seq,
            beneficiary: beneficiary.to_string(),
            faction_id,
            units,
            time: self.state.time,
        };
        self.append_event(WorldEventBody::SignalQueued(signal))?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cell reads
    // -------------------------------------------------------------------------

    pub fn read_cell(&self, index: CellIndex) -> Result<CellSnapshot, WorldError> {
        if index >= self.state.capacity {
            return Err(WorldError::IndexOutOfRange {
                index,
                capacity: self.state.capacity,
            });
        }
        Ok(self.state.cell_snapshot(index))
    }

    /// Ordered snapshots for `start..=end_inclusive`; defaults fill gaps.
    pub fn read_cell_range(
        &self,
        start: CellIndex,
        end_inclusive: CellIndex,
    ) -> Result<Vec<CellSnapshot>, WorldError> {
        if start > end_inclusive {
            return Err(WorldError::MalformedBatch {
                reason: format!("range start {start} exceeds end {end_inclusive}"),
            });
        }
        if end_inclusive >= self.state.capacity {
            return Err(WorldError::IndexOutOfRange {
                index: end_inclusive,
                capacity: self.state.capacity,
            });
        }
        Ok((start..=end_inclusive)
            .map(|index| self.state.cell_snapshot(index))
            .collect())
    }

    // -------------------------------------------------------------------------
    // Reward bridge
    // -------------------------------------------------------------------------

    /// Wires this grid against its reward engine: binds the world as the
    /// engine's active data source and captures the engine's reward asset
    /// id. Called once at setup.
    pub fn bind_reward_engine(&mut self, source_id: &str, engine: &mut dyn RewardAccounting) {
        self.config.reward_token = engine.reward_token();
        engine.bind_source(source_id);
    }

    pub fn take_next_signal(&mut self) -> Option<RewardSignal> {
        self.pending_signals.pop_front()
    }

    /// Delivers every queued signal to the engine, in order. Returns the
    /// number delivered.
    pub fn drain_signals_into(&mut self, engine: &mut dyn RewardAccounting) -> usize {
        let mut delivered = 0;
        while let Some(signal) = self.pending_signals.pop_front() {
            engine.record_placement(&signal);
            delivered += 1;
        }
        delivered
    }

    // -------------------------------------------------------------------------
    // Audit
    // -------------------------------------------------------------------------

    pub fn audit_events(&self, filter: &AuditFilter) -> Vec<WorldEvent> {
        self.journal
            .events
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect()
    }

    pub fn save_audit_log(
        &self,
        path: impl AsRef<Path>,
        filter: &AuditFilter,
    ) -> Result<(), WorldError> {
        let events = self.audit_events(filter);
        write_json_to_path(&events, path.as_ref())
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            state: self.state.clone(),
            journal_len: self.journal.len(),
            last_event_id: self.next_event_id.saturating_sub(1),
            next_signal_seq: self.next_signal_seq,
            pending_signals: self.pending_signals.iter().cloned().collect(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot, journal: Journal) -> Result<Self, WorldError> {
        if snapshot.journal_len > journal.len() {
            return Err(WorldError::JournalMismatch);
        }
        let mut world = Self::with_config(snapshot.config);
        world.state = snapshot.state;
        world.journal = journal;
        world.next_event_id = snapshot.last_event_id.saturating_add(1);
        world.next_signal_seq = snapshot.next_signal_seq;
        world.pending_signals = VecDeque::from(snapshot.pending_signals);
        world.replay_from(snapshot.journal_len)?;
        Ok(world)
    }

    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<(), WorldError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        self.journal.save_json(dir.join("journal.json"))?;
        self.snapshot().save_json(dir.join("snapshot.json"))?;
        Ok(())
    }

    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, WorldError> {
        let dir = dir.as_ref();
        let journal = Journal::load_json(dir.join("journal.json"))?;
        let snapshot = Snapshot::load_json(dir.join("snapshot.json"))?;
        Self::from_snapshot(snapshot, journal)
    }

    pub fn rollback_to_snapshot(
        &mut self,
        snapshot: Snapshot,
        mut journal: Journal,
        reason: impl Into<String>,
    ) -> Result<(), WorldError> {
        if snapshot.journal_len > journal.len() {
            return Err(WorldError::JournalMismatch);
        }

        let prior_len = journal.len();
        journal.events.truncate(snapshot.journal_len);

        let snapshot_hash = hash_json(&snapshot)?;
        let mut world = Self::from_snapshot(snapshot, journal)?;
        let event = RollbackEvent {
            snapshot_hash,
            snapshot_journal_len: world.journal.len(),
            prior_journal_len: prior_len,
            reason: reason.into(),
        };
        world.append_event(WorldEventBody::RollbackApplied(event))?;
        *self = world;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn require_owner(&self, caller: &str) -> Result<(), WorldError> {
        if caller != self.config.owner {
            return Err(WorldError::Unauthorized {
                account: caller.to_string(),
            });
        }
        Ok(())
    }

    fn replay_from(&mut self, start_index: usize) -> Result<(), WorldError> {
        let events: Vec<WorldEvent> = self.journal.events[start_index..].to_vec();
        for event in events {
            self.apply_event_body(&event.body, event.time)?;
            self.state.time = event.time;
            self.next_event_id = self.next_event_id.max(event.id.saturating_add(1));
        }
        Ok(())
    }

    fn append_event(&mut self, body: WorldEventBody) -> Result<WorldEventId, WorldError> {
        self.apply_event_body(&body, self.state.time)?;
        let event_id = self.next_event_id;
        self.next_event_id += 1;
        self.journal.append(WorldEvent {
            id: event_id,
            time: self.state.time,
            body,
        });
        Ok(event_id)
    }

    fn apply_event_body(
        &mut self,
        body: &WorldEventBody,
        time: super::types::WorldTime,
    ) -> Result<(), WorldError> {
        match body {
            WorldEventBody::Domain(event) => self.state.apply_domain_event(event, time),
            WorldEventBody::SignalQueued(signal) => {
                self.pending_signals.push_back(signal.clone());
                self.next_signal_seq = self.next_signal_seq.max(signal.seq.saturating_add(1));
                Ok(())
            }
            WorldEventBody::RollbackApplied(_) => Ok(()),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
