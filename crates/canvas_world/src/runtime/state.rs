//! World state management.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::WorldError;
use super::events::DomainEvent;
use super::factions::FactionRecord;
use super::grid::{Cell, CellSnapshot, DEFAULT_GRID_CAPACITY};
use super::pricing::PricingConfig;
use super::types::{Amount, CellIndex, FactionId, WorldTime, NO_FACTION};

/// Cumulative placement totals for one account, credited to the batch
/// beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountPlacementStats {
    pub cells_placed: u64,
    pub batches_placed: u64,
    pub last_faction_id: FactionId,
    pub last_placed_at: WorldTime,
}

/// The mutable state of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub time: WorldTime,
    pub capacity: u64,
    pub cells: BTreeMap<CellIndex, Cell>,
    pub factions: BTreeMap<FactionId, FactionRecord>,
    pub next_faction_id: FactionId,
    pub pricing: PricingConfig,
    pub balances: BTreeMap<String, Amount>,
    #[serde(default)]
    pub placement_stats: BTreeMap<String, AccountPlacementStats>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            time: 0,
            capacity: DEFAULT_GRID_CAPACITY,
            cells: BTreeMap::new(),
            factions: BTreeMap::new(),
            next_faction_id: 1,
            pricing: PricingConfig::default(),
            balances: BTreeMap::new(),
            placement_stats: BTreeMap::new(),
        }
    }
}

impl WorldState {
    pub fn balance_of(&self, account: &str) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Snapshot of one in-range cell; unwritten indices read blank.
    pub fn cell_snapshot(&self, index: CellIndex) -> CellSnapshot {
        match self.cells.get(&index) {
            Some(cell) => CellSnapshot::from_cell(index, cell),
            None => CellSnapshot::blank(index),
        }
    }

    pub fn apply_domain_event(
        &mut self,
        event: &DomainEvent,
        now: WorldTime,
    ) -> Result<(), WorldError> {
        match event {
            DomainEvent::FactionRegistered {
                faction_id,
                owner,
                name,
            } => {
                self.factions.insert(
                    *faction_id,
                    FactionRecord {
                        id: *faction_id,
                        owner: owner.clone(),
                        name: name.clone(),
                        territory: 0,
                        registered_at: now,
                    },
                );
                self.next_faction_id = self.next_faction_id.max(faction_id.saturating_add(1));
            }
            DomainEvent::FactionMetadataUpserted {
                faction_id,
                owner,
                name,
            } => {
                match self.factions.get_mut(faction_id) {
                    Some(record) => {
                        record.owner = owner.clone();
                        record.name = name.clone();
                    }
                    None => {
                        self.factions.insert(
                            *faction_id,
                            FactionRecord {
                                id: *faction_id,
                                owner: owner.clone(),
                                name: name.clone(),
                                territory: 0,
                                registered_at: now,
                            },
                        );
                    }
                }
                self.next_faction_id = self.next_faction_id.max(faction_id.saturating_add(1));
            }
            DomainEvent::UnitPriceSet { new_price, .. } => {
                self.pricing.unit_price = *new_price;
            }
            DomainEvent::CapacityGrown { new_capacity, .. } => {
                self.capacity = *new_capacity;
            }
            DomainEvent::AccountCredited { account, amount } => {
                add_balance(&mut self.balances, account, *amount);
            }
            DomainEvent::BatchPlaced {
                payer,
                beneficiary,
                faction_id,
                writes,
                settlement,
            } => {
                remove_balance(&mut self.balances, payer, settlement.fee).map_err(
                    |(required, paid)| WorldError::InsufficientPayment { required, paid },
                )?;
                add_balance(&mut self.balances, &settlement.treasury, settlement.fee);

                for write in writes {
                    let previous_faction = self
                        .cells
                        .get(&write.index)
                        .map(|cell| cell.faction_id)
                        .unwrap_or(NO_FACTION);
                    self.adjust_territory(previous_faction, -1);
                    self.cells.insert(
                        write.index,
                        Cell {
                            color: write.color,
                            faction_id: *faction_id,
                            placed_by: payer.clone(),
                            placed_at: now,
                        },
                    );
                    self.adjust_territory(*faction_id, 1);
                }

                let stats = self.placement_stats.entry(beneficiary.clone()).or_default();
                stats.cells_placed = stats.cells_placed.saturating_add(writes.len() as u64);
                stats.batches_placed = stats.batches_placed.saturating_add(1);
                stats.last_faction_id = *faction_id;
                stats.last_placed_at = now;
            }
        }
        Ok(())
    }

    fn adjust_territory(&mut self, faction_id: FactionId, delta: i64) {
        if faction_id == NO_FACTION {
            return;
        }
        if let Some(record) = self.factions.get_mut(&faction_id) {
            record.territory = if delta < 0 {
                record.territory.saturating_sub(delta.unsigned_abs())
            } else {
                record.territory.saturating_add(delta as u64)
            };
        }
    }
}

fn add_balance(balances: &mut BTreeMap<String, Amount>, account: &str, amount: Amount) {
    if amount == 0 {
        return;
    }
    let entry = balances.entry(account.to_string()).or_insert(0);
    *entry = entry.saturating_add(amount);
}

fn remove_balance(
    balances: &mut BTreeMap<String, Amount>,
    account: &str,
    amount: Amount,
) -> Result<(), (Amount, Amount)> {
    let current = balances.get(account).copied().unwrap_or(0);
    if current < amount {
        return Err((amount, current));
    }
    let next = current - amount;
    if next == 0 {
        balances.remove(account);
    } else {
        balances.insert(account.to_string(), next);
    }
    Ok(())
}
