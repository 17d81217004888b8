//! Batched read views and the pay-for-another placement entry point.

use serde::{Deserialize, Serialize};

use super::error::WorldError;
use super::grid::CellSnapshot;
use super::types::{Amount, CellIndex, ColorCode, FactionId, WorldTime};
use super::world::World;

/// Per-account gauge view: what the external reward engine weighs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeView {
    pub account: String,
    pub reward_token: String,
    pub unit_price: Amount,
    pub cells_placed: u64,
    pub batches_placed: u64,
}

/// Aggregated account state at query time. Consistent with the grid store
/// and faction registry as of the most recent commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStateView {
    pub account: String,
    pub balance: Amount,
    pub cells_placed: u64,
    pub batches_placed: u64,
    pub last_faction_id: FactionId,
    pub last_placed_at: WorldTime,
}

/// One row of the faction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionView {
    pub id: FactionId,
    pub owner: String,
    pub name: String,
    pub territory: u64,
}

impl World {
    /// Pass-through placement: a third party pays while the reward signal
    /// credits `beneficiary`. All validation and atomicity guarantees of
    /// [`World::place_batch`] hold unchanged.
    pub fn place_on_behalf(
        &mut self,
        payer: &str,
        beneficiary: &str,
        faction_id: FactionId,
        indices: Vec<CellIndex>,
        colors: Vec<ColorCode>,
        payment: Amount,
    ) -> Result<(), WorldError> {
        self.place_batch(payer, beneficiary, faction_id, indices, colors, payment)
    }

    pub fn query_gauge(&self, account: &str) -> GaugeView {
        let stats = self.state().placement_stats.get(account);
        GaugeView {
            account: account.to_string(),
            reward_token: self.config().reward_token.clone(),
            unit_price: self.unit_price(),
            cells_placed: stats.map(|s| s.cells_placed).unwrap_or(0),
            batches_placed: stats.map(|s| s.batches_placed).unwrap_or(0),
        }
    }

    pub fn query_account_state(&self, account: &str) -> AccountStateView {
        let stats = self.state().placement_stats.get(account);
        AccountStateView {
            account: account.to_string(),
            balance: self.balance_of(account),
            cells_placed: stats.map(|s| s.cells_placed).unwrap_or(0),
            batches_placed: stats.map(|s| s.batches_placed).unwrap_or(0),
            last_faction_id: stats.map(|s| s.last_faction_id).unwrap_or(0),
            last_placed_at: stats.map(|s| s.last_placed_at).unwrap_or(0),
        }
    }

    /// Id-ordered faction listing.
    pub fn query_factions(&self) -> Vec<FactionView> {
        self.state()
            .factions
            .values()
            .map(|record| FactionView {
                id: record.id,
                owner: record.owner.clone(),
                name: record.name.clone(),
                territory: record.territory,
            })
            .collect()
    }

    pub fn query_cell_range(
        &self,
        start: CellIndex,
        end_inclusive: CellIndex,
    ) -> Result<Vec<CellSnapshot>, WorldError> {
        self.read_cell_range(start, end_inclusive)
    }
}
