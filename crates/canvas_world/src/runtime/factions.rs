//! Faction registry records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{FactionId, WorldTime};

/// A registered faction. Ids are issued sequentially from 1 and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionRecord {
    pub id: FactionId,
    pub owner: String,
    pub name: String,
    /// Number of cells currently attributed to this faction. Maintained
    /// incrementally on every overwrite.
    pub territory: u64,
    pub registered_at: WorldTime,
}

/// First registered faction owned by `owner`, by ascending id. The bulk
/// metadata upsert matches against this; one owner may hold many factions.
pub fn first_faction_of_owner(
    factions: &BTreeMap<FactionId, FactionRecord>,
    owner: &str,
) -> Option<FactionId> {
    factions
        .values()
        .find(|record| record.owner == owner)
        .map(|record| record.id)
}
