//! Cell types and grid defaults.

use serde::{Deserialize, Serialize};

use super::types::{CellIndex, ColorCode, FactionId, WorldTime, NO_FACTION};

/// Default addressable range of a fresh grid.
pub const DEFAULT_GRID_CAPACITY: u64 = 10_000;

/// Color code read from cells that were never written.
pub const BLANK_COLOR: ColorCode = 0;

/// A written cell. Overwritten unconditionally by later placements;
/// never destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub color: ColorCode,
    pub faction_id: FactionId,
    pub placed_by: String,
    pub placed_at: WorldTime,
}

/// Read-side view of one cell. In-range indices that were never written
/// read as the blank default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub index: CellIndex,
    pub color: ColorCode,
    pub faction_id: FactionId,
}

impl CellSnapshot {
    pub fn blank(index: CellIndex) -> Self {
        Self {
            index,
            color: BLANK_COLOR,
            faction_id: NO_FACTION,
        }
    }

    pub fn from_cell(index: CellIndex, cell: &Cell) -> Self {
        Self {
            index,
            color: cell.color,
            faction_id: cell.faction_id,
        }
    }
}
