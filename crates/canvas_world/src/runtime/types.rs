//! Type aliases and basic type definitions for the runtime module.

pub type WorldTime = u64;
pub type WorldEventId = u64;
pub type SignalSeq = u64;
pub type CellIndex = u64;
pub type FactionId = u64;
pub type ColorCode = u32;
pub type Amount = u64;

/// Sentinel faction id meaning "no faction". Never issued to a registered faction.
pub const NO_FACTION: FactionId = 0;
