//! Fee computation and settlement records.

use serde::{Deserialize, Serialize};

use super::error::WorldError;
use super::types::Amount;

/// Base units per whole token (9 decimals).
pub const TOKEN_UNIT: Amount = 1_000_000_000;

/// Default per-cell fee: 0.01 tokens.
pub const DEFAULT_UNIT_PRICE: Amount = TOKEN_UNIT / 100;

/// Current placement pricing. Adjusted only through the owner-gated
/// price operation; zero is a valid price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub unit_price: Amount,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            unit_price: DEFAULT_UNIT_PRICE,
        }
    }
}

/// Settlement carried inside a committed batch event. Self-contained so
/// journal replay needs no out-of-band pricing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub payer: String,
    pub treasury: String,
    pub unit_price: Amount,
    pub units: u64,
    pub fee: Amount,
}

/// Required payment for a batch of `units` cells.
pub fn batch_fee(unit_price: Amount, units: usize) -> Result<Amount, WorldError> {
    let units = units as u64;
    unit_price
        .checked_mul(units)
        .ok_or_else(|| WorldError::MalformedBatch {
            reason: format!("batch fee overflows: unit_price={unit_price} units={units}"),
        })
}
