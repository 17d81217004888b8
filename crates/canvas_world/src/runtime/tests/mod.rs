//! Tests for the runtime module.

use super::types::Amount;
use super::world::World;

pub(super) const OWNER: &str = "protocol:owner";

pub(super) fn funded_world(accounts: &[(&str, Amount)]) -> World {
    let mut world = World::new();
    for (account, amount) in accounts {
        world
            .credit_account(OWNER, *account, *amount)
            .expect("credit account");
    }
    world
}

mod basic;
mod placement;
