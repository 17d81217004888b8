use super::super::*;
use super::{funded_world, OWNER};

#[test]
fn new_world_has_default_config() {
    let world = World::new();
    assert_eq!(world.capacity(), DEFAULT_GRID_CAPACITY);
    assert_eq!(world.unit_price(), DEFAULT_UNIT_PRICE);
    assert_eq!(world.faction_count(), 0);
    assert_eq!(world.treasury_balance(), 0);
    assert_eq!(world.pending_signals_len(), 0);
    assert!(world.journal().is_empty());
}

#[test]
fn unwritten_cells_read_blank_default() {
    let world = World::new();
    let cell = world.read_cell(42).expect("read cell");
    assert_eq!(cell.color, BLANK_COLOR);
    assert_eq!(cell.faction_id, NO_FACTION);
    assert_eq!(cell.index, 42);
}

#[test]
fn credit_account_is_owner_gated() {
    let mut world = World::new();
    let err = world
        .credit_account("player:mallory", "player:mallory", 1_000)
        .unwrap_err();
    assert_eq!(
        err,
        WorldError::Unauthorized {
            account: "player:mallory".to_string()
        }
    );
    assert_eq!(world.balance_of("player:mallory"), 0);

    world
        .credit_account(OWNER, "player:alice", 1_000)
        .expect("credit");
    assert_eq!(world.balance_of("player:alice"), 1_000);
}

#[test]
fn tick_advances_time_and_stamps_events() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    world.tick();
    world.tick();
    world
        .place_batch(
            "player:alice",
            "player:alice",
            NO_FACTION,
            vec![0],
            vec![1],
            DEFAULT_UNIT_PRICE,
        )
        .expect("place");

    let event = world.journal().events.last().expect("event");
    assert_eq!(event.time, 2);
    assert_eq!(world.state().cells.get(&0).expect("cell").placed_at, 2);
}

#[test]
fn every_committed_operation_is_journaled() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    let journaled_after_setup = world.journal().len();

    world.register_faction(OWNER, "player:alice").expect("register");
    world.set_unit_price(OWNER, 5).expect("set price");
    world
        .set_capacity(OWNER, DEFAULT_GRID_CAPACITY + 1)
        .expect("set capacity");
    world
        .place_batch("player:alice", "player:alice", 1, vec![7], vec![3], 5)
        .expect("place");

    // One event per admin op, two for the batch (domain + signal).
    assert_eq!(world.journal().len(), journaled_after_setup + 5);
}
