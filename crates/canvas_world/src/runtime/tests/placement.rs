use super::super::*;
use super::{funded_world, OWNER};

#[test]
fn read_after_write_returns_placed_pair() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    let faction = world.register_faction(OWNER, "player:alice").expect("register");

    world
        .place_batch(
            "player:alice",
            "player:alice",
            faction,
            vec![5],
            vec![3],
            DEFAULT_UNIT_PRICE,
        )
        .expect("place");

    let cell = world.read_cell(5).expect("read cell");
    assert_eq!(cell.color, 3);
    assert_eq!(cell.faction_id, faction);
}

#[test]
fn placement_with_unregistered_faction_changes_nothing() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    world.register_faction(OWNER, "player:alice").expect("register");
    world
        .place_batch("player:alice", "player:alice", 1, vec![5], vec![3], DEFAULT_UNIT_PRICE)
        .expect("place");
    let balance_before = world.balance_of("player:alice");
    let journal_before = world.journal().len();

    let err = world
        .place_batch("player:alice", "player:alice", 2, vec![5], vec![7], DEFAULT_UNIT_PRICE)
        .unwrap_err();

    assert_eq!(err, WorldError::InvalidFaction { faction_id: 2 });
    let cell = world.read_cell(5).expect("read cell");
    assert_eq!((cell.color, cell.faction_id), (3, 1));
    assert_eq!(world.balance_of("player:alice"), balance_before);
    assert_eq!(world.journal().len(), journal_before);
}

#[test]
fn one_invalid_index_aborts_the_whole_batch() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    let capacity = world.capacity();

    let err = world
        .place_batch(
            "player:alice",
            "player:alice",
            NO_FACTION,
            vec![0, 1, capacity],
            vec![1, 2, 3],
            3 * DEFAULT_UNIT_PRICE,
        )
        .unwrap_err();

    assert_eq!(
        err,
        WorldError::IndexOutOfRange {
            index: capacity,
            capacity
        }
    );
    assert_eq!(world.read_cell(0).expect("cell 0").color, BLANK_COLOR);
    assert_eq!(world.read_cell(1).expect("cell 1").color, BLANK_COLOR);
    assert_eq!(world.balance_of("player:alice"), TOKEN_UNIT);
    assert_eq!(world.pending_signals_len(), 0);
}

#[test]
fn malformed_batches_are_rejected() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    let journal_before = world.journal().len();

    let err = world
        .place_batch("player:alice", "player:alice", NO_FACTION, Vec::new(), Vec::new(), 0)
        .unwrap_err();
    assert!(matches!(err, WorldError::MalformedBatch { .. }));

    let err = world
        .place_batch(
            "player:alice",
            "player:alice",
            NO_FACTION,
            vec![0, 1],
            vec![1],
            2 * DEFAULT_UNIT_PRICE,
        )
        .unwrap_err();
    assert!(matches!(err, WorldError::MalformedBatch { .. }));

    assert_eq!(world.journal().len(), journal_before);
    assert_eq!(world.pending_signals_len(), 0);
    assert_eq!(world.balance_of("player:alice"), TOKEN_UNIT);
}

#[test]
fn any_account_may_overwrite_any_cell() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT), ("player:bob", TOKEN_UNIT)]);
    let alice_faction = world.register_faction(OWNER, "player:alice").expect("register");
    let bob_faction = world.register_faction(OWNER, "player:bob").expect("register");

    world
        .place_batch("player:alice", "player:alice", alice_faction, vec![9], vec![1], DEFAULT_UNIT_PRICE)
        .expect("alice places");
    world
        .place_batch("player:bob", "player:bob", bob_faction, vec![9], vec![2], DEFAULT_UNIT_PRICE)
        .expect("bob overwrites");

    let cell = world.read_cell(9).expect("read cell");
    assert_eq!((cell.color, cell.faction_id), (2, bob_faction));
}

#[test]
fn territory_counters_follow_overwrites() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT), ("player:bob", TOKEN_UNIT)]);
    let crimson = world.register_faction(OWNER, "player:alice").expect("register");
    let azure = world.register_faction(OWNER, "player:bob").expect("register");

    world
        .place_batch(
            "player:alice",
            "player:alice",
            crimson,
            vec![0, 1, 2],
            vec![1, 1, 1],
            3 * DEFAULT_UNIT_PRICE,
        )
        .expect("crimson claims three");
    assert_eq!(world.faction(crimson).expect("crimson").territory, 3);

    world
        .place_batch("player:bob", "player:bob", azure, vec![1], vec![2], DEFAULT_UNIT_PRICE)
        .expect("azure takes one");

    assert_eq!(world.faction(crimson).expect("crimson").territory, 2);
    assert_eq!(world.faction(azure).expect("azure").territory, 1);

    // Counters match a full scan of the cells map.
    for faction_id in [crimson, azure] {
        let scanned = world
            .state()
            .cells
            .values()
            .filter(|cell| cell.faction_id == faction_id)
            .count() as u64;
        assert_eq!(world.faction(faction_id).expect("faction").territory, scanned);
    }
}

#[test]
fn duplicate_indices_in_one_batch_last_pair_wins() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);

    world
        .place_batch(
            "player:alice",
            "player:alice",
            NO_FACTION,
            vec![4, 4],
            vec![1, 9],
            2 * DEFAULT_UNIT_PRICE,
        )
        .expect("place");

    assert_eq!(world.read_cell(4).expect("cell").color, 9);
}

#[test]
fn read_cell_rejects_out_of_range_index() {
    let world = World::new();
    let capacity = world.capacity();
    let err = world.read_cell(capacity).unwrap_err();
    assert_eq!(
        err,
        WorldError::IndexOutOfRange {
            index: capacity,
            capacity
        }
    );
}

#[test]
fn read_cell_range_fills_gaps_with_defaults() {
    let mut world = funded_world(&[("player:alice", TOKEN_UNIT)]);
    world
        .place_batch("player:alice", "player:alice", NO_FACTION, vec![11], vec![5], DEFAULT_UNIT_PRICE)
        .expect("place");

    let cells = world.read_cell_range(10, 12).expect("range");
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0], CellSnapshot::blank(10));
    assert_eq!((cells[1].index, cells[1].color), (11, 5));
    assert_eq!(cells[2], CellSnapshot::blank(12));
}

#[test]
fn read_cell_range_validates_bounds() {
    let world = World::new();
    let capacity = world.capacity();

    let err = world.read_cell_range(0, capacity).unwrap_err();
    assert!(matches!(err, WorldError::IndexOutOfRange { .. }));

    let err = world.read_cell_range(5, 4).unwrap_err();
    assert!(matches!(err, WorldError::MalformedBatch { .. }));
}
