use super::*;
use crate::error::GameError;
use crate::state::PlayerState;
use crate::store::{MemoryStore, PlayerStore};

#[test]
fn test_saved_player_loads_back() {
    let mut store = MemoryStore::new();
    let mut state = PlayerState::new(PlayerId(3), 1350);
    state.coins = 420;
    state.add_card(faction_card(1, Faction::Swarm, 88));
    state.assign_slot(0, Some(CardId(1))).unwrap();

    store.save(&state).unwrap();

    assert!(store.contains(PlayerId(3)));
    assert_eq!(store.load(PlayerId(3)).unwrap(), state);
}

#[test]
fn test_unknown_player() {
    let store = MemoryStore::new();

    assert_eq!(
        store.load(PlayerId(9)),
        Err(GameError::PlayerNotFound { id: PlayerId(9) })
    );
}

#[test]
fn test_corrupt_snapshot_is_reported() {
    let mut store = MemoryStore::new();
    store.put_raw(PlayerId(4), vec![0xff, 0x01]);

    assert_eq!(
        store.load(PlayerId(4)),
        Err(GameError::CorruptState { id: PlayerId(4) })
    );
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let mut store = MemoryStore::new();
    let mut state = PlayerState::new(PlayerId(3), 1200);
    store.save(&state).unwrap();

    state.coins = 5;
    store.save(&state).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.load(PlayerId(3)).unwrap().coins, 5);
}
