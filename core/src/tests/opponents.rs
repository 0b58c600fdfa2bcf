use super::*;
use crate::opponents::{deck_size, generate_opponent, rarity_ceiling, AI_OWNER, MAX_OPPONENT_DECK};

#[test]
fn test_deck_size_grows_then_caps() {
    assert_eq!(deck_size(0), 3);
    assert_eq!(deck_size(4), 4);
    assert_eq!(deck_size(11), 5);
    assert_eq!(deck_size(16), MAX_OPPONENT_DECK);
    assert_eq!(deck_size(400), MAX_OPPONENT_DECK);
}

#[test]
fn test_rarity_ceiling_by_level() {
    assert_eq!(rarity_ceiling(0), Rarity::Rare);
    assert_eq!(rarity_ceiling(5), Rarity::Epic);
    assert_eq!(rarity_ceiling(10), Rarity::Legendary);
}

#[test]
fn test_generated_opponents_respect_level() {
    for seed in 0..50u64 {
        for level in [0u16, 6, 20] {
            let opponent = generate_opponent(level, seed).unwrap();

            assert_eq!(opponent.level, level);
            assert!(!opponent.cards.is_empty());
            assert!(opponent.cards.len() <= deck_size(level));
            assert!(opponent.top_rarity() <= rarity_ceiling(level));
            assert!(opponent.cards.iter().all(|c| c.owner == AI_OWNER));
        }
    }
}

#[test]
fn test_generate_opponent_deterministic() {
    let a = generate_opponent(8, 42).unwrap();
    let b = generate_opponent(8, 42).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_generated_card_ids_are_unique() {
    let opponent = generate_opponent(30, 7).unwrap();
    let mut ids: Vec<CardId> = opponent.cards.iter().map(|c| c.id).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), opponent.cards.len());
}
