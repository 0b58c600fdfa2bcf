use super::*;
use crate::battle::Outcome;
use crate::config::ProgressionConfig;
use crate::error::GameError;
use crate::reward::Reward;
use crate::state::{PlayerState, FACTION_SLOTS};

fn player_with_cards(count: u32) -> PlayerState {
    let mut state = PlayerState::new(PlayerId(7), 1200);
    for i in 0..count {
        state.add_card(card(i + 1, 100 + i));
    }
    state
}

#[test]
fn test_new_player_defaults() {
    let state = PlayerState::new(PlayerId(7), 1200);

    assert_eq!(state.level, 1);
    assert_eq!(state.coins, 0);
    assert_eq!(state.slots.len(), FACTION_SLOTS);
    assert!(state.deck().is_empty());
}

#[test]
fn test_add_card_takes_ownership_and_bumps_ids() {
    let mut state = PlayerState::new(PlayerId(7), 1200);
    state.add_card(card(41, 100));

    assert_eq!(state.card(CardId(41)).unwrap().owner, PlayerId(7));
    assert_eq!(state.generate_card_id(), CardId(42));
}

#[test]
fn test_deck_prefers_slotted_cards() {
    let mut state = player_with_cards(4);
    assert_eq!(state.deck().len(), 4);

    state.assign_slot(0, Some(CardId(3))).unwrap();
    state.assign_slot(2, Some(CardId(1))).unwrap();

    let ids: Vec<CardId> = state.deck().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![CardId(3), CardId(1)]);
}

#[test]
fn test_slot_assignment_rules() {
    let mut state = player_with_cards(2);

    assert_eq!(
        state.assign_slot(FACTION_SLOTS, Some(CardId(1))),
        Err(GameError::SlotOutOfRange {
            index: FACTION_SLOTS as u8
        })
    );
    assert_eq!(
        state.assign_slot(0, Some(CardId(99))),
        Err(GameError::CardNotFound { id: CardId(99) })
    );

    // Moving a card leaves its old slot empty
    state.assign_slot(0, Some(CardId(1))).unwrap();
    state.assign_slot(3, Some(CardId(1))).unwrap();
    assert_eq!(state.slots[0], None);
    assert_eq!(state.slots[3], Some(CardId(1)));

    state.assign_slot(3, None).unwrap();
    assert!(state.slots.iter().all(|s| s.is_none()));
}

#[test]
fn test_remove_card_clears_slot() {
    let mut state = player_with_cards(2);
    state.assign_slot(1, Some(CardId(2))).unwrap();

    let removed = state.remove_card(CardId(2)).unwrap();

    assert_eq!(removed.id, CardId(2));
    assert_eq!(state.slots[1], None);
    assert_eq!(
        state.remove_card(CardId(2)),
        Err(GameError::CardNotFound { id: CardId(2) })
    );
}

#[test]
fn test_apply_reward_levels_player_and_mints_bonus() {
    let config = ProgressionConfig::default();
    let mut state = player_with_cards(1);
    let reward = Reward {
        coins: 140,
        experience: 450,
        bonus_card: Some(TemplateId(3)),
    };

    let applied = state.apply_reward(&reward, 1_700_000_000, &config, &mut rng(5)).unwrap();

    assert_eq!(state.coins, 140);
    assert_eq!(state.experience, 450);
    assert_eq!(state.level, 3);
    assert_eq!(applied.levels_gained, 2);
    let bonus = applied.bonus_card.unwrap();
    assert_eq!(bonus, CardId(2));
    let minted = state.card(bonus).unwrap();
    assert_eq!(minted.template_id, TemplateId(3));
    assert_eq!(minted.acquired_at, 1_700_000_000);
}

#[test]
fn test_apply_reward_with_unknown_template_changes_nothing() {
    let config = ProgressionConfig::default();
    let mut state = player_with_cards(1);
    let before = state.clone();
    let reward = Reward {
        coins: 10,
        experience: 10,
        bonus_card: Some(TemplateId(9999)),
    };

    let err = state.apply_reward(&reward, 0, &config, &mut rng(5)).unwrap_err();

    assert_eq!(err, GameError::TemplateNotFound);
    assert_eq!(state, before);
}

#[test]
fn test_win_streak_tracking() {
    let mut state = PlayerState::new(PlayerId(1), 1200);

    state.record_outcome(Outcome::Victory);
    state.record_outcome(Outcome::Victory);
    assert_eq!(state.win_streak, 2);

    state.record_outcome(Outcome::Draw);
    assert_eq!(state.win_streak, 0);

    state.record_outcome(Outcome::Victory);
    state.record_outcome(Outcome::Defeat);
    assert_eq!(state.win_streak, 0);
}

#[test]
fn test_enhance_card_consumes_materials() {
    let config = ProgressionConfig::default();
    let mut state = player_with_cards(3);
    state.assign_slot(0, Some(CardId(2))).unwrap();

    let report = state
        .enhance_card(CardId(1), &[CardId(2), CardId(3)], &config, &mut rng(2))
        .unwrap();

    assert_eq!(report.consumed, vec![CardId(2), CardId(3)]);
    assert_eq!(state.cards.len(), 1);
    assert_eq!(state.slots[0], None);
    assert_eq!(state.card(CardId(1)).unwrap().experience, report.experience_gained);
}

#[test]
fn test_failed_enhance_leaves_inventory_alone() {
    let config = ProgressionConfig::default();
    let mut state = player_with_cards(3);
    state.set_locked(CardId(3), true).unwrap();
    let before = state.clone();

    let err = state
        .enhance_card(CardId(1), &[CardId(2), CardId(3)], &config, &mut rng(2))
        .unwrap_err();
    assert_eq!(err, GameError::CardLocked { id: CardId(3) });

    let err = state
        .enhance_card(CardId(1), &[CardId(42)], &config, &mut rng(2))
        .unwrap_err();
    assert_eq!(err, GameError::CardNotFound { id: CardId(42) });

    assert_eq!(state, before);
}

#[test]
fn test_fuse_cards_replaces_materials_with_result() {
    let config = ProgressionConfig::default();
    let mut state = PlayerState::new(PlayerId(7), 1200);
    let mut r = rng(4);
    let a = state.mint(TemplateId(1), 0, &mut r).unwrap();
    let b = state.mint(TemplateId(1), 0, &mut r).unwrap();
    let keep = state.mint(TemplateId(9), 0, &mut r).unwrap();

    let report = state.fuse_cards(&[a, b], 55, &config, &mut r).unwrap();

    assert_eq!(report.card.id, CardId(4));
    assert_eq!(report.card.owner, PlayerId(7));
    let ids: Vec<CardId> = state.cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![keep, CardId(4)]);
    assert_eq!(state.next_card_id, 5);
}

#[test]
fn test_purchase_spends_coins_for_a_card() {
    let mut state = player_with_cards(1);
    state.coins = 200;

    let id = state.purchase(150, 42, &mut rng(9)).unwrap();

    assert_eq!(id, CardId(2));
    assert_eq!(state.coins, 50);
    let bought = state.card(id).unwrap();
    assert_eq!(bought.owner, PlayerId(7));
    assert_eq!(bought.level, 1);
    assert_eq!(bought.acquired_at, 42);
}

#[test]
fn test_purchase_without_funds_changes_nothing() {
    let mut state = player_with_cards(1);
    state.coins = 149;
    let before = state.clone();

    let err = state.purchase(150, 0, &mut rng(9)).unwrap_err();

    assert_eq!(err, GameError::NotEnoughCoins { have: 149, need: 150 });
    assert_eq!(state, before);
}

#[test]
fn test_large_slot_index_is_not_wrapped() {
    let mut state = player_with_cards(1);

    assert_eq!(
        state.assign_slot(256, Some(CardId(1))),
        Err(GameError::SlotOutOfRange { index: u8::MAX })
    );
}
