use super::*;
use crate::battle::Outcome;
use crate::cards::template;
use crate::config::{GameConfig, RewardConfig};
use crate::error::GameError;
use crate::reward::{base_coins, calculate_reward, RewardContext};

fn context(level: u16, rarity: Rarity, streak: u32) -> RewardContext {
    RewardContext {
        opponent_level: level,
        opponent_rarity: rarity,
        win_streak: streak,
    }
}

/// Rewards with every random component switched off
fn flat_config() -> RewardConfig {
    RewardConfig {
        coin_bonus_max: 0,
        experience_bonus_max: 0,
        bonus_card_percent: 0,
        ..RewardConfig::default()
    }
}

#[test]
fn test_victory_pays_at_least_defeat() {
    let config = RewardConfig::default();
    for seed in 0..100u64 {
        for rarity in Rarity::ALL {
            let ctx = context((seed % 20) as u16, rarity, (seed % 7) as u32);
            let win = calculate_reward(Outcome::Victory, &ctx, &config, &mut rng(seed));
            let loss = calculate_reward(Outcome::Defeat, &ctx, &config, &mut rng(seed));
            assert!(win.coins >= loss.coins);
            assert!(win.experience >= loss.experience);
        }
    }
}

#[test]
fn test_seeded_reward_is_repeatable() {
    let config = RewardConfig::default();
    let ctx = context(7, Rarity::Epic, 2);

    let first = calculate_reward(Outcome::Victory, &ctx, &config, &mut rng(31337));
    let second = calculate_reward(Outcome::Victory, &ctx, &config, &mut rng(31337));

    assert_eq!(first, second);
}

#[test]
fn test_consolation_is_thirty_percent_of_base() {
    let config = RewardConfig::default();
    let ctx = context(0, Rarity::Common, 0);

    let loss = calculate_reward(Outcome::Defeat, &ctx, &config, &mut rng(1));

    assert_eq!(loss.coins, 30);
    assert_eq!(loss.experience, 15);
    assert_eq!(loss.bonus_card, None);
}

#[test]
fn test_draw_pays_consolation() {
    let config = RewardConfig::default();
    let ctx = context(3, Rarity::Rare, 4);

    let draw = calculate_reward(Outcome::Draw, &ctx, &config, &mut rng(1));
    let loss = calculate_reward(Outcome::Defeat, &ctx, &config, &mut rng(1));

    assert_eq!(draw, loss);
}

#[test]
fn test_level_and_rarity_raise_base() {
    let config = RewardConfig::default();
    // 100 + 4 * 10 + 60
    assert_eq!(base_coins(&context(4, Rarity::Epic, 0), &config), 200);

    let win = calculate_reward(
        Outcome::Victory,
        &context(4, Rarity::Epic, 0),
        &flat_config(),
        &mut rng(1),
    );
    assert_eq!(win.coins, 200);
    // 50 + 4 * 5
    assert_eq!(win.experience, 70);
}

#[test]
fn test_win_bonus_stays_in_bounds() {
    let config = RewardConfig::default();
    let ctx = context(0, Rarity::Common, 0);
    for seed in 0..200u64 {
        let win = calculate_reward(Outcome::Victory, &ctx, &config, &mut rng(seed));
        assert!((100..150).contains(&win.coins));
        assert!((50..70).contains(&win.experience));
    }
}

#[test]
fn test_streak_bonus_is_capped() {
    let config = flat_config();

    let three = calculate_reward(
        Outcome::Victory,
        &context(0, Rarity::Common, 3),
        &config,
        &mut rng(1),
    );
    assert_eq!(three.coins, 130);

    let ten = calculate_reward(
        Outcome::Victory,
        &context(0, Rarity::Common, 10),
        &config,
        &mut rng(1),
    );
    assert_eq!(ten.coins, 150);
}

#[test]
fn test_bonus_card_only_on_win() {
    let config = RewardConfig {
        bonus_card_percent: 100,
        ..RewardConfig::default()
    };
    let ctx = context(1, Rarity::Common, 0);

    let win = calculate_reward(Outcome::Victory, &ctx, &config, &mut rng(8));
    let template_id = win.bonus_card.expect("guaranteed bonus card");
    assert!(template(template_id).is_some());

    let loss = calculate_reward(Outcome::Defeat, &ctx, &config, &mut rng(8));
    assert_eq!(loss.bonus_card, None);
}

#[test]
fn test_bonus_card_rate_is_roughly_ten_percent() {
    let config = RewardConfig::default();
    let ctx = context(1, Rarity::Common, 0);

    let hits = (1..=2000u64)
        .filter(|n| {
            let seed = n.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            calculate_reward(Outcome::Victory, &ctx, &config, &mut rng(seed))
                .bonus_card
                .is_some()
        })
        .count();

    assert!(hits > 100 && hits < 320, "hits = {hits}");
}

#[test]
fn test_overpaying_consolation_is_rejected() {
    let config = RewardConfig {
        consolation_percent: 400,
        ..flat_config()
    };

    assert_eq!(config.validate(), Err(GameError::InvalidConfig));
    assert_eq!(RewardConfig::default().validate(), Ok(()));

    // At the limit a loss pays exactly the win
    let limit = RewardConfig {
        consolation_percent: 100,
        ..flat_config()
    };
    assert_eq!(limit.validate(), Ok(()));
    let ctx = context(2, Rarity::Rare, 0);
    let win = calculate_reward(Outcome::Victory, &ctx, &limit, &mut rng(1));
    let loss = calculate_reward(Outcome::Defeat, &ctx, &limit, &mut rng(1));
    assert!(win.coins >= loss.coins);
}

#[test]
fn test_rarity_bonus_must_not_shrink() {
    let config = RewardConfig {
        rarity_coin_bonus: [0, 60, 25, 120],
        ..RewardConfig::default()
    };

    assert_eq!(config.validate(), Err(GameError::InvalidConfig));
}

#[test]
fn test_game_config_checks_rewards() {
    let mut config = GameConfig::default();
    assert_eq!(config.validate(), Ok(()));

    config.rewards.consolation_percent = 101;
    assert_eq!(config.validate(), Err(GameError::InvalidConfig));
}
