//! Match payouts.
//!
//! Winners get the base amount plus a bounded random bonus and a streak
//! bonus; everyone else gets a fixed share of the base. Given the same
//! inputs and an identically seeded RNG the result is identical.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::battle::Outcome;
use crate::config::RewardConfig;
use crate::log;
use crate::mint::draw_template;
use crate::rng::BattleRng;
use crate::types::{Rarity, TemplateId};

/// What the payout depends on besides the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardContext {
    pub opponent_level: u16,
    pub opponent_rarity: Rarity,
    /// Consecutive wins before this match
    pub win_streak: u32,
}

/// Coins, experience and an optional bonus card
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub coins: u32,
    pub experience: u32,
    pub bonus_card: Option<TemplateId>,
}

pub fn base_coins(context: &RewardContext, config: &RewardConfig) -> u32 {
    config
        .base_coins
        .saturating_add(config.coins_per_level.saturating_mul(context.opponent_level as u32))
        .saturating_add(config.rarity_bonus(context.opponent_rarity))
}

pub fn base_experience(context: &RewardContext, config: &RewardConfig) -> u32 {
    config.base_experience.saturating_add(
        config
            .experience_per_level
            .saturating_mul(context.opponent_level as u32),
    )
}

fn percent_of(value: u32, percent: u32) -> u32 {
    (value as u64 * percent as u64 / 100).min(u32::MAX as u64) as u32
}

/// Compute the reward for one side of a finished match.
pub fn calculate_reward<R: BattleRng>(
    outcome: Outcome,
    context: &RewardContext,
    config: &RewardConfig,
    rng: &mut R,
) -> Reward {
    let coins = base_coins(context, config);
    let experience = base_experience(context, config);

    if outcome != Outcome::Victory {
        return Reward {
            coins: percent_of(coins, config.consolation_percent),
            experience: percent_of(experience, config.consolation_percent),
            bonus_card: None,
        };
    }

    let coin_bonus = rng.gen_range(config.coin_bonus_max as usize) as u32;
    let experience_bonus = rng.gen_range(config.experience_bonus_max as usize) as u32;
    let streak_steps = context.win_streak.min(config.streak_cap);
    let streak_bonus = percent_of(coins, streak_steps.saturating_mul(config.streak_bonus_percent));

    let bonus_card = if rng.chance(config.bonus_card_percent) {
        match draw_template(rng) {
            Ok(t) => Some(t.id),
            Err(e) => {
                log::warn(&format!("bonus card skipped: {}", e));
                None
            }
        }
    } else {
        None
    };

    Reward {
        coins: coins
            .saturating_add(coin_bonus)
            .saturating_add(streak_bonus),
        experience: experience.saturating_add(experience_bonus),
        bonus_card,
    }
}
