//! Tunable game constants and the config structs built from them.
//!
//! Each config struct deserializes with every field optional, so an override
//! file only has to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::types::Rarity;

/// Rounds scheduled per match
pub const ROUNDS_PER_MATCH: u8 = 5;
/// Round wins needed to decide a match early
pub const WIN_THRESHOLD: u8 = 3;
/// Cards summed in a squad round
pub const SQUAD_SIZE: usize = 3;

/// Flat coins for any match
pub const BASE_COINS: u32 = 100;
/// Extra coins per opponent level
pub const COINS_PER_LEVEL: u32 = 10;
/// Exclusive upper bound of the random coin bonus on a win
pub const COIN_BONUS_MAX: u32 = 50;
/// Flat experience for any match
pub const BASE_EXPERIENCE: u32 = 50;
/// Extra experience per opponent level
pub const EXPERIENCE_PER_LEVEL: u32 = 5;
/// Exclusive upper bound of the random experience bonus on a win
pub const EXPERIENCE_BONUS_MAX: u32 = 20;
/// Coins added per opponent rarity tier (Common..Legendary)
pub const RARITY_COIN_BONUS: [u32; 4] = [0, 25, 60, 120];
/// Share of the base reward paid on a loss or draw
pub const CONSOLATION_PERCENT: u32 = 30;
/// Chance of a bonus card on a win
pub const BONUS_CARD_PERCENT: u32 = 10;
/// Extra coin percentage per consecutive win
pub const STREAK_BONUS_PERCENT: u32 = 10;
/// Streak steps that count toward the bonus
pub const STREAK_CAP: u32 = 5;

/// Highest level a card can reach
pub const MAX_CARD_LEVEL: u16 = 30;
/// Experience for a card's first level-up
pub const CARD_LEVEL_BASE_EXPERIENCE: u32 = 100;
/// Additional experience per level for each later level-up
pub const CARD_LEVEL_STEP_EXPERIENCE: u32 = 50;
/// Upper bound (inclusive) of per-stat growth on level-up
pub const STAT_GROWTH_MAX: u32 = 3;
/// Maximum material cards consumed by one enhancement
pub const MAX_ENHANCE_MATERIALS: u32 = 5;
/// Minimum material cards for a fusion
pub const MIN_FUSION_MATERIALS: u32 = 2;
/// Maximum material cards for a fusion
pub const MAX_FUSION_MATERIALS: u32 = 5;
/// Chance that a fusion upgrades rarity by one tier
pub const FUSION_UPGRADE_PERCENT: u32 = 25;
/// Experience per player level
pub const PLAYER_LEVEL_EXPERIENCE: u32 = 200;
/// Highest player level
pub const MAX_PLAYER_LEVEL: u16 = 100;
/// Coins for one random card from the shop
pub const SHOP_CARD_PRICE: u64 = 150;

/// Rating assigned to new players
pub const STARTING_RATING: u32 = 1200;
/// Rating never drops below this
pub const MIN_RATING: u32 = 100;
/// Elo K-factor
pub const ELO_K: u32 = 32;

/// Round scheduling rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    pub rounds_per_match: u8,
    pub win_threshold: u8,
    pub squad_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds_per_match: ROUNDS_PER_MATCH,
            win_threshold: WIN_THRESHOLD,
            squad_size: SQUAD_SIZE,
        }
    }
}

impl MatchConfig {
    /// A match must be decidable within its schedule
    pub fn validate(&self) -> GameResult<()> {
        if self.rounds_per_match == 0
            || self.win_threshold == 0
            || self.win_threshold > self.rounds_per_match
            || self.squad_size == 0
        {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}

/// Coin and experience payout rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardConfig {
    pub base_coins: u32,
    pub coins_per_level: u32,
    pub coin_bonus_max: u32,
    pub base_experience: u32,
    pub experience_per_level: u32,
    pub experience_bonus_max: u32,
    pub rarity_coin_bonus: [u32; 4],
    pub consolation_percent: u32,
    pub bonus_card_percent: u32,
    pub streak_bonus_percent: u32,
    pub streak_cap: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base_coins: BASE_COINS,
            coins_per_level: COINS_PER_LEVEL,
            coin_bonus_max: COIN_BONUS_MAX,
            base_experience: BASE_EXPERIENCE,
            experience_per_level: EXPERIENCE_PER_LEVEL,
            experience_bonus_max: EXPERIENCE_BONUS_MAX,
            rarity_coin_bonus: RARITY_COIN_BONUS,
            consolation_percent: CONSOLATION_PERCENT,
            bonus_card_percent: BONUS_CARD_PERCENT,
            streak_bonus_percent: STREAK_BONUS_PERCENT,
            streak_cap: STREAK_CAP,
        }
    }
}

impl RewardConfig {
    pub fn rarity_bonus(&self, rarity: Rarity) -> u32 {
        self.rarity_coin_bonus[rarity.index()]
    }

    /// A loss may never pay more than a win, and rarer opponents never pay less
    pub fn validate(&self) -> GameResult<()> {
        if self.consolation_percent > 100
            || self.rarity_coin_bonus.windows(2).any(|w| w[0] > w[1])
        {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}

/// Card growth, fusion and rating rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionConfig {
    pub max_card_level: u16,
    pub card_level_base_experience: u32,
    pub card_level_step_experience: u32,
    pub stat_growth_max: u32,
    pub max_enhance_materials: u32,
    pub min_fusion_materials: u32,
    pub max_fusion_materials: u32,
    pub fusion_upgrade_percent: u32,
    pub player_level_experience: u32,
    pub max_player_level: u16,
    pub starting_rating: u32,
    pub min_rating: u32,
    pub elo_k: u32,
    pub shop_card_price: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            max_card_level: MAX_CARD_LEVEL,
            card_level_base_experience: CARD_LEVEL_BASE_EXPERIENCE,
            card_level_step_experience: CARD_LEVEL_STEP_EXPERIENCE,
            stat_growth_max: STAT_GROWTH_MAX,
            max_enhance_materials: MAX_ENHANCE_MATERIALS,
            min_fusion_materials: MIN_FUSION_MATERIALS,
            max_fusion_materials: MAX_FUSION_MATERIALS,
            fusion_upgrade_percent: FUSION_UPGRADE_PERCENT,
            player_level_experience: PLAYER_LEVEL_EXPERIENCE,
            max_player_level: MAX_PLAYER_LEVEL,
            starting_rating: STARTING_RATING,
            min_rating: MIN_RATING,
            elo_k: ELO_K,
            shop_card_price: SHOP_CARD_PRICE,
        }
    }
}

/// Everything the engine can be tuned with, as loaded from one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(rename = "match")]
    pub match_rules: MatchConfig,
    pub rewards: RewardConfig,
    pub progression: ProgressionConfig,
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        self.match_rules.validate()?;
        self.rewards.validate()
    }
}
