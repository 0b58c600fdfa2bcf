//! Card enhancement: feed material cards into a target to level it up.
//!
//! Experience is lifetime-cumulative, and the level is whatever that total
//! has reached on the curve, so neither value ever goes down.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::ProgressionConfig;
use crate::error::{GameError, GameResult};
use crate::rng::BattleRng;
use crate::types::{Card, CardId, CardStats, Stat};

/// What an enhancement did to its target
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceReport {
    pub card_id: CardId,
    pub consumed: Vec<CardId>,
    pub experience_gained: u32,
    pub levels_gained: u16,
    pub new_level: u16,
    pub stat_gain: CardStats,
}

/// Cumulative experience needed to stand at `level`
pub fn experience_for_level(level: u16, config: &ProgressionConfig) -> u32 {
    let mut total: u64 = 0;
    for l in 1..level.max(1) {
        total += config.card_level_base_experience as u64
            + (l as u64 - 1) * config.card_level_step_experience as u64;
    }
    total.min(u32::MAX as u64) as u32
}

/// Highest level reachable with `experience`, capped at the max level
pub fn level_for_experience(experience: u32, config: &ProgressionConfig) -> u16 {
    let mut level = 1;
    while level < config.max_card_level && experience >= experience_for_level(level + 1, config) {
        level += 1;
    }
    level
}

/// Experience a card is worth when consumed
pub fn material_experience(card: &Card) -> u32 {
    (card.total_power() / 4)
        .saturating_mul(card.rarity.index() as u32 + 1)
        .saturating_add(card.experience / 2)
}

/// One level-up worth of growth: 1..=max on every stat
fn roll_growth<R: BattleRng>(config: &ProgressionConfig, rng: &mut R) -> CardStats {
    let mut growth = CardStats::default();
    let span = config.stat_growth_max.max(1) as usize;
    for stat in Stat::ALL {
        *growth.get_mut(stat) = 1 + rng.gen_range(span) as u32;
    }
    growth
}

/// Add experience and apply any level-ups. Returns levels gained and the
/// total stat growth.
pub fn gain_experience<R: BattleRng>(
    card: &mut Card,
    amount: u32,
    config: &ProgressionConfig,
    rng: &mut R,
) -> (u16, CardStats) {
    card.experience = card.experience.saturating_add(amount);
    let target_level = level_for_experience(card.experience, config).max(card.level);

    let mut gain = CardStats::default();
    let levels = target_level - card.level;
    for _ in 0..levels {
        gain = gain.plus(&roll_growth(config, rng));
    }
    card.stats = card.stats.plus(&gain);
    card.level = target_level;
    (levels, gain)
}

/// Check a material list against its target before anything is consumed.
pub fn validate_materials(
    target: &Card,
    materials: &[Card],
    config: &ProgressionConfig,
) -> GameResult<()> {
    if target.level >= config.max_card_level {
        return Err(GameError::MaxLevel { id: target.id });
    }
    if materials.is_empty() {
        return Err(GameError::NotEnoughMaterial { have: 0, need: 1 });
    }
    if materials.len() as u32 > config.max_enhance_materials {
        return Err(GameError::TooManyMaterials {
            have: materials.len() as u32,
            max: config.max_enhance_materials,
        });
    }
    for (i, material) in materials.iter().enumerate() {
        if material.id == target.id || materials[..i].iter().any(|m| m.id == material.id) {
            return Err(GameError::InvalidMaterial { id: material.id });
        }
        if material.locked {
            return Err(GameError::CardLocked { id: material.id });
        }
    }
    Ok(())
}

/// Feed `materials` into `target`. The caller removes the materials from
/// the inventory once this succeeds.
pub fn enhance<R: BattleRng>(
    target: &mut Card,
    materials: &[Card],
    config: &ProgressionConfig,
    rng: &mut R,
) -> GameResult<EnhanceReport> {
    validate_materials(target, materials, config)?;

    let experience: u32 = materials
        .iter()
        .map(material_experience)
        .fold(0u32, |acc, xp| acc.saturating_add(xp));
    let (levels_gained, stat_gain) = gain_experience(target, experience, config, rng);

    Ok(EnhanceReport {
        card_id: target.id,
        consumed: materials.iter().map(|m| m.id).collect(),
        experience_gained: experience,
        levels_gained,
        new_level: target.level,
        stat_gain,
    })
}
