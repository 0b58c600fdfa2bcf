//! Card fusion: consume several cards to mint one of equal or higher rarity.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::cards::{template, templates_where};
use crate::config::ProgressionConfig;
use crate::error::{GameError, GameResult};
use crate::mint::draw_weighted;
use crate::rng::BattleRng;
use crate::types::{Card, CardId, CardStats, Faction, PlayerId, Rarity, Stat};

/// Result of a fusion
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionReport {
    pub consumed: Vec<CardId>,
    pub card: Card,
    /// Rarity went one tier above the best material
    pub upgraded: bool,
}

pub fn validate_materials(materials: &[Card], config: &ProgressionConfig) -> GameResult<()> {
    let count = materials.len() as u32;
    let need = config.min_fusion_materials.max(1);
    if count < need {
        return Err(GameError::NotEnoughMaterial { have: count, need });
    }
    if count > config.max_fusion_materials {
        return Err(GameError::TooManyMaterials {
            have: count,
            max: config.max_fusion_materials,
        });
    }
    for (i, material) in materials.iter().enumerate() {
        if materials[..i].iter().any(|m| m.id == material.id) {
            return Err(GameError::InvalidMaterial { id: material.id });
        }
        if material.locked {
            return Err(GameError::CardLocked { id: material.id });
        }
    }
    Ok(())
}

/// Most represented faction; ties go to the earliest material
fn dominant_faction(materials: &[Card]) -> Faction {
    let mut best = materials[0].faction;
    let mut best_count = 0;
    for card in materials {
        let count = materials.iter().filter(|c| c.faction == card.faction).count();
        if count > best_count {
            best = card.faction;
            best_count = count;
        }
    }
    best
}

/// Average per-stat growth the materials carried above their template base
fn carried_bonus(materials: &[Card]) -> GameResult<CardStats> {
    let mut sum = CardStats::default();
    for card in materials {
        let base = template(card.template_id).ok_or(GameError::TemplateNotFound)?;
        sum = sum.plus(&card.stats.surplus_over(&base.base));
    }
    let n = materials.len() as u32;
    let mut avg = CardStats::default();
    for stat in Stat::ALL {
        *avg.get_mut(stat) = sum.get(stat) / n;
    }
    Ok(avg)
}

/// Fuse `materials` into a new card with id `new_id`.
///
/// Nothing is mutated here; the caller removes the materials and adds the
/// returned card.
pub fn fuse<R: BattleRng>(
    materials: &[Card],
    new_id: CardId,
    owner: PlayerId,
    acquired_at: u64,
    config: &ProgressionConfig,
    rng: &mut R,
) -> GameResult<FusionReport> {
    validate_materials(materials, config)?;

    let best = materials
        .iter()
        .map(|c| c.rarity)
        .max()
        .unwrap_or(Rarity::Common);
    let upgraded = best != Rarity::Legendary && rng.chance(config.fusion_upgrade_percent);
    let rarity = if upgraded { best.upgraded() } else { best };
    let faction = dominant_faction(materials);

    let mut candidates = templates_where(|t| t.rarity == rarity && t.faction == faction);
    if candidates.is_empty() {
        candidates = templates_where(|t| t.rarity == rarity);
    }
    let chosen = draw_weighted(&candidates, rng).ok_or(GameError::TemplateNotFound)?;

    let stats = chosen.base.plus(&carried_bonus(materials)?);
    let card = Card::from_template(new_id, chosen, owner, acquired_at).with_stats(stats);

    Ok(FusionReport {
        consumed: materials.iter().map(|m| m.id).collect(),
        card,
        upgraded,
    })
}
