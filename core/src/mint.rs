//! Card minting: weighted template draws and fresh card instances.

use crate::cards::{template, TEMPLATES};
use crate::error::{GameError, GameResult};
use crate::rng::BattleRng;
use crate::types::{Card, CardId, CardStats, CardTemplate, PlayerId, Stat, TemplateId};

/// Maximum per-stat deviation from template base when minting
pub const STAT_JITTER: u32 = 2;

/// Weighted pick from a candidate list. None when the list has no weight.
pub fn draw_weighted<R: BattleRng>(
    candidates: &[&'static CardTemplate],
    rng: &mut R,
) -> Option<&'static CardTemplate> {
    let total_weight: u32 = candidates.iter().map(|t| t.weight).sum();
    if total_weight == 0 {
        return None;
    }

    let mut target = rng.gen_range(total_weight as usize) as u32;
    for candidate in candidates {
        if candidate.weight == 0 {
            continue;
        }
        if target < candidate.weight {
            return Some(candidate);
        }
        target -= candidate.weight;
    }
    None
}

/// Draw any template by drop weight
pub fn draw_template<R: BattleRng>(rng: &mut R) -> GameResult<&'static CardTemplate> {
    let all: Vec<&'static CardTemplate> = TEMPLATES.iter().collect();
    draw_weighted(&all, rng).ok_or(GameError::TemplateNotFound)
}

/// Base stats with a small random spread on every attribute
fn jittered(base: &CardStats, rng: &mut impl BattleRng) -> CardStats {
    let mut stats = *base;
    let span = (STAT_JITTER * 2 + 1) as usize;
    for stat in Stat::ALL {
        let roll = rng.gen_range(span) as u32;
        let v = stats.get_mut(stat);
        *v = (*v + roll).saturating_sub(STAT_JITTER);
    }
    stats
}

/// Create a new level-1 card from a template
pub fn mint_card<R: BattleRng>(
    template_id: TemplateId,
    id: CardId,
    owner: PlayerId,
    acquired_at: u64,
    rng: &mut R,
) -> GameResult<Card> {
    let template = template(template_id).ok_or(GameError::TemplateNotFound)?;
    let stats = jittered(&template.base, rng);
    Ok(Card::from_template(id, template, owner, acquired_at).with_stats(stats))
}

/// Mint `size` cards with consecutive ids starting at `first_id`
pub fn mint_deck<R: BattleRng>(
    first_id: u32,
    owner: PlayerId,
    size: usize,
    acquired_at: u64,
    rng: &mut R,
) -> GameResult<Vec<Card>> {
    let mut deck = Vec::with_capacity(size);
    for offset in 0..size {
        let template = draw_template(rng)?;
        deck.push(mint_card(
            template.id,
            CardId(first_id + offset as u32),
            owner,
            acquired_at,
            rng,
        )?);
    }
    Ok(deck)
}
