//! AI opponent generation
//!
//! Opponents follow one of three deck strategies and scale deck size and
//! rarity ceiling with their level.

use serde::{Deserialize, Serialize};

use crate::cards::templates_where;
use crate::error::{GameError, GameResult};
use crate::mint::{draw_weighted, mint_card};
use crate::rng::{BattleRng, XorShiftRng};
use crate::types::{Card, CardId, Faction, PlayerId, Rarity};

/// Owner id used for generated opponent cards
pub const AI_OWNER: PlayerId = PlayerId(0);
/// Largest generated deck
pub const MAX_OPPONENT_DECK: usize = 7;

/// A computer-controlled opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opponent {
    pub level: u16,
    pub cards: Vec<Card>,
}

impl Opponent {
    pub fn new(level: u16, cards: Vec<Card>) -> Self {
        Self { level, cards }
    }

    pub fn top_rarity(&self) -> Rarity {
        self.cards
            .iter()
            .map(|c| c.rarity)
            .max()
            .unwrap_or(Rarity::Common)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Every card from one faction
    Focused(Faction),
    /// Fewer cards, rarity floor one tier up
    Elite,
    /// Anything goes
    Mixed,
}

/// Highest rarity an opponent of this level may field
pub fn rarity_ceiling(level: u16) -> Rarity {
    match level {
        0..=4 => Rarity::Rare,
        5..=9 => Rarity::Epic,
        _ => Rarity::Legendary,
    }
}

pub fn deck_size(level: u16) -> usize {
    (3 + level as usize / 4).min(MAX_OPPONENT_DECK)
}

/// Build the opponent for a level, deterministic per seed
pub fn generate_opponent(level: u16, seed: u64) -> GameResult<Opponent> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let strategy = match rng.gen_range(3) {
        0 => Strategy::Focused(Faction::ALL[rng.gen_range(Faction::ALL.len())]),
        1 => Strategy::Elite,
        _ => Strategy::Mixed,
    };

    let ceiling = rarity_ceiling(level);
    let (size, floor) = match strategy {
        Strategy::Elite => (deck_size(level).saturating_sub(1).max(1), Rarity::Rare),
        _ => (deck_size(level), Rarity::Common),
    };
    let candidates = templates_where(|t| {
        t.rarity <= ceiling
            && t.rarity >= floor
            && match strategy {
                Strategy::Focused(faction) => t.faction == faction,
                _ => true,
            }
    });

    let mut cards = Vec::with_capacity(size);
    for i in 0..size {
        let template = draw_weighted(&candidates, &mut rng).ok_or(GameError::TemplateNotFound)?;
        cards.push(mint_card(
            template.id,
            CardId(i as u32 + 1),
            AI_OWNER,
            0,
            &mut rng,
        )?);
    }

    Ok(Opponent::new(level, cards))
}
