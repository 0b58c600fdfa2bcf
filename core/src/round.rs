//! Single-round resolution.
//!
//! A round reduces each side's cards to one comparable score according to
//! its [`RoundKind`], then compares the two scores. Nothing is retained
//! between calls apart from what the caller passes in.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::log;
use crate::rng::BattleRng;
use crate::types::{Card, CardId, Faction, Stat, Team};

/// How a round picks and scores each side's cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoundKind {
    /// One random card, last digit of its power
    PowerDigit,
    /// One random card of the faction, last digit of its power
    FactionClash { faction: Faction },
    /// Up to a squad of random cards, last digit of their summed power
    SquadSum,
    /// Best value of one stat, compared in full
    StatDuel { stat: Stat },
    /// Strongest card, last digit of its power
    Champion,
}

impl RoundKind {
    /// Whether scores are reduced to their last decimal digit
    pub fn uses_last_digit(&self) -> bool {
        !matches!(self, RoundKind::StatDuel { .. })
    }
}

/// Who took a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundWinner {
    Player,
    Opponent,
    Draw,
}

/// The cards one side put forward in a round and what they scored
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePick {
    pub card_ids: Vec<CardId>,
    /// Full representative value, used as tiebreak
    pub value: u32,
    /// Compared score
    pub score: u32,
    /// Faction filter came up empty and the pick used the whole deck
    pub fallback: bool,
}

/// One resolved round
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRound {
    /// 1-based
    pub number: u8,
    pub kind: RoundKind,
    pub player: SidePick,
    pub opponent: SidePick,
    pub winner: RoundWinner,
}

pub fn last_digit(value: u32) -> u32 {
    value % 10
}

/// Higher score wins, equal scores fall back to the full value.
pub fn compare(player: &SidePick, opponent: &SidePick) -> RoundWinner {
    match (player.score, player.value).cmp(&(opponent.score, opponent.value)) {
        core::cmp::Ordering::Greater => RoundWinner::Player,
        core::cmp::Ordering::Less => RoundWinner::Opponent,
        core::cmp::Ordering::Equal => RoundWinner::Draw,
    }
}

/// Index of the first card holding the maximum of `key`
fn index_of_max<F>(cards: &[Card], key: F) -> usize
where
    F: Fn(&Card) -> u32,
{
    let mut best = 0;
    for (i, card) in cards.iter().enumerate().skip(1) {
        if key(card) > key(&cards[best]) {
            best = i;
        }
    }
    best
}

fn single(card: &Card, value: u32, kind: &RoundKind, fallback: bool) -> SidePick {
    let score = if kind.uses_last_digit() {
        last_digit(value)
    } else {
        value
    };
    SidePick {
        card_ids: vec![card.id],
        value,
        score,
        fallback,
    }
}

fn pick_side<R: BattleRng>(
    kind: &RoundKind,
    team: Team,
    cards: &[Card],
    squad_size: usize,
    rng: &mut R,
) -> GameResult<SidePick> {
    if cards.is_empty() {
        return Err(GameError::InvalidInput { team });
    }

    let pick = match kind {
        RoundKind::PowerDigit => {
            let card = &cards[rng.gen_range(cards.len())];
            single(card, card.total_power(), kind, false)
        }
        RoundKind::FactionClash { faction } => {
            let pool: Vec<&Card> = cards.iter().filter(|c| c.faction == *faction).collect();
            if pool.is_empty() {
                log::warn(&format!(
                    "{} has no {:?} cards, drawing from the full deck",
                    team.as_str(),
                    faction
                ));
                let card = &cards[rng.gen_range(cards.len())];
                single(card, card.total_power(), kind, true)
            } else {
                let card = pool[rng.gen_range(pool.len())];
                single(card, card.total_power(), kind, false)
            }
        }
        RoundKind::SquadSum => {
            let picked = rng.sample_indices(cards.len(), squad_size);
            let value: u32 = picked.iter().map(|i| cards[*i].total_power()).sum();
            SidePick {
                card_ids: picked.iter().map(|i| cards[*i].id).collect(),
                value,
                score: last_digit(value),
                fallback: false,
            }
        }
        RoundKind::StatDuel { stat } => {
            let card = &cards[index_of_max(cards, |c| c.stats.get(*stat))];
            single(card, card.stats.get(*stat), kind, false)
        }
        RoundKind::Champion => {
            let card = &cards[index_of_max(cards, Card::total_power)];
            single(card, card.total_power(), kind, false)
        }
    };
    Ok(pick)
}

/// Resolve one round between the two decks.
///
/// Fails with `InvalidInput` if either side has no cards. The player side
/// draws from the random source before the opponent side.
pub fn resolve_round<R: BattleRng>(
    number: u8,
    kind: RoundKind,
    player: &[Card],
    opponent: &[Card],
    squad_size: usize,
    rng: &mut R,
) -> GameResult<BattleRound> {
    let player_pick = pick_side(&kind, Team::Player, player, squad_size, rng)?;
    let opponent_pick = pick_side(&kind, Team::Opponent, opponent, squad_size, rng)?;
    let winner = compare(&player_pick, &opponent_pick);

    let round = BattleRound {
        number,
        kind,
        player: player_pick,
        opponent: opponent_pick,
        winner,
    };
    log::round_summary(&round);
    Ok(round)
}
