//! Elo rating updates for player-versus-player matches.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::battle::Outcome;
use crate::config::ProgressionConfig;

/// Ratings of both players before and after a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub player_before: u32,
    pub player_after: u32,
    pub opponent_before: u32,
    pub opponent_after: u32,
}

/// Probability that `rating` beats `opponent`
pub fn expected_score(rating: u32, opponent: u32) -> f64 {
    let diff = opponent as f64 - rating as f64;
    1.0 / (1.0 + 10f64.powf(diff / 400.0))
}

fn actual_score(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Victory => 1.0,
        Outcome::Draw => 0.5,
        Outcome::Defeat => 0.0,
    }
}

/// Signed rating change for one side
pub fn rating_delta(rating: u32, opponent: u32, outcome: Outcome, k: u32) -> i32 {
    let expected = expected_score(rating, opponent);
    (k as f64 * (actual_score(outcome) - expected)).round() as i32
}

/// Apply a delta, never dropping below `floor`
pub fn apply_delta(rating: u32, delta: i32, floor: u32) -> u32 {
    let updated = rating as i64 + delta as i64;
    updated.max(floor as i64).min(u32::MAX as i64) as u32
}

/// Update both ratings; `outcome` is from the first player's view
pub fn update_ratings(
    player: u32,
    opponent: u32,
    outcome: Outcome,
    config: &ProgressionConfig,
) -> RatingChange {
    let player_delta = rating_delta(player, opponent, outcome, config.elo_k);
    let opponent_delta = rating_delta(opponent, player, outcome.flipped(), config.elo_k);

    RatingChange {
        player_before: player,
        player_after: apply_delta(player, player_delta, config.min_rating),
        opponent_before: opponent,
        opponent_after: apply_delta(opponent, opponent_delta, config.min_rating),
    }
}
