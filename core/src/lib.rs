//! Faction Clash game engine.
//!
//! Rounds compare the two decks, matches accumulate rounds to a
//! first-to-three result, and rewards, ratings and card growth are settled
//! against a player store.

pub mod arena;
pub mod battle;
pub mod cards;
pub mod config;
pub mod enhance;
pub mod error;
pub mod fusion;
pub mod log;
pub mod mint;
pub mod notify;
pub mod opponents;
pub mod rating;
pub mod reward;
pub mod rng;
pub mod round;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use arena::{Arena, PvpResult};
pub use battle::{build_schedule, run_match, run_scheduled_match, MatchResult, Outcome};
pub use config::{GameConfig, MatchConfig, ProgressionConfig, RewardConfig};
pub use error::{GameError, GameResult};
pub use reward::{calculate_reward, Reward, RewardContext};
pub use rng::{BattleRng, XorShiftRng};
pub use round::{resolve_round, BattleRound, RoundKind, RoundWinner};
pub use state::PlayerState;
pub use store::{MemoryStore, PlayerStore};
pub use types::*;
