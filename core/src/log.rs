//! Logging utilities
//!
//! Thin helpers over the `log` facade. The library never installs a logger;
//! binaries decide where records go.

use crate::battle::MatchResult;
use crate::round::BattleRound;

const TARGET: &str = "clash";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{}", msg);
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{}", msg);
}

/// Log an error message
#[inline(always)]
pub fn error(msg: &str) {
    ::log::error!(target: TARGET, "{}", msg);
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{}] {}", label, msg);
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::info!(target: TARGET, ">> {} ({})", name, details);
}

/// Log one resolved round
pub fn round_summary(round: &BattleRound) {
    ::log::debug!(
        target: TARGET,
        "round {} {:?}: player {}/{} vs opponent {}/{} -> {:?}",
        round.number,
        round.kind,
        round.player.score,
        round.player.value,
        round.opponent.score,
        round.opponent.value,
        round.winner
    );
}

/// Log the final tally of a match
pub fn match_summary(result: &MatchResult) {
    ::log::info!(
        target: TARGET,
        "match {:?} after {} rounds ({}-{}, {} drawn)",
        result.outcome,
        result.rounds.len(),
        result.player_wins,
        result.opponent_wins,
        result.draws
    );
}
