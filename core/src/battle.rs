//! Match accumulation: a shuffled schedule of rounds played until one side
//! reaches the win threshold or the schedule runs out.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::{GameError, GameResult};
use crate::log;
use crate::reward::Reward;
use crate::rng::BattleRng;
use crate::round::{resolve_round, BattleRound, RoundKind, RoundWinner};
use crate::types::{Card, Faction, Stat, Team};

/// Final match result from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Victory,
    Defeat,
    Draw,
}

impl Outcome {
    /// The same result seen from the other side
    pub fn flipped(&self) -> Outcome {
        match self {
            Outcome::Victory => Outcome::Defeat,
            Outcome::Defeat => Outcome::Victory,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Where a match currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    InProgress,
    Decided(Outcome),
}

/// Running tally of a match
#[derive(Debug, Clone)]
pub struct MatchState {
    pub player_wins: u8,
    pub opponent_wins: u8,
    pub draws: u8,
    pub rounds: Vec<BattleRound>,
    pub phase: MatchPhase,
    rounds_per_match: u8,
    win_threshold: u8,
}

impl MatchState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            player_wins: 0,
            opponent_wins: 0,
            draws: 0,
            rounds: Vec::with_capacity(config.rounds_per_match as usize),
            phase: MatchPhase::InProgress,
            rounds_per_match: config.rounds_per_match,
            win_threshold: config.win_threshold,
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self.phase, MatchPhase::Decided(_))
    }

    /// Number of the next round to play (1-based)
    pub fn next_round_number(&self) -> u8 {
        self.rounds.len() as u8 + 1
    }

    /// Record a round. Ignored once the match is decided.
    pub fn record(&mut self, round: BattleRound) {
        if self.is_decided() {
            return;
        }
        match round.winner {
            RoundWinner::Player => self.player_wins += 1,
            RoundWinner::Opponent => self.opponent_wins += 1,
            RoundWinner::Draw => self.draws += 1,
        }
        self.rounds.push(round);

        if self.player_wins >= self.win_threshold {
            self.phase = MatchPhase::Decided(Outcome::Victory);
        } else if self.opponent_wins >= self.win_threshold {
            self.phase = MatchPhase::Decided(Outcome::Defeat);
        } else if self.rounds.len() >= self.rounds_per_match as usize {
            self.phase = MatchPhase::Decided(self.tally());
        }
    }

    /// More round wins takes it, level counts are a draw
    fn tally(&self) -> Outcome {
        match self.player_wins.cmp(&self.opponent_wins) {
            core::cmp::Ordering::Greater => Outcome::Victory,
            core::cmp::Ordering::Less => Outcome::Defeat,
            core::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Close the match. A schedule that ran short is decided on the tally.
    pub fn finish(self) -> MatchResult {
        let outcome = match self.phase {
            MatchPhase::Decided(outcome) => outcome,
            MatchPhase::InProgress => self.tally(),
        };
        MatchResult {
            player_wins: self.player_wins,
            opponent_wins: self.opponent_wins,
            draws: self.draws,
            rounds: self.rounds,
            outcome,
            reward: None,
        }
    }
}

/// Everything produced by one match
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub player_wins: u8,
    pub opponent_wins: u8,
    pub draws: u8,
    pub rounds: Vec<BattleRound>,
    pub outcome: Outcome,
    /// Filled in once the match has been settled against a player
    pub reward: Option<Reward>,
}

/// The five round kinds in shuffled order, with the faction and stat for
/// parameterised rounds drawn from the same source.
pub fn build_schedule<R: BattleRng>(rng: &mut R) -> Vec<RoundKind> {
    let faction = Faction::ALL[rng.gen_range(Faction::ALL.len())];
    let stat = Stat::ALL[rng.gen_range(Stat::ALL.len())];
    let mut schedule = vec![
        RoundKind::PowerDigit,
        RoundKind::FactionClash { faction },
        RoundKind::SquadSum,
        RoundKind::StatDuel { stat },
        RoundKind::Champion,
    ];
    rng.shuffle(&mut schedule);
    schedule
}

/// Play rounds from `schedule` until the match is decided.
///
/// At most `rounds_per_match` entries of the schedule are used. Decks are
/// checked up front so a bad input never yields a partial result.
pub fn run_scheduled_match<R: BattleRng>(
    player: &[Card],
    opponent: &[Card],
    schedule: &[RoundKind],
    config: &MatchConfig,
    rng: &mut R,
) -> GameResult<MatchResult> {
    config.validate()?;
    if player.is_empty() {
        return Err(GameError::InvalidInput { team: Team::Player });
    }
    if opponent.is_empty() {
        return Err(GameError::InvalidInput {
            team: Team::Opponent,
        });
    }

    let mut state = MatchState::new(config);
    for kind in schedule.iter().take(config.rounds_per_match as usize) {
        let round = resolve_round(
            state.next_round_number(),
            *kind,
            player,
            opponent,
            config.squad_size,
            rng,
        )?;
        state.record(round);
        if state.is_decided() {
            break;
        }
    }

    let result = state.finish();
    log::match_summary(&result);
    Ok(result)
}

/// Shuffle a fresh schedule and play it out
pub fn run_match<R: BattleRng>(
    player: &[Card],
    opponent: &[Card],
    config: &MatchConfig,
    rng: &mut R,
) -> GameResult<MatchResult> {
    let mut schedule = build_schedule(rng);
    // Longer matches repeat the shuffled kinds
    while schedule.len() < config.rounds_per_match as usize {
        let more = build_schedule(rng);
        schedule.extend(more);
    }
    run_scheduled_match(player, opponent, &schedule, config, rng)
}
