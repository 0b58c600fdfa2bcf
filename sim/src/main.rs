use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clash_core::mint::mint_deck;
use clash_core::notify::LogSink;
use clash_core::opponents::generate_opponent;
use clash_core::{
    calculate_reward, run_match, Arena, GameConfig, MemoryStore, Outcome, PlayerId, PlayerStore,
    Rarity, RewardContext, XorShiftRng,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Faction Clash match simulator")]
struct Args {
    /// JSON file with game configuration overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One stored player against a generated AI opponent
    Battle {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 5)]
        deck_size: usize,
        #[arg(long, default_value_t = 1)]
        opponent_level: u16,
    },
    /// Two stored players against each other
    Pvp {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 5)]
        deck_size: usize,
        #[arg(long, default_value_t = 1200)]
        rating_a: u32,
        #[arg(long, default_value_t = 1200)]
        rating_b: u32,
    },
    /// Many random-deck matches in parallel, reporting the outcome spread
    Bench {
        #[arg(long, default_value_t = 10_000)]
        matches: u64,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 5)]
        deck_size: usize,
    },
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct BenchSummary {
    matches: u64,
    victories: u64,
    defeats: u64,
    draws: u64,
    total_rounds: u64,
    total_coins: u64,
    average_rounds: f64,
    average_coins: f64,
}

impl BenchSummary {
    fn merge(mut self, other: BenchSummary) -> BenchSummary {
        self.matches += other.matches;
        self.victories += other.victories;
        self.defeats += other.defeats;
        self.draws += other.draws;
        self.total_rounds += other.total_rounds;
        self.total_coins += other.total_coins;
        self
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate().context("invalid game config")?;
    Ok(config)
}

fn seeded_player(
    store: &mut MemoryStore,
    id: PlayerId,
    rating: u32,
    deck_size: usize,
    seed: u64,
) -> Result<()> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let mut state = clash_core::PlayerState::new(id, rating);
    for card in mint_deck(1, id, deck_size, 0, &mut rng)? {
        state.add_card(card);
    }
    store.save(&state)?;
    Ok(())
}

fn battle(config: GameConfig, seed: u64, deck_size: usize, opponent_level: u16) -> Result<()> {
    let player = PlayerId(1);
    let mut store = MemoryStore::new();
    seeded_player(
        &mut store,
        player,
        config.progression.starting_rating,
        deck_size,
        seed,
    )?;
    let opponent = generate_opponent(opponent_level, seed.wrapping_add(1))?;

    let mut arena = Arena::with_config(store, LogSink, config)?;
    let result = arena.battle(player, &opponent, seed, 0)?;
    let state = arena.store().load(player)?;

    let report = serde_json::json!({
        "opponent": opponent,
        "result": result,
        "player": state,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn pvp(config: GameConfig, seed: u64, deck_size: usize, rating_a: u32, rating_b: u32) -> Result<()> {
    let (a, b) = (PlayerId(1), PlayerId(2));
    let mut store = MemoryStore::new();
    seeded_player(&mut store, a, rating_a, deck_size, seed)?;
    seeded_player(&mut store, b, rating_b, deck_size, seed.wrapping_add(1))?;

    let mut arena = Arena::with_config(store, LogSink, config)?;
    let result = arena.pvp(a, b, seed, 0)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn bench(config: GameConfig, matches: u64, seed: u64, deck_size: usize) -> Result<()> {
    info!(matches, seed, deck_size, "running bench");
    let config = &config;

    let mut summary = (0..matches)
        .into_par_iter()
        .map(|i| -> Result<BenchSummary> {
            let mut rng = XorShiftRng::seed_from_u64(seed.wrapping_add(i));
            let player = mint_deck(1, PlayerId(1), deck_size, 0, &mut rng)?;
            let opponent = mint_deck(1, PlayerId(2), deck_size, 0, &mut rng)?;
            let result = run_match(&player, &opponent, &config.match_rules, &mut rng)?;
            let context = RewardContext {
                opponent_level: 1,
                opponent_rarity: opponent
                    .iter()
                    .map(|c| c.rarity)
                    .max()
                    .unwrap_or(Rarity::Common),
                win_streak: 0,
            };
            let reward = calculate_reward(result.outcome, &context, &config.rewards, &mut rng);

            let mut one = BenchSummary {
                matches: 1,
                total_rounds: result.rounds.len() as u64,
                total_coins: reward.coins as u64,
                ..BenchSummary::default()
            };
            match result.outcome {
                Outcome::Victory => one.victories = 1,
                Outcome::Defeat => one.defeats = 1,
                Outcome::Draw => one.draws = 1,
            }
            Ok(one)
        })
        .try_reduce(BenchSummary::default, |a, b| Ok(a.merge(b)))?;

    if summary.matches > 0 {
        summary.average_rounds = summary.total_rounds as f64 / summary.matches as f64;
        summary.average_coins = summary.total_coins as f64 / summary.matches as f64;
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Battle {
            seed,
            deck_size,
            opponent_level,
        } => battle(config, seed, deck_size, opponent_level),
        Command::Pvp {
            seed,
            deck_size,
            rating_a,
            rating_b,
        } => pvp(config, seed, deck_size, rating_a, rating_b),
        Command::Bench {
            matches,
            seed,
            deck_size,
        } => bench(config, matches, seed, deck_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bench_arguments() {
        let args = Args::parse_from(["clash-sim", "bench", "--matches", "20", "--seed", "3"]);
        match args.command {
            Command::Bench {
                matches,
                seed,
                deck_size,
            } => {
                assert_eq!(matches, 20);
                assert_eq!(seed, 3);
                assert_eq!(deck_size, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_config_uses_defaults() {
        let config = load_config(None).expect("defaults load");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn rejects_overpaying_consolation() {
        let path = std::env::temp_dir().join(format!("clash-sim-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"rewards":{"consolationPercent":400,"coinBonusMax":0,"experienceBonusMax":0}}"#,
        )
        .expect("write config");

        let err = load_config(Some(&path)).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(
            err.to_string().contains("invalid game config"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("clash-sim-partial-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"match":{"squadSize":2}}"#).expect("write config");

        let config = load_config(Some(&path)).expect("valid config");
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.match_rules.squad_size, 2);
        assert_eq!(config.rewards, clash_core::RewardConfig::default());
    }

    #[test]
    fn bench_summaries_merge() {
        let a = BenchSummary {
            matches: 2,
            victories: 1,
            draws: 1,
            total_rounds: 8,
            ..BenchSummary::default()
        };
        let b = BenchSummary {
            matches: 1,
            defeats: 1,
            total_rounds: 3,
            total_coins: 30,
            ..BenchSummary::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.matches, 3);
        assert_eq!(merged.victories + merged.defeats + merged.draws, 3);
        assert_eq!(merged.total_rounds, 11);
        assert_eq!(merged.total_coins, 30);
    }
}
