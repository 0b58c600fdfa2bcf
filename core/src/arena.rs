//! Arena flows: load players, play, buy or craft, settle, save, notify.
//!
//! Every flow works on loaded copies and only saves once the whole
//! computation has succeeded, so an error leaves the store untouched.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::battle::{run_match, MatchResult};
use crate::config::GameConfig;
use crate::enhance::EnhanceReport;
use crate::error::{GameError, GameResult};
use crate::fusion::FusionReport;
use crate::log;
use crate::notify::{Notification, NotificationSink};
use crate::opponents::Opponent;
use crate::rating::{update_ratings, RatingChange};
use crate::reward::{calculate_reward, Reward, RewardContext};
use crate::rng::XorShiftRng;
use crate::state::{PlayerState, RewardApplied};
use crate::store::PlayerStore;
use crate::types::{CardId, PlayerId};

/// Result of a player-versus-player match
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvpResult {
    /// Seen from the challenger, carrying the challenger's reward
    pub result: MatchResult,
    pub opponent_reward: Reward,
    pub rating: RatingChange,
}

pub struct Arena<S, N> {
    store: S,
    sink: N,
    config: GameConfig,
}

impl<S: PlayerStore, N: NotificationSink> Arena<S, N> {
    pub fn new(store: S, sink: N) -> Self {
        Self {
            store,
            sink,
            config: GameConfig::default(),
        }
    }

    /// Use custom rules. Fails with `InvalidConfig` for rules that cannot
    /// produce a fair result.
    pub fn with_config(store: S, sink: N, config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            sink,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn into_parts(self) -> (S, N) {
        (self.store, self.sink)
    }

    /// Create and save a new player at the starting rating
    pub fn register(&mut self, id: PlayerId) -> GameResult<PlayerState> {
        let state = PlayerState::new(id, self.config.progression.starting_rating);
        self.store.save(&state)?;
        log::action("register", &format!("player={}", id.0));
        Ok(state)
    }

    fn settle(
        &mut self,
        player: &mut PlayerState,
        result: &MatchResult,
        context: RewardContext,
        now: u64,
        rng: &mut XorShiftRng,
    ) -> GameResult<(Reward, RewardApplied)> {
        let reward = calculate_reward(result.outcome, &context, &self.config.rewards, rng);
        let applied = player.apply_reward(&reward, now, &self.config.progression, rng)?;
        player.record_outcome(result.outcome);
        Ok((reward, applied))
    }

    fn announce(
        &mut self,
        player: &PlayerState,
        result: &MatchResult,
        reward: &Reward,
        applied: &RewardApplied,
    ) {
        self.sink.notify(Notification::MatchSettled {
            player: player.id,
            outcome: result.outcome,
            coins: reward.coins,
            experience: reward.experience,
        });
        if applied.levels_gained > 0 {
            self.sink.notify(Notification::LevelUp {
                player: player.id,
                level: player.level,
            });
        }
        if let Some(card_id) = applied.bonus_card {
            self.sink.notify(Notification::BonusCard {
                player: player.id,
                card_id,
            });
        }
    }

    /// Play a stored player against an AI opponent and settle the result
    pub fn battle(
        &mut self,
        player_id: PlayerId,
        opponent: &Opponent,
        seed: u64,
        now: u64,
    ) -> GameResult<MatchResult> {
        log::action(
            "battle",
            &format!("player={} opponent_level={}", player_id.0, opponent.level),
        );
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut player = self.store.load(player_id)?;

        let mut result = run_match(
            &player.deck(),
            &opponent.cards,
            &self.config.match_rules,
            &mut rng,
        )?;
        let context = RewardContext {
            opponent_level: opponent.level,
            opponent_rarity: opponent.top_rarity(),
            win_streak: player.win_streak,
        };
        let (reward, applied) = self.settle(&mut player, &result, context, now, &mut rng)?;

        self.store.save(&player)?;
        result.reward = Some(reward.clone());
        self.announce(&player, &result, &reward, &applied);
        Ok(result)
    }

    /// Play two stored players against each other, paying both and
    /// moving both ratings
    pub fn pvp(
        &mut self,
        challenger: PlayerId,
        defender: PlayerId,
        seed: u64,
        now: u64,
    ) -> GameResult<PvpResult> {
        if challenger == defender {
            return Err(GameError::SelfMatch { id: challenger });
        }
        log::action(
            "pvp",
            &format!("challenger={} defender={}", challenger.0, defender.0),
        );
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut a = self.store.load(challenger)?;
        let mut b = self.store.load(defender)?;

        let mut result = run_match(&a.deck(), &b.deck(), &self.config.match_rules, &mut rng)?;

        let a_context = RewardContext {
            opponent_level: b.level,
            opponent_rarity: b.top_rarity(),
            win_streak: a.win_streak,
        };
        let b_context = RewardContext {
            opponent_level: a.level,
            opponent_rarity: a.top_rarity(),
            win_streak: b.win_streak,
        };
        let (a_reward, a_applied) = self.settle(&mut a, &result, a_context, now, &mut rng)?;
        let b_result = MatchResult {
            outcome: result.outcome.flipped(),
            ..result.clone()
        };
        let (b_reward, b_applied) = self.settle(&mut b, &b_result, b_context, now, &mut rng)?;

        let rating = update_ratings(a.rating, b.rating, result.outcome, &self.config.progression);
        a.rating = rating.player_after;
        b.rating = rating.opponent_after;

        self.store.save(&a)?;
        self.store.save(&b)?;

        result.reward = Some(a_reward.clone());
        self.announce(&a, &result, &a_reward, &a_applied);
        self.announce(&b, &b_result, &b_reward, &b_applied);
        for (id, before, after) in [
            (a.id, rating.player_before, rating.player_after),
            (b.id, rating.opponent_before, rating.opponent_after),
        ] {
            self.sink.notify(Notification::RatingChanged {
                player: id,
                before,
                after,
            });
        }

        Ok(PvpResult {
            result,
            opponent_reward: b_reward,
            rating,
        })
    }

    /// Spend coins on a random card from the shop
    pub fn buy(&mut self, player_id: PlayerId, seed: u64, now: u64) -> GameResult<CardId> {
        let price = self.config.progression.shop_card_price;
        log::action("buy", &format!("player={} price={}", player_id.0, price));
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut player = self.store.load(player_id)?;
        let card_id = player.purchase(price, now, &mut rng)?;
        self.store.save(&player)?;

        self.sink.notify(Notification::CardPurchased {
            player: player_id,
            card_id,
            price,
        });
        Ok(card_id)
    }

    /// Enhance one of a stored player's cards
    pub fn enhance(
        &mut self,
        player_id: PlayerId,
        target: CardId,
        materials: &[CardId],
        seed: u64,
    ) -> GameResult<EnhanceReport> {
        log::action(
            "enhance",
            &format!("player={} target={} materials={}", player_id.0, target.0, materials.len()),
        );
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut player = self.store.load(player_id)?;
        let report = player.enhance_card(target, materials, &self.config.progression, &mut rng)?;
        self.store.save(&player)?;

        self.sink.notify(Notification::CardEnhanced {
            player: player_id,
            card_id: target,
            level: report.new_level,
        });
        Ok(report)
    }

    /// Fuse several of a stored player's cards into a new one
    pub fn fuse(
        &mut self,
        player_id: PlayerId,
        materials: &[CardId],
        seed: u64,
        now: u64,
    ) -> GameResult<FusionReport> {
        log::action(
            "fuse",
            &format!("player={} materials={}", player_id.0, materials.len()),
        );
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut player = self.store.load(player_id)?;
        let report = player.fuse_cards(materials, now, &self.config.progression, &mut rng)?;
        self.store.save(&player)?;

        self.sink.notify(Notification::CardFused {
            player: player_id,
            card_id: report.card.id,
            upgraded: report.upgraded,
        });
        Ok(report)
    }
}
