//! Persisted player state and the inventory operations that change it.
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! state exactly as it was.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::battle::Outcome;
use crate::config::ProgressionConfig;
use crate::enhance::{self, EnhanceReport};
use crate::error::{GameError, GameResult};
use crate::fusion::{self, FusionReport};
use crate::mint::{draw_template, mint_card};
use crate::reward::Reward;
use crate::rng::BattleRng;
use crate::types::{Card, CardId, PlayerId, Rarity, TemplateId};

/// Number of faction slots a player can fill
pub const FACTION_SLOTS: usize = 5;

/// Everything persisted about one player
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: PlayerId,
    pub coins: u64,
    pub level: u16,
    /// Lifetime experience, never decreases
    pub experience: u32,
    pub rating: u32,
    pub win_streak: u32,
    pub cards: Vec<Card>,
    /// Cards assigned to faction slots (FACTION_SLOTS entries)
    pub slots: Vec<Option<CardId>>,
    /// Counter for generating unique card ids
    pub next_card_id: u32,
}

/// What applying a reward changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardApplied {
    pub levels_gained: u16,
    pub bonus_card: Option<CardId>,
}

impl PlayerState {
    pub fn new(id: PlayerId, rating: u32) -> Self {
        Self {
            id,
            coins: 0,
            level: 1,
            experience: 0,
            rating,
            win_streak: 0,
            cards: Vec::new(),
            slots: vec![None; FACTION_SLOTS],
            next_card_id: 1,
        }
    }

    /// Generate a unique card id
    pub fn generate_card_id(&mut self) -> CardId {
        let id = CardId(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Take ownership of a card, bumping the id counter past it
    pub fn add_card(&mut self, mut card: Card) {
        card.owner = self.id;
        self.next_card_id = self.next_card_id.max(card.id.0 + 1);
        self.cards.push(card);
    }

    /// Mint a fresh card from a template into the inventory
    pub fn mint<R: BattleRng>(
        &mut self,
        template_id: TemplateId,
        acquired_at: u64,
        rng: &mut R,
    ) -> GameResult<CardId> {
        let id = CardId(self.next_card_id);
        let card = mint_card(template_id, id, self.id, acquired_at, rng)?;
        self.next_card_id += 1;
        self.cards.push(card);
        Ok(id)
    }

    /// Buy one random card from the shop, weighted by drop rate
    pub fn purchase<R: BattleRng>(
        &mut self,
        price: u64,
        acquired_at: u64,
        rng: &mut R,
    ) -> GameResult<CardId> {
        if self.coins < price {
            return Err(GameError::NotEnoughCoins {
                have: self.coins,
                need: price,
            });
        }
        let template = draw_template(rng)?;
        let id = self.mint(template.id, acquired_at, rng)?;
        self.coins -= price;
        Ok(id)
    }

    /// Remove a card and clear any slot that held it
    pub fn remove_card(&mut self, id: CardId) -> GameResult<Card> {
        let index = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(GameError::CardNotFound { id })?;
        for slot in self.slots.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        Ok(self.cards.remove(index))
    }

    pub fn set_locked(&mut self, id: CardId, locked: bool) -> GameResult<()> {
        let card = self.card_mut(id).ok_or(GameError::CardNotFound { id })?;
        card.locked = locked;
        Ok(())
    }

    /// Put a card into a faction slot, or clear the slot with None
    pub fn assign_slot(&mut self, index: usize, card: Option<CardId>) -> GameResult<()> {
        if index >= self.slots.len() {
            return Err(GameError::SlotOutOfRange {
                index: u8::try_from(index).unwrap_or(u8::MAX),
            });
        }
        if let Some(id) = card {
            if self.card(id).is_none() {
                return Err(GameError::CardNotFound { id });
            }
            // A card sits in at most one slot
            for slot in self.slots.iter_mut() {
                if *slot == Some(id) {
                    *slot = None;
                }
            }
        }
        self.slots[index] = card;
        Ok(())
    }

    /// Cards in filled slots, or the whole inventory when no slot is set
    pub fn deck(&self) -> Vec<Card> {
        let slotted: Vec<Card> = self
            .slots
            .iter()
            .flatten()
            .filter_map(|id| self.card(*id).cloned())
            .collect();
        if slotted.is_empty() {
            self.cards.clone()
        } else {
            slotted
        }
    }

    /// Rarest card in the deck, used as reward context for whoever faces it
    pub fn top_rarity(&self) -> Rarity {
        self.deck()
            .iter()
            .map(|c| c.rarity)
            .max()
            .unwrap_or(Rarity::Common)
    }

    /// Update the win streak for a finished match
    pub fn record_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Victory => self.win_streak = self.win_streak.saturating_add(1),
            Outcome::Defeat | Outcome::Draw => self.win_streak = 0,
        }
    }

    /// Credit coins and experience, level up, and mint any bonus card
    pub fn apply_reward<R: BattleRng>(
        &mut self,
        reward: &Reward,
        acquired_at: u64,
        config: &ProgressionConfig,
        rng: &mut R,
    ) -> GameResult<RewardApplied> {
        let bonus_card = match reward.bonus_card {
            Some(template_id) => Some(self.mint(template_id, acquired_at, rng)?),
            None => None,
        };

        self.coins = self.coins.saturating_add(reward.coins as u64);
        self.experience = self.experience.saturating_add(reward.experience);

        let per_level = config.player_level_experience.max(1);
        let reached = (1 + self.experience / per_level).min(config.max_player_level as u32) as u16;
        let levels_gained = reached.saturating_sub(self.level);
        self.level = self.level.max(reached);

        Ok(RewardApplied {
            levels_gained,
            bonus_card,
        })
    }

    fn collect(&self, ids: &[CardId]) -> GameResult<Vec<Card>> {
        ids.iter()
            .map(|id| self.card(*id).cloned().ok_or(GameError::CardNotFound { id: *id }))
            .collect()
    }

    /// Enhance `target` with the given materials, consuming them
    pub fn enhance_card<R: BattleRng>(
        &mut self,
        target: CardId,
        materials: &[CardId],
        config: &ProgressionConfig,
        rng: &mut R,
    ) -> GameResult<EnhanceReport> {
        let mut card = self
            .card(target)
            .cloned()
            .ok_or(GameError::CardNotFound { id: target })?;
        let material_cards = self.collect(materials)?;

        let report = enhance::enhance(&mut card, &material_cards, config, rng)?;

        for id in materials {
            self.remove_card(*id)?;
        }
        if let Some(slot) = self.card_mut(target) {
            *slot = card;
        }
        Ok(report)
    }

    /// Fuse the given cards into a new one
    pub fn fuse_cards<R: BattleRng>(
        &mut self,
        materials: &[CardId],
        acquired_at: u64,
        config: &ProgressionConfig,
        rng: &mut R,
    ) -> GameResult<FusionReport> {
        let material_cards = self.collect(materials)?;
        let new_id = CardId(self.next_card_id);

        let report = fusion::fuse(&material_cards, new_id, self.id, acquired_at, config, rng)?;

        for id in materials {
            self.remove_card(*id)?;
        }
        self.add_card(report.card.clone());
        Ok(report)
    }
}
