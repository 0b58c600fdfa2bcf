//! Error types for game operations
//!
//! Errors are plain enums so they can travel through SCALE encoding and
//! serde alongside the rest of the game state.

use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::{CardId, PlayerId, Team};

/// Game errors that can occur during matches and card management
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// A side entered a round with no cards
    InvalidInput { team: Team },
    /// Match or reward configuration cannot produce a result
    InvalidConfig,
    /// Card is not in the player's inventory
    CardNotFound { id: CardId },
    /// Locked cards cannot be consumed
    CardLocked { id: CardId },
    /// A card cannot be used as material for this operation
    InvalidMaterial { id: CardId },
    /// Too few material cards supplied
    NotEnoughMaterial { have: u32, need: u32 },
    /// Too many material cards supplied
    TooManyMaterials { have: u32, max: u32 },
    /// Card already sits at the level cap
    MaxLevel { id: CardId },
    /// Card template not found
    TemplateNotFound,
    /// Player is unknown to the store
    PlayerNotFound { id: PlayerId },
    /// Stored player snapshot failed to decode
    CorruptState { id: PlayerId },
    /// Faction slot index out of range
    SlotOutOfRange { index: u8 },
    /// A player was matched against themselves
    SelfMatch { id: PlayerId },
    /// Player cannot afford a purchase
    NotEnoughCoins { have: u64, need: u64 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidInput { team } => {
                write!(f, "empty card collection for {}", team.as_str())
            }
            GameError::InvalidConfig => write!(f, "invalid match configuration"),
            GameError::CardNotFound { id } => write!(f, "card {} not found", id.0),
            GameError::CardLocked { id } => write!(f, "card {} is locked", id.0),
            GameError::InvalidMaterial { id } => {
                write!(f, "card {} cannot be used as material", id.0)
            }
            GameError::NotEnoughMaterial { have, need } => {
                write!(f, "not enough material: have {}, need {}", have, need)
            }
            GameError::TooManyMaterials { have, max } => {
                write!(f, "too many materials: have {}, max {}", have, max)
            }
            GameError::MaxLevel { id } => write!(f, "card {} is at max level", id.0),
            GameError::TemplateNotFound => write!(f, "card template not found"),
            GameError::PlayerNotFound { id } => write!(f, "player {} not found", id.0),
            GameError::CorruptState { id } => {
                write!(f, "stored state for player {} is corrupt", id.0)
            }
            GameError::SlotOutOfRange { index } => {
                write!(f, "faction slot {} out of range", index)
            }
            GameError::SelfMatch { id } => write!(f, "player {} cannot face themselves", id.0),
            GameError::NotEnoughCoins { have, need } => {
                write!(f, "not enough coins: have {}, need {}", have, need)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
