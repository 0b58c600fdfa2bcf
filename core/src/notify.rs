//! Player-facing notifications raised by arena flows.

use serde::{Deserialize, Serialize};

use crate::battle::Outcome;
use crate::log;
use crate::types::{CardId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    MatchSettled {
        player: PlayerId,
        outcome: Outcome,
        coins: u32,
        experience: u32,
    },
    #[serde(rename_all = "camelCase")]
    LevelUp { player: PlayerId, level: u16 },
    #[serde(rename_all = "camelCase")]
    BonusCard { player: PlayerId, card_id: CardId },
    #[serde(rename_all = "camelCase")]
    RatingChanged {
        player: PlayerId,
        before: u32,
        after: u32,
    },
    #[serde(rename_all = "camelCase")]
    CardEnhanced {
        player: PlayerId,
        card_id: CardId,
        level: u16,
    },
    #[serde(rename_all = "camelCase")]
    CardPurchased {
        player: PlayerId,
        card_id: CardId,
        price: u64,
    },
    #[serde(rename_all = "camelCase")]
    CardFused {
        player: PlayerId,
        card_id: CardId,
        upgraded: bool,
    },
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        log::info(&format!("notify {:?}", notification));
    }
}

/// Collects notifications in order
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
