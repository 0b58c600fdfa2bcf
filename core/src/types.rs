use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct CardId(pub u32);

/// Identifier of a static card template
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct TemplateId(pub u16);

/// Identifier of a player account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct PlayerId(pub u64);

/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    Player,
    Opponent,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Player => "PLAYER",
            Team::Opponent => "OPPONENT",
        }
    }
}

/// Card rarity, ordered from most to least common
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    pub fn index(&self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
            Rarity::Legendary => 3,
        }
    }

    /// The next tier up, saturating at Legendary
    pub fn upgraded(&self) -> Rarity {
        match self {
            Rarity::Common => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic | Rarity::Legendary => Rarity::Legendary,
        }
    }
}

/// AI faction a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Faction {
    Sentinel,
    Oracle,
    Forge,
    Swarm,
    Cipher,
}

impl Faction {
    pub const ALL: [Faction; 5] = [
        Faction::Sentinel,
        Faction::Oracle,
        Faction::Forge,
        Faction::Swarm,
        Faction::Cipher,
    ];
}

/// Named card attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Compute,
    Memory,
    Logic,
    Creativity,
    Speed,
    Resilience,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Compute,
        Stat::Memory,
        Stat::Logic,
        Stat::Creativity,
        Stat::Speed,
        Stat::Resilience,
    ];
}

/// Card attributes. Total power is always derived from these.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub compute: u32,
    pub memory: u32,
    pub logic: u32,
    pub creativity: u32,
    pub speed: u32,
    pub resilience: u32,
}

impl CardStats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Compute => self.compute,
            Stat::Memory => self.memory,
            Stat::Logic => self.logic,
            Stat::Creativity => self.creativity,
            Stat::Speed => self.speed,
            Stat::Resilience => self.resilience,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::Compute => &mut self.compute,
            Stat::Memory => &mut self.memory,
            Stat::Logic => &mut self.logic,
            Stat::Creativity => &mut self.creativity,
            Stat::Speed => &mut self.speed,
            Stat::Resilience => &mut self.resilience,
        }
    }

    /// Sum of every sub-stat
    pub fn total_power(&self) -> u32 {
        Stat::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Stat-wise saturating addition
    pub fn plus(&self, other: &CardStats) -> CardStats {
        let mut out = *self;
        for stat in Stat::ALL {
            let v = out.get_mut(stat);
            *v = v.saturating_add(other.get(stat));
        }
        out
    }

    /// Stat-wise difference, clamped at zero
    pub fn surplus_over(&self, base: &CardStats) -> CardStats {
        let mut out = CardStats::default();
        for stat in Stat::ALL {
            *out.get_mut(stat) = self.get(stat).saturating_sub(base.get(stat));
        }
        out
    }
}

/// Static card template compiled in from templates.json
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: TemplateId,
    pub name: &'static str,
    pub faction: Faction,
    pub rarity: Rarity,
    /// Relative drop weight used when drawing templates
    pub weight: u32,
    pub base: CardStats,
}

/// A card owned by a player
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub template_id: TemplateId,
    pub owner: PlayerId,
    pub level: u16,
    /// Lifetime experience, never decreases
    pub experience: u32,
    pub stats: CardStats,
    /// Unix seconds when the card entered the inventory
    pub acquired_at: u64,
    pub locked: bool,
    pub rarity: Rarity,
    pub faction: Faction,
}

impl Card {
    pub fn from_template(
        id: CardId,
        template: &CardTemplate,
        owner: PlayerId,
        acquired_at: u64,
    ) -> Self {
        Self {
            id,
            template_id: template.id,
            owner,
            level: 1,
            experience: 0,
            stats: template.base,
            acquired_at,
            locked: false,
            rarity: template.rarity,
            faction: template.faction,
        }
    }

    pub fn total_power(&self) -> u32 {
        self.stats.total_power()
    }

    pub fn with_stats(mut self, stats: CardStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}
