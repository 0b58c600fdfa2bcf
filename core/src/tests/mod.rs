mod opponents;
mod rewards;
mod state;
mod store;

use crate::rng::XorShiftRng;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

fn card_with_stats(id: u32, faction: Faction, stats: CardStats) -> Card {
    Card {
        id: CardId(id),
        template_id: TemplateId(1),
        owner: PlayerId(1),
        level: 1,
        experience: 0,
        stats,
        acquired_at: 0,
        locked: false,
        rarity: Rarity::Common,
        faction,
    }
}

/// A card whose whole power sits in `compute`
fn card(id: u32, power: u32) -> Card {
    card_with_stats(
        id,
        Faction::Sentinel,
        CardStats {
            compute: power,
            ..CardStats::default()
        },
    )
}

fn faction_card(id: u32, faction: Faction, power: u32) -> Card {
    let mut c = card(id, power);
    c.faction = faction;
    c
}
