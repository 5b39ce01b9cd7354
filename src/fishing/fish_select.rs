//! Fish selection based on location, season, time and weather.

use bevy::prelude::*;
use rand::Rng;

use crate::data::{Catalog, FishBehavior, FishLocation};
use crate::shared::*;

/// What bites when nothing in the catalog is eligible.
pub const TRASH_ID: &str = "trash";

/// The fish on the line, with the profile the minigame uses.
#[derive(Debug, Clone, PartialEq)]
pub struct HookedFish {
    pub id: ItemId,
    pub difficulty: f32,
    pub behavior: FishBehavior,
}

impl HookedFish {
    fn trash() -> Self {
        Self {
            id: TRASH_ID.to_string(),
            difficulty: 5.0,
            behavior: FishBehavior::Smooth,
        }
    }
}

fn map_to_fish_location(map_id: MapId) -> FishLocation {
    match map_id {
        MapId::Forest | MapId::Town => FishLocation::River,
        MapId::Beach => FishLocation::Ocean,
        MapId::Mine => FishLocation::MinePool,
        MapId::Farm | MapId::PlayerHouse => FishLocation::Pond,
    }
}

/// Weighted pick among the fish that bite at this place and moment.
pub fn select_fish(
    catalog: &Catalog,
    map: MapId,
    season: Season,
    hour: f32,
    weather: Weather,
    rng: &mut impl Rng,
) -> HookedFish {
    let location = map_to_fish_location(map);
    let mut eligible: Vec<_> = catalog
        .fish
        .values()
        .filter(|f| f.location == location)
        .filter(|f| f.seasons.is_empty() || f.seasons.contains(&season))
        .filter(|f| hour >= f.time_range.0 && hour < f.time_range.1)
        .filter(|f| f.weather.map_or(true, |w| w == weather))
        .filter(|f| f.weight > 0)
        .collect();
    // HashMap order is unstable; sort for seeded determinism.
    eligible.sort_by(|a, b| a.id.cmp(&b.id));

    let total: u32 = eligible.iter().map(|f| f.weight).sum();
    if total == 0 {
        debug!("[Fishing] Nothing biting at {:?} {:?} {:.1}h; trash", location, season, hour);
        return HookedFish::trash();
    }

    let mut roll = rng.gen_range(0..total);
    for def in &eligible {
        if roll < def.weight {
            return HookedFish {
                id: def.id.clone(),
                difficulty: def.difficulty.clamp(0.0, 100.0),
                behavior: def.behavior,
            };
        }
        roll -= def.weight;
    }
    HookedFish::trash()
}
