//! Content catalog: read-only definitions the core consumes.
//!
//! The catalog is owned by `GameWorld` and never mutated by the simulation.
//! `Catalog::builtin()` fills it from the hard-coded tables in the submodules;
//! hosts with their own content load it from RON instead.
//!
//! Lookups that miss degrade to a derived fallback definition and log the
//! anomaly rather than failing the caller.

mod crops;
mod fish;
mod items;
mod monsters;
mod npcs;
mod recipes;

use std::borrow::Cow;
use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Seed,
    Crop,
    ArtisanGood,
    Fish,
    Mineral,
    Resource,
    Food,
    Machine,
    Furniture,
    Monster,
    Special,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub sell_price: u32,
    /// None = not sold in shops.
    pub buy_price: Option<u32>,
    /// Energy restored when eaten. None = inedible.
    pub energy: Option<f32>,
    /// Empty = available all year.
    pub seasons: Vec<Season>,
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS
// ═══════════════════════════════════════════════════════════════════════

/// Repeated bonus roll on harvest: while `chance` succeeds, add one unit,
/// at most `max_extra` times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraYield {
    pub chance: f64,
    pub max_extra: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropDef {
    pub id: ItemId,
    pub seed_id: ItemId,
    pub harvest_id: ItemId,
    pub seasons: Vec<Season>,
    /// Stage at which the crop is harvestable. One stage per watered day.
    pub growth_stages: u8,
    /// Regrowable crops fall back to `growth_stages - offset` after harvest.
    pub regrow_offset: Option<u8>,
    pub min_harvest: u32,
    pub max_harvest: u32,
    pub extra_yield: Option<ExtraYield>,
    /// Can merge into a giant crop when nine matured plants form a 3×3 block.
    pub giant_eligible: bool,
}

impl CropDef {
    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RECIPES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineKind {
    Furnace,
    PreservesJar,
    Keg,
    CheesePress,
    Loom,
}

impl MachineKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MachineKind::Furnace => "Furnace",
            MachineKind::PreservesJar => "Preserves Jar",
            MachineKind::Keg => "Keg",
            MachineKind::CheesePress => "Cheese Press",
            MachineKind::Loom => "Loom",
        }
    }

    /// Item id of the placeable form of this machine.
    pub fn item_id(&self) -> &'static str {
        match self {
            MachineKind::Furnace => "furnace",
            MachineKind::PreservesJar => "preserves_jar",
            MachineKind::Keg => "keg",
            MachineKind::CheesePress => "cheese_press",
            MachineKind::Loom => "loom",
        }
    }

    pub fn from_item_id(item_id: &str) -> Option<Self> {
        match item_id {
            "furnace" => Some(MachineKind::Furnace),
            "preserves_jar" => Some(MachineKind::PreservesJar),
            "keg" => Some(MachineKind::Keg),
            "cheese_press" => Some(MachineKind::CheesePress),
            "loom" => Some(MachineKind::Loom),
            _ => None,
        }
    }
}

/// A machine conversion. The first input is the item the player feeds in and
/// the key the recipe is looked up by; the rest are consumed alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRecipe {
    pub machine: MachineKind,
    pub inputs: Vec<(ItemId, u32)>,
    pub output: ItemId,
    pub output_quantity: u32,
    pub minutes: u32,
}

impl MachineRecipe {
    pub fn key_input(&self) -> Option<&str> {
        self.inputs.first().map(|(id, _)| id.as_str())
    }
}

/// Hand crafting recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub ingredients: Vec<(ItemId, u32)>,
    pub result: ItemId,
    pub result_quantity: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// FISH
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishLocation {
    River,
    Ocean,
    Pond,
    MinePool,
}

/// How a hooked fish moves along the reel track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishBehavior {
    Smooth,
    Dart,
    Sinker,
    Floater,
    Mixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishDef {
    pub id: ItemId,
    pub location: FishLocation,
    pub seasons: Vec<Season>,
    /// (start, end) in hours, end exclusive. e.g. (6.0, 19.0).
    pub time_range: (f32, f32),
    pub weather: Option<Weather>,
    /// 0 = trivial, 100 = legendary.
    pub difficulty: f32,
    pub behavior: FishBehavior,
    /// Relative selection weight among eligible fish.
    pub weight: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// MONSTERS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropChance {
    pub item_id: ItemId,
    pub chance: f64,
    pub quantity: (u32, u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterDef {
    pub id: ItemId,
    pub hp: f32,
    pub damage: f32,
    /// Tiles per second.
    pub speed: f32,
    pub aggro_range: f32,
    pub experience: u32,
    /// Shallowest dungeon level this monster appears on.
    pub min_level: u32,
    pub drops: Vec<DropChance>,
}

// ═══════════════════════════════════════════════════════════════════════
// NPCs
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Minutes since midnight, e.g. 900 = 3:00 PM.
    pub minute: u32,
    pub map: MapId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftPreference {
    Loved,
    Liked,
    Neutral,
    Disliked,
    Hated,
}

impl GiftPreference {
    pub fn friendship(self) -> i32 {
        match self {
            GiftPreference::Loved => 80,
            GiftPreference::Liked => 45,
            GiftPreference::Neutral => 20,
            GiftPreference::Disliked => -20,
            GiftPreference::Hated => -40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcDef {
    pub id: NpcId,
    pub name: String,
    pub home: (MapId, i32, i32),
    pub schedule: Vec<ScheduleEntry>,
    pub gift_preferences: HashMap<ItemId, GiftPreference>,
    pub dialogue: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// CATALOG
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub items: HashMap<ItemId, ItemDef>,
    pub crops: HashMap<ItemId, CropDef>,
    pub machine_recipes: Vec<MachineRecipe>,
    pub recipes: HashMap<String, Recipe>,
    pub fish: HashMap<ItemId, FishDef>,
    pub monsters: HashMap<ItemId, MonsterDef>,
    pub npcs: HashMap<NpcId, NpcDef>,
}

impl Catalog {
    /// The default content set.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::default();
        items::populate_items(&mut catalog);
        crops::populate_crops(&mut catalog);
        recipes::populate_recipes(&mut catalog);
        fish::populate_fish(&mut catalog);
        monsters::populate_monsters(&mut catalog);
        npcs::populate_npcs(&mut catalog);
        info!(
            "[Data] Catalog loaded: {} items, {} crops, {} machine recipes, {} fish, {} monsters, {} npcs",
            catalog.items.len(),
            catalog.crops.len(),
            catalog.machine_recipes.len(),
            catalog.fish.len(),
            catalog.monsters.len(),
            catalog.npcs.len()
        );
        catalog
    }

    /// Parse a catalog from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.items.get(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    pub fn crop_for_seed(&self, seed_id: &str) -> Option<&CropDef> {
        self.crops.values().find(|c| c.seed_id == seed_id)
    }

    /// Crop definition by crop id, or a logged fallback when the id is unknown.
    pub fn crop_or_fallback(&self, crop_id: &str) -> Cow<'_, CropDef> {
        match self.crops.get(crop_id) {
            Some(def) => Cow::Borrowed(def),
            None => {
                warn!("[Data] Crop '{}' missing from catalog; using fallback definition", crop_id);
                Cow::Owned(fallback_crop(crop_id, &format!("{crop_id}_seeds")))
            }
        }
    }

    /// Crop planted by `seed_id`. Seeds without a crop entry get a derived
    /// definition named after the seed.
    pub fn crop_for_seed_or_fallback(&self, seed_id: &str) -> Cow<'_, CropDef> {
        match self.crop_for_seed(seed_id) {
            Some(def) => Cow::Borrowed(def),
            None => {
                let crop_id = seed_id.strip_suffix("_seeds").unwrap_or(seed_id);
                warn!(
                    "[Data] Seed '{}' has no crop definition; deriving fallback crop '{}'",
                    seed_id, crop_id
                );
                Cow::Owned(fallback_crop(crop_id, seed_id))
            }
        }
    }

    pub fn machine_recipe(&self, machine: MachineKind, input: &str) -> Option<&MachineRecipe> {
        self.machine_recipes
            .iter()
            .find(|r| r.machine == machine && r.key_input() == Some(input))
    }

    pub fn is_seed(&self, item_id: &str) -> bool {
        self.items
            .get(item_id)
            .map(|d| d.category == ItemCategory::Seed)
            .unwrap_or(false)
            || self.crop_for_seed(item_id).is_some()
    }
}

/// Minimal crop used when the catalog has no entry: four stages, single
/// harvest of one unit, grows in every season so it never withers.
pub fn fallback_crop(crop_id: &str, seed_id: &str) -> CropDef {
    CropDef {
        id: crop_id.to_string(),
        seed_id: seed_id.to_string(),
        harvest_id: crop_id.to_string(),
        seasons: Vec::new(),
        growth_stages: 4,
        regrow_offset: None,
        min_harvest: 1,
        max_harvest: 1,
        extra_yield: None,
        giant_eligible: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_parsnip() {
        let catalog = Catalog::builtin();
        let parsnip = catalog.crop_for_seed("parsnip_seeds").unwrap();
        assert_eq!(parsnip.growth_stages, 4);
        assert_eq!((parsnip.min_harvest, parsnip.max_harvest), (1, 1));
        assert!(parsnip.grows_in(Season::Spring));
        assert!(!parsnip.grows_in(Season::Summer));
    }

    #[test]
    fn test_furnace_recipe_keyed_by_first_input() {
        let catalog = Catalog::builtin();
        let recipe = catalog.machine_recipe(MachineKind::Furnace, "copper_ore").unwrap();
        assert_eq!(recipe.output, "copper_bar");
        assert_eq!(recipe.minutes, 30);
        assert!(recipe.inputs.contains(&("coal".to_string(), 1)));
        assert!(catalog.machine_recipe(MachineKind::Furnace, "coal").is_none());
    }

    #[test]
    fn test_missing_seed_derives_fallback() {
        let catalog = Catalog::builtin();
        let crop = catalog.crop_for_seed_or_fallback("mystery_seeds");
        assert_eq!(crop.id, "mystery");
        assert_eq!(crop.harvest_id, "mystery");
        assert!(crop.grows_in(Season::Winter));
    }

    #[test]
    fn test_every_crop_has_sane_yields() {
        let catalog = Catalog::builtin();
        for crop in catalog.crops.values() {
            assert!(crop.min_harvest >= 1, "{}", crop.id);
            assert!(crop.min_harvest <= crop.max_harvest, "{}", crop.id);
            if let Some(offset) = crop.regrow_offset {
                assert!(offset <= crop.growth_stages, "{}", crop.id);
            }
            assert!(catalog.item(&crop.seed_id).is_some(), "seed for {}", crop.id);
            assert!(catalog.item(&crop.harvest_id).is_some(), "harvest for {}", crop.id);
        }
    }

    #[test]
    fn test_every_recipe_references_known_items() {
        let catalog = Catalog::builtin();
        for recipe in &catalog.machine_recipes {
            for (input, _) in &recipe.inputs {
                assert!(catalog.item(input).is_some(), "unknown input {input}");
            }
            assert!(catalog.item(&recipe.output).is_some(), "unknown output {}", recipe.output);
        }
    }

    #[test]
    fn test_catalog_round_trips_through_ron() {
        let catalog = Catalog::builtin();
        let text = ron::to_string(&catalog).unwrap();
        let parsed = Catalog::from_ron_str(&text).unwrap();
        assert_eq!(parsed.items.len(), catalog.items.len());
        assert_eq!(parsed.machine_recipes.len(), catalog.machine_recipes.len());
    }
}
