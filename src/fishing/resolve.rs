//! Outcome handling for a finished reel: the catch, treasure loot, or the
//! fish getting away.
//!
//! # Treasure loot table
//! | Tier | Weight | Items                          |
//! |------|--------|--------------------------------|
//! | Ore  | 60%    | copper_ore ×3, iron_ore ×2     |
//! | Gem  | 25%    | quartz ×1, amethyst ×1         |
//! | Rare | 15%    | gold_ore ×2, diamond ×1        |
//! | Gold | always | 50–200 gold                    |

use bevy::prelude::*;
use rand::Rng;

use super::fish_select::TRASH_ID;
use super::FishingPhase;
use crate::player::grant_experience;
use crate::shared::*;
use crate::world::{GameWorld, TaskAction};

/// Chance that a hooked fish comes with a treasure chest on the track.
pub const TREASURE_CHANCE: f64 = 0.05;
/// How long the caught/lost result is shown before returning to idle.
pub const RESULT_SECS: f32 = 1.0;

/// Contents of a collected treasure chest.
#[derive(Debug, Clone, PartialEq)]
pub struct TreasureContents {
    pub items: Vec<(ItemId, u32)>,
    pub gold: u32,
}

pub fn roll_treasure(rng: &mut impl Rng) -> TreasureContents {
    let tier: f64 = rng.gen();
    let (item_id, qty) = if tier < 0.60 {
        if rng.gen_bool(0.5) {
            ("copper_ore", 3)
        } else {
            ("iron_ore", 2)
        }
    } else if tier < 0.85 {
        if rng.gen_bool(0.5) {
            ("quartz", 1)
        } else {
            ("amethyst", 1)
        }
    } else if rng.gen_bool(0.5) {
        ("gold_ore", 2)
    } else {
        ("diamond", 1)
    };
    TreasureContents {
        items: vec![(item_id.to_string(), qty)],
        gold: rng.gen_range(50..=200),
    }
}

/// Fishing experience for a catch of the given difficulty (0..100).
pub fn catch_experience(difficulty: f32) -> u32 {
    3 + (difficulty.clamp(0.0, 100.0) / 5.0).round() as u32
}

fn finish(world: &mut GameWorld, phase: FishingPhase) {
    world.fishing.phase = phase;
    world.fishing.reel = None;
    world.fishing.pending_impulse = false;
    let cast_id = world.fishing.cast_id;
    world.schedule_secs(RESULT_SECS, TaskAction::Fishing { expected: phase, cast_id });
}

/// Progress reached 100: the fish goes to the inventory (or the ground).
pub fn catch_fish(world: &mut GameWorld) {
    let fish_id = world
        .fishing
        .fish
        .clone()
        .unwrap_or_else(|| TRASH_ID.to_string());
    let (difficulty, treasure) = world
        .fishing
        .reel
        .as_ref()
        .map_or((0.0, false), |r| (r.difficulty, r.treasure_collected()));

    world.give_or_drop(&fish_id, 1);
    grant_experience(world, SkillKind::Fishing, catch_experience(difficulty));

    if treasure {
        let loot = roll_treasure(&mut world.rng);
        for (item, qty) in &loot.items {
            world.give_or_drop(item, *qty);
        }
        world.player.gold = world.player.gold.saturating_add(loot.gold);
        info!("[Fishing] Treasure: {:?} and {}g", loot.items, loot.gold);
        world.toast(format!("Treasure! +{}g", loot.gold));
    }

    let message = format!("Caught a {}!", world.catalog.item_name(&fish_id));
    info!("[Fishing] Caught {} (difficulty {:.0})", fish_id, difficulty);
    world.toast(message);
    world.emit(SimEvent::FishCaught { fish_id, treasure });
    world.emit(SimEvent::Sfx("fish_caught"));
    finish(world, FishingPhase::Caught);
}

/// Progress hit 0 or the bite window closed.
pub fn escape(world: &mut GameWorld) {
    debug!("[Fishing] Fish got away (cast {})", world.fishing.cast_id);
    world.emit(SimEvent::FishLost);
    world.toast("The fish got away...");
    finish(world, FishingPhase::Lost);
}
