//! Mining domain: dungeon levels and monster combat.
//!
//! - `floor_gen` lays out rocks, ore nodes, ladders and spawn points.
//! - `combat` runs monster pursuit and attacks each tick and resolves the
//!   player's sword swings.
//!
//! Entering a level replaces the mine map and the whole monster set.

pub mod combat;
pub mod floor_gen;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::DropChance;
use crate::shared::*;
use crate::world::maps::FARM_SPAWN;
use crate::world::GameWorld;

pub use combat::{attack, step_monsters};
use floor_gen::{generate_level, MINE_ENTRANCE};

/// Where the player lands when climbing out of the mine.
pub const MINE_EXIT: (MapId, GridPos) = (MapId::Forest, (5, 6));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub kind: ItemId,
    /// Continuous position in tile units.
    pub pos: (f32, f32),
    pub hp: f32,
    pub max_hp: f32,
    pub damage: f32,
    /// Tiles per second.
    pub speed: f32,
    pub aggro_range: f32,
    /// Seconds until the monster may attack again.
    pub cooldown: f32,
    pub experience: u32,
    pub drops: Vec<DropChance>,
}

impl Monster {
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Regenerate the mine at `level` and put the player at its entrance.
pub fn enter_level(world: &mut GameWorld, level: u32) {
    let level = level.max(1);
    let layout = generate_level(level, world.config.seed);

    let mut kinds: Vec<_> = world
        .catalog
        .monsters
        .values()
        .filter(|d| d.min_level <= level)
        .cloned()
        .collect();
    kinds.sort_by(|a, b| a.id.cmp(&b.id));

    world.monsters.clear();
    if kinds.is_empty() {
        warn!("[Mining] No monsters defined for level {}", level);
    } else {
        for pos in &layout.monster_spawns {
            let def = &kinds[world.rng.gen_range(0..kinds.len())];
            let scale = 1.0 + 0.1 * (level - def.min_level) as f32;
            let id = world.next_monster_id;
            world.next_monster_id += 1;
            world.monsters.push(Monster {
                id,
                kind: def.id.clone(),
                pos: tile_center(*pos),
                hp: def.hp * scale,
                max_hp: def.hp * scale,
                damage: def.damage * scale,
                speed: def.speed,
                aggro_range: def.aggro_range,
                cooldown: 0.0,
                experience: def.experience,
                drops: def.drops.clone(),
            });
        }
    }

    world.maps.insert(MapId::Mine, layout.map);
    world.mine_level = level;
    world.player.map = MapId::Mine;
    world.player.pos = tile_center(MINE_ENTRANCE);
    info!(
        "[Mining] Entered level {} with {} monsters, ladder at {:?}",
        level,
        world.monsters.len(),
        layout.ladder_down
    );
    world.toast(format!("Mine level {level}"));
}

/// Climb down the ladder to the next level.
pub fn descend(world: &mut GameWorld) -> ActionResult {
    if world.player.map != MapId::Mine {
        return Err(ActionError::NotInMine);
    }
    let next = world.mine_level + 1;
    enter_level(world, next);
    world.emit(SimEvent::Sfx("ladder"));
    Ok(())
}

/// Climb out to the forest. The deepest level reached is kept.
pub fn leave_mine(world: &mut GameWorld) {
    world.monsters.clear();
    let (map, pos) = MINE_EXIT;
    world.player.map = map;
    world.player.pos = tile_center(pos);
    info!("[Mining] Left the mine from level {}", world.mine_level);
}

/// The player hit 0 health: lose some gold, wake on the farm at half health.
pub fn knockout(world: &mut GameWorld) {
    let lost = (world.player.gold / 10).min(1000);
    world.player.gold -= lost;
    world.player.health = world.player.max_health / 2.0;
    world.monsters.clear();
    world.player.map = MapId::Farm;
    world.player.pos = tile_center(FARM_SPAWN);
    warn!("[Mining] Player knocked out, lost {}g", lost);
    world.emit(SimEvent::PlayerKnockedOut);
    world.toast(format!("You were knocked out and lost {lost}g."));
}
