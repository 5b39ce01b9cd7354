//! Persistence: a serde snapshot of every piece of mutable world state.
//!
//! Restoring writes the captured state back verbatim and runs no core logic,
//! so a restored world continues exactly where the snapshot was taken. The
//! catalog and config are not part of a save; the caller supplies them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animals::Animal;
use crate::calendar::WorldTime;
use crate::fishing::FishingState;
use crate::inventory::Inventory;
use crate::mining::Monster;
use crate::npcs::Npc;
use crate::player::PlayerState;
use crate::shared::*;
use crate::world::drops::WorldDrop;
use crate::world::map::GameMap;
use crate::world::{GameWorld, TimedTask};

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Everything needed to continue a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub tick: u64,
    pub time: WorldTime,
    pub maps: BTreeMap<MapId, GameMap>,
    pub drops: Vec<WorldDrop>,
    pub player: PlayerState,
    pub inventory: Inventory,
    pub npcs: Vec<Npc>,
    pub monsters: Vec<Monster>,
    pub next_monster_id: u32,
    pub mine_level: u32,
    pub animals: Vec<Animal>,
    pub fishing: FishingState,
    pub tasks: Vec<TimedTask>,
    pub sweep_elapsed: f32,
    pub last_rollover_tick: Option<u64>,
}

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT / RESTORE
// ═══════════════════════════════════════════════════════════════════════

pub fn snapshot(world: &GameWorld) -> Snapshot {
    Snapshot {
        version: SAVE_VERSION,
        tick: world.tick,
        time: world.time.clone(),
        maps: world.maps.clone(),
        drops: world.drops.clone(),
        player: world.player.clone(),
        inventory: world.inventory.clone(),
        npcs: world.npcs.clone(),
        monsters: world.monsters.clone(),
        next_monster_id: world.next_monster_id,
        mine_level: world.mine_level,
        animals: world.animals.clone(),
        fishing: world.fishing.clone(),
        tasks: world.tasks.clone(),
        sweep_elapsed: world.sweep_elapsed,
        last_rollover_tick: world.last_rollover_tick,
    }
}

/// Overwrite the world's state with a snapshot. The random stream is
/// reseeded from the world seed and the snapshot tick.
pub fn restore(world: &mut GameWorld, snapshot: Snapshot) {
    let Snapshot {
        version,
        tick,
        time,
        maps,
        drops,
        player,
        inventory,
        npcs,
        monsters,
        next_monster_id,
        mine_level,
        animals,
        fishing,
        tasks,
        sweep_elapsed,
        last_rollover_tick,
    } = snapshot;

    if version != SAVE_VERSION {
        warn!("[Save] Restoring version {} into version {}", version, SAVE_VERSION);
    }

    world.tick = tick;
    world.time = time;
    world.maps = maps;
    world.drops = drops;
    world.player = player;
    world.inventory = inventory;
    world.npcs = npcs;
    world.monsters = monsters;
    world.next_monster_id = next_monster_id;
    world.mine_level = mine_level;
    world.animals = animals;
    world.fishing = fishing;
    world.tasks = tasks;
    world.sweep_elapsed = sweep_elapsed;
    world.last_rollover_tick = last_rollover_tick;
    world.rng = StdRng::seed_from_u64(world.config.seed ^ tick);
    world.drain_events();

    info!(
        "[Save] Restored tick {} (day {} {:?} year {})",
        world.tick, world.time.day, world.time.season, world.time.year
    );
}

// ═══════════════════════════════════════════════════════════════════════
// ENCODING
// ═══════════════════════════════════════════════════════════════════════

pub fn to_json(snapshot: &Snapshot) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(text: &str) -> Result<Snapshot, SaveError> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    if snapshot.version > SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: snapshot.version,
            supported: SAVE_VERSION,
        });
    }
    Ok(snapshot)
}

/// Write a snapshot of `world` to `path`, via a temp file and rename.
pub fn save_to_file(world: &GameWorld, path: &Path) -> Result<(), SaveError> {
    let json = to_json(&snapshot(world))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    info!("[Save] Wrote {}", path.display());
    Ok(())
}

pub fn load_from_file(world: &mut GameWorld, path: &Path) -> Result<(), SaveError> {
    let text = fs::read_to_string(path)?;
    let snapshot = from_json(&text)?;
    restore(world, snapshot);
    Ok(())
}
