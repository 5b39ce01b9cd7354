//! The world aggregate.
//!
//! `GameWorld` owns every piece of mutable simulation state: maps and their
//! plots, world drops, the player, NPCs, monsters, animals, fishing state and
//! pending timed tasks. Components receive it by reference; there is no other
//! shared state.

pub mod drops;
pub mod map;
pub mod maps;
pub mod objects;

use std::collections::BTreeMap;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::animals::{self, Animal};
use crate::calendar::WorldTime;
use crate::config::SimConfig;
use crate::data::Catalog;
use crate::fishing::{FishingPhase, FishingState};
use crate::inventory::Inventory;
use crate::mining::Monster;
use crate::npcs::Npc;
use crate::player::PlayerState;
use crate::shared::*;

use drops::WorldDrop;
use map::{GameMap, Plot};

// ═══════════════════════════════════════════════════════════════════════
// TIMED TASKS
// ═══════════════════════════════════════════════════════════════════════

/// Deferred work, run by the tick driver once `tick >= fire_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskAction {
    /// End the tool-swing display lockout. Touches nothing else.
    ClearToolSwing,
    /// Advance the fishing state machine, but only if it is still in
    /// `expected` for the same cast.
    Fishing { expected: FishingPhase, cast_id: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedTask {
    pub fire_at: u64,
    pub action: TaskAction,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME WORLD
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource)]
pub struct GameWorld {
    pub config: SimConfig,
    pub catalog: Catalog,
    pub time: WorldTime,
    /// Ticks since the world was created.
    pub tick: u64,
    pub maps: BTreeMap<MapId, GameMap>,
    pub drops: Vec<WorldDrop>,
    pub player: PlayerState,
    pub inventory: Inventory,
    pub npcs: Vec<Npc>,
    pub monsters: Vec<Monster>,
    pub next_monster_id: u32,
    /// Current dungeon level; 0 when the mine has not been entered.
    pub mine_level: u32,
    pub animals: Vec<Animal>,
    pub fishing: FishingState,
    pub tasks: Vec<TimedTask>,
    /// Game minutes since the last machine readiness sweep.
    pub sweep_elapsed: f32,
    pub rng: StdRng,
    /// Tick on which the last rollover ran. Guards against a second dispatch
    /// within the same frame.
    pub last_rollover_tick: Option<u64>,
    outbox: Vec<SimEvent>,
}

impl GameWorld {
    pub fn new(config: SimConfig, catalog: Catalog) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let maps = maps::generate_overworld();

        let mut npcs: Vec<Npc> = catalog.npcs.values().map(Npc::from_def).collect();
        npcs.sort_by(|a, b| a.id.cmp(&b.id));

        let mut inventory = Inventory::default();
        inventory.add("parsnip_seeds", 15);

        info!(
            "[World] New world: {} maps, {} npcs, seed {:#x}",
            maps.len(),
            npcs.len(),
            config.seed
        );

        Self {
            config,
            catalog,
            time: WorldTime::default(),
            tick: 0,
            maps,
            drops: Vec::new(),
            player: PlayerState::default(),
            inventory,
            npcs,
            monsters: Vec::new(),
            next_monster_id: 0,
            mine_level: 0,
            animals: animals::starter_animals(),
            fishing: FishingState::default(),
            tasks: Vec::new(),
            sweep_elapsed: 0.0,
            rng,
            last_rollover_tick: None,
            outbox: Vec::new(),
        }
    }

    /// World with default config and the built-in catalog.
    pub fn with_defaults() -> Self {
        Self::new(SimConfig::default(), Catalog::builtin())
    }

    /// Jump the clock to `hour` today, snapped to the nearest tick.
    pub fn set_clock(&mut self, hour: f32) {
        let minutes = self.config.game_minutes_per_tick;
        self.time.set_hour(hour, minutes);
    }

    // ─── Events ──────────────────────────────────────────────────────────

    pub fn emit(&mut self, event: SimEvent) {
        self.outbox.push(event);
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.outbox.push(SimEvent::Toast {
            message: message.into(),
            duration_secs: 2.5,
        });
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_events(&self) -> &[SimEvent] {
        &self.outbox
    }

    // ─── Maps ────────────────────────────────────────────────────────────

    pub fn map(&self, id: MapId) -> Option<&GameMap> {
        self.maps.get(&id)
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut GameMap> {
        self.maps.get_mut(&id)
    }

    pub fn plot(&self, map: MapId, pos: GridPos) -> Option<&Plot> {
        self.maps.get(&map).and_then(|m| m.plot(pos.0, pos.1))
    }

    pub fn plot_mut(&mut self, map: MapId, pos: GridPos) -> ActionResult<&mut Plot> {
        self.maps
            .get_mut(&map)
            .and_then(|m| m.plot_mut(pos.0, pos.1))
            .ok_or(ActionError::NoPlot(pos.0, pos.1))
    }

    // ─── Time helpers ────────────────────────────────────────────────────

    pub fn schedule(&mut self, delay_ticks: u64, action: TaskAction) {
        self.tasks.push(TimedTask {
            fire_at: self.tick + delay_ticks.max(1),
            action,
        });
    }

    pub fn schedule_secs(&mut self, secs: f32, action: TaskAction) {
        let ticks = self.config.ticks_for_secs(secs);
        self.schedule(ticks, action);
    }

    // ─── Items ───────────────────────────────────────────────────────────

    /// Give items to the player, spilling whatever doesn't fit onto the ground
    /// at their feet. Returns true if everything went straight to the inventory.
    pub fn give_or_drop(&mut self, item_id: &str, quantity: u32) -> bool {
        if self.inventory.add(item_id, quantity) {
            return true;
        }
        let (map, pos) = (self.player.map, self.player.pos);
        self.spawn_drop(map, pos, item_id, quantity);
        false
    }

    pub fn spawn_drop(&mut self, map: MapId, pos: (f32, f32), item_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.drops.push(WorldDrop {
            item_id: item_id.to_string(),
            quantity,
            map,
            pos,
        });
    }
}
