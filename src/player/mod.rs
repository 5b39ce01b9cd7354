//! Player state: position, energy, health, gold, skills and tools.
//!
//! Movement and warps live here; tool dispatch is in `tools`.

pub mod tools;

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::mining;
use crate::shared::*;
use crate::world::maps::FARM_SPAWN;
use crate::world::GameWorld;

/// Cumulative experience needed for levels 1 through 10.
pub const LEVEL_THRESHOLDS: [u32; 10] = [100, 380, 770, 1300, 2150, 3300, 4800, 6900, 10000, 15000];
pub const MAX_SKILL_LEVEL: u8 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub experience: BTreeMap<SkillKind, u32>,
}

impl Skills {
    pub fn experience(&self, skill: SkillKind) -> u32 {
        self.experience.get(&skill).copied().unwrap_or(0)
    }

    pub fn level(&self, skill: SkillKind) -> u8 {
        let xp = self.experience(skill);
        LEVEL_THRESHOLDS.iter().take_while(|&&t| xp >= t).count() as u8
    }

    /// Add experience. Returns the new level when a threshold is crossed.
    pub fn add(&mut self, skill: SkillKind, amount: u32) -> Option<u8> {
        let before = self.level(skill);
        let entry = self.experience.entry(skill).or_insert(0);
        *entry = entry.saturating_add(amount);
        let after = self.level(skill);
        (after > before).then_some(after)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub map: MapId,
    /// Continuous position in tile units.
    pub pos: (f32, f32),
    pub facing: Facing,
    pub energy: f32,
    pub max_energy: f32,
    pub health: f32,
    pub max_health: f32,
    pub defense: f32,
    pub gold: u32,
    pub skills: Skills,
    pub tools: BTreeMap<ToolKind, ToolTier>,
    pub selected_tool: ToolKind,
    /// Display-only: a tool swing is animating.
    pub swinging: bool,
    /// Set when the player passed out; caps tomorrow's energy.
    pub wake_energy_cap: Option<f32>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            map: MapId::Farm,
            pos: tile_center(FARM_SPAWN),
            facing: Facing::Down,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            defense: 0.0,
            gold: 500,
            skills: Skills::default(),
            tools: ToolKind::ALL.iter().map(|&t| (t, ToolTier::Basic)).collect(),
            selected_tool: ToolKind::Hoe,
            swinging: false,
            wake_energy_cap: None,
        }
    }
}

impl PlayerState {
    pub fn tier(&self, tool: ToolKind) -> ToolTier {
        self.tools.get(&tool).copied().unwrap_or_default()
    }

    pub fn level(&self, skill: SkillKind) -> u8 {
        self.skills.level(skill)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ENERGY & EXPERIENCE
// ═══════════════════════════════════════════════════════════════════════

/// Energy a swing of `tool` costs: (2.0 − 0.1 × skill level) × tier multiplier.
pub fn stamina_cost(player: &PlayerState, tool: ToolKind) -> f32 {
    let level = f32::from(player.level(tool.skill()));
    (2.0 - 0.1 * level).max(0.0) * player.tier(tool).stamina_multiplier()
}

/// Check that `cost` energy is available without spending it.
pub fn ensure_energy(world: &GameWorld, cost: f32) -> ActionResult {
    if world.player.energy < cost {
        Err(ActionError::InsufficientEnergy)
    } else {
        Ok(())
    }
}

pub fn spend_energy(world: &mut GameWorld, cost: f32) -> ActionResult {
    ensure_energy(world, cost)?;
    world.player.energy = (world.player.energy - cost).max(0.0);
    Ok(())
}

pub fn restore_energy(world: &mut GameWorld, amount: f32) {
    let p = &mut world.player;
    p.energy = (p.energy + amount).min(p.max_energy);
}

pub fn grant_experience(world: &mut GameWorld, skill: SkillKind, amount: u32) {
    if amount == 0 {
        return;
    }
    if let Some(level) = world.player.skills.add(skill, amount) {
        info!("[Player] {:?} reached level {}", skill, level);
        world.emit(SimEvent::SkillLevelUp { skill, level });
        world.toast(format!("{skill:?} level {level}!"));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MOVEMENT
// ═══════════════════════════════════════════════════════════════════════

/// Move the player by a continuous displacement. The move is rejected when
/// the destination tile is blocked; facing updates either way. Stepping onto a
/// warp tile moves the player to the linked map.
pub fn move_player(world: &mut GameWorld, dx: f32, dy: f32) -> bool {
    if dx == 0.0 && dy == 0.0 {
        return false;
    }
    world.player.facing = Facing::from_delta(dx, dy);
    let target = (world.player.pos.0 + dx, world.player.pos.1 + dy);
    let grid = to_grid(target);
    let Some(map) = world.map(world.player.map) else {
        return false;
    };
    if !map.is_passable(grid.0, grid.1) {
        return false;
    }
    let warp = map.warp_at(grid).cloned();
    world.player.pos = target;
    if let Some(warp) = warp {
        warp_to(world, warp.to_map, warp.to);
    }
    true
}

pub fn warp_to(world: &mut GameWorld, map: MapId, pos: GridPos) {
    if map == MapId::Mine {
        let level = world.mine_level.max(1);
        mining::enter_level(world, level);
        return;
    }
    debug!("[Player] Warp to {:?} {:?}", map, pos);
    world.player.map = map;
    world.player.pos = tile_center(pos);
}

pub fn select_tool(world: &mut GameWorld, tool: ToolKind) {
    world.player.selected_tool = tool;
}
