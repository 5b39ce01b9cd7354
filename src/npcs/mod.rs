//! NPC domain: townsfolk state, daily schedules and relationships.
//!
//! - `schedule` turns timed schedule entries into walking (or a teleport when
//!   the entry is on another map) and moves NPCs along A* paths each tick.
//! - `gifts` covers talking and gift-giving, both limited to once a day.

pub mod gifts;
pub mod schedule;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::data::{NpcDef, ScheduleEntry};
use crate::shared::*;
use crate::world::GameWorld;

pub use gifts::{give_gift, talk};
pub use schedule::step_npcs;

/// How close (tiles) a point must be to an NPC to count as "on" them.
pub const NPC_HIT_RADIUS: f32 = 0.8;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum NpcMovement {
    #[default]
    Idle,
    /// Walking to `target`. `path` is None until a path has been requested;
    /// an empty path means walk straight at the target.
    Moving {
        target: GridPos,
        path: Option<VecDeque<GridPos>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub map: MapId,
    /// Continuous position in tile units.
    pub pos: (f32, f32),
    pub facing: Facing,
    /// Sorted by minute.
    pub schedule: Vec<ScheduleEntry>,
    /// Index of the next schedule entry to fire today.
    pub cursor: usize,
    /// 0..=MAX_FRIENDSHIP
    pub friendship: i32,
    pub talked_today: bool,
    pub gifted_today: bool,
    pub movement: NpcMovement,
}

impl Npc {
    pub fn from_def(def: &NpcDef) -> Self {
        let mut schedule = def.schedule.clone();
        schedule.sort_by_key(|e| e.minute);
        let (map, x, y) = def.home;
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            map,
            pos: tile_center((x, y)),
            facing: Facing::Down,
            schedule,
            cursor: 0,
            friendship: 0,
            talked_today: false,
            gifted_today: false,
            movement: NpcMovement::Idle,
        }
    }

    pub fn hearts(&self) -> u8 {
        (self.friendship.clamp(0, MAX_FRIENDSHIP) / FRIENDSHIP_PER_HEART) as u8
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.movement, NpcMovement::Moving { .. })
    }

    pub(crate) fn add_friendship(&mut self, amount: i32) {
        self.friendship = (self.friendship + amount).clamp(0, MAX_FRIENDSHIP);
    }
}

pub fn npc<'a>(world: &'a GameWorld, id: &str) -> Option<&'a Npc> {
    world.npcs.iter().find(|n| n.id == id)
}

/// The NPC standing at `point` on `map`, if any.
pub fn npc_near(world: &GameWorld, map: MapId, point: (f32, f32)) -> Option<NpcId> {
    world
        .npcs
        .iter()
        .filter(|n| n.map == map)
        .find(|n| distance(n.pos, point) <= NPC_HIT_RADIUS)
        .map(|n| n.id.clone())
}

/// Rollover: rewind schedules and clear the once-a-day flags.
pub fn reset_daily(world: &mut GameWorld) {
    for npc in world.npcs.iter_mut() {
        npc.cursor = 0;
        npc.talked_today = false;
        npc.gifted_today = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_def_starts_home_and_idle() {
        let world = GameWorld::with_defaults();
        let nora = npc(&world, "nora").unwrap();
        assert_eq!(nora.map, MapId::Town);
        assert_eq!(nora.pos, (35.0, 25.0));
        assert_eq!(nora.movement, NpcMovement::Idle);
        assert!(nora.schedule.windows(2).all(|w| w[0].minute <= w[1].minute));
    }

    #[test]
    fn test_npc_near_respects_map() {
        let world = GameWorld::with_defaults();
        assert_eq!(npc_near(&world, MapId::Town, (35.0, 25.5)), Some("nora".into()));
        assert_eq!(npc_near(&world, MapId::Farm, (35.0, 25.0)), None);
    }

    #[test]
    fn test_hearts_and_reset() {
        let mut world = GameWorld::with_defaults();
        world.npcs[0].add_friendship(2_000);
        assert_eq!(world.npcs[0].hearts(), 10);
        world.npcs[0].add_friendship(-5_000);
        assert_eq!(world.npcs[0].friendship, 0);

        world.npcs[0].cursor = 2;
        world.npcs[0].talked_today = true;
        reset_daily(&mut world);
        assert_eq!(world.npcs[0].cursor, 0);
        assert!(!world.npcs[0].talked_today);
    }
}
