//! NPC schedule resolution and movement toward schedule waypoints.

use std::collections::{BTreeMap, VecDeque};

use bevy::prelude::*;

use super::{Npc, NpcMovement};
use crate::pathfinding::find_path;
use crate::shared::*;
use crate::world::map::GameMap;
use crate::world::GameWorld;

/// One tick for every NPC: fire due schedule entries, then walk.
pub fn step_npcs(world: &mut GameWorld) {
    let minute = world.time.minutes_of_day();
    let speed = world.config.npc_speed;
    let cap = world.config.path_iteration_cap;
    let maps = &world.maps;

    for npc in world.npcs.iter_mut() {
        advance_cursor(npc, minute);
        walk(npc, maps, speed, cap);
    }
}

/// Consume every entry whose minute has passed. Same-map entries start a
/// walk; entries on another map teleport.
fn advance_cursor(npc: &mut Npc, minute: f32) {
    while let Some(entry) = npc.schedule.get(npc.cursor) {
        if entry.minute as f32 > minute {
            break;
        }
        let target = (entry.x, entry.y);
        if entry.map == npc.map {
            debug!("[NPC] {} heading to {:?}", npc.id, target);
            npc.movement = NpcMovement::Moving { target, path: None };
        } else {
            debug!("[NPC] {} moved to {:?} {:?}", npc.id, entry.map, target);
            npc.map = entry.map;
            npc.pos = tile_center(target);
            npc.movement = NpcMovement::Idle;
        }
        npc.cursor += 1;
    }
}

fn walk(npc: &mut Npc, maps: &BTreeMap<MapId, GameMap>, speed: f32, cap: usize) {
    let Npc {
        id,
        map,
        pos,
        facing,
        movement,
        ..
    } = npc;
    let NpcMovement::Moving { target, path } = movement else {
        return;
    };
    let goal = tile_center(*target);

    if path.is_none() && distance(*pos, goal) > speed {
        let found = maps
            .get(map)
            .map(|m| find_path(m, to_grid(*pos), *target, cap))
            .unwrap_or_default();
        if found.is_empty() {
            debug!("[NPC] {} has no path to {:?}; walking straight", id, target);
        }
        *path = Some(VecDeque::from(found));
    }

    let waypoint = path
        .as_ref()
        .and_then(|p| p.front().copied())
        .map(tile_center)
        .unwrap_or(goal);
    let dx = waypoint.0 - pos.0;
    let dy = waypoint.1 - pos.1;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > 0.0 {
        *facing = Facing::from_delta(dx, dy);
    }

    if dist <= speed {
        *pos = waypoint;
        if let Some(p) = path.as_mut() {
            p.pop_front();
        }
    } else {
        pos.0 += dx / dist * speed;
        pos.1 += dy / dist * speed;
    }

    let path_done = path.as_ref().map_or(true, |p| p.is_empty());
    if path_done && *pos == goal {
        debug!("[NPC] {} arrived at {:?}", id, target);
        *movement = NpcMovement::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScheduleEntry;
    use crate::world::map::Terrain;

    fn open_town_world() -> GameWorld {
        let mut world = GameWorld::with_defaults();
        world.maps.insert(MapId::Town, GameMap::new(MapId::Town, 40, 30, Terrain::Grass));
        world.npcs.truncate(1);
        let npc = &mut world.npcs[0];
        npc.map = MapId::Town;
        npc.pos = (20.0, 16.0);
        npc.schedule = vec![ScheduleEntry { minute: 900, map: MapId::Town, x: 30, y: 12 }];
        npc.cursor = 0;
        world
    }

    #[test]
    fn test_entry_fires_only_when_due() {
        let mut world = open_town_world();
        world.time.time_of_day = 14.9;
        step_npcs(&mut world);
        assert_eq!(world.npcs[0].movement, NpcMovement::Idle);
        world.time.time_of_day = 15.0;
        step_npcs(&mut world);
        assert!(world.npcs[0].is_moving());
        assert_eq!(world.npcs[0].cursor, 1);
    }

    #[test]
    fn test_walks_to_target_in_bounded_ticks() {
        let mut world = open_town_world();
        world.time.time_of_day = 15.0;
        let tiles = 10 + 4;
        let bound = (tiles as f32 / world.config.npc_speed).ceil() as usize + 2;
        let mut ticks = 0;
        loop {
            step_npcs(&mut world);
            ticks += 1;
            if !world.npcs[0].is_moving() || ticks > bound {
                break;
            }
        }
        assert!(ticks <= bound, "took {ticks} ticks");
        assert_eq!(world.npcs[0].pos, (30.0, 12.0));
    }

    #[test]
    fn test_other_map_entry_teleports() {
        let mut world = open_town_world();
        world.npcs[0].schedule = vec![ScheduleEntry { minute: 400, map: MapId::Beach, x: 5, y: 5 }];
        world.time.time_of_day = 7.0;
        step_npcs(&mut world);
        let npc = &world.npcs[0];
        assert_eq!(npc.map, MapId::Beach);
        assert_eq!(npc.pos, (5.0, 5.0));
        assert_eq!(npc.movement, NpcMovement::Idle);
    }

    #[test]
    fn test_enclosed_target_walks_straight() {
        let mut world = open_town_world();
        let town = world.map_mut(MapId::Town).unwrap();
        for (x, y) in [(29, 12), (31, 12), (30, 11), (30, 13), (30, 12)] {
            town.fill_rect(x, y, 1, 1, Terrain::Water);
        }
        world.time.time_of_day = 15.0;
        step_npcs(&mut world);
        match &world.npcs[0].movement {
            NpcMovement::Moving { path: Some(p), .. } => assert!(p.is_empty()),
            other => panic!("expected moving with empty path, got {other:?}"),
        }
        assert!(world.npcs[0].pos.0 > 20.0);
    }
}
