//! Procedural mine level generation.
//!
//! Each level is a 24x24 grid. Rocks, ore nodes, a ladder down and monster
//! spawn points are placed from a seed derived from the level number and the
//! world seed, so re-entering a level yields the same layout.

use std::collections::HashSet;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::shared::*;
use crate::world::map::{GameMap, Terrain};
use crate::world::objects::{LadderDirection, NodeKind, PlacedObject};

/// Width and height of every mine level in tiles.
pub const MINE_WIDTH: i32 = 24;
pub const MINE_HEIGHT: i32 = 24;

/// Where the player arrives, just below the ladder up.
pub const MINE_ENTRANCE: GridPos = (12, 1);
pub const LADDER_UP: GridPos = (12, 0);

/// A generated level before monsters are chosen for it.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub map: GameMap,
    pub ladder_down: GridPos,
    pub monster_spawns: Vec<GridPos>,
}

fn node_for_level(level: u32, rng: &mut StdRng) -> NodeKind {
    let roll: f64 = rng.gen();
    if level >= 10 && roll < 0.08 {
        NodeKind::GoldNode
    } else if level >= 5 && roll < 0.18 {
        NodeKind::IronNode
    } else if roll < 0.30 {
        NodeKind::CopperNode
    } else if roll < 0.38 {
        NodeKind::CoalNode
    } else {
        NodeKind::Rock
    }
}

fn monster_count(level: u32, rng: &mut StdRng) -> usize {
    let base = 2 + (level as usize / 3).min(5);
    base + rng.gen_range(0..=1)
}

/// Generate the layout for `level` (1-based).
pub fn generate_level(level: u32, world_seed: u64) -> LevelLayout {
    let mut rng = StdRng::seed_from_u64(world_seed ^ (u64::from(level) * 7919 + 42));
    let mut map = GameMap::new(MapId::Mine, MINE_WIDTH, MINE_HEIGHT, Terrain::Floor);

    let mut occupied: HashSet<GridPos> = HashSet::new();
    for dx in -1..=1 {
        for dy in -1..=1 {
            occupied.insert((MINE_ENTRANCE.0 + dx, MINE_ENTRANCE.1 + dy));
        }
    }
    for x in 0..MINE_WIDTH {
        occupied.insert((x, 0));
    }
    map.place(LADDER_UP.0, LADDER_UP.1, PlacedObject::Ladder { direction: LadderDirection::Up });

    // Ladder down in the far half, placed before rocks so it is never buried.
    let ladder_down = loop {
        let pos = (
            rng.gen_range(2..MINE_WIDTH - 2),
            rng.gen_range(MINE_HEIGHT / 2..MINE_HEIGHT - 2),
        );
        if !occupied.contains(&pos) {
            break pos;
        }
    };
    occupied.insert(ladder_down);
    map.place(ladder_down.0, ladder_down.1, PlacedObject::Ladder { direction: LadderDirection::Down });

    // 20-30% rock coverage keeps the floor walkable.
    let total_tiles = (MINE_WIDTH * MINE_HEIGHT) as usize;
    let coverage: f64 = rng.gen_range(0.20..=0.30);
    let max_rocks = (total_tiles as f64 * coverage) as usize;
    let mut rocks = 0;
    let mut attempts = 0;
    while rocks < max_rocks && attempts < max_rocks * 4 {
        attempts += 1;
        let pos = (rng.gen_range(1..MINE_WIDTH - 1), rng.gen_range(2..MINE_HEIGHT - 1));
        if occupied.insert(pos) {
            let kind = node_for_level(level, &mut rng);
            map.place(pos.0, pos.1, PlacedObject::node(kind));
            rocks += 1;
        }
    }

    let wanted = monster_count(level, &mut rng);
    let mut monster_spawns = Vec::new();
    let mut attempts = 0;
    while monster_spawns.len() < wanted && attempts < wanted * 20 {
        attempts += 1;
        let pos = (rng.gen_range(2..MINE_WIDTH - 2), rng.gen_range(5..MINE_HEIGHT - 2));
        if occupied.insert(pos) {
            monster_spawns.push(pos);
        }
    }

    LevelLayout {
        map,
        ladder_down,
        monster_spawns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_is_deterministic() {
        let a = generate_level(3, 99);
        let b = generate_level(3, 99);
        assert_eq!(a.map, b.map);
        assert_eq!(a.monster_spawns, b.monster_spawns);
    }

    #[test]
    fn test_entrance_clear_and_ladders_present() {
        let layout = generate_level(1, 7);
        assert!(layout.map.is_passable(MINE_ENTRANCE.0, MINE_ENTRANCE.1));
        assert_eq!(
            layout.map.plot(layout.ladder_down.0, layout.ladder_down.1).unwrap().object,
            Some(PlacedObject::Ladder { direction: LadderDirection::Down })
        );
        assert!(!layout.monster_spawns.is_empty());
    }

    #[test]
    fn test_shallow_levels_have_no_gold() {
        let layout = generate_level(1, 7);
        assert!(!layout
            .map
            .plots
            .iter()
            .any(|p| matches!(p.object, Some(PlacedObject::ResourceNode { kind: NodeKind::GoldNode, .. }))));
    }
}
