//! Map generators for the overworld areas.
//!
//! Layouts are fixed; scattered scenery uses a per-map seed so every new game
//! starts with the same world. Mine levels are generated by `mining`.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::map::{Building, GameMap, Terrain, Warp};
use super::objects::{NodeKind, PlacedObject, SceneryKind};
use crate::shared::*;

/// Where the player wakes up each morning.
pub const FARM_SPAWN: GridPos = (19, 6);
pub const BED_POS: GridPos = (2, 2);

pub fn generate_map(map_id: MapId) -> Option<GameMap> {
    match map_id {
        MapId::Farm => Some(generate_farm()),
        MapId::Town => Some(generate_town()),
        MapId::Beach => Some(generate_beach()),
        MapId::Forest => Some(generate_forest()),
        MapId::PlayerHouse => Some(generate_player_house()),
        MapId::Mine => None,
    }
}

/// Every overworld map, keyed by id.
pub fn generate_overworld() -> BTreeMap<MapId, GameMap> {
    [MapId::Farm, MapId::Town, MapId::Beach, MapId::Forest, MapId::PlayerHouse]
        .into_iter()
        .filter_map(generate_map)
        .map(|m| (m.id, m))
        .collect()
}

/// Scatter `count` objects on free tiles inside `area` (x, y, w, h), skipping
/// any tile `keep_clear` rejects.
fn scatter(
    map: &mut GameMap,
    rng: &mut StdRng,
    area: (i32, i32, i32, i32),
    count: usize,
    keep_clear: impl Fn(i32, i32) -> bool,
    mut make: impl FnMut(&mut StdRng) -> PlacedObject,
) {
    let (x0, y0, w, h) = area;
    let mut placed = 0;
    let mut attempts = 0;
    while placed < count && attempts < count * 10 {
        attempts += 1;
        let x = rng.gen_range(x0..x0 + w);
        let y = rng.gen_range(y0..y0 + h);
        if keep_clear(x, y) || map.warp_at((x, y)).is_some() || map.building_at(x, y).is_some() {
            continue;
        }
        if map.terrain(x, y) == Some(Terrain::Water) {
            continue;
        }
        let object = make(rng);
        if map.place(x, y, object) {
            placed += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Farm: 40x30
// House top-centre, open dirt field in the middle, pond bottom-right.
// Exits: east → Town, west → Forest, south → Beach.
// ---------------------------------------------------------------------------
fn generate_farm() -> GameMap {
    let mut map = GameMap::new(MapId::Farm, 40, 30, Terrain::Grass);
    let mut rng = StdRng::seed_from_u64(0xFA53);

    map.buildings.push(Building {
        name: "Farmhouse".into(),
        x: 16,
        y: 1,
        width: 6,
        height: 4,
        door: (19, 4),
    });
    map.fill_rect(19, 5, 1, 3, Terrain::Paved);
    // The tillable field. Kept free of debris.
    map.fill_rect(8, 8, 22, 12, Terrain::Dirt);
    map.fill_rect(32, 22, 5, 4, Terrain::Water);
    map.fill_rect(31, 21, 7, 1, Terrain::Sand);

    map.warps = vec![
        Warp { from: (19, 4), to_map: MapId::PlayerHouse, to: (5, 8) },
        Warp { from: (39, 14), to_map: MapId::Town, to: (1, 14) },
        Warp { from: (0, 14), to_map: MapId::Forest, to: (38, 14) },
        Warp { from: (20, 29), to_map: MapId::Beach, to: (20, 1) },
    ];

    let in_field = |x: i32, y: i32| (7..31).contains(&x) && (7..21).contains(&y);
    let near_house = |x: i32, y: i32| (15..23).contains(&x) && y < 8;
    let on_path = |x: i32, y: i32| y == 14 || x == 20 || x == 39 || x == 0;

    for x in (1..15).step_by(3).chain((24..39).step_by(3)) {
        map.place(x, 0, PlacedObject::node(NodeKind::Tree));
    }
    scatter(
        &mut map,
        &mut rng,
        (1, 1, 38, 28),
        40,
        |x, y| in_field(x, y) || near_house(x, y) || on_path(x, y),
        |rng| match rng.gen_range(0..10) {
            0..=3 => PlacedObject::Scenery { kind: SceneryKind::Weed },
            4..=5 => PlacedObject::node(NodeKind::Rock),
            6 => PlacedObject::node(NodeKind::Stump),
            7 => PlacedObject::Scenery { kind: SceneryKind::GrassTuft },
            _ => PlacedObject::node(NodeKind::Tree),
        },
    );
    map
}

// ---------------------------------------------------------------------------
// Player house: 10x10 floor, bed in the corner, door at the bottom.
// ---------------------------------------------------------------------------
fn generate_player_house() -> GameMap {
    let mut map = GameMap::new(MapId::PlayerHouse, 10, 10, Terrain::Floor);
    map.place(BED_POS.0, BED_POS.1, PlacedObject::Bed);
    map.place(7, 2, PlacedObject::Furniture { kind: "wooden_chair".into() });
    map.warps.push(Warp { from: (5, 9), to_map: MapId::Farm, to: FARM_SPAWN });
    map
}

// ---------------------------------------------------------------------------
// Town: 40x30
// Paved crossroads, general store and blacksmith on the north side,
// Nora's cottage south-east.
// ---------------------------------------------------------------------------
fn generate_town() -> GameMap {
    let mut map = GameMap::new(MapId::Town, 40, 30, Terrain::Grass);
    let mut rng = StdRng::seed_from_u64(0x7014);

    map.fill_rect(0, 14, 40, 3, Terrain::Paved);
    map.fill_rect(19, 0, 3, 30, Terrain::Paved);

    map.buildings = vec![
        Building { name: "General Store".into(), x: 5, y: 3, width: 7, height: 5, door: (8, 7) },
        Building { name: "Blacksmith".into(), x: 26, y: 3, width: 6, height: 5, door: (29, 7) },
        Building { name: "Nora's Cottage".into(), x: 33, y: 20, width: 5, height: 4, door: (35, 23) },
    ];
    map.warps.push(Warp { from: (0, 14), to_map: MapId::Farm, to: (38, 14) });

    scatter(
        &mut map,
        &mut rng,
        (1, 1, 38, 28),
        25,
        |_, _| false,
        |rng| {
            if rng.gen_bool(0.5) {
                PlacedObject::Scenery { kind: SceneryKind::Flowers }
            } else {
                PlacedObject::Scenery { kind: SceneryKind::GrassTuft }
            }
        },
    );
    map
}

// ---------------------------------------------------------------------------
// Beach: 40x20. Sand above, ocean below, a short pier at x=19.
// ---------------------------------------------------------------------------
fn generate_beach() -> GameMap {
    let mut map = GameMap::new(MapId::Beach, 40, 20, Terrain::Sand);
    map.fill_rect(0, 12, 40, 8, Terrain::Water);
    map.fill_rect(19, 12, 1, 4, Terrain::Paved);
    map.warps.push(Warp { from: (20, 0), to_map: MapId::Farm, to: (20, 28) });
    map
}

// ---------------------------------------------------------------------------
// Forest: 40x30. A river runs north-south with a bridge at y 14-15.
// The mine entrance sits in the north-west clearing.
// ---------------------------------------------------------------------------
fn generate_forest() -> GameMap {
    let mut map = GameMap::new(MapId::Forest, 40, 30, Terrain::Grass);
    let mut rng = StdRng::seed_from_u64(0xF0E5);

    map.fill_rect(12, 0, 2, 30, Terrain::Water);
    map.fill_rect(12, 14, 2, 2, Terrain::Floor);
    map.warps = vec![
        Warp { from: (39, 14), to_map: MapId::Farm, to: (1, 14) },
        Warp { from: (5, 5), to_map: MapId::Mine, to: (12, 1) },
    ];

    let clearing = |x: i32, y: i32| (3..8).contains(&x) && (3..8).contains(&y);
    let on_path = |y: i32| (14..16).contains(&y);
    scatter(
        &mut map,
        &mut rng,
        (1, 1, 38, 28),
        90,
        |x, y| clearing(x, y) || on_path(y),
        |rng| match rng.gen_range(0..10) {
            0..=4 => PlacedObject::node(NodeKind::Tree),
            5 => PlacedObject::node(NodeKind::Stump),
            6..=7 => PlacedObject::Scenery { kind: SceneryKind::Bush },
            _ => PlacedObject::Scenery { kind: SceneryKind::Weed },
        },
    );
    map
}
