//! Giant crops: nine matured plants of an eligible kind merging overnight.

use bevy::prelude::*;
use rand::Rng;

use crate::player::{grant_experience, spend_energy, stamina_cost};
use crate::shared::*;
use crate::world::map::GameMap;
use crate::world::objects::{PlacedObject, GIANT_CROP_HP};
use crate::world::GameWorld;

/// Units dropped when a giant crop is chopped down.
pub const GIANT_YIELD: (u32, u32) = (15, 21);

fn matured_block(game_map: &GameMap, x: i32, y: i32) -> Option<String> {
    let anchor = game_map.plot(x, y)?.crop.as_ref()?;
    if !anchor.is_mature() {
        return None;
    }
    for dy in 0..3 {
        for dx in 0..3 {
            let plot = game_map.plot(x + dx, y + dy)?;
            let crop = plot.crop.as_ref()?;
            if plot.object.is_some() || crop.crop_id != anchor.crop_id || !crop.is_mature() {
                return None;
            }
        }
    }
    Some(anchor.crop_id.clone())
}

/// Scan every map for 3×3 blocks of matured eligible crops and roll each
/// block once. A merged block becomes a `GiantCrop` anchor plus eight parts.
pub fn giant_pass(world: &mut GameWorld) {
    let chance = world.config.giant_crop_chance.clamp(0.0, 1.0);
    let catalog = &world.catalog;
    let rng = &mut world.rng;

    for game_map in world.maps.values_mut() {
        for y in 0..game_map.height - 2 {
            for x in 0..game_map.width - 2 {
                let Some(crop_id) = matured_block(game_map, x, y) else {
                    continue;
                };
                let eligible = catalog.crops.get(&crop_id).is_some_and(|d| d.giant_eligible);
                if !eligible || !rng.gen_bool(chance) {
                    continue;
                }
                for dy in 0..3 {
                    for dx in 0..3 {
                        if let Some(plot) = game_map.plot_mut(x + dx, y + dy) {
                            plot.crop = None;
                            plot.object = Some(if (dx, dy) == (0, 0) {
                                PlacedObject::GiantCrop {
                                    crop_id: crop_id.clone(),
                                    hp: GIANT_CROP_HP,
                                }
                            } else {
                                PlacedObject::GiantCropPart { anchor: (x, y) }
                            });
                        }
                    }
                }
                info!("[Farming] Giant {} formed at ({}, {}) on {:?}", crop_id, x, y, game_map.id);
            }
        }
    }
}

pub fn is_giant(world: &GameWorld, map: MapId, pos: GridPos) -> bool {
    matches!(
        world.plot(map, pos).and_then(|p| p.object.as_ref()),
        Some(PlacedObject::GiantCrop { .. } | PlacedObject::GiantCropPart { .. })
    )
}

/// One axe swing at any tile of a giant crop.
pub fn chop(world: &mut GameWorld, map: MapId, pos: GridPos) -> ActionResult {
    let anchor = match world.plot(map, pos).and_then(|p| p.object.as_ref()) {
        Some(PlacedObject::GiantCrop { .. }) => pos,
        Some(PlacedObject::GiantCropPart { anchor }) => *anchor,
        _ => return Err(ActionError::NoTarget),
    };
    let (crop_id, hp) = match world.plot(map, anchor).and_then(|p| p.object.as_ref()) {
        Some(PlacedObject::GiantCrop { crop_id, hp }) => (crop_id.clone(), *hp),
        _ => {
            error!("[Farming] Giant crop part at {:?} points at missing anchor {:?}", pos, anchor);
            return Err(ActionError::NoTarget);
        }
    };

    let cost = stamina_cost(&world.player, ToolKind::Axe);
    spend_energy(world, cost)?;
    let remaining = hp.saturating_sub(world.player.tier(ToolKind::Axe).power());

    if remaining > 0 {
        if let Some(PlacedObject::GiantCrop { hp, .. }) = world.plot_mut(map, anchor)?.object.as_mut() {
            *hp = remaining;
        }
        world.emit(SimEvent::Sfx("tool_hit"));
        return Ok(());
    }

    if let Some(game_map) = world.map_mut(map) {
        for dy in 0..3 {
            for dx in 0..3 {
                if let Some(plot) = game_map.plot_mut(anchor.0 + dx, anchor.1 + dy) {
                    plot.object = None;
                }
            }
        }
    }
    let harvest_id = world.catalog.crop_or_fallback(&crop_id).harvest_id.clone();
    let quantity = world.rng.gen_range(GIANT_YIELD.0..=GIANT_YIELD.1);
    world.spawn_drop(map, tile_center((anchor.0 + 1, anchor.1 + 1)), &harvest_id, quantity);
    grant_experience(world, SkillKind::Foraging, 10);
    info!("[Farming] Giant {} chopped: {} x{}", crop_id, harvest_id, quantity);
    world.emit(SimEvent::Sfx("object_break"));
    Ok(())
}
