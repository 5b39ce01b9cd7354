//! Planting and the nightly growth pass.

use bevy::prelude::*;

use super::soil;
use crate::shared::*;
use crate::world::map::Crop;
use crate::world::objects::{PlacedObject, SceneryKind};
use crate::world::GameWorld;

/// Plant one `seed_id` from the inventory on tilled, empty soil.
pub fn plant(world: &mut GameWorld, map: MapId, pos: GridPos, seed_id: &str) -> ActionResult {
    {
        let plot = world.plot(map, pos).ok_or(ActionError::NoPlot(pos.0, pos.1))?;
        if !plot.terrain.is_farmable() {
            return Err(ActionError::WrongTerrain);
        }
        if !plot.tilled {
            return Err(ActionError::NotTilled);
        }
        if plot.is_occupied() {
            return Err(ActionError::Occupied);
        }
    }

    let have = world.inventory.count(seed_id);
    if have == 0 {
        return Err(ActionError::InsufficientItems {
            item: seed_id.to_string(),
            needed: 1,
            have,
        });
    }
    // A known item that isn't a seed can't be planted. Unknown ids fall
    // through to a derived crop.
    if world.catalog.item(seed_id).is_some() && !world.catalog.is_seed(seed_id) {
        return Err(ActionError::NotASeed(seed_id.to_string()));
    }

    let season = world.time.season;
    let crop = {
        let def = world.catalog.crop_for_seed_or_fallback(seed_id);
        if !def.grows_in(season) {
            return Err(ActionError::WrongSeason {
                crop: def.id.clone(),
                season,
            });
        }
        Crop {
            crop_id: def.id.clone(),
            stage: 0,
            max_stage: def.growth_stages,
            regrow_offset: def.regrow_offset,
        }
    };

    if !world.inventory.remove(seed_id, 1) {
        return Err(ActionError::InsufficientItems {
            item: seed_id.to_string(),
            needed: 1,
            have,
        });
    }
    debug!("[Farming] Planted {} at {:?} on {:?}", crop.crop_id, pos, map);
    world.plot_mut(map, pos)?.crop = Some(crop);
    world.emit(SimEvent::Sfx("plant_seed"));
    Ok(())
}

/// Nightly growth for every plot on every map, loaded or not.
///
/// Crops that cannot grow in `upcoming` wither into weeds. The rest gain one
/// stage if their plot was watered. Every watered flag is then cleared.
pub fn daily_advance(world: &mut GameWorld, upcoming: Season) {
    let catalog = &world.catalog;
    let mut grown = 0usize;
    let mut withered = 0usize;

    for game_map in world.maps.values_mut() {
        for plot in game_map.plots.iter_mut() {
            if let Some(crop) = plot.crop.as_mut() {
                let def = catalog.crop_or_fallback(&crop.crop_id);
                if !def.grows_in(upcoming) {
                    plot.crop = None;
                    plot.object = Some(PlacedObject::Scenery { kind: SceneryKind::Weed });
                    withered += 1;
                } else if plot.watered {
                    if crop.stage > crop.max_stage {
                        error!(
                            "[Farming] Crop {} at stage {} beyond max {}",
                            crop.crop_id, crop.stage, crop.max_stage
                        );
                        debug_assert!(crop.stage <= crop.max_stage);
                    } else if crop.stage < crop.max_stage {
                        crop.stage += 1;
                        grown += 1;
                    }
                }
            }
            plot.watered = false;
        }
    }

    if upcoming == Season::Winter {
        soil::frost_untill(world);
    }

    info!("[Farming] Daily advance: {} crops grew, {} withered", grown, withered);
}
