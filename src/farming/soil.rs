//! Soil: tilling and watering.

use crate::player::{spend_energy, stamina_cost};
use crate::shared::*;
use crate::world::GameWorld;

/// Break ground with the hoe.
pub fn till(world: &mut GameWorld, map: MapId, pos: GridPos) -> ActionResult {
    let cost = stamina_cost(&world.player, ToolKind::Hoe);
    {
        let game_map = world.map(map).ok_or(ActionError::NoPlot(pos.0, pos.1))?;
        let plot = game_map.plot(pos.0, pos.1).ok_or(ActionError::NoPlot(pos.0, pos.1))?;
        if !plot.terrain.is_farmable() {
            return Err(ActionError::WrongTerrain);
        }
        if plot.tilled {
            return Err(ActionError::AlreadyTilled);
        }
        if plot.is_occupied() || game_map.building_at(pos.0, pos.1).is_some() {
            return Err(ActionError::Occupied);
        }
    }
    spend_energy(world, cost)?;
    world.plot_mut(map, pos)?.tilled = true;
    world.emit(SimEvent::Sfx("hoe_dig"));
    Ok(())
}

/// Water tilled soil with the watering can.
pub fn water(world: &mut GameWorld, map: MapId, pos: GridPos) -> ActionResult {
    let cost = stamina_cost(&world.player, ToolKind::WateringCan);
    {
        let plot = world.plot(map, pos).ok_or(ActionError::NoPlot(pos.0, pos.1))?;
        if !plot.terrain.is_farmable() {
            return Err(ActionError::WrongTerrain);
        }
        if !plot.tilled {
            return Err(ActionError::NotTilled);
        }
        if plot.watered {
            return Err(ActionError::AlreadyWatered);
        }
    }
    spend_energy(world, cost)?;
    world.plot_mut(map, pos)?.watered = true;
    world.emit(SimEvent::Sfx("water_splash"));
    Ok(())
}

/// Winter frost: tilled soil with nothing planted on outdoor maps reverts.
pub fn frost_untill(world: &mut GameWorld) {
    let mut reverted = 0;
    for game_map in world.maps.values_mut().filter(|m| m.id.is_outdoors()) {
        for plot in game_map.plots.iter_mut() {
            if plot.tilled && plot.crop.is_none() && plot.object.is_none() {
                plot.tilled = false;
                reverted += 1;
            }
        }
    }
    if reverted > 0 {
        bevy::log::debug!("[Farming] Frost reverted {} empty tilled plots", reverted);
    }
}
