//! Harvesting mature crops.

use bevy::prelude::*;
use rand::Rng;

use crate::player::grant_experience;
use crate::shared::*;
use crate::world::GameWorld;

/// Harvest the mature crop at `pos`. Returns the number of units produced.
///
/// Regrowable crops drop back to `max_stage - regrow_offset`; the rest are
/// removed. The plot's watered flag is left as it was.
pub fn harvest(world: &mut GameWorld, map: MapId, pos: GridPos) -> ActionResult<u32> {
    let crop = world
        .plot(map, pos)
        .ok_or(ActionError::NoPlot(pos.0, pos.1))?
        .crop
        .clone()
        .ok_or(ActionError::NoCrop)?;
    if !crop.is_mature() {
        return Err(ActionError::NotMature);
    }

    let def = world.catalog.crop_or_fallback(&crop.crop_id).into_owned();
    let farming_level = world.player.level(SkillKind::Farming);

    let rng = &mut world.rng;
    let mut quantity = rng.gen_range(def.min_harvest..=def.max_harvest.max(def.min_harvest));
    if let Some(extra) = def.extra_yield {
        let chance = extra.chance.clamp(0.0, 1.0);
        let mut rolled = 0;
        while rolled < extra.max_extra && rng.gen_bool(chance) {
            quantity += 1;
            rolled += 1;
        }
    }
    let bonus_chance = (0.02 * f64::from(farming_level)).min(1.0);
    if bonus_chance > 0.0 && rng.gen_bool(bonus_chance) {
        quantity += 1;
    }

    {
        let plot = world.plot_mut(map, pos)?;
        match (plot.crop.as_mut(), crop.regrow_offset) {
            (Some(growing), Some(offset)) => {
                growing.stage = growing.max_stage.saturating_sub(offset);
            }
            _ => plot.crop = None,
        }
    }

    world.give_or_drop(&def.harvest_id, quantity);
    grant_experience(world, SkillKind::Farming, 2 * u32::from(def.growth_stages));

    info!("[Farming] Harvested {} x{} at {:?}", def.harvest_id, quantity, pos);
    world.emit(SimEvent::CropHarvested {
        crop_id: def.id.clone(),
        item_id: def.harvest_id.clone(),
        quantity,
        pos,
    });
    world.emit(SimEvent::Sfx("harvest"));
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::map::Crop;

    fn mature(world: &mut GameWorld, pos: GridPos, crop_id: &str, max_stage: u8, regrow: Option<u8>) {
        let plot = world.plot_mut(MapId::Farm, pos).unwrap();
        plot.tilled = true;
        plot.crop = Some(Crop {
            crop_id: crop_id.into(),
            stage: max_stage,
            max_stage,
            regrow_offset: regrow,
        });
    }

    #[test]
    fn test_parsnip_yields_one_and_clears_plot() {
        let mut world = GameWorld::with_defaults();
        mature(&mut world, (10, 10), "parsnip", 4, None);
        assert_eq!(harvest(&mut world, MapId::Farm, (10, 10)), Ok(1));
        assert_eq!(world.inventory.count("parsnip"), 1);
        let plot = world.plot(MapId::Farm, (10, 10)).unwrap();
        assert!(plot.crop.is_none());
        assert!(plot.tilled);
        assert_eq!(world.player.skills.experience(SkillKind::Farming), 8);
    }

    #[test]
    fn test_regrowable_resets_stage_and_keeps_watered() {
        let mut world = GameWorld::with_defaults();
        mature(&mut world, (10, 10), "strawberry", 8, Some(4));
        world.plot_mut(MapId::Farm, (10, 10)).unwrap().watered = true;
        harvest(&mut world, MapId::Farm, (10, 10)).unwrap();
        let plot = world.plot(MapId::Farm, (10, 10)).unwrap();
        assert_eq!(plot.crop.as_ref().unwrap().stage, 4);
        assert!(plot.watered);
    }

    #[test]
    fn test_immature_crop_is_not_harvested() {
        let mut world = GameWorld::with_defaults();
        mature(&mut world, (10, 10), "parsnip", 4, None);
        world.plot_mut(MapId::Farm, (10, 10)).unwrap().crop.as_mut().unwrap().stage = 3;
        assert_eq!(harvest(&mut world, MapId::Farm, (10, 10)), Err(ActionError::NotMature));
        assert_eq!(harvest(&mut world, MapId::Farm, (11, 10)), Err(ActionError::NoCrop));
        assert_eq!(world.inventory.count("parsnip"), 0);
    }

    #[test]
    fn test_full_inventory_spills_to_ground() {
        let mut world = GameWorld::with_defaults();
        for i in 0..MAX_INVENTORY_SLOTS {
            world.inventory.add(&format!("junk_{i}"), 1);
        }
        mature(&mut world, (10, 10), "parsnip", 4, None);
        harvest(&mut world, MapId::Farm, (10, 10)).unwrap();
        assert!(world.drops.iter().any(|d| d.item_id == "parsnip"));
    }
}
