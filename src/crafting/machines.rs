use bevy::prelude::*;

use crate::shared::*;
use crate::world::objects::{PlacedObject, ProcessingJob};
use crate::world::GameWorld;

// ──────────────────────────────────────────────────────────────────────────────
// FEED / COLLECT
// ──────────────────────────────────────────────────────────────────────────────

/// Load `input` into the machine at `pos`. The recipe is keyed by the machine
/// kind and the input; every recipe ingredient must be in the inventory.
/// A busy machine rejects input without consuming anything.
pub fn feed(world: &mut GameWorld, map: MapId, pos: GridPos, input: &str) -> ActionResult {
    let kind = match world.plot(map, pos).and_then(|p| p.object.as_ref()) {
        Some(PlacedObject::Machine { job: Some(_), .. }) => return Err(ActionError::MachineBusy),
        Some(PlacedObject::Machine { kind, job: None }) => *kind,
        _ => return Err(ActionError::NotAMachine),
    };

    let recipe = world
        .catalog
        .machine_recipe(kind, input)
        .cloned()
        .ok_or_else(|| ActionError::NoRecipe(input.to_string()))?;
    if let Some(missing) = world.inventory.first_missing(&recipe.inputs) {
        return Err(missing);
    }
    for (item_id, qty) in &recipe.inputs {
        if !world.inventory.remove(item_id, *qty) {
            error!("[Machines] Failed to consume {} x{} after checking stock", item_id, qty);
        }
    }

    let ready_at = world.time.time_of_day + recipe.minutes as f32 / 60.0;
    let job = ProcessingJob {
        input: input.to_string(),
        output: recipe.output.clone(),
        quantity: recipe.output_quantity,
        ready_at,
        ready: false,
    };
    if let Some(PlacedObject::Machine { job: slot, .. }) = world.plot_mut(map, pos)?.object.as_mut() {
        debug_assert!(slot.is_none());
        *slot = Some(job);
    }

    info!(
        "[Machines] {} at {:?} started {} -> {} (ready at {:.2})",
        kind.display_name(),
        pos,
        input,
        recipe.output,
        ready_at
    );
    world.emit(SimEvent::Sfx("machine_start"));
    Ok(())
}

/// Take the finished product out of the machine at `pos`. The output lands as
/// a world drop on the machine's tile.
pub fn collect(world: &mut GameWorld, map: MapId, pos: GridPos) -> ActionResult<(ItemId, u32)> {
    let now = world.time.time_of_day;
    let plot = world.plot_mut(map, pos)?;
    let job_slot = match plot.object.as_mut() {
        Some(PlacedObject::Machine { job, .. }) => job,
        _ => return Err(ActionError::NotAMachine),
    };
    match job_slot {
        None => return Err(ActionError::NoJob),
        Some(job) if now < job.ready_at => return Err(ActionError::MachineBusy),
        Some(_) => {}
    }
    let Some(job) = job_slot.take() else {
        return Err(ActionError::NoJob);
    };

    world.spawn_drop(map, tile_center(pos), &job.output, job.quantity);
    info!("[Machines] Collected {} x{} at {:?}", job.output, job.quantity, pos);
    world.emit(SimEvent::Sfx("machine_collect"));
    Ok((job.output, job.quantity))
}

// ──────────────────────────────────────────────────────────────────────────────
// PERIODIC SWEEP & ROLLOVER
// ──────────────────────────────────────────────────────────────────────────────

/// Mark every finished job on every map as ready.
pub fn sweep(world: &mut GameWorld) {
    let now = world.time.time_of_day;
    let mut newly_ready = Vec::new();
    for (map_id, game_map) in world.maps.iter_mut() {
        let positions: Vec<GridPos> = game_map.positions().collect();
        for (pos, plot) in positions.into_iter().zip(game_map.plots.iter_mut()) {
            if let Some(PlacedObject::Machine { job: Some(job), .. }) = plot.object.as_mut() {
                if !job.ready && now >= job.ready_at {
                    job.ready = true;
                    newly_ready.push(SimEvent::MachineReady {
                        map: *map_id,
                        pos,
                        output: job.output.clone(),
                    });
                }
            }
        }
    }
    for event in newly_ready {
        world.emit(event);
    }
}

/// Accumulate elapsed game minutes and run `sweep` each time the configured
/// interval passes.
pub fn advance_sweep(world: &mut GameWorld, minutes: f32) {
    world.sweep_elapsed += minutes;
    let interval = world.config.machine_sweep_minutes.max(f32::EPSILON);
    if world.sweep_elapsed >= interval {
        world.sweep_elapsed %= interval;
        sweep(world);
    }
}

/// Shift every job's ready time back one day so it stays comparable to the
/// reset clock.
pub fn day_adjust(world: &mut GameWorld) {
    for game_map in world.maps.values_mut() {
        for plot in game_map.plots.iter_mut() {
            if let Some(PlacedObject::Machine { job: Some(job), .. }) = plot.object.as_mut() {
                job.ready_at -= 24.0;
            }
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// PLACING & PICKING UP
// ──────────────────────────────────────────────────────────────────────────────

/// Put a placeable item from the inventory down on an empty tile.
pub fn place_object(world: &mut GameWorld, map: MapId, pos: GridPos, item_id: &str) -> ActionResult {
    let category = world.catalog.item(item_id).map(|d| d.category);
    let object =
        PlacedObject::from_item(item_id, category).ok_or_else(|| ActionError::NotPlaceable(item_id.to_string()))?;
    {
        let game_map = world.map(map).ok_or(ActionError::NoPlot(pos.0, pos.1))?;
        if !game_map.is_passable(pos.0, pos.1) || game_map.building_at(pos.0, pos.1).is_some() {
            return Err(ActionError::Occupied);
        }
        let plot = game_map.plot(pos.0, pos.1).ok_or(ActionError::NoPlot(pos.0, pos.1))?;
        if plot.is_occupied() {
            return Err(ActionError::Occupied);
        }
    }
    let have = world.inventory.count(item_id);
    if !world.inventory.remove(item_id, 1) {
        return Err(ActionError::InsufficientItems {
            item: item_id.to_string(),
            needed: 1,
            have,
        });
    }
    world.plot_mut(map, pos)?.object = Some(object);
    debug!("[Machines] Placed {} at {:?} on {:?}", item_id, pos, map);
    world.emit(SimEvent::Sfx("place_object"));
    Ok(())
}

/// Return an idle machine, sprinkler, empty chest or furniture to the inventory.
pub fn pick_up(world: &mut GameWorld, map: MapId, pos: GridPos) -> ActionResult {
    let item_id = match world.plot(map, pos).and_then(|p| p.object.as_ref()) {
        None => return Err(ActionError::NoTarget),
        Some(PlacedObject::Machine { job: Some(_), .. }) => return Err(ActionError::MachineBusy),
        Some(object) => object.pickup_item().ok_or(ActionError::NoTarget)?,
    };
    if !world.inventory.add(&item_id, 1) {
        return Err(ActionError::InventoryFull);
    }
    world.plot_mut(map, pos)?.object = None;
    debug!("[Machines] Picked up {} at {:?}", item_id, pos);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MachineKind;

    const SPOT: GridPos = (36, 14);

    fn world_with_furnace() -> GameWorld {
        let mut world = GameWorld::with_defaults();
        world
            .map_mut(MapId::Farm)
            .unwrap()
            .place(SPOT.0, SPOT.1, PlacedObject::machine(MachineKind::Furnace));
        world.inventory.add("copper_ore", 5);
        world.inventory.add("coal", 1);
        world
    }

    #[test]
    fn test_furnace_smelts_copper_bar_after_thirty_minutes() {
        let mut world = world_with_furnace();
        feed(&mut world, MapId::Farm, SPOT, "copper_ore").unwrap();
        assert_eq!(world.inventory.count("copper_ore"), 0);
        assert_eq!(world.inventory.count("coal"), 0);

        match &world.plot(MapId::Farm, SPOT).unwrap().object {
            Some(PlacedObject::Machine { job: Some(job), .. }) => {
                assert!((job.ready_at - 6.5).abs() < 1e-5);
                assert_eq!(job.output, "copper_bar");
            }
            other => panic!("expected a running furnace, got {other:?}"),
        }

        assert_eq!(collect(&mut world, MapId::Farm, SPOT), Err(ActionError::MachineBusy));
        world.time.time_of_day = 6.5;
        assert_eq!(collect(&mut world, MapId::Farm, SPOT), Ok(("copper_bar".into(), 1)));
        assert_eq!(world.drops.last().unwrap().item_id, "copper_bar");
        assert_eq!(collect(&mut world, MapId::Farm, SPOT), Err(ActionError::NoJob));
    }

    #[test]
    fn test_busy_machine_consumes_nothing() {
        let mut world = world_with_furnace();
        world.inventory.add("copper_ore", 5);
        world.inventory.add("coal", 1);
        feed(&mut world, MapId::Farm, SPOT, "copper_ore").unwrap();
        assert_eq!(feed(&mut world, MapId::Farm, SPOT, "copper_ore"), Err(ActionError::MachineBusy));
        assert_eq!(world.inventory.count("copper_ore"), 5);
        assert_eq!(world.inventory.count("coal"), 1);
    }

    #[test]
    fn test_missing_ingredient_or_recipe() {
        let mut world = GameWorld::with_defaults();
        world
            .map_mut(MapId::Farm)
            .unwrap()
            .place(SPOT.0, SPOT.1, PlacedObject::machine(MachineKind::Furnace));
        world.inventory.add("copper_ore", 5);
        assert!(matches!(
            feed(&mut world, MapId::Farm, SPOT, "copper_ore"),
            Err(ActionError::InsufficientItems { .. })
        ));
        assert_eq!(
            feed(&mut world, MapId::Farm, SPOT, "parsnip_seeds"),
            Err(ActionError::NoRecipe("parsnip_seeds".into()))
        );
        assert_eq!(world.inventory.count("copper_ore"), 5);
        assert_eq!(feed(&mut world, MapId::Farm, (37, 14), "copper_ore"), Err(ActionError::NotAMachine));
    }

    #[test]
    fn test_sweep_marks_ready_once_and_day_adjust_shifts() {
        let mut world = world_with_furnace();
        feed(&mut world, MapId::Farm, SPOT, "copper_ore").unwrap();
        world.drain_events();

        advance_sweep(&mut world, 10.0);
        assert!(world.drain_events().is_empty());

        world.time.time_of_day = 7.0;
        advance_sweep(&mut world, 10.0);
        advance_sweep(&mut world, 10.0);
        let events = world.drain_events();
        assert_eq!(
            events,
            vec![SimEvent::MachineReady { map: MapId::Farm, pos: SPOT, output: "copper_bar".into() }]
        );

        day_adjust(&mut world);
        match &world.plot(MapId::Farm, SPOT).unwrap().object {
            Some(PlacedObject::Machine { job: Some(job), .. }) => assert!((job.ready_at + 17.5).abs() < 1e-4),
            other => panic!("expected a job, got {other:?}"),
        }
    }

    #[test]
    fn test_place_and_pick_up_keg() {
        let mut world = GameWorld::with_defaults();
        world.inventory.add("keg", 1);
        place_object(&mut world, MapId::Farm, SPOT, "keg").unwrap();
        assert_eq!(world.inventory.count("keg"), 0);
        assert_eq!(
            place_object(&mut world, MapId::Farm, SPOT, "keg"),
            Err(ActionError::Occupied)
        );
        pick_up(&mut world, MapId::Farm, SPOT).unwrap();
        assert_eq!(world.inventory.count("keg"), 1);
        assert!(world.plot(MapId::Farm, SPOT).unwrap().object.is_none());
        assert_eq!(
            place_object(&mut world, MapId::Farm, SPOT, "parsnip"),
            Err(ActionError::NotPlaceable("parsnip".into()))
        );
    }
}
