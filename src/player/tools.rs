//! Tool and hand interaction on the tile in front of the player.
//!
//! `use_tool` swings the selected tool at a grid position and routes to the
//! component that owns that interaction. `interact` is the empty-hand
//! equivalent: beds, machines, ladders, ripe crops, NPCs and animals.

use bevy::prelude::*;

use super::{grant_experience, spend_energy, stamina_cost};
use crate::world::objects::{self, HitOutcome, LadderDirection, PlacedObject};
use crate::world::{GameWorld, TaskAction};
use crate::{animals, calendar, crafting, farming, fishing, mining, npcs};
use crate::shared::*;

/// How long the swing display flag stays up.
pub const SWING_SECS: f32 = 0.3;

fn in_reach(world: &GameWorld, target: GridPos) -> bool {
    distance(world.player.pos, tile_center(target)) <= INTERACT_RANGE
}

/// `OutOfRange` unless `target` on the player's map is within arm's length.
pub(crate) fn ensure_reach(world: &GameWorld, target: GridPos) -> ActionResult {
    if in_reach(world, target) {
        Ok(())
    } else {
        Err(ActionError::OutOfRange)
    }
}

/// `OutOfRange` unless the NPC stands on the player's map within arm's length.
pub(crate) fn ensure_npc_reach(world: &GameWorld, npc_id: &str) -> ActionResult {
    let npc = npcs::npc(world, npc_id).ok_or_else(|| ActionError::UnknownNpc(npc_id.to_string()))?;
    if npc.map == world.player.map && distance(world.player.pos, npc.pos) <= INTERACT_RANGE {
        Ok(())
    } else {
        Err(ActionError::OutOfRange)
    }
}

fn face_toward(world: &mut GameWorld, target: GridPos) {
    let dx = target.0 as f32 - world.player.pos.0;
    let dy = target.1 as f32 - world.player.pos.1;
    if dx != 0.0 || dy != 0.0 {
        world.player.facing = Facing::from_delta(dx, dy);
    }
}

fn begin_swing(world: &mut GameWorld) {
    world.player.swinging = true;
    world.schedule_secs(SWING_SECS, TaskAction::ClearToolSwing);
}

/// Swing the selected tool at `target` on the player's current map.
pub fn use_tool(world: &mut GameWorld, target: GridPos) -> ActionResult {
    let tool = world.player.selected_tool;
    let map = world.player.map;
    face_toward(world, target);

    // The rod checks its own (longer) cast range; the sword swings at
    // whatever is in front.
    if !matches!(tool, ToolKind::FishingRod | ToolKind::Sword) && !in_reach(world, target) {
        return Err(ActionError::OutOfRange);
    }

    let result = match tool {
        ToolKind::Hoe => {
            if has_scenery(world, map, target) {
                strike_object(world, map, target, tool)
            } else {
                farming::till(world, map, target)
            }
        }
        ToolKind::WateringCan => farming::water(world, map, target),
        ToolKind::Axe => {
            if farming::giant::is_giant(world, map, target) {
                farming::giant::chop(world, map, target)
            } else {
                strike_object(world, map, target, tool)
            }
        }
        ToolKind::Pickaxe => strike_object(world, map, target, tool),
        ToolKind::Scythe => {
            let ripe = world
                .plot(map, target)
                .and_then(|p| p.crop.as_ref())
                .is_some_and(|c| c.is_mature());
            if ripe {
                farming::harvest(world, map, target).map(|_| ())
            } else {
                strike_object(world, map, target, tool)
            }
        }
        ToolKind::FishingRod => fishing::start_cast(world, target),
        ToolKind::Sword => {
            let facing = world.player.facing;
            mining::attack(world, facing).map(|_| ())
        }
    };

    if result.is_ok() {
        begin_swing(world);
    }
    result
}

fn has_scenery(world: &GameWorld, map: MapId, pos: GridPos) -> bool {
    matches!(
        world.plot(map, pos).and_then(|p| p.object.as_ref()),
        Some(PlacedObject::Scenery { .. })
    )
}

/// Hit a resource node or scenery. Broken objects are removed and their drops
/// land on the tile.
pub fn strike_object(world: &mut GameWorld, map: MapId, pos: GridPos, tool: ToolKind) -> ActionResult {
    let cost = stamina_cost(&world.player, tool);
    let tier = world.player.tier(tool);
    super::ensure_energy(world, cost)?;

    // Work on a copy so an unaffected swing leaves the plot untouched.
    let mut struck = world
        .plot_mut(map, pos)?
        .object
        .clone()
        .ok_or(ActionError::NoTarget)?;
    let outcome = objects::hit(&mut struck, tool, tier, &mut world.rng);

    match outcome {
        HitOutcome::Unaffected => Err(ActionError::NoTarget),
        HitOutcome::Damaged => {
            world.plot_mut(map, pos)?.object = Some(struck);
            spend_energy(world, cost)?;
            world.emit(SimEvent::Sfx("tool_hit"));
            Ok(())
        }
        HitOutcome::Broken { drops, skill } => {
            world.plot_mut(map, pos)?.object = None;
            spend_energy(world, cost)?;
            for (item, qty) in drops {
                world.spawn_drop(map, tile_center(pos), &item, qty);
            }
            if let Some(skill) = skill {
                grant_experience(world, skill, 5);
            }
            world.emit(SimEvent::Sfx("object_break"));
            Ok(())
        }
    }
}

/// Empty-hand interaction with `target`.
pub fn interact(world: &mut GameWorld, target: GridPos) -> ActionResult {
    if !in_reach(world, target) {
        return Err(ActionError::OutOfRange);
    }
    face_toward(world, target);
    let map = world.player.map;

    if let Some(npc_id) = npcs::npc_near(world, map, tile_center(target)) {
        let line = npcs::talk(world, &npc_id)?;
        world.toast(line);
        return Ok(());
    }
    if let Some(idx) = animals::animal_at(world, map, target) {
        return animals::pet(world, idx);
    }

    let hand = {
        let plot = world.plot(map, target).ok_or(ActionError::NoPlot(target.0, target.1))?;
        let now = world.time.time_of_day;
        match &plot.object {
            Some(PlacedObject::Bed) => HandTarget::Bed,
            Some(PlacedObject::Machine { job: Some(job), .. }) if now >= job.ready_at => HandTarget::Collect,
            Some(PlacedObject::Machine { job: Some(_), .. }) => HandTarget::Busy,
            Some(PlacedObject::Machine { job: None, .. }) => HandTarget::Feed,
            Some(PlacedObject::Ladder { direction: LadderDirection::Down }) => HandTarget::LadderDown,
            Some(PlacedObject::Ladder { direction: LadderDirection::Up }) => HandTarget::LadderUp,
            _ if plot.crop.as_ref().is_some_and(|c| c.is_mature()) => HandTarget::Harvest,
            _ => HandTarget::Nothing,
        }
    };

    match hand {
        HandTarget::Bed => calendar::sleep(world),
        HandTarget::Collect => crafting::machines::collect(world, map, target).map(|_| ()),
        HandTarget::Busy => Err(ActionError::MachineBusy),
        HandTarget::Feed => {
            let held = world
                .inventory
                .selected_item()
                .map(|s| s.item_id.clone())
                .ok_or(ActionError::NoTarget)?;
            crafting::machines::feed(world, map, target, &held)
        }
        HandTarget::LadderDown => mining::descend(world),
        HandTarget::LadderUp => {
            mining::leave_mine(world);
            Ok(())
        }
        HandTarget::Harvest => farming::harvest(world, map, target).map(|_| ()),
        HandTarget::Nothing => {
            debug!("[Player] Nothing to interact with at {:?}", target);
            Err(ActionError::NoTarget)
        }
    }
}

enum HandTarget {
    Bed,
    Collect,
    Busy,
    Feed,
    LadderDown,
    LadderUp,
    Harvest,
    Nothing,
}
