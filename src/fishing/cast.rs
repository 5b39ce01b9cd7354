//! Casting, bite timing and the per-tick reel driver.

use bevy::prelude::*;
use rand::Rng;

use super::fish_select::select_fish;
use super::minigame::{step_reel, ReelOutcome, ReelState, TRACK_MAX};
use super::resolve::{self, TREASURE_CHANCE};
use super::FishingPhase;
use crate::player::{spend_energy, stamina_cost};
use crate::shared::*;
use crate::world::map::Terrain;
use crate::world::{GameWorld, TaskAction};

/// Furthest a bobber can land from the player, in tiles.
pub const CAST_RANGE: f32 = 6.0;
const CAST_SECS: f32 = 0.5;
const BITE_WAIT_MIN_SECS: f32 = 2.0;
const BITE_WAIT_MAX_SECS: f32 = 5.0;
/// How long the player has to react once a fish bites.
const BITE_WINDOW_SECS: f32 = 1.0;

fn schedule_phase(world: &mut GameWorld, secs: f32, expected: FishingPhase) {
    let cast_id = world.fishing.cast_id;
    world.schedule_secs(secs, TaskAction::Fishing { expected, cast_id });
}

/// Throw the line at a water tile on the player's map.
pub fn start_cast(world: &mut GameWorld, target: GridPos) -> ActionResult {
    if world.fishing.phase != FishingPhase::Idle {
        return Err(ActionError::WrongPhase);
    }
    let map = world.player.map;
    let terrain = world.map(map).and_then(|m| m.terrain(target.0, target.1));
    if terrain != Some(Terrain::Water) {
        return Err(ActionError::NotWater);
    }
    if distance(world.player.pos, tile_center(target)) > CAST_RANGE {
        return Err(ActionError::OutOfRange);
    }
    let cost = stamina_cost(&world.player, ToolKind::FishingRod);
    spend_energy(world, cost)?;

    let fishing = &mut world.fishing;
    fishing.cast_id = fishing.cast_id.wrapping_add(1);
    fishing.phase = FishingPhase::Casting;
    fishing.bobber = Some((map, target));
    fishing.fish = None;
    fishing.reel = None;
    fishing.pending_impulse = false;
    debug!("[Fishing] Cast {} at {:?} {:?}", fishing.cast_id, map, target);

    schedule_phase(world, CAST_SECS, FishingPhase::Casting);
    world.emit(SimEvent::Sfx("cast"));
    Ok(())
}

/// A fishing timed task fired. Does nothing unless the state is still in
/// `expected` for the same cast.
pub fn on_timer(world: &mut GameWorld, expected: FishingPhase, cast_id: u32) {
    if world.fishing.phase != expected || world.fishing.cast_id != cast_id {
        debug!(
            "[Fishing] Stale timer {:?}/{} (now {:?}/{})",
            expected, cast_id, world.fishing.phase, world.fishing.cast_id
        );
        return;
    }
    match expected {
        FishingPhase::Casting => {
            world.fishing.phase = FishingPhase::Waiting;
            let wait = world.rng.gen_range(BITE_WAIT_MIN_SECS..=BITE_WAIT_MAX_SECS);
            schedule_phase(world, wait, FishingPhase::Waiting);
        }
        FishingPhase::Waiting => {
            world.fishing.phase = FishingPhase::Biting;
            world.emit(SimEvent::Sfx("fish_bite"));
            world.toast("Something's biting!");
            schedule_phase(world, BITE_WINDOW_SECS, FishingPhase::Biting);
        }
        FishingPhase::Biting => resolve::escape(world),
        FishingPhase::Caught | FishingPhase::Lost => world.fishing.reset(),
        FishingPhase::Idle | FishingPhase::Reeling => {
            warn!("[Fishing] No timed transition out of {:?}", expected);
        }
    }
}

/// Hook the fish during the bite window and start the minigame.
pub fn react_to_bite(world: &mut GameWorld) -> ActionResult {
    if world.fishing.phase != FishingPhase::Biting {
        return Err(ActionError::WrongPhase);
    }
    let map = world.fishing.bobber.map_or(world.player.map, |(m, _)| m);
    let hooked = select_fish(
        &world.catalog,
        map,
        world.time.season,
        world.time.time_of_day,
        world.time.weather,
        &mut world.rng,
    );
    let treasure_pos = world
        .rng
        .gen_bool(TREASURE_CHANCE)
        .then(|| world.rng.gen_range(0.1 * TRACK_MAX..=0.9 * TRACK_MAX));

    info!(
        "[Fishing] Hooked {} (difficulty {:.0}, {:?}{})",
        hooked.id,
        hooked.difficulty,
        hooked.behavior,
        if treasure_pos.is_some() { ", treasure" } else { "" }
    );
    let fishing = &mut world.fishing;
    fishing.reel = Some(ReelState::new(hooked.difficulty, hooked.behavior, treasure_pos));
    fishing.fish = Some(hooked.id);
    fishing.phase = FishingPhase::Reeling;
    fishing.pending_impulse = false;
    Ok(())
}

/// One reel press; applied on the next physics step.
pub fn reel(world: &mut GameWorld) -> ActionResult {
    if world.fishing.phase != FishingPhase::Reeling {
        return Err(ActionError::WrongPhase);
    }
    world.fishing.pending_impulse = true;
    Ok(())
}

/// Per-tick minigame step. `dt` is the tick length in seconds.
pub fn step_fishing(world: &mut GameWorld, dt: f32) {
    if world.fishing.phase != FishingPhase::Reeling {
        return;
    }
    let impulse = std::mem::take(&mut world.fishing.pending_impulse);
    let (gain, loss) = (world.config.reel_progress_gain, world.config.reel_progress_loss);
    let Some(reel) = world.fishing.reel.as_mut() else {
        warn!("[Fishing] Reeling without reel state; dropping the line");
        world.fishing.reset();
        return;
    };
    match step_reel(reel, impulse, dt, gain, loss, &mut world.rng) {
        ReelOutcome::Continue => {}
        ReelOutcome::Caught => resolve::catch_fish(world),
        ReelOutcome::Lost => resolve::escape(world),
    }
}

/// Reel in without a catch. Pending timers for this cast become stale.
pub fn stop_fishing(world: &mut GameWorld) {
    if world.fishing.is_active() {
        debug!("[Fishing] Cancelled cast {} in {:?}", world.fishing.cast_id, world.fishing.phase);
        world.fishing.reset();
    }
}
