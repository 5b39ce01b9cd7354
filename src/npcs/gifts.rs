//! Talking and gift-giving.

use bevy::prelude::*;

use crate::data::GiftPreference;
use crate::shared::*;
use crate::world::GameWorld;

/// Friendship gained from the first chat of the day.
pub const TALK_FRIENDSHIP: i32 = 20;

fn npc_index(world: &GameWorld, npc_id: &str) -> ActionResult<usize> {
    world
        .npcs
        .iter()
        .position(|n| n.id == npc_id)
        .ok_or_else(|| ActionError::UnknownNpc(npc_id.to_string()))
}

/// Talk to an NPC and get their line for today. Only the first chat each day
/// raises friendship.
pub fn talk(world: &mut GameWorld, npc_id: &str) -> ActionResult<String> {
    let idx = npc_index(world, npc_id)?;
    let lines = world
        .catalog
        .npcs
        .get(npc_id)
        .map(|d| d.dialogue.clone())
        .unwrap_or_default();

    let npc = &mut world.npcs[idx];
    if !npc.talked_today {
        npc.talked_today = true;
        npc.add_friendship(TALK_FRIENDSHIP);
    }
    let line = if lines.is_empty() {
        warn!("[NPC] {} has no dialogue lines", npc_id);
        "...".to_string()
    } else {
        let pick = world.time.total_days() as usize + npc.hearts() as usize;
        lines[pick % lines.len()].clone()
    };
    Ok(format!("{}: {}", world.npcs[idx].name, line))
}

/// Give one `item_id` to an NPC. Returns the friendship change.
pub fn give_gift(world: &mut GameWorld, npc_id: &str, item_id: &str) -> ActionResult<i32> {
    let idx = npc_index(world, npc_id)?;
    if world.npcs[idx].gifted_today {
        return Err(ActionError::AlreadyToday);
    }
    let have = world.inventory.count(item_id);
    if have == 0 {
        return Err(ActionError::InsufficientItems {
            item: item_id.to_string(),
            needed: 1,
            have,
        });
    }
    let preference = world
        .catalog
        .npcs
        .get(npc_id)
        .and_then(|d| d.gift_preferences.get(item_id).copied())
        .unwrap_or(GiftPreference::Neutral);

    world.inventory.remove(item_id, 1);
    let delta = preference.friendship();
    let npc = &mut world.npcs[idx];
    npc.gifted_today = true;
    npc.add_friendship(delta);
    info!(
        "[NPC] {} received {} ({:?}, {:+}), friendship now {}",
        npc.name, item_id, preference, delta, npc.friendship
    );
    let message = format!("{} {:?} the {}", npc.name, preference, world.catalog.item_name(item_id));
    world.toast(message);
    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npcs::npc;

    #[test]
    fn test_talk_raises_friendship_once_per_day() {
        let mut world = GameWorld::with_defaults();
        let line = talk(&mut world, "nora").unwrap();
        assert!(line.starts_with("Nora: "));
        talk(&mut world, "nora").unwrap();
        assert_eq!(npc(&world, "nora").unwrap().friendship, TALK_FRIENDSHIP);
        assert_eq!(talk(&mut world, "nobody"), Err(ActionError::UnknownNpc("nobody".into())));
    }

    #[test]
    fn test_gift_uses_preference_and_daily_limit() {
        let mut world = GameWorld::with_defaults();
        world.inventory.add("cauliflower", 2);
        assert_eq!(give_gift(&mut world, "nora", "cauliflower"), Ok(80));
        assert_eq!(world.inventory.count("cauliflower"), 1);
        assert_eq!(give_gift(&mut world, "nora", "cauliflower"), Err(ActionError::AlreadyToday));
        assert_eq!(world.inventory.count("cauliflower"), 1);
    }

    #[test]
    fn test_gift_requires_item_and_clamps_at_zero() {
        let mut world = GameWorld::with_defaults();
        assert!(matches!(
            give_gift(&mut world, "nora", "bat_wing"),
            Err(ActionError::InsufficientItems { .. })
        ));
        world.inventory.add("bat_wing", 1);
        assert_eq!(give_gift(&mut world, "nora", "bat_wing"), Ok(-40));
        assert_eq!(npc(&world, "nora").unwrap().friendship, 0);
    }
}
