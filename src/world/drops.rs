//! Items lying on the ground, and the magnet that pulls them to the player.

use serde::{Deserialize, Serialize};

use super::GameWorld;
use crate::shared::*;

/// Within this distance a drifting drop is picked up.
pub const PICKUP_DISTANCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDrop {
    pub item_id: ItemId,
    pub quantity: u32,
    pub map: MapId,
    /// Continuous position in tile units.
    pub pos: (f32, f32),
}

/// One tick of item magnetism: drops on the player's map inside the magnet
/// radius drift toward the player and are collected on contact. A drop that
/// doesn't fit in the inventory stays where it is.
pub fn update_magnetism(world: &mut GameWorld) {
    let player_map = world.player.map;
    let player_pos = world.player.pos;
    let radius = world.config.magnet_radius;
    let speed = world.config.magnet_speed;

    let mut picked: Vec<(ItemId, u32)> = Vec::new();
    let inventory = &mut world.inventory;

    world.drops.retain_mut(|drop| {
        if drop.map != player_map {
            return true;
        }
        let dist = distance(drop.pos, player_pos);
        if dist > radius {
            return true;
        }
        if dist > PICKUP_DISTANCE {
            let step = speed.min(dist);
            drop.pos.0 += (player_pos.0 - drop.pos.0) / dist * step;
            drop.pos.1 += (player_pos.1 - drop.pos.1) / dist * step;
            if distance(drop.pos, player_pos) > PICKUP_DISTANCE {
                return true;
            }
        }
        if inventory.add(&drop.item_id, drop.quantity) {
            picked.push((drop.item_id.clone(), drop.quantity));
            false
        } else {
            true
        }
    });

    for (item_id, quantity) in picked {
        world.emit(SimEvent::ItemPickedUp { item_id, quantity });
    }
}
