//! Inventory-level transactions: crafting, selling, buying and eating.
//!
//! Each one either applies completely or returns an error with the inventory
//! and gold untouched.

use bevy::prelude::*;

use crate::player::restore_energy;
use crate::shared::*;
use crate::world::GameWorld;

/// Craft one batch of `recipe_id` from held ingredients.
pub fn craft(world: &mut GameWorld, recipe_id: &str) -> ActionResult {
    let recipe = world
        .catalog
        .recipes
        .get(recipe_id)
        .cloned()
        .ok_or_else(|| ActionError::UnknownItem(recipe_id.to_string()))?;
    if let Some(missing) = world.inventory.first_missing(&recipe.ingredients) {
        return Err(missing);
    }

    // Work on a copy so a result that doesn't fit leaves the ingredients.
    let mut staged = world.inventory.clone();
    for (item_id, qty) in &recipe.ingredients {
        staged.remove(item_id, *qty);
    }
    if !staged.add(&recipe.result, recipe.result_quantity) {
        return Err(ActionError::InventoryFull);
    }
    world.inventory = staged;

    info!("[Crafting] Crafted {} x{}", recipe.result, recipe.result_quantity);
    world.emit(SimEvent::Sfx("craft"));
    Ok(())
}

/// Sell `quantity` units for their catalog price. Returns the gold earned.
pub fn sell(world: &mut GameWorld, item_id: &str, quantity: u32) -> ActionResult<u32> {
    let price = world
        .catalog
        .item(item_id)
        .map(|d| d.sell_price)
        .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
    let have = world.inventory.count(item_id);
    if !world.inventory.remove(item_id, quantity) {
        return Err(ActionError::InsufficientItems {
            item: item_id.to_string(),
            needed: quantity,
            have,
        });
    }
    let earned = price.saturating_mul(quantity);
    world.player.gold = world.player.gold.saturating_add(earned);
    debug!("[Shop] Sold {} x{} for {}g", item_id, quantity, earned);
    world.emit(SimEvent::Sfx("coin"));
    Ok(earned)
}

/// Buy `quantity` units at the catalog's shop price.
pub fn buy(world: &mut GameWorld, item_id: &str, quantity: u32) -> ActionResult {
    let def = world
        .catalog
        .item(item_id)
        .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
    let price = def.buy_price.ok_or_else(|| ActionError::NotForSale(item_id.to_string()))?;
    let cost = price
        .checked_mul(quantity)
        .ok_or(ActionError::InsufficientGold)?;
    if world.player.gold < cost {
        return Err(ActionError::InsufficientGold);
    }
    if !world.inventory.add(item_id, quantity) {
        return Err(ActionError::InventoryFull);
    }
    world.player.gold -= cost;
    debug!("[Shop] Bought {} x{} for {}g", item_id, quantity, cost);
    world.emit(SimEvent::Sfx("coin"));
    Ok(())
}

/// Eat one `item_id`. Returns the energy restored.
pub fn eat(world: &mut GameWorld, item_id: &str) -> ActionResult<f32> {
    let energy = world
        .catalog
        .item(item_id)
        .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?
        .energy
        .ok_or(ActionError::NotEdible)?;
    if !world.inventory.remove(item_id, 1) {
        return Err(ActionError::InsufficientItems {
            item: item_id.to_string(),
            needed: 1,
            have: 0,
        });
    }
    let before = world.player.energy;
    restore_energy(world, energy);
    let restored = world.player.energy - before;
    debug!("[Player] Ate {} (+{:.0} energy)", item_id, restored);
    world.emit(SimEvent::Sfx("eat"));
    Ok(restored)
}
