//! Combat in the mine.
//!
//! - Monsters inside their aggro range walk toward the player and attack on
//!   cooldown once close.
//! - The player swings the sword at a hitbox one tile ahead; hits knock
//!   monsters back and kills roll each drop independently.
//! - Dead monsters are filtered once per tick, after movement.

use bevy::prelude::*;
use rand::Rng;

use super::{knockout, Monster};
use crate::player::{grant_experience, spend_energy, stamina_cost};
use crate::shared::*;
use crate::world::map::GameMap;
use crate::world::GameWorld;

/// Monsters stop closing in and start attacking within this distance.
pub const STOP_DISTANCE: f32 = 0.9;
pub const ATTACK_COOLDOWN_SECS: f32 = 1.0;
pub const HITBOX_RADIUS: f32 = 0.8;
pub const BASE_SWORD_DAMAGE: f32 = 10.0;
pub const KNOCKBACK_TILES: f32 = 1.0;

/// One tick of monster AI. `dt` is the tick length in seconds.
pub fn step_monsters(world: &mut GameWorld, dt: f32) {
    if world.player.map != MapId::Mine || world.monsters.is_empty() {
        return;
    }
    let player_pos = world.player.pos;
    let defense = world.player.defense;
    let mine = world.maps.get(&MapId::Mine);
    let mut damage_taken = 0.0;

    for monster in world.monsters.iter_mut().filter(|m| !m.is_dead()) {
        monster.cooldown = (monster.cooldown - dt).max(0.0);
        let dist = distance(monster.pos, player_pos);
        if dist >= monster.aggro_range {
            continue;
        }
        if dist > STOP_DISTANCE {
            let step = (monster.speed * dt).min(dist - STOP_DISTANCE);
            let next = (
                monster.pos.0 + (player_pos.0 - monster.pos.0) / dist * step,
                monster.pos.1 + (player_pos.1 - monster.pos.1) / dist * step,
            );
            if mine.map_or(true, |m| walkable(m, next)) {
                monster.pos = next;
            }
        } else if monster.cooldown <= 0.0 {
            damage_taken += (monster.damage - defense).max(1.0);
            monster.cooldown = ATTACK_COOLDOWN_SECS;
        }
    }

    let before = world.monsters.len();
    world.monsters.retain(|m| !m.is_dead());
    if world.monsters.len() != before {
        debug!("[Mining] Removed {} dead monsters", before - world.monsters.len());
    }

    if damage_taken > 0.0 {
        world.player.health = (world.player.health - damage_taken).max(0.0);
        debug!("[Mining] Player took {:.0} damage, {:.0} hp left", damage_taken, world.player.health);
        world.emit(SimEvent::Sfx("player_hurt"));
        if world.player.health <= 0.0 {
            knockout(world);
        }
    }
}

fn walkable(map: &GameMap, pos: (f32, f32)) -> bool {
    let (x, y) = to_grid(pos);
    map.is_passable(x, y)
}

/// Turn toward `direction` and swing the sword. Returns how many monsters
/// were hit.
pub fn attack(world: &mut GameWorld, direction: Facing) -> ActionResult<usize> {
    if world.player.map != MapId::Mine {
        return Err(ActionError::NotInMine);
    }
    let cost = stamina_cost(&world.player, ToolKind::Sword);
    spend_energy(world, cost)?;
    world.player.facing = direction;

    let player_pos = world.player.pos;
    let (fx, fy) = direction.offset();
    let center = (player_pos.0 + fx as f32, player_pos.1 + fy as f32);
    let damage = BASE_SWORD_DAMAGE + 2.0 * f32::from(world.player.level(SkillKind::Combat));

    let mine = world.maps.get(&MapId::Mine);
    let mut killed: Vec<Monster> = Vec::new();
    let mut hits = 0;
    for monster in world.monsters.iter_mut().filter(|m| !m.is_dead()) {
        if distance(monster.pos, center) > HITBOX_RADIUS {
            continue;
        }
        hits += 1;
        monster.hp -= damage;

        let away = distance(monster.pos, player_pos);
        let (dx, dy) = if away > f32::EPSILON {
            ((monster.pos.0 - player_pos.0) / away, (monster.pos.1 - player_pos.1) / away)
        } else {
            (fx as f32, fy as f32)
        };
        let pushed = (monster.pos.0 + dx * KNOCKBACK_TILES, monster.pos.1 + dy * KNOCKBACK_TILES);
        if mine.map_or(false, |m| walkable(m, pushed)) {
            monster.pos = pushed;
        }

        if monster.is_dead() {
            killed.push(monster.clone());
        }
    }

    for monster in killed {
        resolve_kill(world, &monster);
    }
    world.emit(SimEvent::Sfx(if hits > 0 { "sword_hit" } else { "sword_swing" }));
    Ok(hits)
}

fn resolve_kill(world: &mut GameWorld, monster: &Monster) {
    grant_experience(world, SkillKind::Combat, monster.experience);
    for drop in &monster.drops {
        if world.rng.gen_bool(drop.chance.clamp(0.0, 1.0)) {
            let (min, max) = drop.quantity;
            let qty = world.rng.gen_range(min..=max.max(min));
            world.spawn_drop(MapId::Mine, monster.pos, &drop.item_id, qty);
        }
    }
    info!("[Mining] {} #{} defeated (+{} xp)", monster.kind, monster.id, monster.experience);
    world.emit(SimEvent::MonsterKilled {
        kind: monster.kind.clone(),
        experience: monster.experience,
    });
}
