//! Farm animals: petting once a day builds friendship, and a petted animal
//! leaves its product on the ground by morning.
//!
//! Day-end processing:
//!   - petted animals gain friendship, ignored ones lose some
//!   - petted producers drop their product at their feet
//!   - the petted flag resets

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;
use crate::world::GameWorld;

/// Friendship gained by petting.
pub const PET_FRIENDSHIP: i32 = 15;
/// Friendship lost overnight when an animal wasn't petted.
pub const NEGLECT_PENALTY: i32 = 10;
/// Sheep grow a new fleece every this many days.
pub const WOOL_DAYS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Chicken,
    Cow,
    Sheep,
    Cat,
}

impl AnimalKind {
    /// What the animal produces, if anything.
    pub fn product(self) -> Option<&'static str> {
        match self {
            AnimalKind::Chicken => Some("egg"),
            AnimalKind::Cow => Some("milk"),
            AnimalKind::Sheep => Some("wool"),
            AnimalKind::Cat => None,
        }
    }

    fn sound(self) -> &'static str {
        match self {
            AnimalKind::Chicken => "Bawk!",
            AnimalKind::Cow => "Moo~",
            AnimalKind::Sheep => "Baa!",
            AnimalKind::Cat => "<3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub name: String,
    pub kind: AnimalKind,
    /// 0..=MAX_FRIENDSHIP.
    pub friendship: i32,
    pub petted_today: bool,
    pub map: MapId,
    pub pos: GridPos,
    /// Days since the last wool; only meaningful for sheep.
    pub days_since_product: u8,
}

impl Animal {
    pub fn new(name: &str, kind: AnimalKind, map: MapId, pos: GridPos) -> Self {
        Self {
            name: name.to_string(),
            kind,
            friendship: 0,
            petted_today: false,
            map,
            pos,
            days_since_product: WOOL_DAYS,
        }
    }

    pub fn hearts(&self) -> i32 {
        self.friendship / FRIENDSHIP_PER_HEART
    }
}

/// The animals a new farm starts with, penned in the south-west corner.
pub fn starter_animals() -> Vec<Animal> {
    vec![
        Animal::new("Clucky", AnimalKind::Chicken, MapId::Farm, (3, 24)),
        Animal::new("Bessie", AnimalKind::Cow, MapId::Farm, (5, 25)),
        Animal::new("Whiskers", AnimalKind::Cat, MapId::PlayerHouse, (4, 6)),
    ]
}

pub fn animal_at(world: &GameWorld, map: MapId, pos: GridPos) -> Option<usize> {
    world.animals.iter().position(|a| a.map == map && a.pos == pos)
}

/// Pet the animal at `index`. Once per day.
pub fn pet(world: &mut GameWorld, index: usize) -> ActionResult {
    let animal = world
        .animals
        .get_mut(index)
        .ok_or(ActionError::NoTarget)?;
    if animal.petted_today {
        return Err(ActionError::AlreadyToday);
    }
    animal.petted_today = true;
    animal.friendship = (animal.friendship + PET_FRIENDSHIP).min(MAX_FRIENDSHIP);
    let message = format!("{}: {}", animal.name, animal.kind.sound());
    debug!("[Animals] Petted {} ({})", animal.name, animal.friendship);
    world.toast(message);
    world.emit(SimEvent::Sfx("animal_pet"));
    Ok(())
}

/// Rollover step for every animal.
pub fn end_of_day(world: &mut GameWorld) {
    let mut products: Vec<(MapId, GridPos, &'static str)> = Vec::new();
    for animal in world.animals.iter_mut() {
        if animal.petted_today {
            animal.friendship = (animal.friendship + 1).min(MAX_FRIENDSHIP);
            let ready = match animal.kind {
                AnimalKind::Sheep => animal.days_since_product >= WOOL_DAYS,
                _ => true,
            };
            if let Some(item) = animal.kind.product().filter(|_| ready) {
                products.push((animal.map, animal.pos, item));
                animal.days_since_product = 0;
            }
        } else {
            animal.friendship = (animal.friendship - NEGLECT_PENALTY).max(0);
        }
        animal.days_since_product = animal.days_since_product.saturating_add(1);
        animal.petted_today = false;
    }
    for (map, pos, item) in products {
        world.spawn_drop(map, tile_center(pos), item, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_once_per_day() {
        let mut world = GameWorld::with_defaults();
        let idx = animal_at(&world, MapId::Farm, (3, 24)).unwrap();
        pet(&mut world, idx).unwrap();
        assert_eq!(world.animals[idx].friendship, PET_FRIENDSHIP);
        assert_eq!(pet(&mut world, idx), Err(ActionError::AlreadyToday));
    }

    #[test]
    fn test_petted_chicken_lays_overnight() {
        let mut world = GameWorld::with_defaults();
        let idx = animal_at(&world, MapId::Farm, (3, 24)).unwrap();
        pet(&mut world, idx).unwrap();
        end_of_day(&mut world);
        assert!(!world.animals[idx].petted_today);
        assert!(world.drops.iter().any(|d| d.item_id == "egg" && d.map == MapId::Farm));
    }

    #[test]
    fn test_neglect_costs_friendship_without_product() {
        let mut world = GameWorld::with_defaults();
        let idx = animal_at(&world, MapId::Farm, (5, 25)).unwrap();
        world.animals[idx].friendship = 50;
        end_of_day(&mut world);
        assert_eq!(world.animals[idx].friendship, 40);
        assert!(world.drops.is_empty());
    }

    #[test]
    fn test_sheep_wool_every_few_days() {
        let mut world = GameWorld::with_defaults();
        world.animals = vec![Animal::new("Dolly", AnimalKind::Sheep, MapId::Farm, (6, 24))];
        let mut wool = 0;
        for _ in 0..WOOL_DAYS {
            pet(&mut world, 0).unwrap();
            end_of_day(&mut world);
            wool = world.drops.iter().filter(|d| d.item_id == "wool").count();
        }
        assert_eq!(wool, 1);
    }
}
