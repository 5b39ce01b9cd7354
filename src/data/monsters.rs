use super::{Catalog, DropChance, MonsterDef};

fn drop(item_id: &str, chance: f64, min: u32, max: u32) -> DropChance {
    DropChance {
        item_id: item_id.into(),
        chance,
        quantity: (min, max),
    }
}

/// Populate the monster table. Base stats are for level 1; the dungeon adds
/// depth scaling when it spawns them.
pub fn populate_monsters(catalog: &mut Catalog) {
    let monsters = vec![
        MonsterDef {
            id: "green_slime".into(),
            hp: 20.0,
            damage: 5.0,
            speed: 1.5,
            aggro_range: 5.0,
            experience: 3,
            min_level: 1,
            drops: vec![drop("slime", 0.8, 1, 2), drop("copper_ore", 0.1, 1, 3)],
        },
        MonsterDef {
            id: "bat".into(),
            hp: 15.0,
            damage: 8.0,
            speed: 3.0,
            aggro_range: 7.0,
            experience: 5,
            min_level: 5,
            drops: vec![drop("bat_wing", 0.6, 1, 1), drop("coal", 0.15, 1, 1)],
        },
        MonsterDef {
            id: "rock_crab".into(),
            hp: 40.0,
            damage: 12.0,
            speed: 1.0,
            aggro_range: 4.0,
            experience: 8,
            min_level: 10,
            drops: vec![
                drop("bug_meat", 0.5, 1, 2),
                drop("iron_ore", 0.25, 1, 2),
                drop("quartz", 0.05, 1, 1),
            ],
        },
    ];

    for monster in monsters {
        catalog.monsters.insert(monster.id.clone(), monster);
    }
}
