use std::collections::HashMap;

use super::{Catalog, GiftPreference, NpcDef, ScheduleEntry};
use crate::shared::*;

fn at(minute: u32, map: MapId, x: i32, y: i32) -> ScheduleEntry {
    ScheduleEntry { minute, map, x, y }
}

fn prefs(entries: &[(&str, GiftPreference)]) -> HashMap<ItemId, GiftPreference> {
    entries
        .iter()
        .map(|(id, pref)| ((*id).to_string(), *pref))
        .collect()
}

/// Populate the NPC table with the three townsfolk, their daily routes,
/// gift tastes and greeting lines.
///
///   1. Mira: merchant, keeps the general store, strolls to the beach at dusk
///   2. Old Tom: retired fisherman, lives on the beach
///   3. Nora: farmer next door, checks on the player's field each morning
///
/// Schedule minutes are minutes since midnight (900 = 3:00 PM).
pub fn populate_npcs(catalog: &mut Catalog) {
    use GiftPreference::*;
    use MapId::*;

    let npcs = vec![
        NpcDef {
            id: "mira".into(),
            name: "Mira".into(),
            home: (Town, 8, 10),
            schedule: vec![
                at(540, Town, 8, 10),
                at(720, Town, 20, 16),
                at(900, Town, 30, 12),
                at(1080, Beach, 10, 8),
                at(1260, Town, 8, 10),
            ],
            gift_preferences: prefs(&[
                ("diamond", Loved),
                ("amethyst", Loved),
                ("cloth", Liked),
                ("wine", Liked),
                ("slime", Disliked),
                ("trash", Hated),
            ]),
            dialogue: vec![
                "Fresh stock came in this morning.".into(),
                "Seeds don't plant themselves, you know.".into(),
                "The sunset from the beach is worth the walk.".into(),
            ],
        },
        NpcDef {
            id: "old_tom".into(),
            name: "Old Tom".into(),
            home: (Beach, 20, 10),
            schedule: vec![
                at(360, Beach, 20, 10),
                at(720, Beach, 30, 10),
                at(1020, Town, 25, 18),
                at(1260, Beach, 20, 10),
            ],
            gift_preferences: prefs(&[
                ("tuna", Loved),
                ("catfish", Loved),
                ("beer", Liked),
                ("sardine", Liked),
                ("fiber", Disliked),
                ("pickles", Hated),
            ]),
            dialogue: vec![
                "Fish bite better in the rain.".into(),
                "Keep your line tight and your patience loose.".into(),
            ],
        },
        NpcDef {
            id: "nora".into(),
            name: "Nora".into(),
            home: (Town, 35, 25),
            schedule: vec![
                at(480, Farm, 25, 5),
                at(900, Town, 30, 25),
                at(1200, Town, 35, 25),
            ],
            gift_preferences: prefs(&[
                ("cauliflower", Loved),
                ("pumpkin", Loved),
                ("cheese", Liked),
                ("parsnip", Liked),
                ("coal", Disliked),
                ("bat_wing", Hated),
            ]),
            dialogue: vec![
                "Water every day, even when it looks like rain.".into(),
                "Parsnips are a fine first crop.".into(),
                "Winter's for mending fences and planning.".into(),
            ],
        },
    ];

    for npc in npcs {
        catalog.npcs.insert(npc.id.clone(), npc);
    }
}
