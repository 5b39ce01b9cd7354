use super::{Catalog, FishBehavior, FishDef, FishLocation};
use crate::shared::*;

/// Populate the fish table.
///
///   - location: which body of water the fish lives in
///   - time_range: hours, end exclusive (6.0 = 6AM, 26.0 = 2AM)
///   - weather: Some(w) = only bites in that weather
///   - difficulty: 0 trivial … 100 legendary; scales fish speed and xp
///   - weight: relative odds among the fish eligible at that moment
///
/// When nothing is eligible the line comes up with `trash`.
pub fn populate_fish(catalog: &mut Catalog) {
    use FishBehavior::*;
    use FishLocation::*;
    use Season::*;

    let fish: Vec<FishDef> = vec![
        // ── Ocean ──────────────────────────────────────────────────────────
        FishDef {
            id: "sardine".into(),
            location: Ocean,
            seasons: vec![Spring, Fall, Winter],
            time_range: (6.0, 19.0),
            weather: None,
            difficulty: 30.0,
            behavior: Dart,
            weight: 40,
        },
        FishDef {
            id: "anchovy".into(),
            location: Ocean,
            seasons: vec![Spring, Fall],
            time_range: (6.0, 26.0),
            weather: None,
            difficulty: 30.0,
            behavior: Dart,
            weight: 40,
        },
        FishDef {
            id: "tuna".into(),
            location: Ocean,
            seasons: vec![Summer, Winter],
            time_range: (6.0, 19.0),
            weather: None,
            difficulty: 70.0,
            behavior: Smooth,
            weight: 10,
        },
        // ── River ──────────────────────────────────────────────────────────
        FishDef {
            id: "bass".into(),
            location: River,
            seasons: vec![Spring, Summer, Fall],
            time_range: (6.0, 19.0),
            weather: None,
            difficulty: 45.0,
            behavior: Mixed,
            weight: 30,
        },
        FishDef {
            id: "trout".into(),
            location: River,
            seasons: vec![Summer],
            time_range: (6.0, 19.0),
            weather: Some(Weather::Sunny),
            difficulty: 45.0,
            behavior: Mixed,
            weight: 20,
        },
        FishDef {
            id: "catfish".into(),
            location: River,
            seasons: vec![Spring, Fall],
            time_range: (6.0, 24.0),
            weather: Some(Weather::Rainy),
            difficulty: 75.0,
            behavior: Mixed,
            weight: 8,
        },
        FishDef {
            id: "pike".into(),
            location: River,
            seasons: vec![Summer, Winter],
            time_range: (6.0, 26.0),
            weather: None,
            difficulty: 60.0,
            behavior: Dart,
            weight: 12,
        },
        // ── Pond ───────────────────────────────────────────────────────────
        FishDef {
            id: "carp".into(),
            location: Pond,
            seasons: vec![Spring, Summer, Fall],
            time_range: (6.0, 26.0),
            weather: None,
            difficulty: 15.0,
            behavior: Mixed,
            weight: 40,
        },
        FishDef {
            id: "sunfish".into(),
            location: Pond,
            seasons: vec![Spring, Summer],
            time_range: (6.0, 19.0),
            weather: Some(Weather::Sunny),
            difficulty: 30.0,
            behavior: Mixed,
            weight: 30,
        },
        // ── Mine pools ─────────────────────────────────────────────────────
        FishDef {
            id: "cave_fish".into(),
            location: MinePool,
            seasons: Vec::new(),
            time_range: (6.0, 26.0),
            weather: None,
            difficulty: 50.0,
            behavior: Sinker,
            weight: 30,
        },
    ];

    for f in fish {
        catalog.fish.insert(f.id.clone(), f);
    }
}
