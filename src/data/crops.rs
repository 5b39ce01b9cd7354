use super::{Catalog, CropDef, ExtraYield};
use crate::shared::*;

/// Populate the crop table.
///
/// One growth stage passes per watered day, so `growth_stages` is also the
/// number of watered days to maturity:
///   Spring: parsnip (4), potato (6), cauliflower (12), strawberry (8, regrows 4)
///   Summer: melon (12), tomato (11, regrows 4), blueberry (13, regrows 4)
///   Fall:   pumpkin (13), cranberry (7, regrows 5), eggplant (5, regrows 5)
///   Multi:  corn (14, regrows 4), wheat (4)
///
/// Cauliflower, melon and pumpkin can merge into giant crops.
pub fn populate_crops(catalog: &mut Catalog) {
    use Season::*;

    let crops: Vec<CropDef> = vec![
        // ── Spring ─────────────────────────────────────────────────────────
        CropDef {
            id: "parsnip".into(),
            seed_id: "parsnip_seeds".into(),
            harvest_id: "parsnip".into(),
            seasons: vec![Spring],
            growth_stages: 4,
            regrow_offset: None,
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: None,
            giant_eligible: false,
        },
        CropDef {
            id: "potato".into(),
            seed_id: "potato_seeds".into(),
            harvest_id: "potato".into(),
            seasons: vec![Spring],
            growth_stages: 6,
            regrow_offset: None,
            min_harvest: 1,
            max_harvest: 1,
            // Potatoes are known for coming up in clumps.
            extra_yield: Some(ExtraYield { chance: 0.2, max_extra: 3 }),
            giant_eligible: false,
        },
        CropDef {
            id: "cauliflower".into(),
            seed_id: "cauliflower_seeds".into(),
            harvest_id: "cauliflower".into(),
            seasons: vec![Spring],
            growth_stages: 12,
            regrow_offset: None,
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: None,
            giant_eligible: true,
        },
        CropDef {
            id: "strawberry".into(),
            seed_id: "strawberry_seeds".into(),
            harvest_id: "strawberry".into(),
            seasons: vec![Spring],
            growth_stages: 8,
            regrow_offset: Some(4),
            min_harvest: 1,
            max_harvest: 2,
            extra_yield: Some(ExtraYield { chance: 0.02, max_extra: 1 }),
            giant_eligible: false,
        },
        // ── Summer ─────────────────────────────────────────────────────────
        CropDef {
            id: "melon".into(),
            seed_id: "melon_seeds".into(),
            harvest_id: "melon".into(),
            seasons: vec![Summer],
            growth_stages: 12,
            regrow_offset: None,
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: None,
            giant_eligible: true,
        },
        CropDef {
            id: "tomato".into(),
            seed_id: "tomato_seeds".into(),
            harvest_id: "tomato".into(),
            seasons: vec![Summer],
            growth_stages: 11,
            regrow_offset: Some(4),
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: Some(ExtraYield { chance: 0.05, max_extra: 1 }),
            giant_eligible: false,
        },
        CropDef {
            id: "blueberry".into(),
            seed_id: "blueberry_seeds".into(),
            harvest_id: "blueberry".into(),
            seasons: vec![Summer],
            growth_stages: 13,
            regrow_offset: Some(4),
            min_harvest: 3,
            max_harvest: 3,
            extra_yield: Some(ExtraYield { chance: 0.02, max_extra: 1 }),
            giant_eligible: false,
        },
        // ── Fall ───────────────────────────────────────────────────────────
        CropDef {
            id: "pumpkin".into(),
            seed_id: "pumpkin_seeds".into(),
            harvest_id: "pumpkin".into(),
            seasons: vec![Fall],
            growth_stages: 13,
            regrow_offset: None,
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: None,
            giant_eligible: true,
        },
        CropDef {
            id: "cranberry".into(),
            seed_id: "cranberry_seeds".into(),
            harvest_id: "cranberry".into(),
            seasons: vec![Fall],
            growth_stages: 7,
            regrow_offset: Some(5),
            min_harvest: 2,
            max_harvest: 2,
            extra_yield: Some(ExtraYield { chance: 0.1, max_extra: 1 }),
            giant_eligible: false,
        },
        CropDef {
            id: "eggplant".into(),
            seed_id: "eggplant_seeds".into(),
            harvest_id: "eggplant".into(),
            seasons: vec![Fall],
            growth_stages: 5,
            regrow_offset: Some(5),
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: Some(ExtraYield { chance: 0.002, max_extra: 1 }),
            giant_eligible: false,
        },
        // ── Multi-season ───────────────────────────────────────────────────
        CropDef {
            id: "corn".into(),
            seed_id: "corn_seeds".into(),
            harvest_id: "corn".into(),
            seasons: vec![Summer, Fall],
            growth_stages: 14,
            regrow_offset: Some(4),
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: None,
            giant_eligible: false,
        },
        CropDef {
            id: "wheat".into(),
            seed_id: "wheat_seeds".into(),
            harvest_id: "wheat".into(),
            seasons: vec![Summer, Fall],
            growth_stages: 4,
            regrow_offset: None,
            min_harvest: 1,
            max_harvest: 1,
            extra_yield: None,
            giant_eligible: false,
        },
    ];

    for crop in crops {
        catalog.crops.insert(crop.id.clone(), crop);
    }
}
