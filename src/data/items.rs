use super::{Catalog, ItemCategory, ItemDef};
use crate::shared::*;

fn def(
    id: &str,
    name: &str,
    category: ItemCategory,
    sell_price: u32,
    buy_price: Option<u32>,
    energy: Option<f32>,
    seasons: &[Season],
) -> ItemDef {
    ItemDef {
        id: id.into(),
        name: name.into(),
        category,
        sell_price,
        buy_price,
        energy,
        seasons: seasons.to_vec(),
    }
}

/// Populate the item table.
///
/// Seeds are sold at the general store; everything else is found, grown,
/// crafted or caught. Crops and fish are edible raw for modest energy.
pub fn populate_items(catalog: &mut Catalog) {
    use ItemCategory::*;
    use Season::*;

    let items = vec![
        // ── Seeds ──────────────────────────────────────────────────────────
        def("parsnip_seeds", "Parsnip Seeds", Seed, 10, Some(20), None, &[Spring]),
        def("potato_seeds", "Potato Seeds", Seed, 25, Some(50), None, &[Spring]),
        def("cauliflower_seeds", "Cauliflower Seeds", Seed, 40, Some(80), None, &[Spring]),
        def("strawberry_seeds", "Strawberry Seeds", Seed, 50, Some(100), None, &[Spring]),
        def("melon_seeds", "Melon Seeds", Seed, 40, Some(80), None, &[Summer]),
        def("tomato_seeds", "Tomato Seeds", Seed, 25, Some(50), None, &[Summer]),
        def("blueberry_seeds", "Blueberry Seeds", Seed, 40, Some(80), None, &[Summer]),
        def("corn_seeds", "Corn Seeds", Seed, 75, Some(150), None, &[Summer, Fall]),
        def("pumpkin_seeds", "Pumpkin Seeds", Seed, 50, Some(100), None, &[Fall]),
        def("cranberry_seeds", "Cranberry Seeds", Seed, 120, Some(240), None, &[Fall]),
        def("eggplant_seeds", "Eggplant Seeds", Seed, 10, Some(20), None, &[Fall]),
        def("wheat_seeds", "Wheat Seeds", Seed, 5, Some(10), None, &[Summer, Fall]),
        // ── Crops ──────────────────────────────────────────────────────────
        def("parsnip", "Parsnip", Crop, 35, None, Some(25.0), &[Spring]),
        def("potato", "Potato", Crop, 80, None, Some(25.0), &[Spring]),
        def("cauliflower", "Cauliflower", Crop, 175, None, Some(75.0), &[Spring]),
        def("strawberry", "Strawberry", Crop, 120, None, Some(50.0), &[Spring]),
        def("melon", "Melon", Crop, 250, None, Some(113.0), &[Summer]),
        def("tomato", "Tomato", Crop, 60, None, Some(20.0), &[Summer]),
        def("blueberry", "Blueberry", Crop, 50, None, Some(25.0), &[Summer]),
        def("corn", "Corn", Crop, 50, None, Some(25.0), &[Summer, Fall]),
        def("pumpkin", "Pumpkin", Crop, 320, None, None, &[Fall]),
        def("cranberry", "Cranberries", Crop, 75, None, Some(38.0), &[Fall]),
        def("eggplant", "Eggplant", Crop, 60, None, Some(20.0), &[Fall]),
        def("wheat", "Wheat", Crop, 25, None, None, &[Summer, Fall]),
        // ── Artisan goods ──────────────────────────────────────────────────
        def("copper_bar", "Copper Bar", ArtisanGood, 60, None, None, &[]),
        def("iron_bar", "Iron Bar", ArtisanGood, 120, None, None, &[]),
        def("gold_bar", "Gold Bar", ArtisanGood, 250, None, None, &[]),
        def("refined_quartz", "Refined Quartz", ArtisanGood, 50, None, None, &[]),
        def("pickles", "Pickles", ArtisanGood, 100, None, Some(50.0), &[]),
        def("jelly", "Jelly", ArtisanGood, 160, None, Some(50.0), &[]),
        def("wine", "Wine", ArtisanGood, 300, None, Some(35.0), &[]),
        def("juice", "Juice", ArtisanGood, 150, None, Some(60.0), &[]),
        def("beer", "Beer", ArtisanGood, 200, None, Some(40.0), &[]),
        def("cheese", "Cheese", ArtisanGood, 230, None, Some(125.0), &[]),
        def("cloth", "Cloth", ArtisanGood, 470, None, None, &[]),
        // ── Animal products ────────────────────────────────────────────────
        def("egg", "Egg", Resource, 50, None, Some(25.0), &[]),
        def("milk", "Milk", Resource, 125, None, Some(38.0), &[]),
        def("wool", "Wool", Resource, 340, None, None, &[]),
        // ── Resources & minerals ───────────────────────────────────────────
        def("wood", "Wood", Resource, 2, Some(10), None, &[]),
        def("hardwood", "Hardwood", Resource, 15, None, None, &[]),
        def("stone", "Stone", Resource, 2, Some(20), None, &[]),
        def("fiber", "Fiber", Resource, 1, None, None, &[]),
        def("sap", "Sap", Resource, 2, None, None, &[]),
        def("coal", "Coal", Mineral, 15, Some(150), None, &[]),
        def("copper_ore", "Copper Ore", Mineral, 5, Some(75), None, &[]),
        def("iron_ore", "Iron Ore", Mineral, 10, Some(150), None, &[]),
        def("gold_ore", "Gold Ore", Mineral, 25, Some(400), None, &[]),
        def("quartz", "Quartz", Mineral, 25, None, None, &[]),
        def("amethyst", "Amethyst", Mineral, 100, None, None, &[]),
        def("diamond", "Diamond", Mineral, 750, None, None, &[]),
        // ── Fish ───────────────────────────────────────────────────────────
        def("sardine", "Sardine", Fish, 40, None, Some(13.0), &[]),
        def("anchovy", "Anchovy", Fish, 30, None, Some(13.0), &[]),
        def("tuna", "Tuna", Fish, 100, None, Some(25.0), &[]),
        def("bass", "Bass", Fish, 100, None, Some(20.0), &[]),
        def("trout", "Rainbow Trout", Fish, 65, None, Some(25.0), &[]),
        def("catfish", "Catfish", Fish, 200, None, Some(50.0), &[]),
        def("pike", "Pike", Fish, 100, None, Some(38.0), &[]),
        def("carp", "Carp", Fish, 30, None, Some(13.0), &[]),
        def("sunfish", "Sunfish", Fish, 30, None, Some(13.0), &[]),
        def("cave_fish", "Ghostfish", Fish, 45, None, Some(38.0), &[]),
        def("trash", "Trash", Special, 0, None, None, &[]),
        // ── Monster loot ───────────────────────────────────────────────────
        def("slime", "Slime", Monster, 5, None, None, &[]),
        def("bat_wing", "Bat Wing", Monster, 15, None, None, &[]),
        def("bug_meat", "Bug Meat", Monster, 8, None, None, &[]),
        // ── Food ───────────────────────────────────────────────────────────
        def("salad", "Salad", Food, 110, Some(220), Some(113.0), &[]),
        def("bread", "Bread", Food, 60, Some(120), Some(50.0), &[]),
        // ── Machines & placeables ──────────────────────────────────────────
        def("furnace", "Furnace", Machine, 0, None, None, &[]),
        def("preserves_jar", "Preserves Jar", Machine, 0, None, None, &[]),
        def("keg", "Keg", Machine, 0, None, None, &[]),
        def("cheese_press", "Cheese Press", Machine, 0, None, None, &[]),
        def("loom", "Loom", Machine, 0, None, None, &[]),
        def("sprinkler", "Sprinkler", Machine, 0, None, None, &[]),
        def("quality_sprinkler", "Quality Sprinkler", Machine, 0, None, None, &[]),
        def("iridium_sprinkler", "Iridium Sprinkler", Machine, 0, None, None, &[]),
        def("chest", "Chest", Furniture, 0, None, None, &[]),
        def("wooden_chair", "Wooden Chair", Furniture, 0, Some(350), None, &[]),
    ];

    for item in items {
        catalog.items.insert(item.id.clone(), item);
    }
}
