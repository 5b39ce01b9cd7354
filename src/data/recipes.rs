use super::{Catalog, MachineKind, MachineRecipe, Recipe};

const FRUITS: &[&str] = &["strawberry", "melon", "blueberry", "cranberry"];
const VEGETABLES: &[&str] = &[
    "parsnip",
    "potato",
    "cauliflower",
    "tomato",
    "pumpkin",
    "eggplant",
    "corn",
];

fn machine(kind: MachineKind, inputs: &[(&str, u32)], output: &str, minutes: u32) -> MachineRecipe {
    MachineRecipe {
        machine: kind,
        inputs: inputs.iter().map(|(id, qty)| ((*id).to_string(), *qty)).collect(),
        output: output.into(),
        output_quantity: 1,
        minutes,
    }
}

fn craft(id: &str, ingredients: &[(&str, u32)], result: &str, result_quantity: u32) -> Recipe {
    Recipe {
        id: id.into(),
        ingredients: ingredients.iter().map(|(id, qty)| ((*id).to_string(), *qty)).collect(),
        result: result.into(),
        result_quantity,
    }
}

/// Populate machine conversions and hand-crafting recipes.
///
/// Machine durations are in game minutes; a keg of wine finishes overnight
/// and a preserves jar in under a day, so both routinely straddle rollover.
pub fn populate_recipes(catalog: &mut Catalog) {
    use MachineKind::*;

    // ── Furnace: ore + coal → bar ──────────────────────────────────────
    catalog.machine_recipes.extend([
        machine(Furnace, &[("copper_ore", 5), ("coal", 1)], "copper_bar", 30),
        machine(Furnace, &[("iron_ore", 5), ("coal", 1)], "iron_bar", 120),
        machine(Furnace, &[("gold_ore", 5), ("coal", 1)], "gold_bar", 300),
        machine(Furnace, &[("quartz", 1), ("coal", 1)], "refined_quartz", 90),
    ]);

    // ── Preserves jar & keg ────────────────────────────────────────────
    for fruit in FRUITS {
        catalog.machine_recipes.push(machine(PreservesJar, &[(fruit, 1)], "jelly", 4000));
        catalog.machine_recipes.push(machine(Keg, &[(fruit, 1)], "wine", 10_000));
    }
    for vegetable in VEGETABLES {
        catalog.machine_recipes.push(machine(PreservesJar, &[(vegetable, 1)], "pickles", 4000));
        catalog.machine_recipes.push(machine(Keg, &[(vegetable, 1)], "juice", 6000));
    }
    catalog.machine_recipes.push(machine(Keg, &[("wheat", 1)], "beer", 1750));

    // ── Animal products ────────────────────────────────────────────────
    catalog.machine_recipes.push(machine(CheesePress, &[("milk", 1)], "cheese", 200));
    catalog.machine_recipes.push(machine(Loom, &[("wool", 1)], "cloth", 240));

    // ── Hand crafting ──────────────────────────────────────────────────
    let recipes = vec![
        craft("recipe_chest", &[("wood", 50)], "chest", 1),
        craft("recipe_furnace", &[("copper_ore", 20), ("stone", 25)], "furnace", 1),
        craft(
            "recipe_preserves_jar",
            &[("wood", 50), ("stone", 40), ("coal", 8)],
            "preserves_jar",
            1,
        ),
        craft(
            "recipe_keg",
            &[("wood", 30), ("copper_bar", 1), ("iron_bar", 1)],
            "keg",
            1,
        ),
        craft(
            "recipe_cheese_press",
            &[("wood", 45), ("stone", 45), ("hardwood", 10), ("copper_bar", 1)],
            "cheese_press",
            1,
        ),
        craft("recipe_loom", &[("wood", 60), ("fiber", 30)], "loom", 1),
        craft("recipe_sprinkler", &[("copper_bar", 1), ("iron_bar", 1)], "sprinkler", 1),
        craft(
            "recipe_quality_sprinkler",
            &[("iron_bar", 1), ("gold_bar", 1), ("refined_quartz", 1)],
            "quality_sprinkler",
            1,
        ),
        craft(
            "recipe_iridium_sprinkler",
            &[("gold_bar", 2), ("diamond", 1)],
            "iridium_sprinkler",
            1,
        ),
        craft("recipe_wooden_chair", &[("wood", 10)], "wooden_chair", 1),
        craft("recipe_salad", &[("parsnip", 1), ("tomato", 1)], "salad", 1),
        craft("recipe_bread", &[("wheat", 3)], "bread", 1),
    ];

    for recipe in recipes {
        catalog.recipes.insert(recipe.id.clone(), recipe);
    }
}
