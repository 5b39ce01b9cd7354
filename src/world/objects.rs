//! Placed objects: everything that occupies a plot other than a crop.
//!
//! One tagged enum with a payload per variant. Tool interaction, blocking and
//! drops are all decided by matching on the variant.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::{ItemCategory, MachineKind};
use crate::inventory::Inventory;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneryKind {
    Weed,
    GrassTuft,
    Flowers,
    Boulder,
    Bush,
}

impl SceneryKind {
    /// Walkers pass straight through harmless scenery.
    pub fn is_harmless(self) -> bool {
        matches!(self, SceneryKind::Weed | SceneryKind::GrassTuft | SceneryKind::Flowers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Tree,
    Stump,
    Rock,
    CopperNode,
    IronNode,
    GoldNode,
    CoalNode,
}

impl NodeKind {
    pub fn tool(self) -> ToolKind {
        match self {
            NodeKind::Tree | NodeKind::Stump => ToolKind::Axe,
            _ => ToolKind::Pickaxe,
        }
    }

    pub fn base_hp(self) -> u8 {
        match self {
            NodeKind::Tree => 10,
            NodeKind::Stump => 5,
            NodeKind::Rock => 2,
            NodeKind::CopperNode | NodeKind::CoalNode => 4,
            NodeKind::IronNode => 6,
            NodeKind::GoldNode => 8,
        }
    }

    /// Item dropped when the node breaks, with a quantity range.
    pub fn drop(self) -> (&'static str, u32, u32) {
        match self {
            NodeKind::Tree => ("wood", 8, 12),
            NodeKind::Stump => ("hardwood", 2, 2),
            NodeKind::Rock => ("stone", 1, 3),
            NodeKind::CopperNode => ("copper_ore", 1, 3),
            NodeKind::IronNode => ("iron_ore", 1, 3),
            NodeKind::GoldNode => ("gold_ore", 1, 3),
            NodeKind::CoalNode => ("coal", 1, 2),
        }
    }

    pub fn skill(self) -> SkillKind {
        match self.tool() {
            ToolKind::Axe => SkillKind::Foraging,
            _ => SkillKind::Mining,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprinklerTier {
    Basic,
    Quality,
    Iridium,
}

impl SprinklerTier {
    pub fn item_id(self) -> &'static str {
        match self {
            SprinklerTier::Basic => "sprinkler",
            SprinklerTier::Quality => "quality_sprinkler",
            SprinklerTier::Iridium => "iridium_sprinkler",
        }
    }

    pub fn from_item_id(id: &str) -> Option<Self> {
        match id {
            "sprinkler" => Some(SprinklerTier::Basic),
            "quality_sprinkler" => Some(SprinklerTier::Quality),
            "iridium_sprinkler" => Some(SprinklerTier::Iridium),
            _ => None,
        }
    }

    /// Offsets watered each morning: 4 orthogonal, the 8-neighbourhood, or a
    /// 5×5 square minus the centre (24 tiles).
    pub fn offsets(self) -> Vec<(i32, i32)> {
        let radius = match self {
            SprinklerTier::Basic => {
                return vec![(0, -1), (1, 0), (0, 1), (-1, 0)];
            }
            SprinklerTier::Quality => 1,
            SprinklerTier::Iridium => 2,
        };
        let mut out = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if (dx, dy) != (0, 0) {
                    out.push((dx, dy));
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LadderDirection {
    Up,
    Down,
}

/// An in-progress machine conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingJob {
    pub input: ItemId,
    pub output: ItemId,
    pub quantity: u32,
    /// Absolute time-of-day (hours) on the current day's axis. May exceed 24
    /// or go negative across rollovers.
    pub ready_at: f32,
    /// Set by the periodic sweep once `ready_at` has passed.
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacedObject {
    Scenery { kind: SceneryKind },
    ResourceNode { kind: NodeKind, hp: u8 },
    Machine { kind: MachineKind, job: Option<ProcessingJob> },
    Sprinkler { tier: SprinklerTier },
    Bed,
    Ladder { direction: LadderDirection },
    Furniture { kind: ItemId },
    Chest { inventory: Inventory },
    /// Top-left tile of a 3×3 giant crop.
    GiantCrop { crop_id: ItemId, hp: u8 },
    /// The other eight tiles, pointing back at the anchor.
    GiantCropPart { anchor: GridPos },
}

pub const GIANT_CROP_HP: u8 = 3;
pub const CHEST_SLOTS: usize = 36;

impl PlacedObject {
    pub fn node(kind: NodeKind) -> Self {
        PlacedObject::ResourceNode { kind, hp: kind.base_hp() }
    }

    pub fn machine(kind: MachineKind) -> Self {
        PlacedObject::Machine { kind, job: None }
    }

    pub fn blocks_movement(&self) -> bool {
        match self {
            PlacedObject::Scenery { kind } => !kind.is_harmless(),
            PlacedObject::Ladder { .. } => false,
            PlacedObject::ResourceNode { .. }
            | PlacedObject::Machine { .. }
            | PlacedObject::Sprinkler { .. }
            | PlacedObject::Bed
            | PlacedObject::Furniture { .. }
            | PlacedObject::Chest { .. }
            | PlacedObject::GiantCrop { .. }
            | PlacedObject::GiantCropPart { .. } => true,
        }
    }

    /// Item returned to the player when the object is picked back up, if it
    /// can be.
    pub fn pickup_item(&self) -> Option<ItemId> {
        match self {
            PlacedObject::Machine { kind, job: None } => Some(kind.item_id().to_string()),
            PlacedObject::Sprinkler { tier } => Some(tier.item_id().to_string()),
            PlacedObject::Furniture { kind } => Some(kind.clone()),
            PlacedObject::Chest { inventory } if inventory.is_empty() => Some("chest".into()),
            _ => None,
        }
    }

    /// Object created by placing `item_id` from the inventory.
    pub fn from_item(item_id: &str, category: Option<ItemCategory>) -> Option<Self> {
        if let Some(kind) = MachineKind::from_item_id(item_id) {
            return Some(PlacedObject::machine(kind));
        }
        if let Some(tier) = SprinklerTier::from_item_id(item_id) {
            return Some(PlacedObject::Sprinkler { tier });
        }
        if item_id == "chest" {
            return Some(PlacedObject::Chest { inventory: Inventory::with_capacity(CHEST_SLOTS) });
        }
        match category {
            Some(ItemCategory::Furniture) => Some(PlacedObject::Furniture {
                kind: item_id.to_string(),
            }),
            _ => None,
        }
    }
}

/// Result of striking an object with a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    /// The swing did nothing to this object.
    Unaffected,
    /// Damaged but still standing.
    Damaged,
    /// Destroyed; the plot should be cleared and these items dropped.
    Broken { drops: Vec<(ItemId, u32)>, skill: Option<SkillKind> },
}

/// Apply one swing of `tool` at `tier`. Giant crops are handled by the farming
/// module because they span nine plots.
pub fn hit(object: &mut PlacedObject, tool: ToolKind, tier: ToolTier, rng: &mut impl Rng) -> HitOutcome {
    match object {
        PlacedObject::ResourceNode { kind, hp } => {
            if kind.tool() != tool {
                return HitOutcome::Unaffected;
            }
            *hp = hp.saturating_sub(tier.power());
            if *hp > 0 {
                return HitOutcome::Damaged;
            }
            let (item, min, max) = kind.drop();
            let mut drops = vec![(item.to_string(), rng.gen_range(min..=max))];
            if *kind == NodeKind::Tree && rng.gen_bool(0.25) {
                drops.push(("sap".to_string(), 1));
            }
            HitOutcome::Broken { drops, skill: Some(kind.skill()) }
        }
        PlacedObject::Scenery { kind } => match (*kind, tool) {
            (SceneryKind::Weed | SceneryKind::GrassTuft, ToolKind::Scythe | ToolKind::Hoe) => {
                let drops = if rng.gen_bool(0.5) {
                    vec![("fiber".to_string(), 1)]
                } else {
                    Vec::new()
                };
                HitOutcome::Broken { drops, skill: None }
            }
            (SceneryKind::Bush, ToolKind::Axe) => HitOutcome::Broken {
                drops: vec![("wood".to_string(), 2)],
                skill: Some(SkillKind::Foraging),
            },
            (SceneryKind::Boulder, ToolKind::Pickaxe) if tier >= ToolTier::Copper => HitOutcome::Broken {
                drops: vec![("stone".to_string(), 15)],
                skill: Some(SkillKind::Mining),
            },
            _ => HitOutcome::Unaffected,
        },
        _ => HitOutcome::Unaffected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sprinkler_patterns_have_expected_sizes() {
        assert_eq!(SprinklerTier::Basic.offsets().len(), 4);
        assert_eq!(SprinklerTier::Quality.offsets().len(), 8);
        assert_eq!(SprinklerTier::Iridium.offsets().len(), 24);
    }

    #[test]
    fn test_rock_breaks_after_hp_swings() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rock = PlacedObject::node(NodeKind::Rock);
        assert_eq!(hit(&mut rock, ToolKind::Pickaxe, ToolTier::Basic, &mut rng), HitOutcome::Damaged);
        match hit(&mut rock, ToolKind::Pickaxe, ToolTier::Basic, &mut rng) {
            HitOutcome::Broken { drops, skill } => {
                assert_eq!(drops[0].0, "stone");
                assert!((1..=3).contains(&drops[0].1));
                assert_eq!(skill, Some(SkillKind::Mining));
            }
            other => panic!("expected broken, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_tool_does_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tree = PlacedObject::node(NodeKind::Tree);
        assert_eq!(hit(&mut tree, ToolKind::Pickaxe, ToolTier::Iridium, &mut rng), HitOutcome::Unaffected);
        assert_eq!(tree, PlacedObject::node(NodeKind::Tree));
    }

    #[test]
    fn test_busy_machine_cannot_be_picked_up() {
        let busy = PlacedObject::Machine {
            kind: MachineKind::Keg,
            job: Some(ProcessingJob {
                input: "wheat".into(),
                output: "beer".into(),
                quantity: 1,
                ready_at: 10.0,
                ready: false,
            }),
        };
        assert_eq!(busy.pickup_item(), None);
        assert_eq!(PlacedObject::machine(MachineKind::Keg).pickup_item(), Some("keg".into()));
    }
}
