//! Shared types, errors, events, and constants for the simulation core.
//!
//! This is the type contract. Every domain module imports from here.
//! Domains talk to each other through `GameWorld` and these types only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Stormy,
    Snowy, // Winter only
}

impl Weather {
    /// Rain and storms water every outdoor tilled plot at the end of the day.
    pub fn waters_crops(self) -> bool {
        matches!(self, Weather::Rainy | Weather::Stormy)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER & TOOLS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Grid offset of the tile in front. y grows downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }

    /// Facing derived from the dominant axis of a displacement.
    /// Ties favour the horizontal axis.
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx.abs() >= dy.abs() {
            if dx >= 0.0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if dy >= 0.0 {
            Facing::Down
        } else {
            Facing::Up
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Axe,
    Pickaxe,
    FishingRod,
    Scythe,
    Sword,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Hoe,
        ToolKind::WateringCan,
        ToolKind::Axe,
        ToolKind::Pickaxe,
        ToolKind::FishingRod,
        ToolKind::Scythe,
        ToolKind::Sword,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ToolTier {
    #[default]
    Basic,
    Copper,
    Iron,
    Gold,
    Iridium,
}

impl ToolTier {
    /// Energy cost multiplier. Better tools use less energy.
    pub fn stamina_multiplier(&self) -> f32 {
        match self {
            ToolTier::Basic => 1.0,
            ToolTier::Copper => 0.85,
            ToolTier::Iron => 0.7,
            ToolTier::Gold => 0.55,
            ToolTier::Iridium => 0.4,
        }
    }

    /// Hit points removed from a resource node per swing.
    pub fn power(&self) -> u8 {
        match self {
            ToolTier::Basic => 1,
            ToolTier::Copper => 2,
            ToolTier::Iron => 3,
            ToolTier::Gold => 4,
            ToolTier::Iridium => 5,
        }
    }
}

/// The five proficiencies that scale costs, yields and damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillKind {
    Farming,
    Foraging,
    Mining,
    Fishing,
    Combat,
}

impl ToolKind {
    /// Skill whose level reduces this tool's energy cost.
    pub fn skill(self) -> SkillKind {
        match self {
            ToolKind::Hoe | ToolKind::WateringCan | ToolKind::Scythe => SkillKind::Farming,
            ToolKind::Axe => SkillKind::Foraging,
            ToolKind::Pickaxe => SkillKind::Mining,
            ToolKind::FishingRod => SkillKind::Fishing,
            ToolKind::Sword => SkillKind::Combat,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & MAPS
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// String ids keep the catalog data-driven.
pub type ItemId = String;
pub type NpcId = String;

/// Integer grid coordinate of a tile.
pub type GridPos = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MapId {
    Farm,
    Town,
    Beach,
    Forest,
    PlayerHouse,
    Mine,
}

impl MapId {
    pub fn is_outdoors(self) -> bool {
        matches!(self, MapId::Farm | MapId::Town | MapId::Beach | MapId::Forest)
    }
}

/// Euclidean distance between two positions in tile units.
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Centre of a grid tile in tile units.
pub fn tile_center(pos: GridPos) -> (f32, f32) {
    (pos.0 as f32, pos.1 as f32)
}

/// Tile containing a continuous position.
pub fn to_grid(pos: (f32, f32)) -> GridPos {
    (pos.0.round() as i32, pos.1.round() as i32)
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// A player action could not be applied. World state is unchanged whenever
/// one of these is returned; the caller decides how to surface it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("no plot at ({0}, {1})")]
    NoPlot(i32, i32),
    #[error("that ground can't be worked")]
    WrongTerrain,
    #[error("the soil is already tilled")]
    AlreadyTilled,
    #[error("something is in the way")]
    Occupied,
    #[error("the soil needs tilling first")]
    NotTilled,
    #[error("already watered today")]
    AlreadyWatered,
    #[error("nothing is growing here")]
    NoCrop,
    #[error("not ready to harvest yet")]
    NotMature,
    #[error("{crop} can't grow in {season:?}")]
    WrongSeason { crop: ItemId, season: Season },
    #[error("{0} is not a seed")]
    NotASeed(ItemId),
    #[error("unknown item {0}")]
    UnknownItem(ItemId),
    #[error("need {needed} {item}, have {have}")]
    InsufficientItems { item: ItemId, needed: u32, have: u32 },
    #[error("inventory is full")]
    InventoryFull,
    #[error("too far away")]
    OutOfRange,
    #[error("too tired")]
    InsufficientEnergy,
    #[error("not enough gold")]
    InsufficientGold,
    #[error("{0} isn't for sale")]
    NotForSale(ItemId),
    #[error("that can't be eaten")]
    NotEdible,
    #[error("the machine is busy")]
    MachineBusy,
    #[error("the machine can't process {0}")]
    NoRecipe(ItemId),
    #[error("that's not a machine")]
    NotAMachine,
    #[error("{0} can't be placed")]
    NotPlaceable(ItemId),
    #[error("nothing to collect")]
    NoJob,
    #[error("no water there")]
    NotWater,
    #[error("can't do that right now")]
    WrongPhase,
    #[error("nothing to hit")]
    NoTarget,
    #[error("unknown npc {0}")]
    UnknownNpc(NpcId),
    #[error("already did that today")]
    AlreadyToday,
    #[error("not in the mine")]
    NotInMine,
}

pub type ActionResult<T = ()> = Result<T, ActionError>;

// ═══════════════════════════════════════════════════════════════════════
// OUTBOUND EVENTS: drained by the host each frame
// ═══════════════════════════════════════════════════════════════════════

/// Things that happened inside the core that a presentation layer may want
/// to show or play a sound for. The core never reads these back.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    DayEnded { day: u8, season: Season, year: u32 },
    SeasonChanged { season: Season, year: u32 },
    PassedOut { gold_lost: u32 },
    CropHarvested { crop_id: ItemId, item_id: ItemId, quantity: u32, pos: GridPos },
    ItemPickedUp { item_id: ItemId, quantity: u32 },
    MachineReady { map: MapId, pos: GridPos, output: ItemId },
    FishCaught { fish_id: ItemId, treasure: bool },
    FishLost,
    MonsterKilled { kind: ItemId, experience: u32 },
    PlayerKnockedOut,
    SkillLevelUp { skill: SkillKind, level: u8 },
    Toast { message: String, duration_secs: f32 },
    Sfx(&'static str),
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_SEASON: u8 = 28;
pub const DAY_START_HOUR: f32 = 6.0;
/// 2:00 AM the next day. Reaching it forces the player to pass out.
pub const DAY_END_HOUR: f32 = 26.0;

pub const MAX_STACK_SIZE: u32 = 999;
pub const HOTBAR_SLOTS: usize = 12;
pub const BACKPACK_SLOTS: usize = 24;
pub const MAX_INVENTORY_SLOTS: usize = HOTBAR_SLOTS + BACKPACK_SLOTS;

pub const MAX_ENERGY: f32 = 270.0;
pub const MAX_HEALTH: f32 = 100.0;

pub const FRIENDSHIP_PER_HEART: i32 = 100;
pub const MAX_FRIENDSHIP: i32 = 1000;

/// How far (in tiles) the player can reach with a tool or hand.
pub const INTERACT_RANGE: f32 = 1.6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_next_wraps() {
        assert_eq!(Season::Spring.next(), Season::Summer);
        assert_eq!(Season::Winter.next(), Season::Spring);
    }

    #[test]
    fn test_facing_from_dominant_axis() {
        assert_eq!(Facing::from_delta(3.0, 1.0), Facing::Right);
        assert_eq!(Facing::from_delta(-3.0, 1.0), Facing::Left);
        assert_eq!(Facing::from_delta(0.5, -2.0), Facing::Up);
        assert_eq!(Facing::from_delta(0.0, 2.0), Facing::Down);
    }

    #[test]
    fn test_action_error_messages_are_readable() {
        let err = ActionError::WrongSeason { crop: "parsnip".into(), season: Season::Winter };
        assert_eq!(err.to_string(), "parsnip can't grow in Winter");
    }
}
