//! Per-map tile storage: terrain, soil state, crops and placed objects.

use serde::{Deserialize, Serialize};

use super::objects::PlacedObject;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grass,
    Dirt,
    Paved,
    Water,
    Floor,
    Sand,
}

impl Terrain {
    /// Soil that can hold tilled/watered/crop state.
    pub fn is_farmable(self) -> bool {
        matches!(self, Terrain::Grass | Terrain::Dirt | Terrain::Sand)
    }
}

/// A planted crop. Its watered state lives on the owning `Plot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub crop_id: ItemId,
    pub stage: u8,
    pub max_stage: u8,
    pub regrow_offset: Option<u8>,
}

impl Crop {
    pub fn is_mature(&self) -> bool {
        self.stage >= self.max_stage
    }
}

/// Persistent state of one grid tile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plot {
    pub terrain: Terrain,
    pub tilled: bool,
    pub watered: bool,
    pub crop: Option<Crop>,
    pub object: Option<PlacedObject>,
}

impl Plot {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            ..Default::default()
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.crop.is_some() || self.object.is_some()
    }
}

/// A building footprint. Every footprint tile blocks movement except the door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub door: GridPos,
}

impl Building {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Stepping onto `from` moves the player to `to` on `to_map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warp {
    pub from: GridPos,
    pub to_map: MapId,
    pub to: GridPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub id: MapId,
    pub width: i32,
    pub height: i32,
    /// Row-major: plots[y * width + x]
    pub plots: Vec<Plot>,
    pub buildings: Vec<Building>,
    pub warps: Vec<Warp>,
}

impl GameMap {
    pub fn new(id: MapId, width: i32, height: i32, terrain: Terrain) -> Self {
        Self {
            id,
            width,
            height,
            plots: vec![Plot::new(terrain); (width.max(0) * height.max(0)) as usize],
            buildings: Vec::new(),
            warps: Vec::new(),
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y * self.width + x) as usize)
    }

    pub fn plot(&self, x: i32, y: i32) -> Option<&Plot> {
        let i = self.index(x, y)?;
        self.plots.get(i)
    }

    pub fn plot_mut(&mut self, x: i32, y: i32) -> Option<&mut Plot> {
        let i = self.index(x, y)?;
        self.plots.get_mut(i)
    }

    pub fn terrain(&self, x: i32, y: i32) -> Option<Terrain> {
        self.plot(x, y).map(|p| p.terrain)
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, w: i32, h: i32, terrain: Terrain) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if let Some(p) = self.plot_mut(x, y) {
                    p.terrain = terrain;
                }
            }
        }
    }

    /// Grid position of each plot, in storage order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    pub fn building_at(&self, x: i32, y: i32) -> Option<&Building> {
        self.buildings.iter().find(|b| b.contains(x, y))
    }

    pub fn warp_at(&self, pos: GridPos) -> Option<&Warp> {
        self.warps.iter().find(|w| w.from == pos)
    }

    /// True when a walker can stand on the tile.
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        let Some(plot) = self.plot(x, y) else {
            return false;
        };
        if let Some(b) = self.building_at(x, y) {
            return b.door == (x, y);
        }
        if plot.terrain == Terrain::Water {
            return false;
        }
        plot.object.as_ref().map_or(true, |o| !o.blocks_movement())
    }

    /// Place an object, replacing nothing. Returns false if the tile is taken.
    pub fn place(&mut self, x: i32, y: i32, object: PlacedObject) -> bool {
        match self.plot_mut(x, y) {
            Some(p) if !p.is_occupied() => {
                p.object = Some(object);
                true
            }
            _ => false,
        }
    }
}
