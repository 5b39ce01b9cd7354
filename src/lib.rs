//! fieldtick: headless simulation core for a farming and life-simulation game.
//!
//! The whole simulation lives in one `GameWorld` resource that component
//! functions mutate by reference. `calendar::tick` advances it one fixed step;
//! `runtime::SimPlugin` runs that step on Bevy's `FixedUpdate`. The binary
//! (`main.rs`) is a headless runner; `tests/` drive the same modules without
//! a window or GPU.

pub mod animals;
pub mod calendar;
pub mod config;
pub mod crafting;
pub mod data;
pub mod farming;
pub mod fishing;
pub mod inventory;
pub mod mining;
pub mod npcs;
pub mod pathfinding;
pub mod player;
pub mod runtime;
pub mod save;
pub mod shared;
pub mod world;
