//! Farming domain: soil tilling, watering, planting, crop growth, harvest.
//!
//! Every operation takes the map explicitly. Unloaded maps are farmed exactly
//! like the one the player stands on; the nightly pass walks all of them.

pub mod crops;
pub mod giant;
pub mod harvest;
pub mod soil;
pub mod sprinklers;

pub use crops::{daily_advance, plant};
pub use harvest::harvest;
pub use soil::{till, water};
