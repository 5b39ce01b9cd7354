//! Production machines and placeable objects.
//!
//! Hand crafting from the inventory lives in `inventory::trade`.

pub mod machines;

pub use machines::{collect, day_adjust, feed, pick_up, place_object};
