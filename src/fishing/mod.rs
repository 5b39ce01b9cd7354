//! Fishing domain.
//!
//! idle → casting → waiting → biting → reeling → caught | lost → idle
//!
//! Timed transitions (cast animation, bite wait, reaction window, result
//! display) are scheduled as timed tasks carrying the phase they expect and
//! the cast id; a task that no longer matches the live state does nothing.
//! Reeling runs the bar/fish physics in `minigame` once per tick.

pub mod cast;
pub mod fish_select;
pub mod minigame;
pub mod resolve;

use serde::{Deserialize, Serialize};

use crate::shared::*;

pub use cast::{on_timer, react_to_bite, reel, start_cast, step_fishing, stop_fishing};
pub use minigame::ReelState;

// ─── Fishing State ───────────────────────────────────────────────────────────

/// Phase of the fishing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FishingPhase {
    #[default]
    Idle,
    /// Line in the air.
    Casting,
    /// Bobber in the water, waiting for a bite.
    Waiting,
    /// Fish on the hook; the player must react within the window.
    Biting,
    /// The minigame is running.
    Reeling,
    Caught,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FishingState {
    pub phase: FishingPhase,
    /// Bumped on every cast so stale timed tasks can be told apart.
    pub cast_id: u32,
    pub bobber: Option<(MapId, GridPos)>,
    /// Chosen when the player reacts to a bite.
    pub fish: Option<ItemId>,
    /// Only present while reeling.
    pub reel: Option<ReelState>,
    /// A reel press waiting for the next physics step.
    pub pending_impulse: bool,
}

impl FishingState {
    pub fn is_active(&self) -> bool {
        self.phase != FishingPhase::Idle
    }

    /// Back to idle, keeping the cast counter.
    pub fn reset(&mut self) {
        *self = FishingState {
            cast_id: self.cast_id,
            ..Default::default()
        };
    }
}
