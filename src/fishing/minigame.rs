//! Fishing minigame mechanics.
//!
//! The minigame is a vertical skill challenge on a 0-100 track:
//!
//!  ┌──────────────┐
//!  │  [  fish  ]  │  ← fish position: drifts toward re-picked targets
//!  │              │
//!  │  [ catch  ]  │  ← catch bar: gravity pulls it down, reel presses kick it up
//!  └──────────────┘
//!  [████░░░░░░░░░░]  ← progress: 0% lost, 100% caught
//!
//! Progress fills while the fish is inside the bar and drains faster than it
//! fills otherwise, so a player who does nothing loses the fish.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::FishBehavior;

// ─── Tuning constants ─────────────────────────────────────────────────────────

pub const TRACK_MAX: f32 = 100.0;
/// Half the height of the catch bar.
pub const BAR_HALF: f32 = 12.0;
/// Downward acceleration on the bar (units/s²).
const BAR_GRAVITY: f32 = 120.0;
/// Upward velocity added by one reel press (units/s).
const REEL_IMPULSE: f32 = 45.0;
/// Progress the minigame starts at.
pub const START_PROGRESS: f32 = 30.0;

/// Fish speed at difficulty 0 and 100 (units/s).
const FISH_MIN_SPEED: f32 = 20.0;
const FISH_MAX_SPEED: f32 = 90.0;

/// Treasure sub-track fill rate while inside the bar (% per second).
const TREASURE_FILL_RATE: f32 = 35.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasureTrack {
    pub pos: f32,
    pub progress: f32,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelState {
    pub difficulty: f32,
    pub behavior: FishBehavior,
    pub fish_pos: f32,
    pub fish_target: f32,
    /// Seconds until the fish picks a new target.
    pub retarget_in: f32,
    pub bar_pos: f32,
    pub bar_vel: f32,
    pub progress: f32,
    pub treasure: Option<TreasureTrack>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelOutcome {
    Continue,
    Caught,
    Lost,
}

impl ReelState {
    pub fn new(difficulty: f32, behavior: FishBehavior, treasure_pos: Option<f32>) -> Self {
        Self {
            difficulty: difficulty.clamp(0.0, 100.0),
            behavior,
            fish_pos: TRACK_MAX / 2.0,
            fish_target: TRACK_MAX / 2.0,
            retarget_in: 0.0,
            bar_pos: BAR_HALF,
            bar_vel: 0.0,
            progress: START_PROGRESS,
            treasure: treasure_pos.map(|pos| TreasureTrack {
                pos: pos.clamp(0.0, TRACK_MAX),
                progress: 0.0,
                collected: false,
            }),
        }
    }

    pub fn fish_in_bar(&self) -> bool {
        (self.fish_pos - self.bar_pos).abs() <= BAR_HALF
    }

    pub fn treasure_collected(&self) -> bool {
        self.treasure.as_ref().is_some_and(|t| t.collected)
    }
}

/// How far a new target may be from the fish and how long until the next
/// re-pick, for this behavior at difficulty `d` (0..1).
fn behavior_profile(behavior: FishBehavior, d: f32, rng: &mut impl Rng) -> (f32, f32, f32) {
    // (amplitude, interval seconds, bias toward top (+) or bottom (-))
    match behavior {
        FishBehavior::Smooth => (10.0 + 25.0 * d, 1.6 - 0.6 * d, 0.0),
        FishBehavior::Dart => (30.0 + 50.0 * d, 0.9 - 0.5 * d, 0.0),
        FishBehavior::Sinker => (15.0 + 30.0 * d, 1.2 - 0.5 * d, -15.0),
        FishBehavior::Floater => (15.0 + 30.0 * d, 1.2 - 0.5 * d, 15.0),
        FishBehavior::Mixed => {
            if rng.gen_bool(0.5) {
                behavior_profile(FishBehavior::Smooth, d, rng)
            } else {
                behavior_profile(FishBehavior::Dart, d, rng)
            }
        }
    }
}

fn move_fish(reel: &mut ReelState, dt: f32, rng: &mut impl Rng) {
    let d = reel.difficulty / 100.0;
    reel.retarget_in -= dt;
    if reel.retarget_in <= 0.0 {
        let (amplitude, interval, bias) = behavior_profile(reel.behavior, d, rng);
        let offset = rng.gen_range(-amplitude..=amplitude) + bias;
        reel.fish_target = (reel.fish_pos + offset).clamp(0.0, TRACK_MAX);
        reel.retarget_in = interval.max(0.2) * rng.gen_range(0.75..=1.25);
    }
    let speed = FISH_MIN_SPEED + d * (FISH_MAX_SPEED - FISH_MIN_SPEED);
    let delta = reel.fish_target - reel.fish_pos;
    let step = (speed * dt).min(delta.abs());
    reel.fish_pos = (reel.fish_pos + step * delta.signum()).clamp(0.0, TRACK_MAX);
}

fn move_bar(reel: &mut ReelState, impulse: bool, dt: f32) {
    reel.bar_vel -= BAR_GRAVITY * dt;
    if impulse {
        reel.bar_vel += REEL_IMPULSE;
    }
    reel.bar_pos += reel.bar_vel * dt;
    if reel.bar_pos <= BAR_HALF {
        reel.bar_pos = BAR_HALF;
        reel.bar_vel = 0.0;
    } else if reel.bar_pos >= TRACK_MAX - BAR_HALF {
        reel.bar_pos = TRACK_MAX - BAR_HALF;
        reel.bar_vel = 0.0;
    }
}

/// Progress only: fill while the fish is inside the bar, drain otherwise.
pub fn update_progress(reel: &mut ReelState, dt: f32, gain: f32, loss: f32) -> ReelOutcome {
    if reel.fish_in_bar() {
        reel.progress = (reel.progress + gain * dt).min(TRACK_MAX);
    } else {
        reel.progress = (reel.progress - loss * dt).max(0.0);
    }

    let bar_pos = reel.bar_pos;
    if let Some(treasure) = reel.treasure.as_mut().filter(|t| !t.collected) {
        if (treasure.pos - bar_pos).abs() <= BAR_HALF {
            treasure.progress = (treasure.progress + TREASURE_FILL_RATE * dt).min(TRACK_MAX);
            treasure.collected = treasure.progress >= TRACK_MAX;
        }
    }

    if reel.progress >= TRACK_MAX {
        ReelOutcome::Caught
    } else if reel.progress <= 0.0 {
        ReelOutcome::Lost
    } else {
        ReelOutcome::Continue
    }
}

/// One physics step: fish drift, bar motion, then progress.
pub fn step_reel(
    reel: &mut ReelState,
    impulse: bool,
    dt: f32,
    gain: f32,
    loss: f32,
    rng: &mut impl Rng,
) -> ReelOutcome {
    move_fish(reel, dt, rng);
    move_bar(reel, impulse, dt);
    update_progress(reel, dt, gain, loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 0.05;

    #[test]
    fn test_never_overlapping_strictly_loses() {
        let mut reel = ReelState::new(50.0, FishBehavior::Dart, None);
        let mut last = reel.progress;
        let mut ticks = 0;
        loop {
            move_bar(&mut reel, false, DT);
            reel.fish_pos = if reel.bar_pos > TRACK_MAX / 2.0 { 0.0 } else { TRACK_MAX };
            let outcome = update_progress(&mut reel, DT, 20.0, 25.0);
            assert!(reel.progress < last);
            last = reel.progress;
            ticks += 1;
            if outcome != ReelOutcome::Continue {
                assert_eq!(outcome, ReelOutcome::Lost);
                break;
            }
            assert!(ticks < 1_000);
        }
    }

    #[test]
    fn test_perfect_alignment_strictly_catches() {
        let mut reel = ReelState::new(90.0, FishBehavior::Mixed, None);
        let mut last = reel.progress;
        loop {
            reel.fish_pos = reel.bar_pos;
            let outcome = update_progress(&mut reel, DT, 20.0, 25.0);
            assert!(reel.progress > last);
            last = reel.progress;
            if outcome != ReelOutcome::Continue {
                assert_eq!(outcome, ReelOutcome::Caught);
                break;
            }
        }
    }

    #[test]
    fn test_idle_player_loses_on_full_physics() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut reel = ReelState::new(60.0, FishBehavior::Floater, None);
        let mut outcome = ReelOutcome::Continue;
        for _ in 0..2_000 {
            outcome = step_reel(&mut reel, false, DT, 20.0, 25.0, &mut rng);
            if outcome != ReelOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, ReelOutcome::Lost);
    }

    #[test]
    fn test_bar_clamps_with_zero_velocity() {
        let mut reel = ReelState::new(10.0, FishBehavior::Smooth, None);
        for _ in 0..100 {
            move_bar(&mut reel, true, DT);
        }
        assert_eq!(reel.bar_pos, TRACK_MAX - BAR_HALF);
        assert_eq!(reel.bar_vel, 0.0);
        for _ in 0..100 {
            move_bar(&mut reel, false, DT);
        }
        assert_eq!(reel.bar_pos, BAR_HALF);
        assert_eq!(reel.bar_vel, 0.0);
    }

    #[test]
    fn test_treasure_fills_inside_bar() {
        let mut reel = ReelState::new(10.0, FishBehavior::Smooth, Some(BAR_HALF));
        for _ in 0..60 {
            reel.fish_pos = reel.bar_pos;
            update_progress(&mut reel, DT, 20.0, 25.0);
        }
        assert!(reel.treasure_collected());
    }
}
