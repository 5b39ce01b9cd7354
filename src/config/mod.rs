//! Tuning knobs for the simulation, loadable from RON.
//!
//! Every field has a default so a config file only needs to list the values
//! it overrides.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate.
    pub tick_hz: f64,
    /// In-game minutes that pass per tick. 0.5 at 20 Hz = 10 game-minutes per
    /// real second, so one game day (6:00 → 2:00) takes two real minutes.
    pub game_minutes_per_tick: f32,
    /// Seed for the world's random number generator.
    pub seed: u64,
    /// NPC walking speed in tiles per tick.
    pub npc_speed: f32,
    /// Interval between machine readiness sweeps, in game minutes.
    pub machine_sweep_minutes: f32,
    /// Daily chance a 3×3 block of matured eligible crops turns giant.
    pub giant_crop_chance: f64,
    /// Radius (tiles) inside which world drops drift toward the player.
    pub magnet_radius: f32,
    /// Drop drift speed in tiles per tick.
    pub magnet_speed: f32,
    /// Upper bound on A* node expansions per request.
    pub path_iteration_cap: usize,
    /// Fishing progress gained per second while the fish is inside the bar.
    pub reel_progress_gain: f32,
    /// Fishing progress lost per second while the fish is outside the bar.
    pub reel_progress_loss: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            game_minutes_per_tick: 0.5,
            seed: 0x5EED_F1E1D,
            npc_speed: 0.125,
            machine_sweep_minutes: 10.0,
            giant_crop_chance: 0.01,
            magnet_radius: 2.0,
            magnet_speed: 0.25,
            path_iteration_cap: 4_000,
            reel_progress_gain: 20.0,
            reel_progress_loss: 25.0,
        }
    }
}

impl SimConfig {
    /// Parse a config from RON text. Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Seconds of wall time a tick represents.
    pub fn tick_secs(&self) -> f32 {
        if self.tick_hz > 0.0 {
            (1.0 / self.tick_hz) as f32
        } else {
            warn!("[Config] tick_hz must be positive; falling back to 20 Hz");
            0.05
        }
    }

    /// Hours of game time a tick represents.
    pub fn tick_hours(&self) -> f32 {
        self.game_minutes_per_tick / 60.0
    }

    /// Ticks needed to cover `secs` of wall time, at least one.
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        ((secs / self.tick_secs()).ceil() as u64).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_give_two_minute_days() {
        let cfg = SimConfig::default();
        let ticks_per_day = (20.0 / cfg.tick_hours()).round() as u32;
        assert_eq!(ticks_per_day, 2400);
        assert_eq!(ticks_per_day as f64 / cfg.tick_hz, 120.0);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let cfg = SimConfig::from_ron_str("(tick_hz: 10.0, seed: 7)").unwrap();
        assert_eq!(cfg.tick_hz, 10.0);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.npc_speed, SimConfig::default().npc_speed);
    }

    #[test]
    fn test_bad_ron_is_an_error() {
        assert!(SimConfig::from_ron_str("(tick_hz: \"fast\")").is_err());
    }

    #[test]
    fn test_ticks_for_secs_rounds_up() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.ticks_for_secs(1.0), 20);
        assert_eq!(cfg.ticks_for_secs(0.01), 1);
    }
}
