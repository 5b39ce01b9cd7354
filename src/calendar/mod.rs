//! Calendar domain, the heartbeat of the simulation.
//!
//! Responsible for:
//! - Advancing game time once per fixed tick
//! - Running due timed tasks and the per-tick steps of every component
//! - Day rollover: crops, machines, calendar, weather, daily resets
//! - Sleeping, and passing out at 2 AM
//!
//! A day spans 6:00 → 26:00 (2:00 AM next day) = 20 game-hours. At the
//! default 0.5 game-minutes per tick and 20 Hz that is two real minutes.

pub mod festivals;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::crafting::machines;
use crate::farming::{self, giant, sprinklers};
use crate::shared::*;
use crate::world::drops;
use crate::world::maps::BED_POS;
use crate::world::{GameWorld, TaskAction};
use crate::{animals, fishing, mining, npcs};
use festivals::festival_for_date;

// ─── World time ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldTime {
    /// 1..=DAYS_PER_SEASON.
    pub day: u8,
    pub season: Season,
    pub year: u32,
    /// Hours since midnight of the current day; runs 6.0 → 26.0. Always
    /// derived from `ticks_today`.
    pub time_of_day: f32,
    /// Whole ticks since this day started.
    #[serde(default)]
    pub ticks_today: u32,
    pub weather: Weather,
}

impl Default for WorldTime {
    fn default() -> Self {
        Self {
            day: 1,
            season: Season::Spring,
            year: 1,
            time_of_day: DAY_START_HOUR,
            ticks_today: 0,
            weather: Weather::Sunny,
        }
    }
}

impl WorldTime {
    /// Recompute `time_of_day` from the tick counter.
    pub fn sync_clock(&mut self, minutes_per_tick: f32) {
        let hours = f64::from(self.ticks_today) * f64::from(minutes_per_tick) / 60.0;
        self.time_of_day = DAY_START_HOUR + hours as f32;
    }

    /// Move the clock to the tick nearest `hour`.
    pub fn set_hour(&mut self, hour: f32, minutes_per_tick: f32) {
        let ticks = (f64::from(hour - DAY_START_HOUR) * 60.0 / f64::from(minutes_per_tick)).round();
        self.ticks_today = ticks.max(0.0) as u32;
        self.sync_clock(minutes_per_tick);
    }

    pub fn minutes_of_day(&self) -> f32 {
        self.time_of_day * 60.0
    }

    /// Days since Spring 1 of year 1.
    pub fn total_days(&self) -> u32 {
        let days_per_year = 4 * DAYS_PER_SEASON as u32;
        self.year.saturating_sub(1) * days_per_year
            + self.season.index() as u32 * DAYS_PER_SEASON as u32
            + self.day.saturating_sub(1) as u32
    }

    /// Spring 1 of year 1 is a Monday.
    pub fn day_of_week(&self) -> DayOfWeek {
        match self.total_days() % 7 {
            0 => DayOfWeek::Monday,
            1 => DayOfWeek::Tuesday,
            2 => DayOfWeek::Wednesday,
            3 => DayOfWeek::Thursday,
            4 => DayOfWeek::Friday,
            5 => DayOfWeek::Saturday,
            _ => DayOfWeek::Sunday,
        }
    }

    /// The date after this one as (day, season, year).
    pub fn next_date(&self) -> (u8, Season, u32) {
        if self.day >= DAYS_PER_SEASON {
            let season = self.season.next();
            let year = if season == Season::Spring { self.year + 1 } else { self.year };
            (1, season, year)
        } else {
            (self.day + 1, self.season, self.year)
        }
    }
}

// ─── Weather ─────────────────────────────────────────────────────────────────

/// Days whose weather is fixed regardless of the roll.
pub fn forced_weather(season: Season, day: u8) -> Option<Weather> {
    if day == 1 || festival_for_date(season, day).is_some() {
        return Some(Weather::Sunny);
    }
    match (season, day) {
        (Season::Spring, 3) => Some(Weather::Rainy),
        (Season::Summer, 13) | (Season::Summer, 26) => Some(Weather::Stormy),
        _ => None,
    }
}

/// Rolls a weather result for the given season using weighted probabilities.
///
/// Spring:  60% Sunny, 30% Rainy, 10% Stormy
/// Summer:  70% Sunny, 20% Rainy, 10% Stormy
/// Fall:    50% Sunny, 35% Rainy, 15% Stormy
/// Winter:  40% Sunny, 10% Rainy, 10% Stormy, 40% Snowy
pub fn roll_weather(season: Season, rng: &mut impl Rng) -> Weather {
    let roll: f32 = rng.gen();
    match season {
        Season::Spring => {
            if roll < 0.60 {
                Weather::Sunny
            } else if roll < 0.90 {
                Weather::Rainy
            } else {
                Weather::Stormy
            }
        }
        Season::Summer => {
            if roll < 0.70 {
                Weather::Sunny
            } else if roll < 0.90 {
                Weather::Rainy
            } else {
                Weather::Stormy
            }
        }
        Season::Fall => {
            if roll < 0.50 {
                Weather::Sunny
            } else if roll < 0.85 {
                Weather::Rainy
            } else {
                Weather::Stormy
            }
        }
        Season::Winter => {
            if roll < 0.40 {
                Weather::Sunny
            } else if roll < 0.50 {
                Weather::Rainy
            } else if roll < 0.60 {
                Weather::Stormy
            } else {
                Weather::Snowy
            }
        }
    }
}

pub fn pick_weather(season: Season, day: u8, rng: &mut impl Rng) -> Weather {
    forced_weather(season, day).unwrap_or_else(|| roll_weather(season, rng))
}

// ─── Tick driver ─────────────────────────────────────────────────────────────

/// One fixed simulation step.
pub fn tick(world: &mut GameWorld) {
    let dt = world.config.tick_secs();
    let minutes = world.config.game_minutes_per_tick;
    world.tick += 1;
    world.time.ticks_today += 1;
    world.time.sync_clock(minutes);

    run_due_tasks(world);
    fishing::step_fishing(world, dt);
    npcs::step_npcs(world);
    mining::step_monsters(world, dt);
    drops::update_magnetism(world);
    machines::advance_sweep(world, minutes);

    if world.time.time_of_day >= DAY_END_HOUR {
        pass_out(world);
    }
}

/// Pop and run every task whose tick has come, in scheduling order.
fn run_due_tasks(world: &mut GameWorld) {
    let now = world.tick;
    if !world.tasks.iter().any(|t| t.fire_at <= now) {
        return;
    }
    let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut world.tasks)
        .into_iter()
        .partition(|t| t.fire_at <= now);
    world.tasks = pending;

    for task in due {
        match task.action {
            TaskAction::ClearToolSwing => world.player.swinging = false,
            TaskAction::Fishing { expected, cast_id } => fishing::on_timer(world, expected, cast_id),
        }
    }
}

// ─── Sleep / pass out ────────────────────────────────────────────────────────

/// Go to bed: end the day with no penalty.
pub fn sleep(world: &mut GameWorld) -> ActionResult {
    if !rollover(world) {
        return Err(ActionError::AlreadyToday);
    }
    info!(
        "[Calendar] Slept; woke on day {} {:?} year {}",
        world.time.day, world.time.season, world.time.year
    );
    Ok(())
}

/// Still awake at 2 AM: lose some gold, wake at home with half energy.
/// Does nothing if the day already rolled over this tick.
pub fn pass_out(world: &mut GameWorld) {
    if rolled_over_this_tick(world) {
        warn!("[Calendar] Pass-out skipped; rollover already ran on tick {}", world.tick);
        return;
    }
    let gold_lost = (world.player.gold / 10).min(1000);
    world.player.gold -= gold_lost;
    world.player.wake_energy_cap = Some(world.player.max_energy / 2.0);
    world.monsters.clear();
    world.player.map = MapId::PlayerHouse;
    world.player.pos = tile_center(BED_POS);

    warn!("[Calendar] Player passed out at {:.2}h, lost {}g", world.time.time_of_day, gold_lost);
    world.emit(SimEvent::PassedOut { gold_lost });
    world.toast(format!("You passed out from exhaustion and lost {gold_lost}g."));
    rollover(world);
}

// ─── Rollover ────────────────────────────────────────────────────────────────

fn rolled_over_this_tick(world: &GameWorld) -> bool {
    world.last_rollover_tick == Some(world.tick)
}

/// End the current day and start the next. Runs at most once per tick;
/// returns false when it was already dispatched this tick.
pub fn rollover(world: &mut GameWorld) -> bool {
    if rolled_over_this_tick(world) {
        warn!("[Calendar] Rollover already ran on tick {}", world.tick);
        return false;
    }
    world.last_rollover_tick = Some(world.tick);

    let (ended_day, ended_season, ended_year) = (world.time.day, world.time.season, world.time.year);
    let (day, season, year) = world.time.next_date();

    fishing::stop_fishing(world);

    // Watering happens against the ended day's weather.
    sprinklers::apply_sprinklers(world);
    sprinklers::apply_rain(world);
    farming::daily_advance(world, season);
    giant::giant_pass(world);
    machines::day_adjust(world);

    world.time.ticks_today = 0;
    world.time.time_of_day = DAY_START_HOUR;
    world.time.day = day;
    world.time.season = season;
    world.time.year = year;
    world.time.weather = pick_weather(season, day, &mut world.rng);
    world.sweep_elapsed = 0.0;

    // Dawn: sprinklers and today's rain wet the soil before the player wakes.
    sprinklers::apply_sprinklers(world);
    sprinklers::apply_rain(world);

    npcs::reset_daily(world);
    animals::end_of_day(world);

    let player = &mut world.player;
    let cap = player.wake_energy_cap.take().unwrap_or(player.max_energy);
    player.energy = cap.min(player.max_energy);
    player.health = player.max_health;

    info!(
        "[Calendar] Day ended: day {} {:?} year {} -> day {} {:?} year {}, {:?}",
        ended_day, ended_season, ended_year, day, season, year, world.time.weather
    );
    world.emit(SimEvent::DayEnded {
        day: ended_day,
        season: ended_season,
        year: ended_year,
    });
    if season != ended_season {
        info!("[Calendar] Season changed: {:?} -> {:?} (year {})", ended_season, season, year);
        world.emit(SimEvent::SeasonChanged { season, year });
    }
    if let Some(festival) = festival_for_date(season, day) {
        info!("[Calendar] Festival day: {}", festival.display_name());
        world.toast(format!("Today is the {}!", festival.display_name()));
    }
    true
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::FishingPhase;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weather_roll_spring_distribution() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut sunny, mut rainy, mut stormy, mut snowy) = (0u32, 0u32, 0u32, 0u32);
        for _ in 0..10_000 {
            match roll_weather(Season::Spring, &mut rng) {
                Weather::Sunny => sunny += 1,
                Weather::Rainy => rainy += 1,
                Weather::Stormy => stormy += 1,
                Weather::Snowy => snowy += 1,
            }
        }
        assert_eq!(snowy, 0, "Spring should never produce Snowy weather");
        assert!(sunny > 5000, "Sunny should be ~60%");
        assert!(rainy > 2000, "Rainy should be ~30%");
        assert!(stormy > 500, "Stormy should be ~10%");
    }

    #[test]
    fn test_forced_weather_days() {
        let mut rng = StdRng::seed_from_u64(2);
        for season in Season::ALL {
            assert_eq!(pick_weather(season, 1, &mut rng), Weather::Sunny);
        }
        assert_eq!(pick_weather(Season::Spring, 3, &mut rng), Weather::Rainy);
        assert_eq!(pick_weather(Season::Spring, 13, &mut rng), Weather::Sunny);
        assert_eq!(pick_weather(Season::Summer, 13, &mut rng), Weather::Stormy);
        assert_eq!(pick_weather(Season::Summer, 26, &mut rng), Weather::Stormy);
    }

    #[test]
    fn test_day_of_week_wraps() {
        let mut time = WorldTime::default();
        assert_eq!(time.day_of_week(), DayOfWeek::Monday);
        time.day = 7;
        assert_eq!(time.day_of_week(), DayOfWeek::Sunday);
        time.day = 8;
        assert_eq!(time.day_of_week(), DayOfWeek::Monday);
    }

    #[test]
    fn test_total_days() {
        let time = WorldTime {
            day: 28,
            season: Season::Fall,
            year: 2,
            ..Default::default()
        };
        assert_eq!(time.total_days(), 112 + 56 + 27);
        assert_eq!(time.minutes_of_day(), 360.0);
    }

    #[test]
    fn test_year_wraps_after_winter() {
        let time = WorldTime {
            day: 28,
            season: Season::Winter,
            year: 1,
            ..Default::default()
        };
        assert_eq!(time.next_date(), (1, Season::Spring, 2));
    }

    #[test]
    fn test_tick_advances_time() {
        let mut world = GameWorld::with_defaults();
        tick(&mut world);
        assert_eq!(world.tick, 1);
        let expected = DAY_START_HOUR + world.config.tick_hours();
        assert!((world.time.time_of_day - expected).abs() < 1e-6);
    }

    #[test]
    fn test_clock_lands_exactly_on_half_hours() {
        let mut world = GameWorld::with_defaults();
        for _ in 0..60 {
            tick(&mut world);
        }
        assert_eq!(world.time.time_of_day, 6.5);
        assert_eq!(world.time.minutes_of_day(), 390.0);
    }

    #[test]
    fn test_day_lasts_exactly_twenty_hours_of_ticks() {
        let mut world = GameWorld::with_defaults();
        let per_day = (20.0 / world.config.tick_hours()).round() as u32;
        let mut ticks = 0;
        while world.time.day == 1 {
            tick(&mut world);
            ticks += 1;
            assert!(ticks <= per_day, "day 1 still running after {ticks} ticks");
        }
        assert_eq!(ticks, per_day);
        assert_eq!(world.time.ticks_today, 0);
    }

    #[test]
    fn test_set_clock_snaps_to_tick() {
        let mut world = GameWorld::with_defaults();
        world.set_clock(15.0);
        assert_eq!(world.time.ticks_today, 1080);
        assert_eq!(world.time.time_of_day, 15.0);
        tick(&mut world);
        assert_eq!(world.time.ticks_today, 1081);
    }

    #[test]
    fn test_swing_flag_cleared_by_task() {
        let mut world = GameWorld::with_defaults();
        world.player.swinging = true;
        world.schedule(2, TaskAction::ClearToolSwing);
        tick(&mut world);
        assert!(world.player.swinging);
        tick(&mut world);
        assert!(!world.player.swinging);
        assert!(world.tasks.is_empty());
    }

    #[test]
    fn test_fishing_task_fires_through_tick() {
        let mut world = GameWorld::with_defaults();
        world.player.pos = (33.0, 21.0);
        fishing::start_cast(&mut world, (33, 23)).unwrap();
        for _ in 0..world.config.ticks_for_secs(0.5) {
            tick(&mut world);
        }
        assert_eq!(world.fishing.phase, FishingPhase::Waiting);
    }

    #[test]
    fn test_sleep_rolls_once_per_tick() {
        let mut world = GameWorld::with_defaults();
        world.time.time_of_day = 22.0;
        world.player.energy = 10.0;
        sleep(&mut world).unwrap();
        assert_eq!(world.time.day, 2);
        assert_eq!(world.time.time_of_day, DAY_START_HOUR);
        assert_eq!(world.player.energy, MAX_ENERGY);
        assert_eq!(sleep(&mut world), Err(ActionError::AlreadyToday));
        assert_eq!(world.time.day, 2);
        assert!(world.pending_events().contains(&SimEvent::DayEnded {
            day: 1,
            season: Season::Spring,
            year: 1
        }));
    }

    #[test]
    fn test_pass_out_at_two_am() {
        let mut world = GameWorld::with_defaults();
        world.player.gold = 500;
        world.set_clock(DAY_END_HOUR - world.config.tick_hours());
        tick(&mut world);
        assert_eq!(world.player.gold, 450);
        assert_eq!(world.time.day, 2);
        assert_eq!(world.player.energy, MAX_ENERGY / 2.0);
        assert_eq!(world.player.map, MapId::PlayerHouse);
        assert!(world.pending_events().contains(&SimEvent::PassedOut { gold_lost: 50 }));

        // The cap applies to one morning only.
        tick(&mut world);
        sleep(&mut world).unwrap();
        assert_eq!(world.player.energy, MAX_ENERGY);
    }

    #[test]
    fn test_refused_pass_out_changes_nothing() {
        let mut world = GameWorld::with_defaults();
        world.player.gold = 500;
        sleep(&mut world).unwrap();
        let energy = world.player.energy;
        world.drain_events();

        pass_out(&mut world);
        assert_eq!(world.player.gold, 500);
        assert_eq!(world.player.wake_energy_cap, None);
        assert_eq!(world.player.energy, energy);
        assert_eq!(world.player.map, MapId::Farm);
        assert_eq!(world.time.day, 2);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_sprinkled_soil_is_wet_all_day() {
        use crate::world::objects::{PlacedObject, SprinklerTier};
        let mut world = GameWorld::with_defaults();
        let farm = world.map_mut(MapId::Farm).unwrap();
        farm.plot_mut(10, 10).unwrap().tilled = true;
        farm.plot_mut(11, 10).unwrap().object = Some(PlacedObject::Sprinkler { tier: SprinklerTier::Basic });

        sleep(&mut world).unwrap();
        assert!(world.plot(MapId::Farm, (10, 10)).unwrap().watered);
        assert_eq!(
            farming::water(&mut world, MapId::Farm, (10, 10)),
            Err(ActionError::AlreadyWatered)
        );
    }

    #[test]
    fn test_rainy_morning_waters_soil() {
        let mut world = GameWorld::with_defaults();
        world.time.day = 2;
        world.plot_mut(MapId::Farm, (10, 10)).unwrap().tilled = true;
        sleep(&mut world).unwrap();
        assert_eq!(world.time.weather, Weather::Rainy);
        assert!(world.plot(MapId::Farm, (10, 10)).unwrap().watered);
    }

    #[test]
    fn test_season_change_emits_event() {
        let mut world = GameWorld::with_defaults();
        world.time.day = DAYS_PER_SEASON;
        sleep(&mut world).unwrap();
        assert_eq!(world.time.season, Season::Summer);
        assert_eq!(world.time.weather, Weather::Sunny);
        assert!(world
            .pending_events()
            .contains(&SimEvent::SeasonChanged { season: Season::Summer, year: 1 }));
    }
}
