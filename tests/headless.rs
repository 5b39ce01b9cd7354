//! Headless integration tests for fieldtick.
//!
//! The first half drives `GameWorld` directly through the public component
//! operations and `calendar::tick`. The second half boots `SimPlugin` on
//! `MinimalPlugins` and runs the `FixedUpdate` schedule by hand.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use fieldtick::calendar;
use fieldtick::crafting;
use fieldtick::data::{MachineKind, ScheduleEntry};
use fieldtick::farming;
use fieldtick::fishing::{self, FishingPhase};
use fieldtick::runtime::{PlayerCommand, SimNotice, SimPlugin};
use fieldtick::save;
use fieldtick::shared::*;
use fieldtick::world::map::{GameMap, Terrain};
use fieldtick::world::objects::PlacedObject;
use fieldtick::world::GameWorld;

/// A clear dirt tile inside the farm field.
const FIELD: GridPos = (10, 10);
/// An empty tile on the farm path.
const SPOT: GridPos = (36, 14);

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Sleep, then tick once so the next rollover isn't in the same tick.
fn next_morning(world: &mut GameWorld) {
    calendar::sleep(world).unwrap();
    calendar::tick(world);
}

fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SimPlugin::default());
    app.update();
    app
}

fn notices(app: &App) -> Vec<SimEvent> {
    let events = app.world().resource::<Events<SimNotice>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).map(|n| n.0.clone()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_till_at_low_energy_costs_two() {
    let mut world = GameWorld::with_defaults();
    world.player.energy = 10.0;
    farming::till(&mut world, MapId::Farm, FIELD).unwrap();
    assert_eq!(world.player.energy, 8.0);
    assert!(world.plot(MapId::Farm, FIELD).unwrap().tilled);
}

#[test]
fn test_parsnip_after_four_watered_nights_yields_one() {
    let mut world = GameWorld::with_defaults();
    farming::till(&mut world, MapId::Farm, FIELD).unwrap();
    farming::plant(&mut world, MapId::Farm, FIELD, "parsnip_seeds").unwrap();

    for night in 0..4 {
        assert_eq!(
            farming::harvest(&mut world, MapId::Farm, FIELD),
            Err(ActionError::NotMature),
            "ripe too early on night {night}"
        );
        // Spring 3 is always rainy; the soil is already wet that morning.
        match farming::water(&mut world, MapId::Farm, FIELD) {
            Ok(()) | Err(ActionError::AlreadyWatered) => {}
            Err(other) => panic!("watering failed on night {night}: {other}"),
        }
        assert!(world.plot(MapId::Farm, FIELD).unwrap().watered);
        next_morning(&mut world);
    }

    let crop = world.plot(MapId::Farm, FIELD).unwrap().crop.clone().unwrap();
    assert_eq!(crop.stage, 4);
    assert_eq!(world.time.day, 5);
    assert_eq!(farming::harvest(&mut world, MapId::Farm, FIELD), Ok(1));
    assert_eq!(world.inventory.count("parsnip"), 1);
    assert!(world.plot(MapId::Farm, FIELD).unwrap().crop.is_none());
}

#[test]
fn test_unwatered_crop_does_not_grow() {
    let mut world = GameWorld::with_defaults();
    farming::till(&mut world, MapId::Farm, FIELD).unwrap();
    farming::plant(&mut world, MapId::Farm, FIELD, "parsnip_seeds").unwrap();
    assert_eq!(world.time.weather, Weather::Sunny);
    next_morning(&mut world);
    let plot = world.plot(MapId::Farm, FIELD).unwrap();
    assert_eq!(plot.crop.as_ref().unwrap().stage, 0);
}

#[test]
fn test_furnace_busy_then_copper_bar_after_thirty_minutes() {
    let mut world = GameWorld::with_defaults();
    world
        .map_mut(MapId::Farm)
        .unwrap()
        .place(SPOT.0, SPOT.1, PlacedObject::machine(MachineKind::Furnace));
    world.inventory.add("copper_ore", 5);
    world.inventory.add("coal", 1);

    crafting::feed(&mut world, MapId::Farm, SPOT, "copper_ore").unwrap();
    assert_eq!(
        crafting::collect(&mut world, MapId::Farm, SPOT),
        Err(ActionError::MachineBusy)
    );

    let ticks = (30.0 / world.config.game_minutes_per_tick).round() as usize;
    for _ in 0..ticks - 1 {
        calendar::tick(&mut world);
    }
    assert_eq!(
        crafting::collect(&mut world, MapId::Farm, SPOT),
        Err(ActionError::MachineBusy)
    );
    calendar::tick(&mut world);
    assert_eq!(world.time.time_of_day, 6.5);
    assert!(world
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimEvent::MachineReady { output, .. } if output == "copper_bar")));
    assert_eq!(
        crafting::collect(&mut world, MapId::Farm, SPOT),
        Ok(("copper_bar".to_string(), 1))
    );
}

#[test]
fn test_npc_reaches_afternoon_target_on_open_grid() {
    let mut world = GameWorld::with_defaults();
    world.maps.insert(MapId::Town, GameMap::new(MapId::Town, 40, 30, Terrain::Grass));
    world.npcs.truncate(1);
    {
        let npc = &mut world.npcs[0];
        npc.map = MapId::Town;
        npc.pos = (20.0, 16.0);
        npc.schedule = vec![ScheduleEntry { minute: 900, map: MapId::Town, x: 30, y: 12 }];
        npc.cursor = 0;
    }
    world.set_clock(15.0);

    let manhattan = 10 + 4;
    let bound = (manhattan as f32 / world.config.npc_speed).ceil() as usize + 2;
    let mut ticks = 0;
    loop {
        calendar::tick(&mut world);
        ticks += 1;
        let npc = &world.npcs[0];
        if npc.pos == (30.0, 12.0) && !npc.is_moving() {
            break;
        }
        assert!(ticks <= bound, "npc still walking after {ticks} ticks");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-component flows
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_machine_job_survives_rollover() {
    let mut world = GameWorld::with_defaults();
    world
        .map_mut(MapId::Farm)
        .unwrap()
        .place(SPOT.0, SPOT.1, PlacedObject::machine(MachineKind::Furnace));
    world.inventory.add("iron_ore", 5);
    world.inventory.add("coal", 1);
    world.set_clock(25.0);
    crafting::feed(&mut world, MapId::Farm, SPOT, "iron_ore").unwrap();

    next_morning(&mut world);
    match &world.plot(MapId::Farm, SPOT).unwrap().object {
        Some(PlacedObject::Machine { job: Some(job), .. }) => {
            assert!((job.ready_at - 3.0).abs() < 1e-4);
        }
        other => panic!("expected a running furnace, got {other:?}"),
    }
    assert!(crafting::collect(&mut world, MapId::Farm, SPOT).is_ok());
}

#[test]
fn test_rollover_reaches_maps_the_player_is_not_on() {
    const PATCH: GridPos = (10, 10);
    const SHED: GridPos = (20, 12);
    let mut world = GameWorld::with_defaults();
    world.maps.insert(MapId::Town, GameMap::new(MapId::Town, 40, 30, Terrain::Grass));
    assert_eq!(world.player.map, MapId::Farm);

    farming::till(&mut world, MapId::Town, PATCH).unwrap();
    farming::plant(&mut world, MapId::Town, PATCH, "parsnip_seeds").unwrap();
    farming::water(&mut world, MapId::Town, PATCH).unwrap();

    world
        .map_mut(MapId::Town)
        .unwrap()
        .place(SHED.0, SHED.1, PlacedObject::machine(MachineKind::Furnace));
    world.inventory.add("iron_ore", 5);
    world.inventory.add("coal", 1);
    world.set_clock(20.0);
    crafting::feed(&mut world, MapId::Town, SHED, "iron_ore").unwrap();

    next_morning(&mut world);
    let plot = world.plot(MapId::Town, PATCH).unwrap();
    assert_eq!(plot.crop.as_ref().unwrap().stage, 1);
    match &world.plot(MapId::Town, SHED).unwrap().object {
        Some(PlacedObject::Machine { job: Some(job), .. }) => {
            assert!((job.ready_at - (22.0 - 24.0)).abs() < 1e-4);
            assert!(!job.ready);
        }
        other => panic!("expected a running furnace, got {other:?}"),
    }

    // The first sweep of the new day flags the off-map job.
    world.drain_events();
    let sweep_ticks = (world.config.machine_sweep_minutes / world.config.game_minutes_per_tick) as usize;
    for _ in 0..sweep_ticks {
        calendar::tick(&mut world);
    }
    assert!(world.drain_events().iter().any(|e| matches!(
        e,
        SimEvent::MachineReady { map: MapId::Town, pos, .. } if *pos == SHED
    )));
}

#[test]
fn test_winter_untills_bare_soil() {
    let mut world = GameWorld::with_defaults();
    world.time.season = Season::Fall;
    world.time.day = DAYS_PER_SEASON;
    farming::till(&mut world, MapId::Farm, FIELD).unwrap();
    next_morning(&mut world);
    assert_eq!(world.time.season, Season::Winter);
    assert!(!world.plot(MapId::Farm, FIELD).unwrap().tilled);
}

#[test]
fn test_full_fishing_cycle_through_ticks() {
    let mut world = GameWorld::with_defaults();
    world.player.pos = (33.0, 21.0);
    fishing::start_cast(&mut world, (33, 23)).unwrap();

    // Cast (0.5 s) plus the longest bite wait (5 s).
    let wait = world.config.ticks_for_secs(5.5) + 1;
    for _ in 0..wait {
        calendar::tick(&mut world);
        if world.fishing.phase == FishingPhase::Biting {
            break;
        }
    }
    assert_eq!(world.fishing.phase, FishingPhase::Biting);
    fishing::react_to_bite(&mut world).unwrap();

    // Pin the fish to the bar every tick; the catch is then guaranteed.
    for _ in 0..400 {
        if let Some(reel) = world.fishing.reel.as_mut() {
            reel.fish_target = reel.bar_pos;
            reel.fish_pos = reel.bar_pos;
            reel.retarget_in = 10.0;
        }
        calendar::tick(&mut world);
        if world.fishing.phase != FishingPhase::Reeling {
            break;
        }
    }
    assert_eq!(world.fishing.phase, FishingPhase::Caught);
    let fish = world.fishing.fish.clone().unwrap();
    assert!(world.inventory.count(&fish) >= 1 || world.drops.iter().any(|d| d.item_id == fish));

    for _ in 0..world.config.ticks_for_secs(1.0) + 1 {
        calendar::tick(&mut world);
    }
    assert_eq!(world.fishing.phase, FishingPhase::Idle);
}

#[test]
fn test_snapshot_restore_continues_identically() {
    let mut world = GameWorld::with_defaults();
    farming::till(&mut world, MapId::Farm, FIELD).unwrap();
    farming::plant(&mut world, MapId::Farm, FIELD, "parsnip_seeds").unwrap();
    for _ in 0..100 {
        calendar::tick(&mut world);
    }
    let text = save::to_json(&save::snapshot(&world)).unwrap();

    let mut copy = GameWorld::with_defaults();
    save::restore(&mut copy, save::from_json(&text).unwrap());
    assert_eq!(copy.tick, world.tick);
    assert_eq!(copy.time.day, world.time.day);
    assert_eq!(copy.npcs, world.npcs);
    assert_eq!(copy.inventory, world.inventory);
    assert_eq!(copy.plot(MapId::Farm, FIELD), world.plot(MapId::Farm, FIELD));
}

// ─────────────────────────────────────────────────────────────────────────────
// Bevy runtime
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_plugin_ticks_on_fixed_update() {
    let mut app = build_test_app();
    let before = app.world().resource::<GameWorld>().tick;
    for _ in 0..10 {
        app.world_mut().run_schedule(FixedUpdate);
    }
    let world = app.world().resource::<GameWorld>();
    assert!(world.tick >= before + 10);
    assert!(world.time.time_of_day > DAY_START_HOUR);
}

#[test]
fn test_plugin_applies_commands_and_relays_events() {
    let mut app = build_test_app();
    app.world_mut().send_event(PlayerCommand::Sleep);
    app.update();

    let world = app.world().resource::<GameWorld>();
    assert_eq!(world.time.day, 2);
    assert!(world.pending_events().is_empty());
    assert!(notices(&app)
        .iter()
        .any(|e| matches!(e, SimEvent::DayEnded { day: 1, .. })));
}

#[test]
fn test_plugin_toasts_rejected_commands() {
    let mut app = build_test_app();
    app.world_mut().send_event(PlayerCommand::ReactToBite);
    app.update();
    assert!(notices(&app)
        .iter()
        .any(|e| matches!(e, SimEvent::Toast { message, .. } if message == "Can't do that right now")));
}
