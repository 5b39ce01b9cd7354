//! Bevy adapter: runs the simulation on `FixedUpdate` and exposes it to a
//! host app through events.
//!
//! - `PlayerCommand` events are applied to the world in `Update`, between
//!   ticks. A rejected command is logged and toasted; nothing else happens.
//! - Every `SimEvent` the core emits is re-sent as a `SimNotice` in
//!   `PostUpdate`.

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::data::Catalog;
use crate::shared::*;
use crate::player::tools::{ensure_npc_reach, ensure_reach};
use crate::world::GameWorld;
use crate::{calendar, crafting, farming, fishing, inventory, mining, npcs, player};

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Something the player asked to do.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Move { dx: f32, dy: f32 },
    SelectTool(ToolKind),
    SelectSlot(usize),
    UseTool { target: GridPos },
    Interact { target: GridPos },
    Plant { target: GridPos, seed: ItemId },
    Feed { target: GridPos, input: ItemId },
    Collect { target: GridPos },
    Place { target: GridPos, item: ItemId },
    PickUp { target: GridPos },
    Craft(ItemId),
    Sell { item: ItemId, quantity: u32 },
    Buy { item: ItemId, quantity: u32 },
    Eat(ItemId),
    Talk(NpcId),
    Gift { npc: NpcId, item: ItemId },
    ReactToBite,
    Reel,
    StopFishing,
    Attack(Facing),
    Descend,
    Sleep,
}

/// An outbound core event, relayed for the host.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SimNotice(pub SimEvent);

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SimPlugin {
    pub config: SimConfig,
    pub catalog: Catalog,
}

impl Default for SimPlugin {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            catalog: Catalog::builtin(),
        }
    }
}

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            .insert_resource(GameWorld::new(self.config.clone(), self.catalog.clone()))
            .add_event::<PlayerCommand>()
            .add_event::<SimNotice>()
            .add_systems(Update, apply_commands)
            .add_systems(FixedUpdate, run_tick)
            .add_systems(PostUpdate, relay_events);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn run_tick(mut world: ResMut<GameWorld>) {
    calendar::tick(&mut world);
}

fn apply_commands(mut commands: EventReader<PlayerCommand>, mut world: ResMut<GameWorld>) {
    for command in commands.read() {
        if let Err(err) = apply(&mut world, command) {
            debug!("[Runtime] {:?} rejected: {}", command, err);
            world.toast(capitalize(&err.to_string()));
        }
    }
}

fn relay_events(mut world: ResMut<GameWorld>, mut notices: EventWriter<SimNotice>) {
    for event in world.drain_events() {
        notices.send(SimNotice(event));
    }
}

/// Route one command to the component that owns it.
pub fn apply(world: &mut GameWorld, command: &PlayerCommand) -> ActionResult {
    let map = world.player.map;
    match command {
        PlayerCommand::Move { dx, dy } => {
            player::move_player(world, *dx, *dy);
            Ok(())
        }
        PlayerCommand::SelectTool(tool) => {
            player::select_tool(world, *tool);
            Ok(())
        }
        PlayerCommand::SelectSlot(slot) => world.inventory.select(*slot),
        PlayerCommand::UseTool { target } => player::tools::use_tool(world, *target),
        PlayerCommand::Interact { target } => player::tools::interact(world, *target),
        PlayerCommand::Plant { target, seed } => {
            ensure_reach(world, *target)?;
            farming::plant(world, map, *target, seed)
        }
        PlayerCommand::Feed { target, input } => {
            ensure_reach(world, *target)?;
            crafting::feed(world, map, *target, input)
        }
        PlayerCommand::Collect { target } => {
            ensure_reach(world, *target)?;
            crafting::collect(world, map, *target).map(|_| ())
        }
        PlayerCommand::Place { target, item } => {
            ensure_reach(world, *target)?;
            crafting::place_object(world, map, *target, item)
        }
        PlayerCommand::PickUp { target } => {
            ensure_reach(world, *target)?;
            crafting::pick_up(world, map, *target)
        }
        PlayerCommand::Craft(recipe) => inventory::trade::craft(world, recipe),
        PlayerCommand::Sell { item, quantity } => {
            inventory::trade::sell(world, item, *quantity).map(|_| ())
        }
        PlayerCommand::Buy { item, quantity } => inventory::trade::buy(world, item, *quantity),
        PlayerCommand::Eat(item) => inventory::trade::eat(world, item).map(|_| ()),
        PlayerCommand::Talk(npc) => {
            ensure_npc_reach(world, npc)?;
            let line = npcs::talk(world, npc)?;
            world.toast(line);
            Ok(())
        }
        PlayerCommand::Gift { npc, item } => {
            ensure_npc_reach(world, npc)?;
            npcs::give_gift(world, npc, item).map(|_| ())
        }
        PlayerCommand::ReactToBite => fishing::react_to_bite(world),
        PlayerCommand::Reel => fishing::reel(world),
        PlayerCommand::StopFishing => {
            fishing::stop_fishing(world);
            Ok(())
        }
        PlayerCommand::Attack(direction) => mining::attack(world, *direction).map(|_| ()),
        PlayerCommand::Descend => mining::descend(world),
        PlayerCommand::Sleep => calendar::sleep(world),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
