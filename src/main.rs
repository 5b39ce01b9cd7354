//! Headless runner: ticks the simulation at its fixed rate and logs what
//! happens.
//!
//! Usage: `fieldtick [config.ron] [catalog.ron]`

use std::fs;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use fieldtick::config::SimConfig;
use fieldtick::data::Catalog;
use fieldtick::runtime::{SimNotice, SimPlugin};
use fieldtick::shared::SimEvent;

fn main() {
    let mut app = App::new();
    // The log subscriber is installed when LogPlugin builds, so file loading
    // comes after it.
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
    )
    .add_plugins(LogPlugin::default());

    let mut args = std::env::args().skip(1);
    let config = args
        .next()
        .and_then(|path| load_ron(&path, SimConfig::from_ron_str))
        .unwrap_or_default();
    let catalog = args
        .next()
        .and_then(|path| load_ron(&path, Catalog::from_ron_str))
        .unwrap_or_else(Catalog::builtin);

    app.add_plugins(SimPlugin { config, catalog })
        .add_systems(Update, log_notices)
        .run();
}

fn load_ron<T>(path: &str, parse: impl Fn(&str) -> Result<T, ron::error::SpannedError>) -> Option<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("could not read {path}: {err}; using defaults");
            return None;
        }
    };
    match parse(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("could not parse {path}: {err}; using defaults");
            None
        }
    }
}

fn log_notices(mut notices: EventReader<SimNotice>) {
    for SimNotice(event) in notices.read() {
        match event {
            SimEvent::Sfx(_) => {}
            SimEvent::Toast { message, .. } => info!("[Toast] {}", message),
            other => info!("[Sim] {:?}", other),
        }
    }
}
