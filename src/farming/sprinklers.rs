//! Automatic watering: sprinklers and rain. Rollover runs both before crops
//! advance and again at dawn for the new day, so covered soil stays wet all day.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::objects::{PlacedObject, SprinklerTier};
use crate::world::GameWorld;

/// Water every tilled plot inside each sprinkler's pattern, on every map.
pub fn apply_sprinklers(world: &mut GameWorld) {
    let mut watered = 0usize;
    for game_map in world.maps.values_mut() {
        let sprinklers: Vec<(GridPos, SprinklerTier)> = game_map
            .positions()
            .zip(game_map.plots.iter())
            .filter_map(|(pos, plot)| match plot.object {
                Some(PlacedObject::Sprinkler { tier }) => Some((pos, tier)),
                _ => None,
            })
            .collect();

        for ((sx, sy), tier) in sprinklers {
            for (dx, dy) in tier.offsets() {
                if let Some(plot) = game_map.plot_mut(sx + dx, sy + dy) {
                    if plot.tilled && plot.terrain.is_farmable() && !plot.watered {
                        plot.watered = true;
                        watered += 1;
                    }
                }
            }
        }
    }
    if watered > 0 {
        debug!("[Farming] Sprinklers watered {} plots", watered);
    }
}

/// Rainy and stormy days water every tilled plot on outdoor maps.
pub fn apply_rain(world: &mut GameWorld) {
    if !world.time.weather.waters_crops() {
        return;
    }
    for game_map in world.maps.values_mut().filter(|m| m.id.is_outdoors()) {
        for plot in game_map.plots.iter_mut().filter(|p| p.tilled) {
            plot.watered = true;
        }
    }
    debug!("[Farming] Rain watered outdoor soil");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sprinkler_waters_four_neighbours() {
        let mut world = GameWorld::with_defaults();
        let farm = world.map_mut(MapId::Farm).unwrap();
        for x in 9..=13 {
            for y in 9..=13 {
                farm.plot_mut(x, y).unwrap().tilled = true;
            }
        }
        farm.plot_mut(11, 11).unwrap().object = Some(PlacedObject::Sprinkler { tier: SprinklerTier::Basic });

        apply_sprinklers(&mut world);

        let farm = world.map(MapId::Farm).unwrap();
        let watered: Vec<GridPos> = farm
            .positions()
            .filter(|&(x, y)| farm.plot(x, y).is_some_and(|p| p.watered))
            .collect();
        assert_eq!(watered, vec![(11, 10), (10, 11), (12, 11), (11, 12)]);
    }

    #[test]
    fn test_sprinkler_skips_untilled_soil() {
        let mut world = GameWorld::with_defaults();
        let farm = world.map_mut(MapId::Farm).unwrap();
        farm.plot_mut(11, 11).unwrap().object = Some(PlacedObject::Sprinkler { tier: SprinklerTier::Iridium });
        apply_sprinklers(&mut world);
        assert!(world.map(MapId::Farm).unwrap().plots.iter().all(|p| !p.watered));
    }

    #[test]
    fn test_rain_waters_outdoor_tilled_plots_only() {
        let mut world = GameWorld::with_defaults();
        world.time.weather = Weather::Rainy;
        world.plot_mut(MapId::Farm, (10, 10)).unwrap().tilled = true;
        world.plot_mut(MapId::PlayerHouse, (3, 3)).unwrap().tilled = true;
        apply_rain(&mut world);
        assert!(world.plot(MapId::Farm, (10, 10)).unwrap().watered);
        assert!(!world.plot(MapId::Farm, (11, 10)).unwrap().watered);
        assert!(!world.plot(MapId::PlayerHouse, (3, 3)).unwrap().watered);
    }
}
