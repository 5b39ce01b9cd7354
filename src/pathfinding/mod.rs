//! A* over a map's walkability grid.
//!
//! 4-connected, unit step cost, Manhattan heuristic. The open set is a binary
//! heap ordered by (f, h, insertion sequence), so among equal-cost candidates
//! the one closest to the goal wins, then the one discovered first. Neighbours
//! are expanded up, right, down, left.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use bevy::prelude::*;

use crate::shared::*;
use crate::world::map::GameMap;

/// What the pathfinder needs to know about a map.
pub trait Walkability {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn is_walkable(&self, x: i32, y: i32) -> bool;
}

impl Walkability for GameMap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.is_passable(x, y)
    }
}

const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

fn manhattan(a: GridPos, b: GridPos) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Shortest path from `start` to `goal`, excluding `start` and including
/// `goal`. Empty when start == goal, when the goal is unreachable, or when
/// more than `max_iterations` nodes are expanded.
pub fn find_path<W: Walkability + ?Sized>(
    map: &W,
    start: GridPos,
    goal: GridPos,
    max_iterations: usize,
) -> Vec<GridPos> {
    if start == goal {
        return Vec::new();
    }
    let in_bounds = |(x, y): GridPos| x >= 0 && y >= 0 && x < map.width() && y < map.height();
    if !in_bounds(goal) || !map.is_walkable(goal.0, goal.1) {
        return Vec::new();
    }

    let mut open: BinaryHeap<Reverse<(u32, u32, u64, GridPos)>> = BinaryHeap::new();
    let mut g_score: HashMap<GridPos, u32> = HashMap::new();
    let mut came_from: HashMap<GridPos, GridPos> = HashMap::new();
    let mut seq: u64 = 0;

    let h0 = manhattan(start, goal);
    open.push(Reverse((h0, h0, seq, start)));
    g_score.insert(start, 0);

    let mut iterations = 0;
    while let Some(Reverse((f, _, _, current))) = open.pop() {
        let g = g_score.get(&current).copied().unwrap_or(u32::MAX);
        // Stale heap entry superseded by a cheaper route.
        if f > g.saturating_add(manhattan(current, goal)) {
            continue;
        }
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }
        iterations += 1;
        if iterations > max_iterations {
            debug!(
                "[Path] Gave up after {} expansions from {:?} to {:?}",
                max_iterations, start, goal
            );
            return Vec::new();
        }

        for (dx, dy) in NEIGHBOURS {
            let next = (current.0 + dx, current.1 + dy);
            if !in_bounds(next) || !map.is_walkable(next.0, next.1) {
                continue;
            }
            let tentative = g + 1;
            if g_score.get(&next).is_some_and(|&known| tentative >= known) {
                continue;
            }
            g_score.insert(next, tentative);
            came_from.insert(next, current);
            let h = manhattan(next, goal);
            seq += 1;
            open.push(Reverse((tentative + h, h, seq, next)));
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &HashMap<GridPos, GridPos>, start: GridPos, goal: GridPos) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
