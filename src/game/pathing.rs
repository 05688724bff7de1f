//! Bounded A* used when a pet's (or NPC's) single-step greedy move toward a
//! target is blocked. 4-neighborhood, Manhattan heuristic, tie-broken by a
//! cheap tile hash so ties resolve deterministically instead of by queue
//! insertion order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use eo_game_common::Direction;

use crate::game::resources::MapState;

const MAX_FRONTIER: usize = 400;

fn manhattan(ax: i32, ay: i32, bx: i32, by: i32) -> i32 {
    (ax - bx).abs() + (ay - by).abs()
}

fn tile_hash(x: i32, y: i32) -> u64 {
    let mut h = x as i64 as u64;
    h = h.wrapping_mul(0x9E3779B97F4A7C15).rotate_left(31);
    h ^= y as i64 as u64;
    h.wrapping_mul(0xC2B2AE3D27D4EB4F)
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Frontier {
    priority: i32,
    tie: u64,
    x: i32,
    y: i32,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert priority for shortest-first.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns the first step's direction along a bounded-frontier shortest
/// path from `(from_x, from_y)` to `(to_x, to_y)`, or `None` if the target
/// is unreachable within `MAX_FRONTIER` expansions.
pub fn find_path_step(map: &MapState, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Option<Direction> {
    if from_x == to_x && from_y == to_y {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
    let mut g_score: HashMap<(i32, i32), i32> = HashMap::new();

    open.push(Frontier {
        priority: manhattan(from_x, from_y, to_x, to_y),
        tie: tile_hash(from_x, from_y),
        x: from_x,
        y: from_y,
    });
    g_score.insert((from_x, from_y), 0);

    let mut expansions = 0;
    while let Some(current) = open.pop() {
        if current.x == to_x && current.y == to_y {
            let mut step = (current.x, current.y);
            while let Some(&prev) = came_from.get(&step) {
                if prev == (from_x, from_y) {
                    return Some(Direction::towards(from_x, from_y, step.0, step.1));
                }
                step = prev;
            }
            return None;
        }

        expansions += 1;
        if expansions > MAX_FRONTIER {
            return None;
        }

        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = direction.step();
            let neighbor = (current.x + dx, current.y + dy);
            if !map.walkable(neighbor.0, neighbor.1, true) {
                continue;
            }

            let tentative = g_score[&(current.x, current.y)] + 1;
            if tentative < *g_score.get(&neighbor).unwrap_or(&i32::MAX) {
                came_from.insert(neighbor, (current.x, current.y));
                g_score.insert(neighbor, tentative);
                open.push(Frontier {
                    priority: tentative + manhattan(neighbor.0, neighbor.1, to_x, to_y),
                    tie: tile_hash(neighbor.0, neighbor.1),
                    x: neighbor.0,
                    y: neighbor.1,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_step_around_a_single_obstacle() {
        let mut map = MapState::empty_inert(1);
        map.tiles = eo_file_formats::TileGrid::new(10, 10);
        for x in 0..10 {
            for y in 0..10 {
                map.tiles.set_tag(x, y, eo_file_formats::TileTag::None);
            }
        }
        map.tiles.set_tag(5, 5, eo_file_formats::TileTag::Wall);

        let step = find_path_step(&map, 4, 5, 6, 5);
        assert!(step.is_some());
    }

    #[test]
    fn no_step_when_already_at_target() {
        let map = MapState::empty_inert(1);
        assert_eq!(find_path_step(&map, 3, 3, 3, 3), None);
    }
}
