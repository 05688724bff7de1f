use bevy_ecs::prelude::Component;
use eo_game_common::Direction;

#[derive(Component, Debug, Clone, Copy)]
pub struct Position {
    pub map_id: u32,
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl Position {
    pub fn new(map_id: u32, x: i32, y: i32, direction: Direction) -> Self {
        Self {
            map_id,
            x,
            y,
            direction,
        }
    }

    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn is_adjacent_or_stacked(&self, other: &Position) -> bool {
        self.map_id == other.map_id && self.chebyshev_distance(other) <= 1
    }
}
