pub mod bundles;
pub mod combat;
pub mod components;
pub mod events;
mod game_world;
pub mod pathing;
pub mod resources;
pub mod reward;
pub mod systems;

pub use game_world::GameWorld;
