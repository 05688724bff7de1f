#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod game;

pub use game::components;
pub use game::resources;
pub use game::GameWorld;
