mod game_data;
mod maps;
mod server_messages;
mod world_rng;
mod world_time;

pub use game_data::GameData;
pub use maps::{load_map_file, MapLoadError, MapList, MapState};
pub use server_messages::ServerMessages;
pub use world_rng::WorldRng;
pub use world_time::{WorldTime, TICK_DURATION_SECS};
