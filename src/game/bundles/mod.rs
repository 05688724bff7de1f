mod npc_bundle;

pub use npc_bundle::{find_spawn_position, spawn_boss_and_children, spawn_npc, NpcSpawnRequest};
