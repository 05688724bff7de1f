use bevy_ecs::prelude::Component;
use eo_data::NpcDefId;

#[derive(Component, Debug, Clone)]
pub struct MonsterSpawnPoint {
    pub map_id: u32,
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub npc_def_id: NpcDefId,
    pub spawn_type: u8,
    pub spawn_time_secs: u32,
    pub amount: u32,
    pub num_alive: u32,
}
