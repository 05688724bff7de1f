use bevy_ecs::prelude::{Entity, Event};

/// Raised once an NPC's kill has been fully processed (damage list cleared,
/// reverse pointers detached, reward split decided). Party/quest
/// propagation subscribes to this instead of re-deriving death from hp.
#[derive(Event, Debug, Clone)]
pub struct NpcDeathEvent {
    pub npc: Entity,
    pub map_id: u32,
    pub def_id: u32,
    pub x: i32,
    pub y: i32,
    pub killer: Option<Entity>,
    pub was_boss: bool,
}
