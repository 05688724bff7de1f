use bevy_ecs::prelude::Component;
use eo_game_common::messages::ClientEntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEntityType {
    Character,
    Npc,
    Monster,
    ItemDrop,
    Chest,
}

/// The small stable handle a map roster assigns an entity so broadcasts can
/// address it without exposing the ECS `Entity` id. NPC ids are unique
/// 1..255 per map per the data model; other entity kinds draw from their
/// own id spaces.
#[derive(Component, Debug, Clone, Copy)]
pub struct ClientEntity {
    pub id: ClientEntityId,
    pub entity_type: ClientEntityType,
    pub map_id: u32,
}
