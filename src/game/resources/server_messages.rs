use bevy_ecs::prelude::Resource;
use eo_game_common::messages::{ClientEntityId, ServerMessage};

/// A message addressed to every client in a map.
pub struct ZoneMessage {
    pub map_id: u32,
    pub message: ServerMessage,
}

/// A message addressed to a single client entity within a map (used for
/// replies that only the acting client should see, e.g. `ChestAgree`).
pub struct EntityMessage {
    pub map_id: u32,
    pub entity_id: ClientEntityId,
    pub message: ServerMessage,
}

/// Broadcast outbox drained once per tick by the network-facing
/// collaborator. Systems never write sockets directly; they queue here.
#[derive(Resource, Default)]
pub struct ServerMessages {
    pub pending_zone_messages: Vec<ZoneMessage>,
    pub pending_entity_messages: Vec<EntityMessage>,
}

impl ServerMessages {
    pub fn send_zone_message(&mut self, map_id: u32, message: ServerMessage) {
        self.pending_zone_messages.push(ZoneMessage { map_id, message });
    }

    pub fn send_entity_message(&mut self, map_id: u32, entity_id: ClientEntityId, message: ServerMessage) {
        self.pending_entity_messages.push(EntityMessage {
            map_id,
            entity_id,
            message,
        });
    }

    pub fn drain(&mut self) -> (Vec<ZoneMessage>, Vec<EntityMessage>) {
        (
            std::mem::take(&mut self.pending_zone_messages),
            std::mem::take(&mut self.pending_entity_messages),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_both_queues() {
        let mut messages = ServerMessages::default();
        messages.send_zone_message(1, ServerMessage::ClothesRemove { entity_ids: vec![] });
        messages.send_entity_message(1, ClientEntityId(1), ServerMessage::ClothesRemove { entity_ids: vec![] });

        let (zone, entity) = messages.drain();
        assert_eq!(zone.len(), 1);
        assert_eq!(entity.len(), 1);
        assert!(messages.pending_zone_messages.is_empty());
        assert!(messages.pending_entity_messages.is_empty());
    }
}
