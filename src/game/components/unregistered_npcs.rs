use bevy_ecs::prelude::{Component, Entity};

/// Reverse-registration list: every NPC whose `damage_list` currently holds
/// an entry for this attacker. Kept so detaching on logout is O(k) instead
/// of a scan over every live NPC.
#[derive(Component, Debug, Clone, Default)]
pub struct UnregisteredNpcs {
    pub npcs: Vec<Entity>,
}

impl UnregisteredNpcs {
    pub fn register(&mut self, npc: Entity) {
        if !self.npcs.contains(&npc) {
            self.npcs.push(npc);
        }
    }

    pub fn unregister(&mut self, npc: Entity) {
        self.npcs.retain(|&e| e != npc);
    }
}
