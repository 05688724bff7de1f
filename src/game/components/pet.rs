use bevy_ecs::prelude::{Component, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetMode {
    Following,
    Guarding,
    Attacking,
}

/// A pet shares the NPC data model (it is spawned with an `Npc` component
/// on the same entity) but ignores aggro-table scans and uses its owner as
/// a positional anchor instead.
#[derive(Component, Debug, Clone)]
pub struct Pet {
    pub owner: Entity,
    pub mode: PetMode,
    pub target: Option<Entity>,
    pub min_damage: i32,
    pub max_damage: i32,
}

impl Pet {
    pub fn new(owner: Entity, min_damage: i32, max_damage: i32) -> Self {
        Self {
            owner,
            mode: PetMode::Following,
            target: None,
            min_damage,
            max_damage,
        }
    }
}
