use bevy_ecs::prelude::Component;

/// Broad hostility grouping. Characters are always `Player`; monsters and
/// other NPCs default to `Monster`; a pet adopts its owner's team so it
/// never aggroes its own owner's allies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Monster,
}

impl Team {
    pub fn is_hostile_to(self, other: Team) -> bool {
        self != other
    }
}
