use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Debug, Clone)]
pub struct Party {
    pub leader: Entity,
    pub members: Vec<Entity>,
    pub temp_exp_sum: u64,
}

impl Party {
    pub fn new(leader: Entity) -> Self {
        Self {
            leader,
            members: vec![leader],
            temp_exp_sum: 0,
        }
    }
}

/// A character belongs to at most one party; this points back at the
/// `Party` entity it is a member of.
#[derive(Component, Debug, Clone, Copy)]
pub struct PartyMembership {
    pub party: Entity,
}
