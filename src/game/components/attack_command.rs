use bevy_ecs::prelude::{Component, Entity};

/// A queued player-initiated attack (4.6/4.7), mirroring the donor's
/// `CommandData::Attack`: the player-session collaborator inserts this for
/// one tick naming the entity the client swung at, and `player_attack_system`
/// consumes and removes it.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackCommand {
    pub target: Entity,
}
