use bevy_ecs::prelude::{Entity, Event};

/// Raised whenever an attack lands, before death handling. Consumed by the
/// visibility/broadcast system so health-update frames stay decoupled from
/// the system that computed the hit.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    pub attacker: Entity,
    pub target: Entity,
    pub map_id: u32,
    pub damage: i32,
    pub critical: bool,
    pub target_hp_remaining: i32,
}
