mod damage_event;
mod npc_death_event;

pub use damage_event::DamageEvent;
pub use npc_death_event::NpcDeathEvent;
