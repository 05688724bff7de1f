mod chest_refill_system;
mod kill_system;
mod monster_spawn_system;
mod npc_ai_system;
mod npc_recover_system;
mod pet_ai_system;
mod player_attack_system;
mod visibility_system;
mod world_time_system;

pub use chest_refill_system::chest_refill_system;
pub use kill_system::kill_system;
pub use monster_spawn_system::monster_spawn_system;
pub use npc_ai_system::npc_ai_system;
pub use npc_recover_system::npc_recover_system;
pub use pet_ai_system::pet_ai_system;
pub use player_attack_system::player_attack_system;
pub use visibility_system::movement_visibility_system;
pub use world_time_system::world_time_system;
