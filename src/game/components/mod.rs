mod attack_command;
mod chest;
mod character;
mod client_entity;
mod combat_stats;
mod ground_item;
mod health_points;
mod monster_spawn_point;
mod npc;
mod party;
mod pet;
mod position;
mod team;
mod unregistered_npcs;

pub use attack_command::AttackCommand;
pub use chest::{Chest, ChestItem, ChestSpawnSlot};
pub use character::CharacterCore;
pub use client_entity::{ClientEntity, ClientEntityType};
pub use combat_stats::CombatStats;
pub use ground_item::GroundItem;
pub use unregistered_npcs::UnregisteredNpcs;
pub use health_points::HealthPoints;
pub use monster_spawn_point::MonsterSpawnPoint;
pub use npc::{Npc, NpcSpawnType, NPC_ACT_SPEED_TABLE_SECS};
pub use party::{Party, PartyMembership};
pub use pet::{Pet, PetMode};
pub use position::Position;
pub use team::Team;
