use bevy_ecs::prelude::Component;

/// A character's computed combat numbers, the same role the donor's
/// `AbilityValues` plays for its full stat sheet: equipment, base stats and
/// buffs are all out of scope here, so the player-session collaborator
/// folds them down into the handful of numbers the attack formula actually
/// reads before handing the entity to the map core.
#[derive(Component, Debug, Clone, Copy)]
pub struct CombatStats {
    pub min_damage: i32,
    pub max_damage: i32,
    pub accuracy: i32,
    pub evade: i32,
    pub armor: i32,
    pub ranged_weapon: bool,
}
