use bevy_ecs::prelude::Component;

/// The subset of a character the map core is allowed to mutate directly:
/// position, direction (via `Position`), hp (via `HealthPoints`), tp,
/// experience, and level. Deeper state — inventory, quests, paperdoll —
/// lives on the player-session collaborator and is out of scope here.
#[derive(Component, Debug, Clone)]
pub struct CharacterCore {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub tp: i32,
    pub max_tp: i32,
    pub experience: u64,
    pub admin_level: u8,
    pub autoloot: bool,
    pub autopotion: bool,
}

impl CharacterCore {
    /// Applies `amount` experience, returning how many times the character
    /// leveled up (a single kill can award more than one level).
    pub fn grant_experience(&mut self, amount: u64, exp_table: &[u64], max_level: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut levels_gained = 0;

        while self.level < max_level {
            let Some(&required) = exp_table.get(self.level as usize) else {
                break;
            };
            if self.experience < required {
                break;
            }
            self.level += 1;
            levels_gained += 1;
        }

        levels_gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_multiple_levels_in_one_award() {
        let mut character = CharacterCore {
            id: 1,
            name: "Hero".into(),
            level: 1,
            tp: 0,
            max_tp: 0,
            experience: 0,
            admin_level: 0,
            autoloot: false,
            autopotion: false,
        };
        let exp_table = vec![100, 100, 100];
        let gained = character.grant_experience(250, &exp_table, 10);
        assert_eq!(gained, 2);
        assert_eq!(character.level, 3);
    }
}
