use serde::{Deserialize, Serialize};

pub type NpcDefId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcKind {
    Friendly,
    Passive,
    Aggressive,
    Quest,
    Shop,
    Trainer,
    Bank,
    Barber,
    Guild,
    Priest,
    Law,
    Skills,
    Inn,
    Pet,
}

impl NpcKind {
    pub fn is_aggressive(self) -> bool {
        matches!(self, NpcKind::Aggressive)
    }

    pub fn is_passive_or_aggressive(self) -> bool {
        matches!(self, NpcKind::Passive | NpcKind::Aggressive)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcDefinition {
    pub id: NpcDefId,
    pub name: String,
    pub hp: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub accuracy: i32,
    pub evade: i32,
    pub armor: i32,
    pub experience: u32,
    pub kind: NpcKind,
    pub boss: bool,
    pub child: bool,
}

impl NpcDefinition {
    fn sentinel() -> NpcDefinition {
        NpcDefinition {
            id: 0,
            name: String::new(),
            hp: 0,
            min_damage: 0,
            max_damage: 0,
            accuracy: 0,
            evade: 0,
            armor: 0,
            experience: 0,
            kind: NpcKind::Friendly,
            boss: false,
            child: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NpcDatabase {
    rows: Vec<NpcDefinition>,
    sentinel: NpcDefinition,
}

impl NpcDatabase {
    pub fn new(rows: Vec<NpcDefinition>) -> Self {
        Self {
            rows,
            sentinel: NpcDefinition::sentinel(),
        }
    }

    pub fn get(&self, id: NpcDefId) -> &NpcDefinition {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .unwrap_or(&self.sentinel)
    }

    pub fn exists(&self, id: NpcDefId) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_def_id_is_reported_as_not_existing() {
        let db = NpcDatabase::new(vec![]);
        assert!(!db.exists(7));
        assert_eq!(db.get(7).id, 0);
    }
}
