use serde::{Deserialize, Serialize};

pub type ItemId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Static,
    Weapon,
    Shield,
    Armor,
    Hat,
    Boots,
    Gloves,
    Accessory,
    Belt,
    Necklace,
    Ring,
    Armlet,
    Bracer,
    Heal,
    Teleport,
    ExpReward,
    StatReward,
    SkillReward,
    Key,
    Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub subtype: u32,
    pub gender: u8,
    pub doll_graphic: u32,
}

impl ItemDefinition {
    fn sentinel() -> ItemDefinition {
        ItemDefinition {
            id: 0,
            name: String::new(),
            item_type: ItemType::Static,
            subtype: 0,
            gender: 0,
            doll_graphic: 0,
        }
    }
}

/// Read-only after load. Lookups on an id outside the loaded range return a
/// zero-id sentinel row rather than failing, matching the donor's
/// `*Database::get_*` APIs that never propagate a lookup error.
#[derive(Debug, Clone)]
pub struct ItemDatabase {
    rows: Vec<ItemDefinition>,
    sentinel: ItemDefinition,
}

impl ItemDatabase {
    pub fn new(rows: Vec<ItemDefinition>) -> Self {
        Self {
            rows,
            sentinel: ItemDefinition::sentinel(),
        }
    }

    pub fn get(&self, id: ItemId) -> &ItemDefinition {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .unwrap_or(&self.sentinel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_returns_sentinel_row() {
        let db = ItemDatabase::new(vec![]);
        assert_eq!(db.get(999).id, 0);
    }

    #[test]
    fn known_id_returns_its_row() {
        let db = ItemDatabase::new(vec![ItemDefinition {
            id: 5,
            name: "Potion".into(),
            item_type: ItemType::Heal,
            subtype: 0,
            gender: 0,
            doll_graphic: 0,
        }]);
        assert_eq!(db.get(5).name, "Potion");
    }
}
