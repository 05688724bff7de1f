use bevy_ecs::prelude::Resource;
use eo_data::{DropTable, Formulas, ItemDatabase, NpcDatabase, WorldConfig};

/// Read-only after load: static tables plus the configuration snapshot,
/// bundled the way the donor's `GameData` resource bundles its `Arc`-shared
/// databases.
#[derive(Resource)]
pub struct GameData {
    pub items: ItemDatabase,
    pub npcs: NpcDatabase,
    pub drops: DropTable,
    pub formulas: Formulas,
    pub config: WorldConfig,
    pub exp_table: Vec<u64>,
}

impl GameData {
    pub fn new(
        items: ItemDatabase,
        npcs: NpcDatabase,
        drops: DropTable,
        formulas: Formulas,
        config: WorldConfig,
    ) -> Self {
        let max_level = config.max_level.max(1) as usize;
        let exp_table = (1..=max_level).map(|level| (level as u64).pow(3) * 100).collect();
        Self {
            items,
            npcs,
            drops,
            formulas,
            config,
            exp_table,
        }
    }
}
