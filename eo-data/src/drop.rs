use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::npc::NpcDefId;
use crate::item::ItemId;

/// One candidate drop: an item/amount pair plus its independent roll chance
/// in percent (0.0..=100.0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DropRow {
    pub item_id: ItemId,
    pub amount: u32,
    pub chance_percent: f32,
}

/// Per-NPC-def drop rows, keyed by def id. An unlisted def id has no drops.
#[derive(Debug, Clone, Default)]
pub struct DropTable {
    rows: HashMap<NpcDefId, Vec<DropRow>>,
}

impl DropTable {
    pub fn new(rows: HashMap<NpcDefId, Vec<DropRow>>) -> Self {
        Self { rows }
    }

    pub fn rows_for(&self, npc_def_id: NpcDefId) -> &[DropRow] {
        self.rows.get(&npc_def_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_def_id_has_no_drop_rows() {
        let table = DropTable::new(HashMap::new());
        assert!(table.rows_for(1).is_empty());
    }
}
