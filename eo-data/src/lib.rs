#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod drop;
pub mod formula;
pub mod item;
pub mod npc;

pub use config::WorldConfig;
pub use drop::{DropRow, DropTable};
pub use formula::{FormulaProgram, Formulas, VariableBag};
pub use item::{ItemDatabase, ItemDefinition, ItemId, ItemType};
pub use npc::{NpcDatabase, NpcDefId, NpcDefinition, NpcKind};
