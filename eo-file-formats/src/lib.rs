pub mod emf;
pub mod reader;
pub mod tile;

pub use emf::{ChestSpawnRow, DoorSpec, EmfFile, EmfReadError, NpcSpawnRecord, Warp};
pub use reader::{EoFileReader, ReaderError};
pub use tile::{in_range, Tile, TileGrid, TileTag};
