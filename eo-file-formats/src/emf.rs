use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::reader::{EoFileReader, ReaderError};
use crate::tile::{Tile, TileGrid, TileTag};

#[derive(Debug, Error)]
pub enum EmfReadError {
    #[error(transparent)]
    Reader(#[from] ReaderError),
    #[error("map dimensions ({width}x{height}) exceed the configured maximum")]
    DimensionsTooLarge { width: u32, height: u32 },
    #[error("failed to open map file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorSpec {
    NoDoor,
    Door,
    KeyedBlue,
    KeyedGreen,
    KeyedRed,
}

impl DoorSpec {
    fn from_byte(byte: u8) -> DoorSpec {
        match byte {
            1 => DoorSpec::Door,
            2 => DoorSpec::KeyedBlue,
            3 => DoorSpec::KeyedGreen,
            4 => DoorSpec::KeyedRed,
            _ => DoorSpec::NoDoor,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Warp {
    pub target_map: u32,
    pub target_x: i32,
    pub target_y: i32,
    pub level_requirement: u32,
    pub door: DoorSpec,
}

#[derive(Debug, Clone, Copy)]
pub struct NpcSpawnRecord {
    pub x: i32,
    pub y: i32,
    pub npc_def_id: u32,
    pub spawn_type: u8,
    pub spawn_time: u32,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ChestSpawnRow {
    pub x: i32,
    pub y: i32,
    pub slot: u8,
    pub item_id: u32,
    pub refill_minutes: u32,
    pub amount: u32,
}

#[derive(Debug, Clone)]
pub struct EmfFile {
    pub revision: u32,
    pub pk: bool,
    pub width: u32,
    pub height: u32,
    pub scroll: u32,
    pub relog_x: u32,
    pub relog_y: u32,
    pub tiles: TileGrid,
    pub warps: HashMap<(i32, i32), Warp>,
    pub npc_spawns: Vec<NpcSpawnRecord>,
    pub chest_spawn_rows: Vec<ChestSpawnRow>,
}

fn skip_fixed_width_array(reader: &mut EoFileReader, record_width: usize) -> Result<(), EmfReadError> {
    let count = reader.read_packed_number()? as usize;
    reader.read_bytes(count * record_width)?;
    Ok(())
}

impl EmfFile {
    /// Memory-maps `path` and parses it in place, avoiding a full-file copy
    /// for maps that are only read once at load time.
    pub fn load_from_file(path: &Path, max_dimension: u32) -> Result<EmfFile, EmfReadError> {
        let file = std::fs::File::open(path)?;
        let mmap = unsafe { memmap::Mmap::map(&file)? };
        Self::read(&mmap, max_dimension)
    }

    /// Parses a complete EMF file. Every offset, length, and inner-array
    /// count is validated through `EoFileReader`; any read past the end of
    /// the buffer fails the whole load rather than producing a partially
    /// built map.
    pub fn read(bytes: &[u8], max_dimension: u32) -> Result<EmfFile, EmfReadError> {
        let mut reader = EoFileReader::new(bytes);

        let revision = reader.read_u32()?;
        let pk = reader.read_u8()? != 0;

        let width = reader.read_packed_number()?.saturating_sub(1);
        let height = reader.read_packed_number()?.saturating_sub(1);
        let scroll = reader.read_packed_number()?;
        let relog_x = reader.read_packed_number()?;
        let relog_y = reader.read_packed_number()?;

        if width > max_dimension || height > max_dimension {
            return Err(EmfReadError::DimensionsTooLarge { width, height });
        }

        // Three skipped outer-arrays of fixed record widths (8, 4, 12 bytes).
        skip_fixed_width_array(&mut reader, 8)?;
        skip_fixed_width_array(&mut reader, 4)?;
        skip_fixed_width_array(&mut reader, 12)?;

        let mut tiles = TileGrid::new(width, height);
        let tile_row_count = reader.read_packed_number()?;
        for _ in 0..tile_row_count {
            let y = reader.read_packed_number()? as i32;
            let inner_count = reader.read_packed_number()?;
            for _ in 0..inner_count {
                let x = reader.read_packed_number()? as i32;
                let tag = TileTag::from_byte(reader.read_u8()?);
                tiles.set_tag(x, y, tag);
            }
        }

        let mut warps = HashMap::new();
        let warp_row_count = reader.read_packed_number()?;
        for _ in 0..warp_row_count {
            let y = reader.read_packed_number()? as i32;
            let inner_count = reader.read_packed_number()?;
            for _ in 0..inner_count {
                let x = reader.read_packed_number()? as i32;
                let target_map = reader.read_packed_number()?;
                let target_x = reader.read_packed_number()? as i32;
                let target_y = reader.read_packed_number()? as i32;
                let level_requirement = reader.read_packed_number()?;
                let door = DoorSpec::from_byte(reader.read_u8()?);
                tiles.set_warp(x, y, true);
                warps.insert(
                    (x, y),
                    Warp {
                        target_map,
                        target_x,
                        target_y,
                        level_requirement,
                        door,
                    },
                );
            }
        }

        let mut npc_spawns = Vec::new();
        let npc_spawn_count = reader.read_packed_number()?;
        for _ in 0..npc_spawn_count {
            let x = reader.read_packed_number()? as i32;
            let y = reader.read_packed_number()? as i32;
            let npc_def_id = reader.read_packed_number()?;
            let spawn_type = reader.read_u8()?;
            let spawn_time = reader.read_packed_number()?;
            let amount = reader.read_packed_number()?;

            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                log::warn!(
                    "skipping out-of-bounds npc spawn at ({x}, {y}) for def {npc_def_id}"
                );
                continue;
            }

            npc_spawns.push(NpcSpawnRecord {
                x,
                y,
                npc_def_id,
                spawn_type,
                spawn_time,
                amount,
            });
        }

        // Skipped outer-array of width 4.
        skip_fixed_width_array(&mut reader, 4)?;

        let mut chest_spawn_rows = Vec::new();
        let chest_row_count = reader.read_packed_number()?;
        for _ in 0..chest_row_count {
            let x = reader.read_packed_number()? as i32;
            let y = reader.read_packed_number()? as i32;
            let slot = reader.read_u8()?;
            let item_id = reader.read_packed_number()?;
            let refill_minutes = reader.read_packed_number()?;
            let amount = reader.read_packed_number()?;

            if tiles.get(x, y).map(|t: Tile| t.tag) != Some(TileTag::Chest) {
                log::warn!("discarding chest refill row at ({x}, {y}): no chest tile there");
                continue;
            }

            chest_spawn_rows.push(ChestSpawnRow {
                x,
                y,
                slot,
                item_id,
                refill_minutes,
                amount,
            });
        }

        Ok(EmfFile {
            revision,
            pk,
            width,
            height,
            scroll,
            relog_x,
            relog_y,
            tiles,
            warps,
            npc_spawns,
            chest_spawn_rows,
        })
    }

    /// Coordinates of every tile tagged `Chest`, used to seed chest records
    /// even for slots with no refill row (e.g. user-deposit-only chests).
    pub fn chest_tile_positions(&self) -> Vec<(i32, i32)> {
        let mut positions = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.tiles.get(x, y).map(|t| t.tag) == Some(TileTag::Chest) {
                    positions.push((x, y));
                }
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_packed(bytes: &mut Vec<u8>, value: u32) {
        bytes.extend_from_slice(&eo_game_common::number::encode(value));
    }

    fn minimal_emf_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&42u32.to_le_bytes()); // revision
        bytes.push(0); // pk
        push_packed(&mut bytes, 3 + 1); // width+1 = 3
        push_packed(&mut bytes, 3 + 1); // height+1 = 3
        push_packed(&mut bytes, 0); // scroll
        push_packed(&mut bytes, 0); // relog x
        push_packed(&mut bytes, 0); // relog y

        push_packed(&mut bytes, 0); // skip array 1 (width 8)
        push_packed(&mut bytes, 0); // skip array 2 (width 4)
        push_packed(&mut bytes, 0); // skip array 3 (width 12)

        // tile rows: one row, one chest tile at (1,1)
        push_packed(&mut bytes, 1);
        push_packed(&mut bytes, 1); // y
        push_packed(&mut bytes, 1); // inner count
        push_packed(&mut bytes, 1); // x
        bytes.push(TileTag::Chest as u8);

        // warps: none
        push_packed(&mut bytes, 0);

        // npc spawns: none
        push_packed(&mut bytes, 0);

        // skip array width 4
        push_packed(&mut bytes, 0);

        // chest refill rows: one row matching the chest tile
        push_packed(&mut bytes, 1);
        push_packed(&mut bytes, 1); // x
        push_packed(&mut bytes, 1); // y
        bytes.push(1); // slot
        push_packed(&mut bytes, 100); // item id
        push_packed(&mut bytes, 1); // refill minutes
        push_packed(&mut bytes, 3); // amount

        bytes
    }

    #[test]
    fn parses_dimensions_and_decrements_width_height() {
        let bytes = minimal_emf_bytes();
        let emf = EmfFile::read(&bytes, 255).unwrap();
        assert_eq!(emf.width, 3);
        assert_eq!(emf.height, 3);
        assert_eq!(emf.revision, 42);
    }

    #[test]
    fn chest_tile_gets_its_refill_row_attached() {
        let bytes = minimal_emf_bytes();
        let emf = EmfFile::read(&bytes, 255).unwrap();
        assert_eq!(emf.chest_tile_positions(), vec![(1, 1)]);
        assert_eq!(emf.chest_spawn_rows.len(), 1);
        assert_eq!(emf.chest_spawn_rows[0].item_id, 100);
    }

    #[test]
    fn mismatched_chest_refill_row_is_discarded() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.push(0);
        push_packed(&mut bytes, 2 + 1);
        push_packed(&mut bytes, 2 + 1);
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0); // no tile rows
        push_packed(&mut bytes, 0); // no warps
        push_packed(&mut bytes, 0); // no npc spawns
        push_packed(&mut bytes, 0); // skip array
        push_packed(&mut bytes, 1); // one chest refill row, no chest tile there
        push_packed(&mut bytes, 0);
        push_packed(&mut bytes, 0);
        bytes.push(0);
        push_packed(&mut bytes, 1);
        push_packed(&mut bytes, 1);
        push_packed(&mut bytes, 1);

        let emf = EmfFile::read(&bytes, 255).unwrap();
        assert!(emf.chest_spawn_rows.is_empty());
    }

    #[test]
    fn truncated_file_fails_cleanly() {
        let bytes = [0u8; 2];
        assert!(EmfFile::read(&bytes, 255).is_err());
    }
}
