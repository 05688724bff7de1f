use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Per-tile tag, decoded from the EMF tile-spec outer-array (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, Serialize, Deserialize)]
pub enum TileTag {
    None = 0,
    Wall = 1,
    ChairDown = 2,
    ChairLeft = 3,
    ChairUp = 4,
    ChairRight = 5,
    Chest = 6,
    BankVault = 7,
    NpcBoundary = 8,
    MapEdge = 9,
    FakeWall = 10,
    BoardFirst = 11,
    BoardSecond = 12,
    Jukebox = 13,
    Jump = 14,
    Water = 15,
    Arena = 16,
    AmbientSource = 17,
    SpikeDamage = 18,
    SpikeTimed = 19,
    SpikeInvisible = 20,
}

impl TileTag {
    pub fn from_byte(byte: u8) -> TileTag {
        FromPrimitive::from_u8(byte).unwrap_or(TileTag::None)
    }

    fn is_chair(self) -> bool {
        matches!(
            self,
            TileTag::ChairDown | TileTag::ChairLeft | TileTag::ChairUp | TileTag::ChairRight
        )
    }

    fn is_board(self) -> bool {
        matches!(self, TileTag::BoardFirst | TileTag::BoardSecond)
    }

    /// Blocks every walker regardless of kind.
    fn blocks_everyone(self) -> bool {
        self == TileTag::Wall
            || self == TileTag::Chest
            || self == TileTag::BankVault
            || self.is_chair()
            || self.is_board()
    }

    /// Blocks only NPCs (players may stand here).
    fn blocks_npc_only(self) -> bool {
        self == TileTag::NpcBoundary
    }
}

/// A single tile: its tag plus whether a warp target is attached.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub tag: TileTag,
    pub has_warp: bool,
}

impl Tile {
    pub fn new(tag: TileTag) -> Self {
        Self {
            tag,
            has_warp: false,
        }
    }

    /// `false` if the tile tag blocks this kind of walker, or if an NPC
    /// is trying to cross a warp tile (NPCs may never cross warps).
    pub fn walkable(self, as_npc: bool) -> bool {
        if self.tag.blocks_everyone() {
            return false;
        }
        if as_npc && self.tag.blocks_npc_only() {
            return false;
        }
        if as_npc && self.has_warp {
            return false;
        }
        true
    }
}

/// The map's tile grid, row-major, `(0,0)` at the top-left.
#[derive(Debug, Clone)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(TileTag::None); (width * height) as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    pub fn set_tag(&mut self, x: i32, y: i32, tag: TileTag) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i].tag = tag;
        }
    }

    pub fn set_warp(&mut self, x: i32, y: i32, has_warp: bool) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i].has_warp = has_warp;
        }
    }

    /// `false` outside the grid; otherwise delegates to the tile's own
    /// walkability rule.
    pub fn walkable(&self, x: i32, y: i32, as_npc: bool) -> bool {
        match self.get(x, y) {
            Some(tile) => tile.walkable(as_npc),
            None => false,
        }
    }
}

/// Two observers are in range when their Chebyshev distance is within
/// `see_distance`.
pub fn in_range(ax: i32, ay: i32, bx: i32, by: i32, see_distance: i32) -> bool {
    (ax - bx).abs().max((ay - by).abs()) <= see_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let grid = TileGrid::new(4, 4);
        assert!(!grid.walkable(-1, 0, false));
        assert!(!grid.walkable(4, 0, false));
    }

    #[test]
    fn npc_boundary_blocks_only_npcs() {
        let mut grid = TileGrid::new(4, 4);
        grid.set_tag(1, 1, TileTag::NpcBoundary);
        assert!(grid.walkable(1, 1, false));
        assert!(!grid.walkable(1, 1, true));
    }

    #[test]
    fn wall_and_chest_and_chair_block_everyone() {
        let mut grid = TileGrid::new(4, 4);
        for (pos, tag) in [
            ((0, 0), TileTag::Wall),
            ((1, 0), TileTag::Chest),
            ((2, 0), TileTag::ChairDown),
            ((3, 0), TileTag::BankVault),
        ] {
            grid.set_tag(pos.0, pos.1, tag);
            assert!(!grid.walkable(pos.0, pos.1, false));
            assert!(!grid.walkable(pos.0, pos.1, true));
        }
    }

    #[test]
    fn npc_may_not_cross_a_warp_tile() {
        let mut grid = TileGrid::new(4, 4);
        grid.set_warp(2, 2, true);
        assert!(grid.walkable(2, 2, false));
        assert!(!grid.walkable(2, 2, true));
    }

    #[test]
    fn chebyshev_in_range_predicate() {
        assert!(in_range(0, 0, 3, 3, 3));
        assert!(!in_range(0, 0, 4, 0, 3));
    }
}
