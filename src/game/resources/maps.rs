use std::collections::{HashMap, HashSet};
use std::path::Path;

use bevy_ecs::prelude::{Entity, Resource};
use eo_data::WorldConfig;
use eo_file_formats::{EmfFile, EmfReadError, TileGrid, Warp};
use thiserror::Error;

/// Wraps a map file's read failure with which map id it was for, so the
/// caller can log a single line instead of threading the id through
/// `EmfReadError` itself.
#[derive(Debug, Error)]
#[error("failed to load map {map_id} from {path}: {source}")]
pub struct MapLoadError {
    pub map_id: u32,
    pub path: String,
    #[source]
    pub source: EmfReadError,
}

/// Memory-maps and parses the map file for `map_id`, reporting failure with
/// map-id context attached (§2.2).
pub fn load_map_file(path: &Path, map_id: u32, max_dimension: u32) -> Result<EmfFile, MapLoadError> {
    EmfFile::load_from_file(path, max_dimension).map_err(|source| MapLoadError {
        map_id,
        path: path.display().to_string(),
        source,
    })
}

/// Per-map runtime state. Characters are tracked only as a participation
/// list — the owning record lives on the player-session collaborator, this
/// is a weak reference in spirit (an ECS `Entity` that silently becomes
/// invalid once despawned).
pub struct MapState {
    pub id: u32,
    pub exists: bool,
    pub revision: u32,
    pub pk: bool,
    pub tiles: TileGrid,
    pub warps: HashMap<(i32, i32), Warp>,
    pub characters: Vec<Entity>,
    pub npcs: Vec<Entity>,
    pub chests: Vec<Entity>,
    pub ground_items: Vec<Entity>,
    next_npc_index: u8,
    used_npc_indices: HashSet<u8>,
    used_ground_item_uids: HashSet<u32>,
}

impl MapState {
    pub fn empty_inert(id: u32) -> Self {
        Self {
            id,
            exists: false,
            revision: 0,
            pk: false,
            tiles: TileGrid::new(0, 0),
            warps: HashMap::new(),
            characters: Vec::new(),
            npcs: Vec::new(),
            chests: Vec::new(),
            ground_items: Vec::new(),
            next_npc_index: 1,
            used_npc_indices: HashSet::new(),
            used_ground_item_uids: HashSet::new(),
        }
    }

    pub fn from_emf(id: u32, emf: &EmfFile) -> Self {
        Self {
            id,
            exists: true,
            revision: emf.revision,
            pk: emf.pk,
            tiles: emf.tiles.clone(),
            warps: emf.warps.clone(),
            characters: Vec::new(),
            npcs: Vec::new(),
            chests: Vec::new(),
            ground_items: Vec::new(),
            next_npc_index: 1,
            used_npc_indices: HashSet::new(),
            used_ground_item_uids: HashSet::new(),
        }
    }

    pub fn walkable(&self, x: i32, y: i32, as_npc: bool) -> bool {
        self.tiles.walkable(x, y, as_npc)
    }

    /// PvP is legal here if the map itself is flagged `pk`, or the world
    /// is under global PK and this map isn't in the exceptions list.
    pub fn pk_allowed(&self, config: &WorldConfig) -> bool {
        self.pk || (config.global_pk && !config.pk_except.contains(&self.id))
    }

    /// Allocates the lowest free NPC index in `1..=255`; `None` once the
    /// map's 255-index space is exhausted.
    pub fn allocate_npc_index(&mut self) -> Option<u8> {
        for candidate in 1..=255u8 {
            if !self.used_npc_indices.contains(&candidate) {
                self.used_npc_indices.insert(candidate);
                self.next_npc_index = candidate.saturating_add(1);
                return Some(candidate);
            }
        }
        None
    }

    pub fn free_npc_index(&mut self, index: u8) {
        self.used_npc_indices.remove(&index);
    }

    /// Allocates the lowest free positive ground-item uid on this map.
    pub fn allocate_ground_item_uid(&mut self) -> u32 {
        let mut candidate = 1u32;
        while self.used_ground_item_uids.contains(&candidate) {
            candidate += 1;
        }
        self.used_ground_item_uids.insert(candidate);
        candidate
    }

    pub fn free_ground_item_uid(&mut self, uid: u32) {
        self.used_ground_item_uids.remove(&uid);
    }
}

/// Process-wide map container: a 1-based vector with a guaranteed fallback
/// at index 1 so lookups for an id beyond the live range never panic.
#[derive(Resource)]
pub struct MapList {
    maps: Vec<Option<MapState>>,
}

impl MapList {
    pub fn new() -> Self {
        let mut maps = Vec::new();
        maps.push(None); // index 0 unused, ids are 1-based
        maps.push(Some(MapState::empty_inert(1)));
        Self { maps }
    }

    fn ensure_capacity(&mut self, id: u32) {
        while (self.maps.len() as u32) <= id {
            self.maps.push(None);
        }
    }

    /// Replaces (or inserts) the slot for `id`. On load failure the caller
    /// passes `None` for `emf`, which still installs an inert-but-addressable
    /// placeholder rather than leaving the slot empty.
    pub fn install(&mut self, id: u32, emf: Option<&EmfFile>) {
        self.ensure_capacity(id);
        let state = match emf {
            Some(emf) => MapState::from_emf(id, emf),
            None => MapState::empty_inert(id),
        };
        self.maps[id as usize] = Some(state);
    }

    /// A reload: if the revision is unchanged, does nothing. Otherwise
    /// rebuilds tiles/warps/npcs/chests but preserves the existing
    /// character participation list.
    pub fn reload(&mut self, id: u32, emf: &EmfFile) -> bool {
        if let Some(Some(existing)) = self.maps.get(id as usize) {
            if existing.revision == emf.revision {
                return false;
            }
        }
        let preserved_characters = self
            .maps
            .get(id as usize)
            .and_then(|slot| slot.as_ref())
            .map(|state| state.characters.clone())
            .unwrap_or_default();

        let mut rebuilt = MapState::from_emf(id, emf);
        rebuilt.characters = preserved_characters;
        self.ensure_capacity(id);
        self.maps[id as usize] = Some(rebuilt);
        true
    }

    pub fn get(&self, id: u32) -> &MapState {
        self.maps
            .get(id as usize)
            .and_then(|slot| slot.as_ref())
            .unwrap_or_else(|| self.maps[1].as_ref().expect("map 1 always exists"))
    }

    pub fn get_mut(&mut self, id: u32) -> &mut MapState {
        if self.maps.get(id as usize).map(Option::is_some) != Some(true) {
            return self.maps[1].as_mut().expect("map 1 always exists");
        }
        self.maps[id as usize].as_mut().expect("checked Some above")
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        (1..self.maps.len() as u32).filter(|&id| self.maps[id as usize].is_some())
    }
}

impl Default for MapList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_map_id_falls_back_to_map_one() {
        let maps = MapList::new();
        assert_eq!(maps.get(9999).id, 1);
    }

    #[test]
    fn failed_load_still_installs_an_inert_addressable_slot() {
        let mut maps = MapList::new();
        maps.install(5, None);
        let state = maps.get(5);
        assert_eq!(state.id, 5);
        assert!(!state.exists);
        assert!(!state.walkable(0, 0, false));
    }

    #[test]
    fn npc_index_allocation_reuses_freed_slots() {
        let mut state = MapState::empty_inert(1);
        let a = state.allocate_npc_index().unwrap();
        let b = state.allocate_npc_index().unwrap();
        assert_eq!((a, b), (1, 2));
        state.free_npc_index(a);
        let c = state.allocate_npc_index().unwrap();
        assert_eq!(c, 1);
    }

    #[test]
    fn ground_item_uid_is_lowest_free_positive_integer() {
        let mut state = MapState::empty_inert(1);
        let a = state.allocate_ground_item_uid();
        let b = state.allocate_ground_item_uid();
        assert_eq!((a, b), (1, 2));
        state.free_ground_item_uid(a);
        assert_eq!(state.allocate_ground_item_uid(), 1);
    }
}
