use bevy_ecs::prelude::{Entity, World};
use eo_data::NpcDefinition;
use eo_game_common::Direction;
use log::warn;
use rand::Rng;

use crate::game::components::{
    ClientEntity, ClientEntityType, HealthPoints, Npc, NpcSpawnType, Position, Team,
};
use crate::game::resources::MapState;

#[derive(Debug, Clone, Copy)]
pub struct NpcSpawnRequest {
    pub map_id: u32,
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub spawn_type: u8,
    pub spawn_time_secs: u32,
    pub parent: Option<Entity>,
}

/// Searches within ±2 of the anchor for a legal spawn tile: 100 random
/// attempts requiring walkable-and-unoccupied, 100 more requiring only
/// walkable, then a deterministic linear scan of the same box.
pub fn find_spawn_position(
    map: &MapState,
    rng: &mut impl Rng,
    anchor_x: i32,
    anchor_y: i32,
    occupied: impl Fn(i32, i32) -> bool,
) -> Option<(i32, i32)> {
    for attempt in 0..200 {
        let x = anchor_x + rng.gen_range(-2..=2);
        let y = anchor_y + rng.gen_range(-2..=2);
        if !map.walkable(x, y, true) {
            continue;
        }
        if attempt < 100 && occupied(x, y) {
            continue;
        }
        return Some((x, y));
    }

    for y in (anchor_y - 2)..=(anchor_y + 2) {
        for x in (anchor_x - 2)..=(anchor_x + 2) {
            if map.walkable(x, y, true) && !occupied(x, y) {
                return Some((x, y));
            }
        }
    }

    None
}

/// Spawns one NPC instance, allocating its roster index on `map`. Returns
/// `None` (without marking the NPC alive) if no legal tile was found.
pub fn spawn_npc(
    world: &mut World,
    map: &mut MapState,
    def: &NpcDefinition,
    request: NpcSpawnRequest,
    rng: &mut impl Rng,
    occupied: impl Fn(i32, i32) -> bool,
) -> Option<Entity> {
    let (x, y) = match find_spawn_position(map, rng, request.anchor_x, request.anchor_y, occupied) {
        Some(pos) => pos,
        None => {
            warn!(
                "no legal spawn tile for npc def {} near ({}, {}) on map {}",
                def.id, request.anchor_x, request.anchor_y, request.map_id
            );
            return None;
        }
    };

    let Some(index) = map.allocate_npc_index() else {
        warn!("map {} has no free npc roster index", request.map_id);
        return None;
    };

    let mut npc = Npc::new(
        def.id,
        NpcSpawnType(request.spawn_type),
        request.anchor_x,
        request.anchor_y,
        request.spawn_time_secs,
        def.boss,
        def.child,
    );
    npc.parent = request.parent;

    let entity_type = if def.kind.is_passive_or_aggressive() {
        ClientEntityType::Monster
    } else {
        ClientEntityType::Npc
    };

    let entity = world
        .spawn((
            npc,
            Position::new(request.map_id, x, y, Direction::Down),
            HealthPoints::new(def.hp),
            Team::Monster,
            ClientEntity {
                id: eo_game_common::messages::ClientEntityId(index as u16),
                entity_type,
                map_id: request.map_id,
            },
        ))
        .id();

    map.npcs.push(entity);
    Some(entity)
}

/// Spawns a boss and every queued child, linking each child's `parent` to
/// the boss entity. Children never fail the whole spawn when individually
/// unplaceable — each is attempted independently and skipped with a
/// warning, matching the per-spawn failure handling above.
pub fn spawn_boss_and_children(
    world: &mut World,
    map: &mut MapState,
    boss_def: &NpcDefinition,
    boss_request: NpcSpawnRequest,
    children: &[(&NpcDefinition, NpcSpawnRequest)],
    rng: &mut impl Rng,
    occupied: impl Fn(i32, i32) -> bool + Copy,
) -> Option<Entity> {
    let boss_map_id = boss_request.map_id;
    let boss = spawn_npc(world, map, boss_def, boss_request, rng, occupied)?;

    for (child_def, mut child_request) in children.iter().copied() {
        child_request.parent = Some(boss);
        child_request.map_id = boss_map_id;
        spawn_npc(world, map, child_def, child_request, rng, occupied);
    }

    Some(boss)
}
