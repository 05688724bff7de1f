use std::collections::HashMap;

use bevy_ecs::prelude::{Entity, EventWriter, Query, Res, ResMut, With, Without};
use eo_game_common::Direction;
use rand::Rng;

use crate::game::combat::{resolve_attack, AttackerStats, DefenderStats};
use crate::game::components::{
    CharacterCore, ClientEntity, CombatStats, HealthPoints, Npc, Pet, Position, NPC_ACT_SPEED_TABLE_SECS,
};
use crate::game::events::DamageEvent;
use crate::game::resources::{GameData, MapList, MapState, ServerMessages, WorldRng, WorldTime};

fn try_walk(position: &mut Position, direction: Direction, map: &MapState) -> bool {
    position.direction = direction;
    let (dx, dy) = direction.step();
    let (new_x, new_y) = (position.x + dx, position.y + dy);
    if map.walkable(new_x, new_y, true) {
        position.x = new_x;
        position.y = new_y;
        true
    } else {
        false
    }
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    match rng.gen_range(0..4) {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}

/// Walks toward `(target_x, target_y)`; a blocked step first rotates 90°
/// then falls back to a random direction (4.4 step 5).
fn walk_toward(position: &mut Position, target_x: i32, target_y: i32, map: &MapState, rng: &mut impl Rng) {
    let direction = Direction::towards(position.x, position.y, target_x, target_y);
    if try_walk(position, direction, map) {
        return;
    }
    let rotated = direction.rotated_90();
    if try_walk(position, rotated, map) {
        return;
    }
    try_walk(position, random_direction(rng), map);
}

/// Random-walk when no target is found: 60% step forward, 30% change
/// direction then step, 10% idle for 1..4 ticks.
fn random_walk(npc: &mut Npc, position: &mut Position, map: &MapState, rng: &mut impl Rng) {
    let roll = rng.gen_range(0..100);
    if roll < 10 {
        npc.walk_idle_for_ticks = rng.gen_range(1..=4);
        return;
    }
    if roll >= 70 {
        position.direction = random_direction(rng);
    }
    try_walk(position, position.direction, map);
}

/// Considers one damage-list attacker as a candidate aggro target: in
/// range and on the same map wins by distance first, ties broken by the
/// larger total damage dealt.
fn consider_attacker(
    characters: &Query<(Entity, &Position, &mut HealthPoints, &ClientEntity, Option<&CombatStats>), With<CharacterCore>>,
    position: &Position,
    chase_distance: i32,
    attacker: Entity,
    total_damage: i64,
    best: &mut Option<(Entity, i32, i64, i32, i32)>,
) {
    let Ok((char_entity, char_position, _, _, _)) = characters.get(attacker) else {
        return;
    };
    if char_position.map_id != position.map_id {
        return;
    }
    let distance = position.chebyshev_distance(char_position);
    if distance > chase_distance {
        return;
    }
    let better = match best {
        Some((_, best_distance, best_damage, _, _)) => {
            distance < *best_distance || (distance == *best_distance && total_damage > *best_damage)
        }
        None => true,
    };
    if better {
        *best = Some((char_entity, distance, total_damage, char_position.x, char_position.y));
    }
}

/// The per-tick NPC act cycle (4.4): wander, chase, attack. Pets are
/// excluded — they run their own follow/guard/attack loop.
#[allow(clippy::too_many_arguments)]
pub fn npc_ai_system(
    mut npcs: Query<(Entity, &mut Npc, &mut Position, &HealthPoints, &ClientEntity), Without<Pet>>,
    mut characters: Query<(Entity, &Position, &mut HealthPoints, &ClientEntity, Option<&CombatStats>), With<CharacterCore>>,
    maps: Res<MapList>,
    game_data: Res<GameData>,
    world_time: Res<WorldTime>,
    mut rng: ResMut<WorldRng>,
    mut messages: ResMut<ServerMessages>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let chase_distance = game_data.config.npc_chase_distance;
    let bored_ticks = WorldTime::ticks_for_seconds(game_data.config.npc_bored_timer_secs as f64);

    // Live bosses, snapshotted before the mutable pass below: used both to
    // re-link any orphaned child and to let a child inherit its boss's
    // aggro table.
    let boss_positions: Vec<(Entity, u32, i32, i32)> = npcs
        .iter()
        .filter(|(_, n, _, hp, _)| n.boss && hp.is_alive() && n.dead_since_tick.is_none())
        .map(|(e, _, pos, _, _)| (e, pos.map_id, pos.x, pos.y))
        .collect();

    let boss_damage: HashMap<Entity, Vec<(Entity, i64)>> = npcs
        .iter()
        .filter(|(_, n, _, hp, _)| n.boss && hp.is_alive())
        .map(|(e, n, _, _, _)| {
            let snapshot = n
                .damage_list
                .recent_attackers(world_time.ticks, bored_ticks)
                .map(|entry| (entry.attacker, entry.total_damage))
                .collect();
            (e, snapshot)
        })
        .collect();

    for (npc_entity, mut npc, mut position, hp, client) in npcs.iter_mut() {
        if !hp.is_alive() {
            continue;
        }

        // 4.4 step 1: a child spawned (or revived) without a live parent
        // link re-attaches to the nearest boss on its map.
        if npc.child && npc.parent.is_none() {
            npc.parent = boss_positions
                .iter()
                .filter(|(_, map_id, _, _)| *map_id == position.map_id)
                .min_by_key(|(_, _, bx, by)| {
                    position.chebyshev_distance(&Position::new(position.map_id, *bx, *by, position.direction))
                })
                .map(|(e, ..)| *e);
        }

        if npc.spawn_type.is_stationary() {
            continue;
        }
        if npc.walk_idle_for_ticks > 0 {
            npc.walk_idle_for_ticks -= 1;
            continue;
        }
        if npc.last_act_tick + npc.act_interval_ticks > world_time.ticks {
            continue;
        }

        let base_secs = NPC_ACT_SPEED_TABLE_SECS[(npc.spawn_type.0 as usize).min(6)];
        let jitter: f32 = rng.rng.gen_range(0.75..=1.25);
        npc.act_interval_ticks = WorldTime::ticks_for_seconds((base_secs * jitter) as f64);
        npc.last_act_tick = world_time.ticks;

        let def = game_data.npcs.get(npc.def_id);
        let map = maps.get(position.map_id);

        let mut target: Option<(Entity, i32, i32)> = None;

        if def.kind.is_passive_or_aggressive() {
            let mut best: Option<(Entity, i32, i64, i32, i32)> = None;
            for entry in npc.damage_list.recent_attackers(world_time.ticks, bored_ticks) {
                consider_attacker(&characters, &position, chase_distance, entry.attacker, entry.total_damage, &mut best);
            }
            if npc.child {
                if let Some(parent) = npc.parent {
                    if let Some(snapshot) = boss_damage.get(&parent) {
                        for &(attacker, total_damage) in snapshot {
                            consider_attacker(&characters, &position, chase_distance, attacker, total_damage, &mut best);
                        }
                    }
                }
            }
            target = best.map(|(e, _, _, x, y)| (e, x, y));
        }

        if target.is_none() && def.kind.is_aggressive() {
            let mut closest: Option<(Entity, i32, i32, i32)> = None;
            for (char_entity, char_position, char_hp, _, _) in characters.iter() {
                if char_position.map_id != position.map_id || !char_hp.is_alive() {
                    continue;
                }
                let distance = position.chebyshev_distance(char_position);
                if distance > chase_distance {
                    continue;
                }
                if closest.map(|(_, _, _, best_d)| distance < best_d).unwrap_or(true) {
                    closest = Some((char_entity, char_position.x, char_position.y, distance));
                }
            }
            target = closest.map(|(e, x, y, _)| (e, x, y));
        }

        match target {
            Some((target_entity, tx, ty)) => {
                if position.chebyshev_distance(&Position::new(position.map_id, tx, ty, position.direction)) <= 1
                {
                    position.direction = Direction::towards(position.x, position.y, tx, ty);
                    let Ok((_, target_position, mut target_hp, target_client, target_combat_stats)) =
                        characters.get_mut(target_entity)
                    else {
                        continue;
                    };

                    let attacker_stats = AttackerStats {
                        min_damage: def.min_damage,
                        max_damage: def.max_damage,
                        accuracy: def.accuracy,
                    };
                    let defender_stats = DefenderStats {
                        evade: target_combat_stats.map_or(0, |stats| stats.evade),
                        armor: target_combat_stats.map_or(0, |stats| stats.armor),
                        faces_attacker: target_position.direction.faces(position.direction),
                    };

                    let outcome = resolve_attack(
                        &mut rng.rng,
                        &attacker_stats,
                        &defender_stats,
                        game_data.config.mob_rate,
                        game_data.config.critical_rate,
                        None,
                    );

                    target_hp.apply_damage(outcome.damage as i64);

                    messages.send_zone_message(
                        position.map_id,
                        eo_game_common::messages::ServerMessage::AttackPlayer {
                            attacker_entity_id: client.id,
                            target_entity_id: target_client.id,
                            direction: position.direction,
                        },
                    );

                    damage_events.send(DamageEvent {
                        attacker: npc_entity,
                        target: target_entity,
                        map_id: position.map_id,
                        damage: outcome.damage,
                        critical: outcome.critical,
                        target_hp_remaining: target_hp.current,
                    });
                } else {
                    walk_toward(&mut position, tx, ty, map, &mut rng.rng);
                }
            }
            None => random_walk(&mut npc, &mut position, map, &mut rng.rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{ClientEntityType, NpcSpawnType};
    use crate::game::resources::WorldRng;
    use bevy_ecs::prelude::{Events, Schedule, World};
    use eo_data::{DropTable, Formulas, ItemDatabase, NpcDatabase, NpcDefinition, NpcKind, WorldConfig};
    use eo_file_formats::TileGrid;
    use eo_game_common::messages::ClientEntityId;

    fn setup_world() -> World {
        let mut world = World::new();
        let mut maps = MapList::new();
        maps.get_mut(1).tiles = TileGrid::new(20, 20);
        world.insert_resource(maps);
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldRng::from_seed(42));
        world.insert_resource(ServerMessages::default());
        world.insert_resource(Events::<DamageEvent>::default());

        let npc_def = NpcDefinition {
            id: 1,
            name: "Wolf".into(),
            hp: 100,
            min_damage: 5,
            max_damage: 10,
            accuracy: 10,
            evade: 0,
            armor: 0,
            experience: 100,
            kind: NpcKind::Passive,
            boss: false,
            child: false,
        };
        world.insert_resource(GameData::new(
            ItemDatabase::new(vec![]),
            NpcDatabase::new(vec![npc_def]),
            DropTable::new(Default::default()),
            Formulas::new(Default::default()),
            WorldConfig::default(),
        ));

        world
    }

    #[test]
    fn idle_or_moves_without_a_target() {
        let mut world = setup_world();
        world.spawn((
            Npc::new(1, NpcSpawnType(0), 10, 10, 10, false, false),
            Position::new(1, 10, 10, Direction::Down),
            HealthPoints::new(100),
            ClientEntity {
                id: ClientEntityId(1),
                entity_type: ClientEntityType::Monster,
                map_id: 1,
            },
        ));

        let mut schedule = Schedule::new();
        schedule.add_systems(npc_ai_system);
        schedule.run(&mut world);

        let mut query = world.query::<&Npc>();
        let npc = query.iter(&world).next().unwrap();
        assert!(npc.last_act_tick == 0 || npc.act_interval_ticks > 0);
    }
}
