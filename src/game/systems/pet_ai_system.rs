use bevy_ecs::prelude::{Entity, EventWriter, Query, Res, ResMut, With, Without};
use eo_game_common::Direction;
use rand::Rng;

use crate::game::combat::{resolve_attack, AttackerStats, DefenderStats};
use crate::game::components::{ClientEntity, HealthPoints, Npc, Pet, PetMode, Position};
use crate::game::events::DamageEvent;
use crate::game::pathing::find_path_step;
use crate::game::resources::{GameData, MapList, MapState, ServerMessages, WorldRng, WorldTime};

const PET_BASE_ACT_SECS: f32 = 1.0;

fn step_toward(position: &mut Position, target_x: i32, target_y: i32, map: &MapState) -> bool {
    let direction = Direction::towards(position.x, position.y, target_x, target_y);
    position.direction = direction;
    let (dx, dy) = direction.step();
    let (new_x, new_y) = (position.x + dx, position.y + dy);
    if map.walkable(new_x, new_y, true) {
        position.x = new_x;
        position.y = new_y;
        true
    } else if let Some(step) = find_path_step(map, position.x, position.y, target_x, target_y) {
        position.direction = step;
        let (dx, dy) = step.step();
        position.x += dx;
        position.y += dy;
        true
    } else {
        false
    }
}

/// Per-tick pet follow/guard/attack loop (4.5). Pets share the NPC data
/// model but never enter the aggro-table scan — their target is always
/// either the owner's position or a hostile NPC found near it.
#[allow(clippy::too_many_arguments)]
pub fn pet_ai_system(
    mut pets: Query<(Entity, &mut Pet, &mut Npc, &mut Position, &HealthPoints, &ClientEntity)>,
    owners: Query<&Position, (Without<Pet>, With<ClientEntity>)>,
    mut hostiles: Query<(Entity, &Npc, &Position, &mut HealthPoints, &ClientEntity), Without<Pet>>,
    maps: Res<MapList>,
    game_data: Res<GameData>,
    world_time: Res<WorldTime>,
    mut rng: ResMut<WorldRng>,
    mut messages: ResMut<ServerMessages>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let guard_distance = game_data.config.pet_guard_distance;
    let chase_distance = game_data.config.pet_chase_distance;

    for (_pet_entity, mut pet, mut npc, mut position, hp, client) in pets.iter_mut() {
        if !hp.is_alive() {
            continue;
        }
        if npc.last_act_tick + npc.act_interval_ticks > world_time.ticks {
            continue;
        }
        let interval_secs = PET_BASE_ACT_SECS / game_data.config.pet_speed.max(0.01);
        npc.act_interval_ticks = WorldTime::ticks_for_seconds(interval_secs as f64);
        npc.last_act_tick = world_time.ticks;

        let Ok(owner_position) = owners.get(pet.owner) else {
            // Owner logged out or despawned; hold position until reassigned.
            continue;
        };

        // An owner warp (map change) relocates the pet immediately, one
        // tile behind the owner's facing if that tile is walkable.
        if position.map_id != owner_position.map_id {
            let map = maps.get(owner_position.map_id);
            let (back_dx, back_dy) = owner_position.direction.opposite().step();
            let behind = (owner_position.x + back_dx, owner_position.y + back_dy);
            position.map_id = owner_position.map_id;
            if map.walkable(behind.0, behind.1, true) {
                position.x = behind.0;
                position.y = behind.1;
            } else {
                position.x = owner_position.x;
                position.y = owner_position.y;
            }
            pet.mode = PetMode::Following;
            pet.target = None;
            continue;
        }

        let map = maps.get(position.map_id);

        match pet.mode {
            PetMode::Following => {
                let distance = position.chebyshev_distance(owner_position);
                if distance > guard_distance * 2 {
                    let (back_dx, back_dy) = owner_position.direction.opposite().step();
                    position.x = owner_position.x + back_dx;
                    position.y = owner_position.y + back_dy;
                } else if distance > 1 {
                    step_toward(&mut position, owner_position.x, owner_position.y, map);
                }
            }
            PetMode::Guarding => {
                let distance_to_owner = position.chebyshev_distance(owner_position);
                if distance_to_owner > guard_distance {
                    step_toward(&mut position, owner_position.x, owner_position.y, map);
                    continue;
                }

                let threat = hostiles
                    .iter()
                    .filter(|(_, npc, _, hp, _)| hp.is_alive() && npc.dead_since_tick.is_none())
                    .filter(|(_, _, hostile_position, _, _)| {
                        hostile_position.map_id == owner_position.map_id
                            && owner_position.chebyshev_distance(hostile_position) <= 1
                    })
                    .map(|(entity, _, hostile_position, _, _)| (entity, hostile_position.x, hostile_position.y))
                    .next();

                if let Some((target_entity, tx, ty)) = threat {
                    strike_or_approach(
                        &mut position,
                        client,
                        target_entity,
                        tx,
                        ty,
                        &pet,
                        &mut hostiles,
                        &game_data,
                        &mut rng,
                        map,
                        &mut messages,
                        &mut damage_events,
                    );
                }
            }
            PetMode::Attacking => {
                let still_valid = pet
                    .target
                    .and_then(|target| hostiles.get(target).ok())
                    .filter(|(_, _, _, hp, _)| hp.is_alive())
                    .map(|(_, _, hostile_position, _, _)| *hostile_position);

                let (target_entity, target_position) = match pet.target.zip(still_valid) {
                    Some((entity, position)) => (entity, position),
                    None => {
                        let found = hostiles
                            .iter()
                            .filter(|(_, _, _, hp, _)| hp.is_alive())
                            .filter(|(_, _, hostile_position, _, _)| {
                                hostile_position.map_id == owner_position.map_id
                                    && owner_position.chebyshev_distance(hostile_position) <= chase_distance
                            })
                            .min_by_key(|(_, _, hostile_position, _, _)| {
                                position.chebyshev_distance(hostile_position)
                            });
                        match found {
                            Some((entity, _, hostile_position, _, _)) => {
                                pet.target = Some(entity);
                                (entity, *hostile_position)
                            }
                            None => {
                                pet.mode = PetMode::Following;
                                pet.target = None;
                                continue;
                            }
                        }
                    }
                };

                if position.chebyshev_distance(owner_position) > guard_distance {
                    pet.mode = PetMode::Following;
                    pet.target = None;
                    continue;
                }

                strike_or_approach(
                    &mut position,
                    client,
                    target_entity,
                    target_position.x,
                    target_position.y,
                    &pet,
                    &mut hostiles,
                    &game_data,
                    &mut rng,
                    map,
                    &mut messages,
                    &mut damage_events,
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn strike_or_approach(
    position: &mut Position,
    client: &ClientEntity,
    target_entity: Entity,
    target_x: i32,
    target_y: i32,
    pet: &Pet,
    hostiles: &mut Query<(Entity, &Npc, &Position, &mut HealthPoints, &ClientEntity), Without<Pet>>,
    game_data: &GameData,
    rng: &mut ResMut<WorldRng>,
    map: &MapState,
    messages: &mut ResMut<ServerMessages>,
    damage_events: &mut EventWriter<DamageEvent>,
) {
    if position.chebyshev_distance(&Position::new(position.map_id, target_x, target_y, position.direction)) <= 1 {
        position.direction = Direction::towards(position.x, position.y, target_x, target_y);
        let Ok((_, _, target_position, mut target_hp, target_client)) = hostiles.get_mut(target_entity) else {
            return;
        };

        let attacker_stats = AttackerStats {
            min_damage: pet.min_damage,
            max_damage: pet.max_damage,
            accuracy: 100,
        };
        let defender_stats = DefenderStats {
            evade: 0,
            armor: 0,
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
        let damage = (outcome.damage as f32 * game_data.config.pet_damage_multiplier) as i32;
        target_hp.apply_damage(damage as i64);

        messages.send_zone_message(
            position.map_id,
            eo_game_common::messages::ServerMessage::AttackPlayer {
                attacker_entity_id: client.id,
                target_entity_id: target_client.id,
                direction: position.direction,
            },
        );

        damage_events.send(DamageEvent {
            attacker: pet.owner,
            target: target_entity,
            map_id: position.map_id,
            damage,
            critical: outcome.critical,
            target_hp_remaining: target_hp.current,
        });
    } else {
        step_toward(position, target_x, target_y, map);
    }
}
