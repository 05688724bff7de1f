use bevy_ecs::prelude::{Commands, Entity, EventWriter, Query, Res, ResMut, With, Without};
use eo_game_common::messages::ServerMessage;

use crate::game::combat::{resolve_attack, AttackerStats, DefenderStats};
use crate::game::components::{AttackCommand, CharacterCore, ClientEntity, CombatStats, HealthPoints, Npc, Position, Team};
use crate::game::events::DamageEvent;
use crate::game::resources::{GameData, MapList, MapState, ServerMessages, WorldRng};

/// Walks up to `range` tiles from `position` in its current facing
/// direction, stopping at the first non-walkable tile (4.6). Returns
/// whether `target` sits on an unobstructed tile along that line.
fn target_in_line(position: &Position, target: &Position, range: i32, map: &MapState) -> bool {
    let (dx, dy) = position.direction.step();
    let (mut x, mut y) = (position.x, position.y);
    for _ in 0..range {
        x += dx;
        y += dy;
        if !map.walkable(x, y, true) {
            return false;
        }
        if x == target.x && y == target.y {
            return true;
        }
    }
    false
}

/// Drives a client-requested attack against an NPC or, on a PK-enabled
/// map, another character (4.6/4.7). The request only names a target
/// entity; this still re-derives range and line of sight from the
/// attacker's own facing direction rather than trusting the claim.
#[allow(clippy::too_many_arguments)]
pub fn player_attack_system(
    mut commands: Commands,
    attackers: Query<(Entity, &AttackCommand, &CombatStats, &Position, &ClientEntity), With<CharacterCore>>,
    mut npc_targets: Query<(&Npc, &mut HealthPoints, &Position, &ClientEntity), Without<CharacterCore>>,
    mut character_targets: Query<(&mut HealthPoints, &CombatStats, &Position, &ClientEntity, &Team), With<CharacterCore>>,
    maps: Res<MapList>,
    game_data: Res<GameData>,
    mut rng: ResMut<WorldRng>,
    mut messages: ResMut<ServerMessages>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for (attacker_entity, command, combat_stats, position, client) in attackers.iter() {
        commands.entity(attacker_entity).remove::<AttackCommand>();

        let map = maps.get(position.map_id);
        let range = if combat_stats.ranged_weapon {
            game_data.config.ranged_distance
        } else {
            1
        };

        if let Ok((npc, mut target_hp, target_position, target_client)) = npc_targets.get_mut(command.target) {
            if npc.dead_since_tick.is_some() || !target_hp.is_alive() {
                continue;
            }
            if position.map_id != target_position.map_id || !target_in_line(position, target_position, range, map) {
                continue;
            }

            let def = game_data.npcs.get(npc.def_id);
            let attacker_stats = AttackerStats {
                min_damage: combat_stats.min_damage,
                max_damage: combat_stats.max_damage,
                accuracy: combat_stats.accuracy,
            };
            let defender_stats = DefenderStats {
                evade: def.evade,
                armor: def.armor,
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
            let damage = if game_data.config.limit_damage {
                outcome.damage.min(target_hp.current)
            } else {
                outcome.damage
            };
            target_hp.apply_damage(damage as i64);

            messages.send_zone_message(
                position.map_id,
                ServerMessage::AttackPlayer {
                    attacker_entity_id: client.id,
                    target_entity_id: target_client.id,
                    direction: position.direction,
                },
            );
            if target_hp.current > 0 {
                messages.send_zone_message(
                    position.map_id,
                    ServerMessage::NpcReply {
                        entity_id: target_client.id,
                        damage: damage as i64,
                        remaining_hp_percent: target_hp.percent(),
                    },
                );
            }

            damage_events.send(DamageEvent {
                attacker: attacker_entity,
                target: command.target,
                map_id: position.map_id,
                damage,
                critical: outcome.critical,
                target_hp_remaining: target_hp.current,
            });
            continue;
        }

        if command.target == attacker_entity {
            continue;
        }

        if let Ok((mut target_hp, target_combat_stats, target_position, target_client, _)) =
            character_targets.get_mut(command.target)
        {
            if !target_hp.is_alive() || position.map_id != target_position.map_id {
                continue;
            }
            if !map.pk_allowed(&game_data.config) {
                continue;
            }
            if !target_in_line(position, target_position, range, map) {
                continue;
            }

            let attacker_stats = AttackerStats {
                min_damage: combat_stats.min_damage,
                max_damage: combat_stats.max_damage,
                accuracy: combat_stats.accuracy,
            };
            let defender_stats = DefenderStats {
                evade: target_combat_stats.evade,
                armor: target_combat_stats.armor,
                faces_attacker: target_position.direction.faces(position.direction),
            };

            let outcome = resolve_attack(
                &mut rng.rng,
                &attacker_stats,
                &defender_stats,
                game_data.config.pk_rate,
                game_data.config.critical_rate,
                None,
            );
            let damage = if game_data.config.limit_damage {
                outcome.damage.min(target_hp.current)
            } else {
                outcome.damage
            };
            target_hp.apply_damage(damage as i64);

            messages.send_zone_message(
                position.map_id,
                ServerMessage::AttackPlayer {
                    attacker_entity_id: client.id,
                    target_entity_id: target_client.id,
                    direction: position.direction,
                },
            );

            // Character death (spawn-point relocation, Deadly item drop) is
            // handled by the player-session collaborator off this event,
            // the same boundary kill_system already draws for character
            // targets.
            damage_events.send(DamageEvent {
                attacker: attacker_entity,
                target: command.target,
                map_id: position.map_id,
                damage,
                critical: outcome.critical,
                target_hp_remaining: target_hp.current,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{ClientEntityType, NpcSpawnType};
    use crate::game::resources::{WorldRng, WorldTime};
    use bevy_ecs::prelude::{Events, Schedule, World};
    use eo_data::{DropTable, Formulas, ItemDatabase, NpcDatabase, NpcDefinition, NpcKind, WorldConfig};
    use eo_file_formats::TileGrid;
    use eo_game_common::messages::ClientEntityId;
    use eo_game_common::Direction;

    fn setup_world() -> World {
        let mut world = World::new();
        let mut maps = MapList::new();
        maps.get_mut(1).tiles = TileGrid::new(20, 20);
        world.insert_resource(maps);
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldRng::from_seed(1));
        world.insert_resource(ServerMessages::default());
        world.insert_resource(Events::<DamageEvent>::default());

        let npc_def = NpcDefinition {
            id: 1,
            name: "Wolf".into(),
            hp: 100,
            min_damage: 1,
            max_damage: 2,
            accuracy: 0,
            evade: 0,
            armor: 0,
            experience: 10,
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
    fn attacking_an_adjacent_npc_lands_a_hit() {
        let mut world = setup_world();
        let npc_entity = world
            .spawn((
                Npc::new(1, NpcSpawnType(0), 10, 10, 10, false, false),
                Position::new(1, 11, 10, Direction::Left),
                HealthPoints::new(100),
                ClientEntity {
                    id: ClientEntityId(1),
                    entity_type: ClientEntityType::Monster,
                    map_id: 1,
                },
            ))
            .id();

        world.spawn((
            CharacterCore {
                id: 1,
                name: "Hero".into(),
                level: 1,
                tp: 0,
                max_tp: 0,
                experience: 0,
                admin_level: 0,
                autoloot: false,
                autopotion: false,
            },
            AttackCommand { target: npc_entity },
            CombatStats {
                min_damage: 50,
                max_damage: 50,
                accuracy: 100,
                evade: 0,
                armor: 0,
                ranged_weapon: false,
            },
            Position::new(1, 10, 10, Direction::Right),
            ClientEntity {
                id: ClientEntityId(2),
                entity_type: ClientEntityType::Character,
                map_id: 1,
            },
        ));

        let mut schedule = Schedule::new();
        schedule.add_systems(player_attack_system);
        schedule.run(&mut world);

        let mut query = world.query::<&HealthPoints>();
        let npc_hp = query.get(&world, npc_entity).unwrap();
        assert!(npc_hp.current < 100);
    }

    #[test]
    fn attacking_out_of_range_does_nothing() {
        let mut world = setup_world();
        let npc_entity = world
            .spawn((
                Npc::new(1, NpcSpawnType(0), 10, 10, 10, false, false),
                Position::new(1, 15, 10, Direction::Left),
                HealthPoints::new(100),
                ClientEntity {
                    id: ClientEntityId(1),
                    entity_type: ClientEntityType::Monster,
                    map_id: 1,
                },
            ))
            .id();

        world.spawn((
            CharacterCore {
                id: 1,
                name: "Hero".into(),
                level: 1,
                tp: 0,
                max_tp: 0,
                experience: 0,
                admin_level: 0,
                autoloot: false,
                autopotion: false,
            },
            AttackCommand { target: npc_entity },
            CombatStats {
                min_damage: 50,
                max_damage: 50,
                accuracy: 100,
                evade: 0,
                armor: 0,
                ranged_weapon: false,
            },
            Position::new(1, 10, 10, Direction::Right),
            ClientEntity {
                id: ClientEntityId(2),
                entity_type: ClientEntityType::Character,
                map_id: 1,
            },
        ));

        let mut schedule = Schedule::new();
        schedule.add_systems(player_attack_system);
        schedule.run(&mut world);

        let mut query = world.query::<&HealthPoints>();
        let npc_hp = query.get(&world, npc_entity).unwrap();
        assert_eq!(npc_hp.current, 100);
    }
}
