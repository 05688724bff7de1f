use bevy_ecs::prelude::{Changed, Entity, Query, Res, ResMut};
use eo_game_common::messages::{ServerMessage, SpawnCharacter, SpawnNpc};
use eo_game_common::Direction;

use crate::game::components::{CharacterCore, ClientEntity, HealthPoints, Npc, Position};
use crate::game::resources::{GameData, ServerMessages};

/// The tile at `offset` steps from `(x, y)` along `direction`'s axis.
fn axis_offset_tile(x: i32, y: i32, direction: Direction, offset: i32) -> (i32, i32) {
    match direction {
        Direction::Down => (x, y + offset),
        Direction::Up => (x, y - offset),
        Direction::Right => (x + offset, y),
        Direction::Left => (x - offset, y),
    }
}

/// The `(2*see+1)`-length band perpendicular to the movement axis, centered
/// `offset` tiles ahead of (or behind, for a negative offset) `(x, y)`.
fn band(x: i32, y: i32, direction: Direction, see: i32, offset: i32) -> Vec<(i32, i32)> {
    let (cx, cy) = axis_offset_tile(x, y, direction, offset);
    match direction {
        Direction::Down | Direction::Up => (-see..=see).map(|dx| (cx + dx, cy)).collect(),
        Direction::Left | Direction::Right => (-see..=see).map(|dy| (cx, cy + dy)).collect(),
    }
}

/// For every actor whose `Position` changed this tick, broadcasts the
/// vision-entering and vision-leaving bands per 4.3: leave-vision removals
/// first, then enter-vision adds, so a recipient never sees a "walk" from
/// an actor it was never told about.
pub fn movement_visibility_system(
    moved: Query<
        (
            Entity,
            &Position,
            &ClientEntity,
            Option<&CharacterCore>,
            Option<&HealthPoints>,
            Option<&Npc>,
        ),
        Changed<Position>,
    >,
    all: Query<(
        Entity,
        &Position,
        &ClientEntity,
        Option<&CharacterCore>,
        Option<&HealthPoints>,
        Option<&Npc>,
    )>,
    game_data: Res<GameData>,
    mut messages: ResMut<ServerMessages>,
) {
    let see = game_data.config.see_distance;

    for (actor, position, actor_client, actor_character, actor_hp, actor_npc) in moved.iter() {
        let old_band = band(position.x, position.y, position.direction, see, -(see + 1));
        let new_band = band(position.x, position.y, position.direction, see, see);

        for (x, y) in old_band {
            for (other, other_pos, other_client, _, _, _) in all.iter() {
                if other == actor || other_pos.map_id != position.map_id {
                    continue;
                }
                if other_pos.x == x && other_pos.y == y {
                    messages.send_entity_message(
                        position.map_id,
                        actor_client.id,
                        ServerMessage::ClothesRemove {
                            entity_ids: vec![other_client.id],
                        },
                    );
                    messages.send_entity_message(
                        position.map_id,
                        other_client.id,
                        ServerMessage::ClothesRemove {
                            entity_ids: vec![actor_client.id],
                        },
                    );
                }
            }
        }

        for (x, y) in new_band {
            for (other, other_pos, other_client, character, hp, npc) in all.iter() {
                if other == actor || other_pos.map_id != position.map_id {
                    continue;
                }
                if other_pos.x != x || other_pos.y != y {
                    continue;
                }

                if let Some(character) = character {
                    let hp = hp.copied().unwrap_or(HealthPoints::new(0));
                    messages.send_entity_message(
                        position.map_id,
                        actor_client.id,
                        ServerMessage::PlayersAgree {
                            data: Box::new(SpawnCharacter {
                                entity_id: other_client.id,
                                name: character.name.clone(),
                                x: other_pos.x,
                                y: other_pos.y,
                                direction: other_pos.direction,
                                hp: hp.current,
                                max_hp: hp.max,
                            }),
                        },
                    );
                } else if let Some(npc) = npc {
                    let hp = hp.copied().unwrap_or(HealthPoints::new(0));
                    messages.send_entity_message(
                        position.map_id,
                        actor_client.id,
                        ServerMessage::NpcAgree {
                            data: Box::new(SpawnNpc {
                                entity_id: other_client.id,
                                npc_def_id: npc.def_id,
                                x: other_pos.x,
                                y: other_pos.y,
                                direction: other_pos.direction,
                                hp: hp.current,
                            }),
                        },
                    );
                }

                let actor_hp = actor_hp.copied().unwrap_or(HealthPoints::new(0));
                if let Some(character) = actor_character {
                    messages.send_entity_message(
                        position.map_id,
                        other_client.id,
                        ServerMessage::PlayersAgree {
                            data: Box::new(SpawnCharacter {
                                entity_id: actor_client.id,
                                name: character.name.clone(),
                                x: position.x,
                                y: position.y,
                                direction: position.direction,
                                hp: actor_hp.current,
                                max_hp: actor_hp.max,
                            }),
                        },
                    );
                } else if let Some(npc) = actor_npc {
                    messages.send_entity_message(
                        position.map_id,
                        other_client.id,
                        ServerMessage::NpcAgree {
                            data: Box::new(SpawnNpc {
                                entity_id: actor_client.id,
                                npc_def_id: npc.def_id,
                                x: position.x,
                                y: position.y,
                                direction: position.direction,
                                hp: actor_hp.current,
                            }),
                        },
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_shifts_one_tile_past_the_old_edge() {
        let new_band = band(10, 11, Direction::Down, 11, 11);
        assert!(new_band.contains(&(10, 22)));
        let old_band = band(10, 11, Direction::Down, 11, -12);
        assert!(old_band.contains(&(10, -1)));
    }
}
