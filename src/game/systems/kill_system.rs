use bevy_ecs::prelude::{Entity, EventReader, EventWriter, Query, Res, ResMut};
use eo_game_common::messages::{DroppedItem, ServerMessage};

use crate::game::components::{CharacterCore, ClientEntity, Npc, Party, PartyMembership, Position, UnregisteredNpcs};
use crate::game::events::{DamageEvent, NpcDeathEvent};
use crate::game::reward::{choose_drop, choose_reward_winner, split_experience_flat, split_experience_level_weighted};
use crate::game::resources::{GameData, ServerMessages, WorldRng, WorldTime};

/// Processes every lethal hit queued this tick: idempotent per NPC (a
/// double-kill in the same tick is a no-op past the first), clears the
/// damage list and its reverse pointers, distributes drop and experience,
/// and cascades a boss kill onto its children.
#[allow(clippy::too_many_arguments)]
pub fn kill_system(
    mut damage_events: EventReader<DamageEvent>,
    mut npcs: Query<(Entity, &mut Npc, &Position, &ClientEntity)>,
    mut characters: Query<(&mut CharacterCore, Option<&PartyMembership>, &ClientEntity)>,
    mut unregistered: Query<&mut UnregisteredNpcs>,
    parties: Query<&Party>,
    game_data: Res<GameData>,
    world_time: Res<WorldTime>,
    mut rng: ResMut<WorldRng>,
    mut messages: ResMut<ServerMessages>,
    mut death_events: EventWriter<NpcDeathEvent>,
) {
    let mut newly_dead: Vec<Entity> = Vec::new();

    for event in damage_events.iter() {
        if let Ok((_, mut npc, _, _)) = npcs.get_mut(event.target) {
            if npc.dead_since_tick.is_none() {
                npc.record_hit(event.attacker, event.damage as i64, world_time.ticks);
            }
        }

        if event.target_hp_remaining > 0 {
            continue;
        }
        let Ok((_, mut npc, position, client)) = npcs.get_mut(event.target) else {
            continue; // character deaths are handled by the player-session collaborator
        };
        if npc.dead_since_tick.is_some() {
            continue;
        }
        npc.dead_since_tick = Some(world_time.ticks);
        let map_id = position.map_id;
        let (npc_x, npc_y) = (position.x, position.y);
        let client_id = client.id;
        newly_dead.push(event.target);

        let def = game_data.npcs.get(npc.def_id);
        let drop_rows = game_data.drops.rows_for(npc.def_id);
        let drop = choose_drop(
            &mut rng.rng,
            drop_rows,
            game_data.config.drop_rate,
            game_data.config.drop_rate_mode,
        );

        let winner = choose_reward_winner(
            &mut rng.rng,
            &npc.damage_list,
            event.attacker,
            game_data.config.share_mode,
            |_| true,
        );

        let dropped_item = drop.map(|(item_id, amount)| DroppedItem {
            entity_id: client_id,
            item_id,
            amount,
            x: npc_x,
            y: npc_y,
            owner_entity_id: winner.and_then(|w| characters.get(w).ok().map(|(_, _, c)| c.id)),
        });

        messages.send_zone_message(
            map_id,
            ServerMessage::NpcSpec {
                entity_id: client_id,
                npc_def_id: npc.def_id,
                dropped_item,
                show: true,
            },
        );

        // Experience distribution: pool across the winner's map-local party
        // if one exists, else award the winner alone.
        let exp_amount = (def.experience as f64 * game_data.config.exp_rate as f64) as u64;
        if let Some(winner) = winner {
            let recipients = winner_recipients(winner, &characters, &parties, map_id);
            let shares = if game_data.config.party_share_mode == 0 {
                split_experience_flat(exp_amount, recipients.len())
            } else {
                let levels: Vec<u32> = recipients
                    .iter()
                    .filter_map(|&e| characters.get(e).ok().map(|(core, _, _)| core.level))
                    .collect();
                split_experience_level_weighted(exp_amount, &levels)
            };

            for (recipient, share) in recipients.iter().zip(shares) {
                if let Ok((mut core, _, recipient_client)) = characters.get_mut(*recipient) {
                    let levels_gained =
                        core.grant_experience(share, &game_data.exp_table, game_data.config.max_level);
                    if levels_gained > 0 {
                        messages.send_entity_message(
                            map_id,
                            recipient_client.id,
                            ServerMessage::NpcAccept {
                                entity_id: recipient_client.id,
                                new_level: core.level,
                                new_stat_points: levels_gained * game_data.config.stat_per_level,
                                new_skill_points: levels_gained * game_data.config.skill_per_level,
                            },
                        );
                    }
                }
            }
        }

        let attackers: Vec<Entity> = npc.damage_list.iter().map(|entry| entry.attacker).collect();
        for attacker in attackers {
            if let Ok(mut list) = unregistered.get_mut(attacker) {
                list.unregister(event.target);
            }
        }
        npc.clear_damage();

        let was_boss = npc.boss;
        death_events.send(NpcDeathEvent {
            npc: event.target,
            map_id,
            def_id: npc.def_id,
            x: npc_x,
            y: npc_y,
            killer: Some(event.attacker),
            was_boss,
        });
    }

    // Boss cascade: every live child of a boss just killed dies too, in the
    // same broadcast, with duplicate def-id graphics purged by one junk
    // frame per id.
    for boss in newly_dead {
        let Ok((_, boss_npc, boss_position, _)) = npcs.get(boss) else {
            continue;
        };
        if !boss_npc.boss {
            continue;
        }
        let map_id = boss_position.map_id;

        let child_entities: Vec<Entity> = npcs
            .iter()
            .filter(|(_, npc, _, _)| npc.child && npc.parent == Some(boss) && npc.dead_since_tick.is_none())
            .map(|(entity, _, _, _)| entity)
            .collect();

        let mut dead_def_ids = Vec::new();
        for (index, child_entity) in child_entities.iter().enumerate() {
            let Ok((_, mut child, _, child_client)) = npcs.get_mut(*child_entity) else {
                continue;
            };
            if child.dead_since_tick.is_some() {
                continue;
            }
            child.dead_since_tick = Some(world_time.ticks);
            dead_def_ids.push(child.def_id);
            messages.send_zone_message(
                map_id,
                ServerMessage::NpcSpec {
                    entity_id: child_client.id,
                    npc_def_id: child.def_id,
                    dropped_item: None,
                    show: index == 0,
                },
            );
        }

        dead_def_ids.sort_unstable();
        dead_def_ids.dedup();
        for def_id in dead_def_ids {
            messages.send_zone_message(map_id, ServerMessage::NpcJunk { npc_def_id: def_id });
        }
    }
}

fn winner_recipients(
    winner: Entity,
    characters: &Query<(&mut CharacterCore, Option<&PartyMembership>, &ClientEntity)>,
    parties: &Query<&Party>,
    map_id: u32,
) -> Vec<Entity> {
    let Ok((_, membership, _)) = characters.get(winner) else {
        return vec![winner];
    };
    let Some(membership) = membership else {
        return vec![winner];
    };
    let Ok(party) = parties.get(membership.party) else {
        return vec![winner];
    };

    party
        .members
        .iter()
        .copied()
        .filter(|&member| {
            characters
                .get(member)
                .ok()
                .map(|(_, _, client)| client.map_id == map_id)
                .unwrap_or(false)
        })
        .collect()
}
