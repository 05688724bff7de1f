use bevy_ecs::prelude::{Query, Res, ResMut};
use eo_game_common::messages::{ChestContents, ServerMessage};
use rand::Rng;

use crate::game::components::{Chest, ClientEntity};
use crate::game::resources::{ServerMessages, WorldRng, WorldTime};

const REFILL_CHECK_PERIOD_SECS: f64 = 60.0;

/// Periodic refill pass (4.9): a slot refills once its refill timer has
/// elapsed since it was last emptied and nothing currently occupies it.
/// Broadcast is zone-wide rather than adjacency-filtered — the player
/// session collaborator is responsible for deciding whether a given
/// character has the chest window open.
pub fn chest_refill_system(
    mut chests: Query<(&mut Chest, &ClientEntity)>,
    world_time: Res<WorldTime>,
    mut rng: ResMut<WorldRng>,
    mut messages: ResMut<ServerMessages>,
) {
    if !world_time.is_due(REFILL_CHECK_PERIOD_SECS) {
        return;
    }

    for (mut chest, client) in chests.iter_mut() {
        let map_id = client.map_id;

        let due_slots: Vec<u8> = chest
            .spawn_slots
            .iter()
            .filter(|slot| {
                chest.item_at_slot(slot.slot).is_none()
                    && slot
                        .last_taken_tick
                        .map(|taken| {
                            world_time.ticks
                                >= taken + WorldTime::ticks_for_seconds(slot.refill_minutes as f64 * 60.0)
                        })
                        .unwrap_or(true)
            })
            .map(|slot| slot.slot)
            .collect();

        for slot in due_slots {
            let eligible = chest
                .spawn_slots
                .iter()
                .find(|s| s.slot == slot)
                .map(|s| s.eligible.clone())
                .unwrap_or_default();
            if eligible.is_empty() {
                continue;
            }
            let (item_id, amount) = eligible[rng.rng.gen_range(0..eligible.len())];
            chest.place_refill_item(slot, item_id, amount);

            messages.send_zone_message(
                map_id,
                ServerMessage::ChestAgree {
                    chest: ChestContents {
                        x: chest.x,
                        y: chest.y,
                        slot,
                        item_id,
                        amount,
                    },
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{ChestSpawnSlot, ClientEntityType};
    use bevy_ecs::prelude::{Schedule, World};
    use eo_game_common::messages::ClientEntityId;

    #[test]
    fn empty_never_taken_slot_refills_on_first_due_check() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldRng::from_seed(1));
        world.insert_resource(ServerMessages::default());

        let mut chest = Chest::new(3, 3, 5, 1, 50);
        chest.spawn_slots.push(ChestSpawnSlot {
            slot: 1,
            eligible: vec![(100, 5)],
            refill_minutes: 10,
            last_taken_tick: None,
        });
        world.spawn((
            chest,
            ClientEntity {
                id: ClientEntityId(1),
                entity_type: ClientEntityType::Chest,
                map_id: 1,
            },
        ));

        let mut schedule = Schedule::new();
        schedule.add_systems(chest_refill_system);
        schedule.run(&mut world);

        let mut query = world.query::<&Chest>();
        let chest = query.iter(&world).next().unwrap();
        assert_eq!(chest.item_at_slot(1).unwrap().item_id, 100);
    }
}
