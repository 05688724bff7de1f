use bevy_ecs::prelude::{Query, Res};

use crate::game::components::{HealthPoints, MonsterSpawnPoint, Npc, Position};
use crate::game::resources::{GameData, WorldTime};

const SPAWN_CHECK_PERIOD_SECS: f64 = 1.0;

/// Revives a dead NPC in place once its spawn point's cooldown elapses,
/// rather than despawning and respawning a fresh entity — this keeps its
/// roster index, client entity id and any reverse damage-list pointers
/// stable across a respawn. Matches an NPC to its spawn point by def id and
/// spawn anchor, since the NPC component does not keep a back-reference.
pub fn monster_spawn_system(
    spawn_points: Query<&MonsterSpawnPoint>,
    mut npcs: Query<(&mut Npc, &mut HealthPoints, &mut Position)>,
    game_data: Res<GameData>,
    world_time: Res<WorldTime>,
) {
    if !world_time.is_due(SPAWN_CHECK_PERIOD_SECS) {
        return;
    }

    for spawn_point in spawn_points.iter() {
        let def = game_data.npcs.get(spawn_point.npc_def_id);

        for (mut npc, mut hp, mut position) in npcs.iter_mut() {
            if npc.def_id != spawn_point.npc_def_id
                || npc.spawn_x != spawn_point.anchor_x
                || npc.spawn_y != spawn_point.anchor_y
            {
                continue;
            }
            let Some(dead_since) = npc.dead_since_tick else {
                continue;
            };

            let respawn_secs = spawn_point.spawn_time_secs as f32 / game_data.config.spawn_rate.max(0.01);
            let respawn_ticks = WorldTime::ticks_for_seconds(respawn_secs as f64);
            if world_time.ticks < dead_since + respawn_ticks {
                continue;
            }

            npc.dead_since_tick = None;
            npc.clear_damage();
            hp.max = def.hp;
            hp.current = def.hp;
            position.x = spawn_point.anchor_x;
            position.y = spawn_point.anchor_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{ClientEntity, ClientEntityType, NpcSpawnType, Team};
    use bevy_ecs::prelude::{Schedule, World};
    use eo_data::{DropTable, Formulas, ItemDatabase, NpcDatabase, NpcDefinition, NpcKind, WorldConfig};
    use eo_game_common::messages::ClientEntityId;
    use eo_game_common::Direction;

    #[test]
    fn dead_npc_revives_once_its_cooldown_elapses() {
        let mut world = World::new();
        let mut world_time = WorldTime::default();
        world_time.ticks = 10_000;
        world.insert_resource(world_time);

        let def = NpcDefinition {
            id: 1,
            name: "Wolf".into(),
            hp: 100,
            min_damage: 1,
            max_damage: 2,
            accuracy: 0,
            evade: 0,
            armor: 0,
            experience: 0,
            kind: NpcKind::Passive,
            boss: false,
            child: false,
        };
        world.insert_resource(GameData::new(
            ItemDatabase::new(vec![]),
            NpcDatabase::new(vec![def]),
            DropTable::new(Default::default()),
            Formulas::new(Default::default()),
            WorldConfig::default(),
        ));

        world.spawn(MonsterSpawnPoint {
            map_id: 1,
            anchor_x: 5,
            anchor_y: 5,
            npc_def_id: 1,
            spawn_type: 0,
            spawn_time_secs: 1,
            amount: 1,
            num_alive: 0,
        });

        let mut npc = Npc::new(1, NpcSpawnType(0), 5, 5, 1, false, false);
        npc.dead_since_tick = Some(0);
        world.spawn((
            npc,
            Position::new(1, 5, 5, Direction::Down),
            HealthPoints::new(0),
            Team::Monster,
            ClientEntity {
                id: ClientEntityId(1),
                entity_type: ClientEntityType::Monster,
                map_id: 1,
            },
        ));

        let mut schedule = Schedule::new();
        schedule.add_systems(monster_spawn_system);
        schedule.run(&mut world);

        let mut query = world.query::<(&Npc, &HealthPoints)>();
        let (npc, hp) = query.iter(&world).next().unwrap();
        assert!(npc.dead_since_tick.is_none());
        assert_eq!(hp.current, 100);
    }
}
