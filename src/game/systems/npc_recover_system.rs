use bevy_ecs::prelude::{Query, Res};

use crate::game::components::{HealthPoints, Npc};
use crate::game::resources::{GameData, WorldTime};

/// Passive HP regeneration for live NPCs, gated by `npc_recover_speed_secs`
/// and scaled by `npc_recover_rate`; dead NPCs wait on the spawn system
/// instead.
pub fn npc_recover_system(mut npcs: Query<(&Npc, &mut HealthPoints)>, game_data: Res<GameData>, world_time: Res<WorldTime>) {
    if !world_time.is_due(game_data.config.npc_recover_speed_secs as f64) {
        return;
    }

    for (npc, mut hp) in npcs.iter_mut() {
        if npc.dead_since_tick.is_some() || !hp.is_alive() || hp.current >= hp.max {
            continue;
        }
        let regen = ((hp.max as f32 * 0.05) * game_data.config.npc_recover_rate).round() as i32;
        hp.current = (hp.current + regen.max(1)).min(hp.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::NpcSpawnType;
    use bevy_ecs::prelude::{Schedule, World};
    use eo_data::{DropTable, Formulas, ItemDatabase, NpcDatabase, WorldConfig};

    #[test]
    fn live_npc_below_max_regenerates_when_due() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(GameData::new(
            ItemDatabase::new(vec![]),
            NpcDatabase::new(vec![]),
            DropTable::new(Default::default()),
            Formulas::new(Default::default()),
            WorldConfig::default(),
        ));

        let npc = Npc::new(1, NpcSpawnType(0), 0, 0, 1, false, false);
        let mut hp = HealthPoints::new(100);
        hp.current = 50;
        world.spawn((npc, hp));

        let mut schedule = Schedule::new();
        schedule.add_systems(npc_recover_system);
        schedule.run(&mut world);

        let mut query = world.query::<&HealthPoints>();
        let hp = query.iter(&world).next().unwrap();
        assert!(hp.current > 50);
    }
}
