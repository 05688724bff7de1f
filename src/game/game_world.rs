use std::time::{Duration, Instant};

use bevy_ecs::prelude::{Events, Schedule, World};
use crossbeam_channel::Receiver;
use log::{debug, info};

use crate::game::events::{DamageEvent, NpcDeathEvent};
use crate::game::resources::{GameData, MapList, ServerMessages, WorldRng, WorldTime, TICK_DURATION_SECS};
use crate::game::systems::{
    chest_refill_system, kill_system, monster_spawn_system, movement_visibility_system, npc_ai_system,
    npc_recover_system, pet_ai_system, player_attack_system, world_time_system,
};

/// Runs the tick loop. `bevy_ecs` dropped the stage/run-criteria API the
/// donor built its loop on (`StageLabel`, `SystemStage`, `ShouldRun`), so the
/// donor's Input/Update/PostUpdate staging is reproduced here as four plain
/// `Schedule`s run back-to-back each tick instead of stages on one schedule.
pub struct GameWorld {
    tick_rate_hz: u64,
    shutdown_rx: Receiver<()>,
}

impl GameWorld {
    pub fn new(shutdown_rx: Receiver<()>) -> Self {
        Self {
            tick_rate_hz: (1.0 / TICK_DURATION_SECS).round() as u64,
            shutdown_rx,
        }
    }

    pub fn run(&mut self, game_data: GameData, maps: MapList, seed: u64) {
        let mut world = World::new();
        world.insert_resource(maps);
        world.insert_resource(game_data);
        world.insert_resource(ServerMessages::default());
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldRng::from_seed(seed));
        world.insert_resource(Events::<DamageEvent>::default());
        world.insert_resource(Events::<NpcDeathEvent>::default());

        let mut events_schedule = Schedule::default();
        events_schedule.add_systems((
            Events::<DamageEvent>::update_system,
            Events::<NpcDeathEvent>::update_system,
        ));

        let mut input_schedule = Schedule::default();
        input_schedule.add_systems(world_time_system);

        let mut update_schedule = Schedule::default();
        update_schedule.add_systems((
            player_attack_system,
            npc_ai_system,
            pet_ai_system,
            chest_refill_system,
            monster_spawn_system,
            npc_recover_system,
        ));

        let mut post_update_schedule = Schedule::default();
        post_update_schedule.add_systems((kill_system, movement_visibility_system));

        let min_tick_duration = Duration::from_millis(1000 / self.tick_rate_hz);

        let mut tick_counter = 0u64;
        let mut tick_counter_duration = Duration::from_secs(0);
        let mut tick_counter_last_print = Instant::now();

        info!("world tick loop starting at {} Hz", self.tick_rate_hz);

        loop {
            if self.shutdown_rx.try_recv().is_ok() {
                info!("shutdown requested, stopping tick loop");
                break;
            }

            let current_tick = Instant::now();

            events_schedule.run(&mut world);
            input_schedule.run(&mut world);
            update_schedule.run(&mut world);
            post_update_schedule.run(&mut world);

            let (zone_messages, entity_messages) = world.resource_mut::<ServerMessages>().drain();
            if !zone_messages.is_empty() || !entity_messages.is_empty() {
                debug!(
                    "tick {}: {} zone message(s), {} entity message(s) queued for dispatch",
                    world.resource::<WorldTime>().ticks,
                    zone_messages.len(),
                    entity_messages.len()
                );
            }

            let now = Instant::now();
            let tick_duration = now - current_tick;

            tick_counter += 1;
            tick_counter_duration += tick_duration;

            if now - tick_counter_last_print > Duration::from_secs(60) {
                let average_tick_duration = tick_counter_duration.as_secs_f64() / (tick_counter as f64);
                debug!(
                    "average tick duration: {:?}",
                    Duration::from_secs_f64(average_tick_duration)
                );
                tick_counter = 0;
                tick_counter_duration = Duration::from_secs(0);
                tick_counter_last_print = now;
            }

            if tick_duration < min_tick_duration {
                std::thread::sleep(min_tick_duration - tick_duration);
            }
        }
    }
}
