use bevy_ecs::prelude::ResMut;

use crate::game::resources::WorldTime;

pub fn world_time_system(mut world_time: ResMut<WorldTime>) {
    world_time.advance_tick();
}
