use std::time::Duration;

use bevy_ecs::prelude::Resource;

/// The act-npcs tick period (4.10): 50 ms.
pub const TICK_DURATION_SECS: f64 = 0.05;

/// Monotonic tick counter plus the wall-clock remainder carried between
/// fixed-step advances.
#[derive(Resource, Default)]
pub struct WorldTime {
    pub ticks: u64,
    pub time_since_last_tick: Duration,
}

impl WorldTime {
    pub fn advance_tick(&mut self) {
        self.ticks += 1;
    }

    /// Converts a wall-clock period into a tick count at the world's fixed
    /// tick rate, used by periodic events configured in seconds (4.10).
    pub fn ticks_for_seconds(secs: f64) -> u64 {
        (secs / TICK_DURATION_SECS).round().max(1.0) as u64
    }

    pub fn is_due(&self, period_secs: f64) -> bool {
        let period_ticks = Self::ticks_for_seconds(period_secs);
        period_ticks > 0 && self.ticks % period_ticks == 0
    }
}
