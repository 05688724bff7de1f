use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Copy)]
pub struct HealthPoints {
    pub current: i32,
    pub max: i32,
}

impl HealthPoints {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Applies damage, clamping so hp never drops below zero.
    pub fn apply_damage(&mut self, amount: i64) {
        let amount = amount.clamp(0, i32::MAX as i64) as i32;
        self.current = self.current.saturating_sub(amount).max(0);
    }

    pub fn percent(&self) -> u8 {
        if self.max <= 0 {
            return 0;
        }
        ((self.current as i64 * 100) / self.max as i64).clamp(0, 100) as u8
    }
}
