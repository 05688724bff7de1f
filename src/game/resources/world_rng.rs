use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The world's single source of randomness. Seeded explicitly so a run can
/// be reproduced from a logged seed instead of `rand::thread_rng()`.
#[derive(Resource)]
pub struct WorldRng {
    pub rng: StdRng,
}

impl WorldRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
