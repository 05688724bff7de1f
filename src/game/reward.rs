//! Pure drop-selection and reward-split helpers for 4.8 (kill & reward
//! split), kept separate from the ECS kill system so the probability logic
//! is unit testable without a `World`.

use bevy_ecs::prelude::Entity;
use eo_data::{DropRow, ItemId};
use eo_game_common::DamageList;
use rand::Rng;

/// Picks a drop under `drop_rate_mode` (1 = uniform among independently
/// successful rolls, 2 = first successful roll, 3 = single weighted pick
/// over `chance_percent` treated as relative weights), scaling every row's
/// chance by `drop_rate` first.
pub fn choose_drop(rng: &mut impl Rng, rows: &[DropRow], drop_rate: f32, mode: u8) -> Option<(ItemId, u32)> {
    match mode {
        2 => rows.iter().find_map(|row| {
            let chance = (row.chance_percent * drop_rate).clamp(0.0, 100.0);
            (rng.gen_range(0.0..100.0) < chance).then_some((row.item_id, row.amount))
        }),
        3 => {
            let total: f32 = rows.iter().map(|row| row.chance_percent * drop_rate).sum();
            if total <= 0.0 {
                return None;
            }
            let roll = rng.gen_range(0.0..total);
            let mut acc = 0.0;
            for row in rows {
                acc += row.chance_percent * drop_rate;
                if roll < acc {
                    return Some((row.item_id, row.amount));
                }
            }
            None
        }
        _ => {
            let successes: Vec<&DropRow> = rows
                .iter()
                .filter(|row| {
                    let chance = (row.chance_percent * drop_rate).clamp(0.0, 100.0);
                    rng.gen_range(0.0..100.0) < chance
                })
                .collect();
            if successes.is_empty() {
                return None;
            }
            let pick = &successes[rng.gen_range(0..successes.len())];
            Some((pick.item_id, pick.amount))
        }
    }
}

/// Picks the drop/reward winner under `share_mode` (4.8 step 3): 0 = final
/// blow, 1 = highest accumulated damage, 2 = damage-weighted random over
/// in-range attackers, 3 = uniform random over in-range attackers.
pub fn choose_reward_winner(
    rng: &mut impl Rng,
    damage_list: &DamageList,
    final_blow: Entity,
    share_mode: u8,
    eligible: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    match share_mode {
        1 => damage_list.highest_damage_attacker(),
        2 => {
            let candidates: Vec<(Entity, i64)> = damage_list
                .iter()
                .filter(|entry| eligible(entry.attacker))
                .map(|entry| (entry.attacker, entry.total_damage.max(0)))
                .collect();
            let total: i64 = candidates.iter().map(|(_, damage)| damage).sum();
            if total <= 0 {
                return None;
            }
            let roll = rng.gen_range(0..total);
            let mut acc = 0;
            for (entity, damage) in candidates {
                acc += damage;
                if roll < acc {
                    return Some(entity);
                }
            }
            None
        }
        3 => {
            let candidates: Vec<Entity> = damage_list
                .iter()
                .filter(|entry| eligible(entry.attacker))
                .map(|entry| entry.attacker)
                .collect();
            if candidates.is_empty() {
                return None;
            }
            Some(candidates[rng.gen_range(0..candidates.len())])
        }
        _ => Some(final_blow),
    }
}

/// Flat-split experience evenly across `n` party members.
pub fn split_experience_flat(total: u64, n: usize) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }
    vec![total / n as u64; n]
}

/// Level-weighted experience split: each member's share is proportional to
/// its own level among the party's summed levels.
pub fn split_experience_level_weighted(total: u64, levels: &[u32]) -> Vec<u64> {
    let sum: u64 = levels.iter().map(|&level| level as u64).sum();
    if sum == 0 {
        return vec![0; levels.len()];
    }
    levels
        .iter()
        .map(|&level| total * level as u64 / sum)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;
    use rand::SeedableRng;

    #[test]
    fn mode_two_stops_at_first_success() {
        let rows = vec![
            DropRow {
                item_id: 1,
                amount: 1,
                chance_percent: 100.0,
            },
            DropRow {
                item_id: 2,
                amount: 1,
                chance_percent: 100.0,
            },
        ];
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(choose_drop(&mut rng, &rows, 1.0, 2), Some((1, 1)));
    }

    #[test]
    fn zero_drop_rate_never_drops() {
        let rows = vec![DropRow {
            item_id: 1,
            amount: 1,
            chance_percent: 100.0,
        }];
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(choose_drop(&mut rng, &rows, 0.0, 1), None);
    }

    #[test]
    fn share_mode_zero_always_picks_final_blow() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut list = DamageList::new();
        list.record_hit(a, 10, 1);
        list.record_hit(b, 90, 1);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(
            choose_reward_winner(&mut rng, &list, a, 0, |_| true),
            Some(a)
        );
    }

    #[test]
    fn share_mode_one_picks_highest_damage() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut list = DamageList::new();
        list.record_hit(a, 10, 1);
        list.record_hit(b, 90, 1);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(
            choose_reward_winner(&mut rng, &list, a, 1, |_| true),
            Some(b)
        );
    }

    #[test]
    fn level_weighted_split_is_proportional() {
        let shares = split_experience_level_weighted(300, &[10, 20, 30]);
        assert_eq!(shares, vec![50, 100, 150]);
    }
}
