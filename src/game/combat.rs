//! Pure damage-formula helpers shared by the player/NPC and NPC/NPC attack
//! paths (4.6/4.7). Kept free of ECS types so the arithmetic is unit
//! testable without spinning up a `World`.

use eo_data::{Formulas, VariableBag};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct AttackerStats {
    pub min_damage: i32,
    pub max_damage: i32,
    pub accuracy: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct DefenderStats {
    pub evade: i32,
    pub armor: i32,
    /// True when the defender's facing points back at the attacker.
    pub faces_attacker: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    pub damage: i32,
    pub critical: bool,
}

/// The hit-chance threshold (0..100) an attack roll must stay within to
/// land at all.
pub fn hit_threshold(attacker: &AttackerStats, defender: &DefenderStats, mob_rate: f32) -> i32 {
    let mut hit = 120.0;
    if defender.faces_attacker {
        hit -= 40.0;
    }
    hit += attacker.accuracy as f32 / 2.0 - (defender.evade as f32 / 2.0) * mob_rate;
    (hit.round() as i32).clamp(20, 100)
}

/// Applies armor mitigation, never reducing damage below 10% of the
/// pre-mitigation roll.
pub fn mitigate_damage(raw_damage: i32, defender: &DefenderStats, mob_rate: f32) -> i32 {
    let mitigated = raw_damage - ((defender.armor as f32 / 3.0) * mob_rate).round() as i32;
    let floor = (raw_damage as f32 * 0.1).ceil() as i32;
    mitigated.max(floor)
}

/// Resolves one attack: rolls raw damage, hit chance, and critical chance,
/// then returns the final (possibly zero) damage. Tries the configured
/// `damage` formula first; on a hit from that formula the accuracy/evade/
/// critical rolls below are skipped and the formula's result is used as-is.
pub fn resolve_attack(
    rng: &mut impl Rng,
    attacker: &AttackerStats,
    defender: &DefenderStats,
    mob_rate: f32,
    _critical_rate: f32,
    formulas: Option<&mut Formulas>,
) -> AttackOutcome {
    if let Some(formulas) = formulas {
        let mut vars = VariableBag::new();
        vars.set("mindam", attacker.min_damage as f64)
            .set("maxdam", attacker.max_damage as f64)
            .set("accuracy", attacker.accuracy as f64)
            .set("target_evade", defender.evade as f64)
            .set("target_armor", defender.armor as f64);
        if let Some(result) = formulas.evaluate("damage", &vars) {
            return AttackOutcome {
                damage: result.max(0.0) as i32,
                critical: false,
            };
        }
    }

    let raw_damage = rng.gen_range(attacker.min_damage..=attacker.max_damage.max(attacker.min_damage));
    let hit_rate = hit_threshold(attacker, defender, mob_rate);
    let mitigated = mitigate_damage(raw_damage, defender, mob_rate);

    let roll = rng.gen_range(0..=100);
    let critical = roll > 92;
    let damage = if roll > hit_rate {
        0
    } else if critical {
        (mitigated as f32 * 1.5).round() as i32
    } else {
        mitigated
    };

    AttackOutcome { damage, critical }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn facing_attacker_lowers_hit_threshold() {
        let attacker = AttackerStats {
            min_damage: 10,
            max_damage: 20,
            accuracy: 0,
        };
        let facing = DefenderStats {
            evade: 0,
            armor: 0,
            faces_attacker: true,
        };
        let not_facing = DefenderStats {
            faces_attacker: false,
            ..facing
        };
        assert!(hit_threshold(&attacker, &facing, 1.0) < hit_threshold(&attacker, &not_facing, 1.0));
    }

    #[test]
    fn mitigation_never_drops_below_ten_percent_floor() {
        let defender = DefenderStats {
            evade: 0,
            armor: 100_000,
            faces_attacker: false,
        };
        assert_eq!(mitigate_damage(50, &defender, 1.0), 5);
    }

    #[test]
    fn resolve_attack_stays_in_range_without_a_formula() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let attacker = AttackerStats {
            min_damage: 10,
            max_damage: 20,
            accuracy: 50,
        };
        let defender = DefenderStats {
            evade: 10,
            armor: 5,
            faces_attacker: false,
        };
        for _ in 0..200 {
            let outcome = resolve_attack(&mut rng, &attacker, &defender, 1.0, 1.0, None);
            assert!(outcome.damage >= 0);
            assert!(outcome.damage <= 30);
        }
    }
}
