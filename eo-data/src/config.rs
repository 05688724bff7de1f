use serde::{Deserialize, Serialize};

/// Every tunable enumerated in the external interface, loaded once from a
/// JSON config file at startup. Every field defaults to a sane value so the
/// world is runnable with no config file at all, the same way the donor's
/// resources (`WorldRates`, `WorldTime::new()`) are always constructible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub map_dir: String,
    pub maps: Vec<u32>,
    pub see_distance: i32,
    pub enforce_timestamps: bool,
    pub enforce_weight: bool,
    pub limit_attack: bool,
    pub ranged_distance: i32,
    pub mob_rate: f32,
    pub pk_rate: f32,
    pub critical_rate: f32,
    pub npc_chase_distance: i32,
    pub npc_bored_timer_secs: u64,
    pub npc_adjust_max_dam: i32,
    pub npc_recover_rate: f32,
    pub npc_recover_speed_secs: u64,
    pub pet_chase_distance: i32,
    pub pet_guard_distance: i32,
    pub pet_damage_multiplier: f32,
    pub pet_speed: f32,
    pub pet_respawn_time_secs: u64,
    pub max_pets: u32,
    pub spawn_rate: f32,
    pub exp_rate: f32,
    pub drop_rate: f32,
    pub drop_rate_mode: u8,
    pub share_mode: u8,
    pub party_share_mode: u8,
    pub max_exp: u64,
    pub max_level: u32,
    pub stat_per_level: u32,
    pub skill_per_level: u32,
    pub recover_speed_secs: u64,
    pub sit_hp_recover_rate: f32,
    pub sit_tp_recover_rate: f32,
    pub hp_recover_rate: f32,
    pub tp_recover_rate: f32,
    pub warp_suck_secs: u64,
    pub warp_bubbles: bool,
    pub item_despawn: bool,
    pub item_despawn_rate_secs: u64,
    pub item_despawn_check_secs: u64,
    pub timed_save_secs: u64,
    pub clock_max_delta_secs: u64,
    pub jail_map: u32,
    pub jail_x: i32,
    pub jail_y: i32,
    pub unjail_x: i32,
    pub unjail_y: i32,
    pub pk_except: Vec<u32>,
    pub global_pk: bool,
    pub deadly: bool,
    pub death_recover: bool,
    pub limit_damage: bool,
    pub max_chest: u32,
    pub chest_slots: u32,
    pub max_item: u32,
    pub max_tile: u32,
    pub max_map: u32,
    pub protect_npc_drop_secs: u64,
    pub protect_maps: bool,
    pub max_hair_style: u32,
    pub max_hair_color: u32,
    pub max_skin: u32,
    pub max_stat: u32,
    pub no_interact_default: bool,
    pub no_interact_default_admin: bool,
    pub admin_board: u32,
    pub admin_board_limit: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            map_dir: "maps".to_string(),
            maps: Vec::new(),
            see_distance: 11,
            enforce_timestamps: true,
            enforce_weight: true,
            limit_attack: true,
            ranged_distance: 6,
            mob_rate: 1.0,
            pk_rate: 1.0,
            critical_rate: 1.0,
            npc_chase_distance: 8,
            npc_bored_timer_secs: 6,
            npc_adjust_max_dam: 0,
            npc_recover_rate: 1.0,
            npc_recover_speed_secs: 5,
            pet_chase_distance: 8,
            pet_guard_distance: 4,
            pet_damage_multiplier: 1.0,
            pet_speed: 1.0,
            pet_respawn_time_secs: 60,
            max_pets: 1,
            spawn_rate: 1.0,
            exp_rate: 1.0,
            drop_rate: 1.0,
            drop_rate_mode: 1,
            share_mode: 0,
            party_share_mode: 0,
            max_exp: u64::MAX,
            max_level: 250,
            stat_per_level: 3,
            skill_per_level: 2,
            recover_speed_secs: 5,
            sit_hp_recover_rate: 2.0,
            sit_tp_recover_rate: 2.0,
            hp_recover_rate: 1.0,
            tp_recover_rate: 1.0,
            warp_suck_secs: 5,
            warp_bubbles: true,
            item_despawn: true,
            item_despawn_rate_secs: 600,
            item_despawn_check_secs: 60,
            timed_save_secs: 300,
            clock_max_delta_secs: 10,
            jail_map: 0,
            jail_x: 0,
            jail_y: 0,
            unjail_x: 0,
            unjail_y: 0,
            pk_except: Vec::new(),
            global_pk: false,
            deadly: false,
            death_recover: true,
            limit_damage: true,
            max_chest: 1000,
            chest_slots: 5,
            max_item: 64000,
            max_tile: 10000,
            max_map: 10000,
            protect_npc_drop_secs: 10,
            protect_maps: false,
            max_hair_style: 10,
            max_hair_color: 10,
            max_skin: 10,
            max_stat: 1000,
            no_interact_default: false,
            no_interact_default_admin: false,
            admin_board: 0,
            admin_board_limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_json() {
        let config = WorldConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WorldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.see_distance, config.see_distance);
    }

    #[test]
    fn missing_config_file_fields_fall_back_to_defaults() {
        let parsed: WorldConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.see_distance, WorldConfig::default().see_distance);
    }
}
