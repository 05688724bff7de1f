use bevy_ecs::prelude::{Component, Entity};
use eo_data::NpcDefId;
use eo_game_common::DamageList;

/// Walker temperament: 0..6 select one of 7 scheduled act-speed tiers and
/// opt the NPC into the random-walk/aggro loop; 7 marks a stationary NPC
/// that never acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcSpawnType(pub u8);

impl NpcSpawnType {
    pub fn is_stationary(self) -> bool {
        self.0 >= 7
    }
}

/// The 7-entry act-speed table indexed by spawn type, in whole seconds.
/// Lower spawn types act faster; a stationary NPC never consults this.
pub const NPC_ACT_SPEED_TABLE_SECS: [f32; 7] = [0.6, 0.8, 1.0, 1.2, 1.5, 1.8, 2.2];

#[derive(Component, Debug, Clone)]
pub struct Npc {
    pub def_id: NpcDefId,
    pub spawn_type: NpcSpawnType,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub spawn_time_secs: u32,
    pub last_act_tick: u64,
    pub act_interval_ticks: u64,
    pub walk_idle_for_ticks: u32,
    pub dead_since_tick: Option<u64>,
    pub total_damage: i64,
    pub damage_list: DamageList,
    pub parent: Option<Entity>,
    pub boss: bool,
    pub child: bool,
}

impl Npc {
    pub fn new(
        def_id: NpcDefId,
        spawn_type: NpcSpawnType,
        spawn_x: i32,
        spawn_y: i32,
        spawn_time_secs: u32,
        boss: bool,
        child: bool,
    ) -> Self {
        Self {
            def_id,
            spawn_type,
            spawn_x,
            spawn_y,
            spawn_time_secs,
            last_act_tick: 0,
            act_interval_ticks: 0,
            walk_idle_for_ticks: 0,
            dead_since_tick: None,
            total_damage: 0,
            damage_list: DamageList::new(),
            parent: None,
            boss,
            child,
        }
    }

    pub fn record_hit(&mut self, attacker: Entity, amount: i64, tick: u64) {
        self.damage_list.record_hit(attacker, amount, tick);
        self.total_damage = self.total_damage.saturating_add(amount);
    }

    pub fn clear_damage(&mut self) {
        self.damage_list.clear();
        self.total_damage = 0;
    }
}
