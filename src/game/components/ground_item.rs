use bevy_ecs::prelude::{Component, Entity};
use eo_data::ItemId;

#[derive(Component, Debug, Clone, Copy)]
pub struct GroundItem {
    pub uid: u32,
    pub item_id: ItemId,
    pub amount: u32,
    pub owner_character: Option<Entity>,
    pub unprotect_deadline_tick: u64,
}
