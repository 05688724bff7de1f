use bevy_ecs::prelude::Component;
use eo_data::ItemId;

#[derive(Debug, Clone, Copy)]
pub struct ChestItem {
    pub item_id: ItemId,
    pub amount: u32,
    pub slot: u8,
}

/// One refill-controlled slot's eligible spawn rows and refill timer. Slot
/// `0` is reserved for user deposits and never gets one of these.
#[derive(Debug, Clone)]
pub struct ChestSpawnSlot {
    pub slot: u8,
    pub eligible: Vec<(ItemId, u32)>,
    pub refill_minutes: u32,
    pub last_taken_tick: Option<u64>,
}

#[derive(Component, Debug, Clone)]
pub struct Chest {
    pub x: i32,
    pub y: i32,
    pub items: Vec<ChestItem>,
    pub spawn_slots: Vec<ChestSpawnSlot>,
    pub reserved_slots: u32,
    pub chest_slots: u32,
    pub per_item_cap: u32,
}

impl Chest {
    pub fn new(x: i32, y: i32, chest_slots: u32, reserved_slots: u32, per_item_cap: u32) -> Self {
        Self {
            x,
            y,
            items: Vec::new(),
            spawn_slots: Vec::new(),
            reserved_slots,
            chest_slots,
            per_item_cap,
        }
    }

    pub fn user_slot_budget(&self) -> u32 {
        self.chest_slots.saturating_sub(self.reserved_slots)
    }

    pub fn item_at_slot(&self, slot: u8) -> Option<&ChestItem> {
        self.items.iter().find(|item| item.slot == slot)
    }

    fn item_at_slot_mut(&mut self, slot: u8) -> Option<&mut ChestItem> {
        self.items.iter_mut().find(|item| item.slot == slot)
    }

    /// Removes and returns the item occupying `slot`. Stamps the owning
    /// refill slot's `last_taken_tick` only for non-zero (refill) slots —
    /// user deposits in slot 0 never drive a refill timer.
    pub fn take_slot(&mut self, slot: u8, now_tick: u64) -> Option<ChestItem> {
        let index = self.items.iter().position(|item| item.slot == slot)?;
        let removed = self.items.remove(index);

        if slot != 0 {
            if let Some(spawn_slot) = self.spawn_slots.iter_mut().find(|s| s.slot == slot) {
                spawn_slot.last_taken_tick = Some(now_tick);
            }
        }

        Some(removed)
    }

    /// Deposits into user slot 0, stacking onto an existing stack of the
    /// same item up to `per_item_cap`, and refusing once the user slot
    /// budget is exhausted for a brand new stack.
    pub fn deposit_user_item(&mut self, item_id: ItemId, amount: u32) -> bool {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.slot == 0 && item.item_id == item_id)
        {
            let room = self.per_item_cap.saturating_sub(existing.amount);
            if room == 0 {
                return false;
            }
            existing.amount += amount.min(room);
            return true;
        }

        let used_user_slots = self.items.iter().filter(|item| item.slot == 0).count() as u32;
        if used_user_slots >= self.user_slot_budget() {
            return false;
        }

        self.items.push(ChestItem {
            item_id,
            amount: amount.min(self.per_item_cap),
            slot: 0,
        });
        true
    }

    pub fn place_refill_item(&mut self, slot: u8, item_id: ItemId, amount: u32) {
        self.item_at_slot_mut(slot)
            .map(|item| {
                item.item_id = item_id;
                item.amount = amount;
            })
            .unwrap_or_else(|| {
                self.items.push(ChestItem {
                    item_id,
                    amount,
                    slot,
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taking_a_refill_slot_stamps_last_taken() {
        let mut chest = Chest::new(5, 5, 5, 1, 50);
        chest.spawn_slots.push(ChestSpawnSlot {
            slot: 1,
            eligible: vec![(100, 3)],
            refill_minutes: 1,
            last_taken_tick: None,
        });
        chest.place_refill_item(1, 100, 3);
        chest.take_slot(1, 42);
        assert_eq!(chest.spawn_slots[0].last_taken_tick, Some(42));
    }

    #[test]
    fn taking_slot_zero_never_stamps_a_refill_timer() {
        let mut chest = Chest::new(5, 5, 5, 1, 50);
        chest.deposit_user_item(7, 1);
        chest.take_slot(0, 99);
        assert!(chest.spawn_slots.is_empty());
    }

    #[test]
    fn deposit_respects_per_item_cap() {
        let mut chest = Chest::new(5, 5, 5, 1, 10);
        assert!(chest.deposit_user_item(1, 8));
        assert!(chest.deposit_user_item(1, 5));
        assert_eq!(chest.item_at_slot(0).unwrap().amount, 10);
    }

    #[test]
    fn deposit_refuses_new_stack_beyond_user_slot_budget() {
        let mut chest = Chest::new(5, 5, 3, 1, 10); // budget = 2
        assert!(chest.deposit_user_item(1, 1));
        assert!(chest.deposit_user_item(2, 1));
        assert!(!chest.deposit_user_item(3, 1));
    }
}
