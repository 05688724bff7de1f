use bevy_ecs::entity::Entity;

/// One attacker's accumulated contribution to a kill, plus when they last
/// landed a hit. Drives both aggro target selection and reward splitting.
#[derive(Debug, Clone, Copy)]
pub struct DamageEntry {
    pub attacker: Entity,
    pub total_damage: i64,
    pub last_hit_tick: u64,
}

/// Per-NPC association from attacker to accumulated damage. Entries exist
/// only while the NPC is alive; the owning side (the NPC) is responsible for
/// walking every attacker's reverse pointer and detaching it on death or
/// despawn, and every attacker is responsible for detaching its own pointer
/// on logout, so neither side ever holds a dangling reference.
#[derive(Debug, Clone, Default)]
pub struct DamageList {
    entries: Vec<DamageEntry>,
}

impl DamageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DamageEntry> {
        self.entries.iter()
    }

    pub fn get(&self, attacker: Entity) -> Option<&DamageEntry> {
        self.entries.iter().find(|entry| entry.attacker == attacker)
    }

    /// Appends to an existing attacker's total or inserts a fresh entry,
    /// updating `last_hit_tick` either way.
    pub fn record_hit(&mut self, attacker: Entity, amount: i64, tick: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.attacker == attacker) {
            entry.total_damage = entry.total_damage.saturating_add(amount);
            entry.last_hit_tick = tick;
        } else {
            self.entries.push(DamageEntry {
                attacker,
                total_damage: amount,
                last_hit_tick: tick,
            });
        }
    }

    pub fn remove(&mut self, attacker: Entity) {
        self.entries.retain(|entry| entry.attacker != attacker);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn total_damage(&self) -> i64 {
        self.entries.iter().map(|entry| entry.total_damage).sum()
    }

    pub fn highest_damage_attacker(&self) -> Option<Entity> {
        self.entries
            .iter()
            .max_by_key(|entry| entry.total_damage)
            .map(|entry| entry.attacker)
    }

    /// Attackers who last hit within `bored_ticks` of `now`.
    pub fn recent_attackers(&self, now: u64, bored_ticks: u64) -> impl Iterator<Item = &DamageEntry> {
        self.entries
            .iter()
            .filter(move |entry| now.saturating_sub(entry.last_hit_tick) <= bored_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn entity(world: &mut World) -> Entity {
        world.spawn_empty().id()
    }

    #[test]
    fn record_hit_accumulates_per_attacker() {
        let mut world = World::new();
        let a = entity(&mut world);
        let mut list = DamageList::new();
        list.record_hit(a, 10, 1);
        list.record_hit(a, 5, 2);
        assert_eq!(list.get(a).unwrap().total_damage, 15);
        assert_eq!(list.get(a).unwrap().last_hit_tick, 2);
    }

    #[test]
    fn highest_damage_attacker_breaks_on_total() {
        let mut world = World::new();
        let a = entity(&mut world);
        let b = entity(&mut world);
        let mut list = DamageList::new();
        list.record_hit(a, 10, 1);
        list.record_hit(b, 30, 1);
        assert_eq!(list.highest_damage_attacker(), Some(b));
    }

    #[test]
    fn remove_detaches_attacker() {
        let mut world = World::new();
        let a = entity(&mut world);
        let mut list = DamageList::new();
        list.record_hit(a, 10, 1);
        list.remove(a);
        assert!(list.is_empty());
    }
}
