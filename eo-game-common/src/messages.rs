//! Logical broadcast records, one variant per family+action pair named in
//! the external wire protocol interface. These are not bit layouts — they
//! carry the minimum fields an existing client expects for each event; the
//! out-of-scope frame codec is responsible for turning a `ServerMessage`
//! into bytes on the wire.

use crate::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientEntityId(pub u16);

#[derive(Debug, Clone)]
pub struct SpawnCharacter {
    pub entity_id: ClientEntityId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Debug, Clone)]
pub struct SpawnNpc {
    pub entity_id: ClientEntityId,
    pub npc_def_id: u32,
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub hp: i32,
}

#[derive(Debug, Clone)]
pub struct DroppedItem {
    pub entity_id: ClientEntityId,
    pub item_id: u32,
    pub amount: u32,
    pub x: i32,
    pub y: i32,
    pub owner_entity_id: Option<ClientEntityId>,
}

#[derive(Debug, Clone)]
pub struct ChestContents {
    pub x: i32,
    pub y: i32,
    pub slot: u8,
    pub item_id: u32,
    pub amount: u32,
}

#[derive(Debug, Clone)]
pub enum ServerMessage {
    /// `Players.Agree` — a character enters an observer's vision.
    PlayersAgree { data: Box<SpawnCharacter> },
    /// NPC counterpart of `Players.Agree` — an NPC enters an observer's
    /// vision.
    NpcAgree { data: Box<SpawnNpc> },
    /// `Clothes.Remove` — an entity leaves an observer's vision.
    ClothesRemove { entity_ids: Vec<ClientEntityId> },
    /// `Walk.Player` — a walk notification for an already-visible actor.
    WalkPlayer {
        entity_id: ClientEntityId,
        x: i32,
        y: i32,
        direction: Direction,
    },
    /// `Attack.Player` — an attack animation/result notification.
    AttackPlayer {
        attacker_entity_id: ClientEntityId,
        target_entity_id: ClientEntityId,
        direction: Direction,
    },
    /// `NPC.Player` — an NPC move notification.
    NpcPlayer {
        entity_id: ClientEntityId,
        x: i32,
        y: i32,
        direction: Direction,
    },
    /// `NPC.Reply` — an NPC was damaged but survived.
    NpcReply {
        entity_id: ClientEntityId,
        damage: i64,
        remaining_hp_percent: u8,
    },
    /// `NPC.Spec` — an NPC died; `show` controls client-side duplicate
    /// suppression when several same-id children die in one broadcast.
    NpcSpec {
        entity_id: ClientEntityId,
        npc_def_id: u32,
        dropped_item: Option<DroppedItem>,
        show: bool,
    },
    /// `NPC.Accept` — an NPC died and the killer leveled up from the kill.
    NpcAccept {
        entity_id: ClientEntityId,
        new_level: u32,
        new_stat_points: u32,
        new_skill_points: u32,
    },
    /// `NPC.Junk` — purge all remaining graphics for a def id (boss-child
    /// cascade de-duplication).
    NpcJunk { npc_def_id: u32 },
    /// `Item.Add` / `Item.Remove` / `Item.Get` — ground item lifecycle.
    ItemAdd { item: DroppedItem },
    ItemRemove { entity_id: ClientEntityId },
    ItemGet { entity_id: ClientEntityId, item_id: u32, amount: u32 },
    /// `Chest.Agree` — a chest slot changed contents.
    ChestAgree { chest: ChestContents },
    /// `Door.Open`
    DoorOpen { x: i32, y: i32 },
    /// `Face.Player` — a direction change with no position change.
    FacePlayer {
        entity_id: ClientEntityId,
        direction: Direction,
    },
    /// `Sit.Player` / `Sit.Chair`
    SitPlayer { entity_id: ClientEntityId },
    SitChair { entity_id: ClientEntityId, x: i32, y: i32 },
    /// `Recover.Player` / `Recover.Reply` / `Recover.List` / `Recover.TargetGroup`
    RecoverPlayer { hp: i32, tp: i32 },
    RecoverReply { entity_id: ClientEntityId, hp: i32 },
    RecoverList { entity_ids: Vec<ClientEntityId> },
    RecoverTargetGroup { entity_ids: Vec<ClientEntityId> },
    /// `Party.*`
    PartyCreate { entity_id: ClientEntityId },
    PartyList { member_entity_ids: Vec<ClientEntityId> },
    PartyAdd { entity_id: ClientEntityId },
    PartyRemove { entity_id: ClientEntityId },
    PartyClose,
    PartyAgree { leader_entity_id: ClientEntityId },
    /// `Paperdoll.Remove`
    PaperdollRemove { entity_id: ClientEntityId, slot: u8 },
    /// `Talk.*`
    TalkPlayer { entity_id: ClientEntityId, message: String },
    TalkMsg { message: String },
    TalkAdmin { entity_id: ClientEntityId, message: String },
    TalkAnnounce { message: String },
    TalkServer { message: String },
    /// `Effect.Use`
    EffectUse { entity_id: ClientEntityId, effect_id: u32 },
}
