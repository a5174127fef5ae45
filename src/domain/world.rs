// Domain-level world model as published by the external World Store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True for the "position not resolved yet" sentinel.
    pub fn is_unresolved(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Horizontal (yaw) and vertical (pitch) view angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePhase {
    pub in_game: bool,
    pub in_hideout: bool,
    pub is_scav: bool,
    // Formatted map name; empty until a raid is loaded.
    #[serde(default)]
    pub map_name: String,
    pub loading_loot: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    Usec,
    Bear,
    LocalPlayer,
    Teammate,
    PlayerScav,
    #[default]
    Scav,
    Raider,
    Boss,
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: Option<String>,
    pub profile_id: Option<String>,
    pub account_id: Option<String>,
    pub is_pmc: bool,
    pub is_local_player: bool,
    pub is_alive: bool,
    pub is_active: bool,
    pub has_exfiltrated: bool,
    #[serde(default)]
    pub player_type: PlayerType,
    pub level: i32,
    pub kda: f32,
    // Slot name -> equipped item; a slot can be known but still unresolved.
    #[serde(default)]
    pub gear: BTreeMap<String, Option<GearItem>>,
    pub position: Vec3,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainedItem {
    pub name: String,
    pub id: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LooseItem {
    pub name: String,
    pub id: String,
    pub value: i64,
    pub position: Vec3,
}

/// Shared shape for containers and corpses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootStash {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ContainedItem>,
    pub value: i64,
    pub important: bool,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LootEntity {
    LooseItem(LooseItem),
    Container(LootStash),
    Corpse(LootStash),
}

/// Loot collection as reported by the store.
///
/// `cached` flips to true once container and corpse contents have been read at
/// least once; loose items can be present before that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootSet {
    pub entities: Vec<LootEntity>,
    pub cached: bool,
}

impl LootSet {
    pub fn loose_items(&self) -> impl Iterator<Item = &LooseItem> {
        self.entities.iter().filter_map(|e| match e {
            LootEntity::LooseItem(item) => Some(item),
            _ => None,
        })
    }

    pub fn containers(&self) -> impl Iterator<Item = &LootStash> {
        self.entities.iter().filter_map(|e| match e {
            LootEntity::Container(stash) => Some(stash),
            _ => None,
        })
    }

    pub fn corpses(&self) -> impl Iterator<Item = &LootStash> {
        self.entities.iter().filter_map(|e| match e {
            LootEntity::Corpse(stash) => Some(stash),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExfilStatus {
    Open,
    Pending,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exfil {
    pub name: String,
    pub status: ExfilStatus,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestItem {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub task_name: String,
    pub description: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestZone {
    pub id: String,
    pub task_name: String,
    pub description: String,
    pub objective_type: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
    pub items: Vec<QuestItem>,
    pub zones: Vec<QuestZone>,
}

/// One consistent read of the World Store.
///
/// Collections that the store has not loaded yet are `None`; an empty
/// collection means "loaded, nothing there".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub phase: GamePhase,
    #[serde(default)]
    pub players: BTreeMap<String, PlayerState>,
    #[serde(default)]
    pub loot: Option<LootSet>,
    #[serde(default)]
    pub exfils: Option<Vec<Exfil>>,
    #[serde(default)]
    pub quests: Option<QuestData>,
}

impl WorldView {
    /// View published before the store has seen a raid.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn in_game(&self) -> bool {
        self.phase.in_game
    }
}
