// Snapshot records and their assembly from a `WorldView`.
// The same record types back the HTTP query endpoints and both streaming
// variants, so an entity has one wire shape everywhere. Entity fields use
// PascalCase names; collection envelopes use lowercase keys.

use crate::domain::{
    ContainedItem, Exfil, ExfilStatus, GamePhase, LootSet, LootStash, LooseItem, PlayerState,
    PlayerType, QuestData, Rotation, Vec3, WorldView,
};
use crate::use_cases::cadence::CadencePolicy;
use serde::Serialize;

pub const DEFAULT_PLAYER_NAME: &str = "Unknown";
pub const DEFAULT_PROFILE_ID: &str = "DefaultProfileID";
pub const DEFAULT_ACCOUNT_ID: &str = "DefaultAccountID";
pub const DEFAULT_GEAR_LONG_NAME: &str = "DefaultLongName";
pub const DEFAULT_GEAR_SHORT_NAME: &str = "DefaultShortName";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PositionSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for PositionSnapshot {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RotationSnapshot {
    pub yaw: f32,
    pub pitch: f32,
}

impl From<Rotation> for RotationSnapshot {
    fn from(r: Rotation) -> Self {
        Self {
            yaw: r.yaw,
            pitch: r.pitch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GearSnapshot {
    pub slot: String,
    pub long_name: String,
    pub short_name: String,
    pub item_value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerSnapshot {
    pub name: String,
    #[serde(rename = "IsPMC")]
    pub is_pmc: bool,
    pub is_local_player: bool,
    pub is_alive: bool,
    pub is_active: bool,
    pub lvl: i32,
    #[serde(rename = "KDA")]
    pub kda: f32,
    #[serde(rename = "ProfileID")]
    pub profile_id: String,
    #[serde(rename = "AccountID")]
    pub account_id: String,
    pub has_exfild: bool,
    #[serde(rename = "Type")]
    pub player_type: PlayerType,
    pub gear: Vec<GearSnapshot>,
    pub position: PositionSnapshot,
    pub rotation: RotationSnapshot,
}

impl From<&PlayerState> for PlayerSnapshot {
    fn from(p: &PlayerState) -> Self {
        // Absent identity and gear fields get explicit defaults so the wire
        // shape never loses a key.
        let gear = p
            .gear
            .iter()
            .map(|(slot, item)| GearSnapshot {
                slot: slot.clone(),
                long_name: item
                    .as_ref()
                    .and_then(|i| i.long_name.clone())
                    .unwrap_or_else(|| DEFAULT_GEAR_LONG_NAME.to_string()),
                short_name: item
                    .as_ref()
                    .and_then(|i| i.short_name.clone())
                    .unwrap_or_else(|| DEFAULT_GEAR_SHORT_NAME.to_string()),
                item_value: item.as_ref().and_then(|i| i.value).unwrap_or(0),
            })
            .collect();

        Self {
            name: p
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
            is_pmc: p.is_pmc,
            is_local_player: p.is_local_player,
            is_alive: p.is_alive,
            is_active: p.is_active,
            lvl: p.level,
            kda: p.kda,
            profile_id: p
                .profile_id
                .clone()
                .unwrap_or_else(|| DEFAULT_PROFILE_ID.to_string()),
            account_id: p
                .account_id
                .clone()
                .unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string()),
            has_exfild: p.has_exfiltrated,
            player_type: p.player_type,
            gear,
            position: p.position.into(),
            rotation: p.rotation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LooseLootSnapshot {
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub value: i64,
    pub position: PositionSnapshot,
}

impl From<&LooseItem> for LooseLootSnapshot {
    fn from(item: &LooseItem) -> Self {
        Self {
            name: item.name.clone(),
            id: item.id.clone(),
            value: item.value,
            position: item.position.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainedItemSnapshot {
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub value: i64,
}

impl From<&ContainedItem> for ContainedItemSnapshot {
    fn from(item: &ContainedItem) -> Self {
        Self {
            name: item.name.clone(),
            id: item.id.clone(),
            value: item.value,
        }
    }
}

/// Container or corpse record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StashSnapshot {
    pub name: String,
    pub items: Vec<ContainedItemSnapshot>,
    pub value: i64,
    pub important: bool,
    pub position: PositionSnapshot,
}

impl From<&LootStash> for StashSnapshot {
    fn from(stash: &LootStash) -> Self {
        Self {
            name: stash.name.clone(),
            items: stash.items.iter().map(ContainedItemSnapshot::from).collect(),
            value: stash.value,
            important: stash.important,
            position: stash.position.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExfilSnapshot {
    pub name: String,
    pub status: ExfilStatus,
    pub position: PositionSnapshot,
}

impl From<&Exfil> for ExfilSnapshot {
    fn from(exfil: &Exfil) -> Self {
        Self {
            name: exfil.name.clone(),
            status: exfil.status,
            position: exfil.position.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestItemSnapshot {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub task_name: String,
    pub description: String,
    pub position: PositionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestZoneSnapshot {
    #[serde(rename = "ID")]
    pub id: String,
    pub task_name: String,
    pub description: String,
    pub objective_type: String,
    pub position: PositionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSnapshot {
    pub quest_items: Vec<QuestItemSnapshot>,
    pub quest_zones: Vec<QuestZoneSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapSnapshot {
    pub map_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameStateSnapshot {
    pub in_game: bool,
    pub in_hideout: bool,
    pub is_scav: bool,
    pub map_name: String,
    pub loading_loot: bool,
}

pub fn players_snapshot(view: &WorldView) -> Vec<PlayerSnapshot> {
    view.players.values().map(PlayerSnapshot::from).collect()
}

pub fn loose_loot_snapshot(loot: &LootSet) -> Vec<LooseLootSnapshot> {
    loot.loose_items().map(LooseLootSnapshot::from).collect()
}

pub fn containers_snapshot(loot: &LootSet) -> Vec<StashSnapshot> {
    loot.containers().map(StashSnapshot::from).collect()
}

/// Containers for streaming; `None` when the feature is switched off.
pub fn enabled_containers_snapshot(
    policy: &CadencePolicy,
    loot: &LootSet,
) -> Option<Vec<StashSnapshot>> {
    policy.containers_enabled.then(|| containers_snapshot(loot))
}

pub fn corpses_snapshot(loot: &LootSet) -> Vec<StashSnapshot> {
    loot.corpses().map(StashSnapshot::from).collect()
}

pub fn exfils_snapshot(exfils: &[Exfil]) -> Vec<ExfilSnapshot> {
    exfils.iter().map(ExfilSnapshot::from).collect()
}

/// Quest objectives with a resolved position.
pub fn quest_snapshot(quests: &QuestData) -> QuestSnapshot {
    let quest_items = quests
        .items
        .iter()
        .filter(|item| !item.position.is_unresolved())
        .map(|item| QuestItemSnapshot {
            id: item.id.clone(),
            name: item.name.clone(),
            short_name: item.short_name.clone(),
            task_name: item.task_name.clone(),
            description: item.description.clone(),
            position: item.position.into(),
        })
        .collect();
    let quest_zones = quests
        .zones
        .iter()
        .filter(|zone| !zone.position.is_unresolved())
        .map(|zone| QuestZoneSnapshot {
            id: zone.id.clone(),
            task_name: zone.task_name.clone(),
            description: zone.description.clone(),
            objective_type: zone.objective_type.clone(),
            position: zone.position.into(),
        })
        .collect();

    QuestSnapshot {
        quest_items,
        quest_zones,
    }
}

pub fn map_snapshot(phase: &GamePhase) -> MapSnapshot {
    MapSnapshot {
        map_name: phase.map_name.clone(),
    }
}

pub fn game_state_snapshot(phase: &GamePhase) -> GameStateSnapshot {
    GameStateSnapshot {
        in_game: phase.in_game,
        in_hideout: phase.in_hideout,
        is_scav: phase.is_scav,
        map_name: phase.map_name.clone(),
        loading_loot: phase.loading_loot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GearItem, LootEntity, QuestItem, QuestZone};
    use crate::use_cases::test_support::{in_game_view, player_named};
    use serde_json::json;

    fn stash(name: &str, value: i64) -> LootStash {
        LootStash {
            name: name.to_string(),
            items: vec![ContainedItem {
                name: "Salewa".to_string(),
                id: "salewa".to_string(),
                value: 9_000,
            }],
            value,
            important: value > 50_000,
            position: Vec3::new(10.0, 0.0, -4.0),
        }
    }

    fn quest_item(id: &str, position: Vec3) -> QuestItem {
        QuestItem {
            id: id.to_string(),
            name: "Flash drive".to_string(),
            short_name: "Flash".to_string(),
            task_name: "Chemical Part 1".to_string(),
            description: "Find the drive".to_string(),
            position,
        }
    }

    fn quest_zone(id: &str, position: Vec3) -> QuestZone {
        QuestZone {
            id: id.to_string(),
            task_name: "Delivery".to_string(),
            description: "Mark the zone".to_string(),
            objective_type: "PlaceItem".to_string(),
            position,
        }
    }

    #[test]
    fn when_identity_fields_are_missing_then_player_record_uses_defaults() {
        let mut view = in_game_view();
        let mut player = PlayerState::default();
        player.gear.insert("Headwear".to_string(), None);
        player.gear.insert(
            "FirstPrimaryWeapon".to_string(),
            Some(GearItem {
                long_name: Some("AK-74N".to_string()),
                short_name: None,
                value: None,
            }),
        );
        view.players.insert("p1".to_string(), player);

        let players = players_snapshot(&view);

        assert_eq!(players.len(), 1);
        let record = &players[0];
        assert_eq!(record.name, DEFAULT_PLAYER_NAME);
        assert_eq!(record.profile_id, DEFAULT_PROFILE_ID);
        assert_eq!(record.account_id, DEFAULT_ACCOUNT_ID);

        let weapon = record
            .gear
            .iter()
            .find(|g| g.slot == "FirstPrimaryWeapon")
            .expect("expected weapon slot");
        assert_eq!(weapon.long_name, "AK-74N");
        assert_eq!(weapon.short_name, DEFAULT_GEAR_SHORT_NAME);
        assert_eq!(weapon.item_value, 0);

        let helmet = record
            .gear
            .iter()
            .find(|g| g.slot == "Headwear")
            .expect("expected headwear slot");
        assert_eq!(helmet.long_name, DEFAULT_GEAR_LONG_NAME);
    }

    #[test]
    fn when_view_has_many_players_then_snapshot_has_one_record_each() {
        let mut view = in_game_view();
        for i in 0..5 {
            view.players.insert(
                format!("p{i}"),
                player_named(&format!("player-{i}"), Vec3::new(i as f32, 0.0, 0.0)),
            );
        }

        assert_eq!(players_snapshot(&view).len(), view.players.len());
    }

    #[test]
    fn when_player_record_serializes_then_field_names_match_wire_contract() {
        let mut player = player_named("Alice", Vec3::new(1.0, 2.0, 3.0));
        player.rotation = Rotation {
            yaw: 90.0,
            pitch: -5.0,
        };

        let value = serde_json::to_value(PlayerSnapshot::from(&player)).expect("serialize");

        assert_eq!(value["Name"], "Alice");
        assert_eq!(value["Position"], json!({"X": 1.0, "Y": 2.0, "Z": 3.0}));
        assert_eq!(value["Rotation"], json!({"Yaw": 90.0, "Pitch": -5.0}));
        for key in [
            "IsPMC",
            "IsLocalPlayer",
            "IsAlive",
            "IsActive",
            "Lvl",
            "KDA",
            "ProfileID",
            "AccountID",
            "HasExfild",
            "Type",
            "Gear",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn when_quest_positions_are_zero_then_they_are_excluded() {
        let quests = QuestData {
            items: vec![
                quest_item("resolved", Vec3::new(5.0, 1.0, 2.0)),
                quest_item("unresolved", Vec3::ZERO),
                quest_item("on-axis", Vec3::new(0.0, 3.0, 0.0)),
            ],
            zones: vec![
                quest_zone("zone-unresolved", Vec3::ZERO),
                quest_zone("zone-a", Vec3::new(1.0, 1.0, 1.0)),
            ],
        };

        let snapshot = quest_snapshot(&quests);

        let item_ids: Vec<&str> = snapshot.quest_items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(item_ids, vec!["resolved", "on-axis"]);
        assert_eq!(snapshot.quest_zones.len(), 1);
        assert_eq!(snapshot.quest_zones[0].id, "zone-a");
    }

    #[test]
    fn when_quest_snapshot_serializes_then_envelope_keys_are_camel_case() {
        let value = serde_json::to_value(quest_snapshot(&QuestData::default())).expect("serialize");

        assert_eq!(value, json!({"questItems": [], "questZones": []}));
    }

    #[test]
    fn when_containers_are_disabled_then_snapshot_is_none_not_empty() {
        let loot = LootSet {
            entities: vec![LootEntity::Container(stash("Safe", 80_000))],
            cached: true,
        };

        let disabled = enabled_containers_snapshot(&CadencePolicy::default(), &loot);
        let enabled = enabled_containers_snapshot(
            &CadencePolicy {
                containers_enabled: true,
                ..CadencePolicy::default()
            },
            &loot,
        );

        assert!(disabled.is_none());
        let enabled = enabled.expect("expected containers when enabled");
        assert_eq!(enabled.len(), 1);
        assert!(enabled[0].important);
    }

    #[test]
    fn when_same_view_is_assembled_repeatedly_then_results_are_identical() {
        let mut view = in_game_view();
        view.players
            .insert("p1".to_string(), player_named("Bob", Vec3::new(4.0, 5.0, 6.0)));
        view.loot = Some(LootSet {
            entities: vec![
                LootEntity::Corpse(stash("Bob", 10_000)),
                LootEntity::LooseItem(LooseItem {
                    name: "LEDX".to_string(),
                    id: "ledx".to_string(),
                    value: 900_000,
                    position: Vec3::new(7.0, 0.0, 7.0),
                }),
            ],
            cached: true,
        });
        let before = view.clone();

        let loot = view.loot.as_ref().expect("loot");
        let corpses_first = corpses_snapshot(loot);
        let loose_first = loose_loot_snapshot(loot);
        let players_first = players_snapshot(&view);

        assert_eq!(corpses_first, corpses_snapshot(loot));
        assert_eq!(loose_first, loose_loot_snapshot(loot));
        assert_eq!(players_first, players_snapshot(&view));
        assert_eq!(view, before);
        assert_eq!(corpses_first.len(), 1);
        assert_eq!(loose_first[0].id, "ledx");
    }

    #[test]
    fn when_exfil_serializes_then_status_is_a_name() {
        let exfils = vec![Exfil {
            name: "ZB-1011".to_string(),
            status: ExfilStatus::Pending,
            position: Vec3::new(1.0, 2.0, 3.0),
        }];

        let value = serde_json::to_value(exfils_snapshot(&exfils)).expect("serialize");

        assert_eq!(value[0]["Name"], "ZB-1011");
        assert_eq!(value[0]["Status"], "Pending");
    }

    #[test]
    fn when_phase_is_projected_then_state_and_map_records_match() {
        let phase = GamePhase {
            in_game: true,
            in_hideout: false,
            is_scav: true,
            map_name: "Customs".to_string(),
            loading_loot: false,
        };

        let state = serde_json::to_value(game_state_snapshot(&phase)).expect("serialize");
        let map = serde_json::to_value(map_snapshot(&phase)).expect("serialize");

        assert_eq!(
            state,
            json!({
                "InGame": true,
                "InHideout": false,
                "IsScav": true,
                "MapName": "Customs",
                "LoadingLoot": false
            })
        );
        assert_eq!(map, json!({"MapName": "Customs"}));
    }
}
