// Streaming frame envelopes for the Push and RequestReply session variants.

use crate::domain::{DataClass, LootSet, WorldView};
use crate::use_cases::cadence::{CadencePolicy, DueSet};
use crate::use_cases::snapshot::{
    ExfilSnapshot, LooseLootSnapshot, PlayerSnapshot, StashSnapshot, corpses_snapshot,
    enabled_containers_snapshot, exfils_snapshot, loose_loot_snapshot, players_snapshot,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const GAME_ENDED_MESSAGE: &str = "Game has ended. Waiting for new game to start.";

/// Classes a RequestReply cycle can refresh.
pub const REPLY_CLASSES: [DataClass; 4] = [
    DataClass::Players,
    DataClass::LooseLoot,
    DataClass::Corpses,
    DataClass::Exfils,
];

/// Full refresh sent on every Push tick.
#[derive(Debug, Clone, Serialize)]
pub struct PushFrame {
    pub players: Vec<PlayerSnapshot>,
    pub loot: Option<Vec<LooseLootSnapshot>>,
    pub exfils: Vec<ExfilSnapshot>,
    pub corpses: Vec<StashSnapshot>,
    // Null when the container feature is disabled.
    pub containers: Option<Vec<StashSnapshot>>,
}

/// Reply to one `get_data` command; gated fields are null when unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyFrame {
    pub timestamp: DateTime<Utc>,
    pub players: Vec<PlayerSnapshot>,
    pub loot: Option<Vec<LooseLootSnapshot>>,
    pub exfils: Option<Vec<ExfilSnapshot>>,
    pub corpses: Option<Vec<StashSnapshot>>,
}

/// Last message a session sends when the raid is over.
#[derive(Debug, Clone, Serialize)]
pub struct GameEndedFrame {
    pub message: &'static str,
}

impl Default for GameEndedFrame {
    fn default() -> Self {
        Self {
            message: GAME_ENDED_MESSAGE,
        }
    }
}

pub fn assemble_push_frame(view: &WorldView, policy: &CadencePolicy) -> PushFrame {
    // Loot that has not been read yet streams as empty collections.
    let empty = LootSet::default();
    let loot = view.loot.as_ref().unwrap_or(&empty);
    PushFrame {
        players: players_snapshot(view),
        loot: policy
            .is_enabled(DataClass::LooseLoot)
            .then(|| loose_loot_snapshot(loot)),
        exfils: view
            .exfils
            .as_deref()
            .map(exfils_snapshot)
            .unwrap_or_default(),
        corpses: corpses_snapshot(loot),
        containers: enabled_containers_snapshot(policy, loot),
    }
}

pub fn assemble_reply_frame(
    view: &WorldView,
    due: &DueSet,
    timestamp: DateTime<Utc>,
) -> ReplyFrame {
    let empty = LootSet::default();
    let loot = view.loot.as_ref().unwrap_or(&empty);
    ReplyFrame {
        timestamp,
        players: players_snapshot(view),
        loot: due
            .contains(DataClass::LooseLoot)
            .then(|| loose_loot_snapshot(loot)),
        exfils: due.contains(DataClass::Exfils).then(|| {
            view.exfils
                .as_deref()
                .map(exfils_snapshot)
                .unwrap_or_default()
        }),
        corpses: due
            .contains(DataClass::Corpses)
            .then(|| corpses_snapshot(loot)),
    }
}
