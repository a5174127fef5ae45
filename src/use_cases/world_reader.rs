// World Store adapter: phase gating and per-collection availability.

use crate::domain::{
    DataClass, Exfil, GamePhase, LootSet, QuestData, WorldError, WorldStore, WorldView,
};
use std::sync::Arc;

/// Read-only accessor over the injected World Store port.
#[derive(Clone)]
pub struct WorldReader {
    store: Arc<dyn WorldStore>,
}

impl WorldReader {
    pub fn new(store: Arc<dyn WorldStore>) -> Self {
        Self { store }
    }

    /// Phase flags are readable in every phase, including between raids.
    pub fn phase(&self) -> GamePhase {
        self.store.current().phase.clone()
    }

    /// Returns the current view, or `Unavailable` when not in a raid.
    pub fn read_view(&self) -> Result<Arc<WorldView>, WorldError> {
        let view = self.store.current();
        if !view.in_game() {
            return Err(WorldError::Unavailable);
        }
        Ok(view)
    }
}

/// Loot as soon as any of it has been read.
pub fn loaded_loot(view: &WorldView) -> Result<&LootSet, WorldError> {
    view.loot
        .as_ref()
        .ok_or(WorldError::NotPopulated(DataClass::LooseLoot))
}

/// Loot once container and corpse contents are cached.
pub fn cached_loot(view: &WorldView, class: DataClass) -> Result<&LootSet, WorldError> {
    match view.loot.as_ref() {
        Some(loot) if loot.cached => Ok(loot),
        _ => Err(WorldError::NotPopulated(class)),
    }
}

pub fn loaded_exfils(view: &WorldView) -> Result<&[Exfil], WorldError> {
    view.exfils
        .as_deref()
        .ok_or(WorldError::NotPopulated(DataClass::Exfils))
}

pub fn loaded_quests(view: &WorldView) -> Result<&QuestData, WorldError> {
    view.quests
        .as_ref()
        .ok_or(WorldError::NotPopulated(DataClass::Quests))
}
