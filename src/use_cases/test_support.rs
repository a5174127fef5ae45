use std::sync::Arc;

use crate::domain::{PlayerState, Vec3, WorldStore, WorldView};

// World Store stand-in that always returns the same view.
pub(crate) struct StaticWorldStore {
    view: Arc<WorldView>,
}

impl StaticWorldStore {
    pub(crate) fn new(view: WorldView) -> Self {
        Self {
            view: Arc::new(view),
        }
    }
}

impl WorldStore for StaticWorldStore {
    fn current(&self) -> Arc<WorldView> {
        self.view.clone()
    }
}

pub(crate) fn in_game_view() -> WorldView {
    let mut view = WorldView::idle();
    view.phase.in_game = true;
    view.phase.map_name = "Customs".to_string();
    view
}

pub(crate) fn player_named(name: &str, position: Vec3) -> PlayerState {
    PlayerState {
        name: Some(name.to_string()),
        profile_id: Some(format!("profile-{name}")),
        account_id: Some(format!("account-{name}")),
        is_pmc: true,
        is_alive: true,
        is_active: true,
        level: 42,
        position,
        ..PlayerState::default()
    }
}
