// One-shot HTTP projections of the current world view.

use crate::domain::DataClass;
use crate::interface_adapters::http::{ApiError, loot_loading};
use crate::interface_adapters::state::AppState;
use crate::use_cases::snapshot::{
    containers_snapshot, corpses_snapshot, exfils_snapshot, game_state_snapshot,
    loose_loot_snapshot, map_snapshot, players_snapshot, quest_snapshot,
};
use crate::use_cases::world_reader::{cached_loot, loaded_exfils, loaded_loot, loaded_quests};

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

type QueryResult = Result<Response, ApiError>;

// Serialize up front so a failure turns into the generic 500 body.
fn json_ok<T: Serialize>(payload: &T) -> QueryResult {
    let body = serde_json::to_vec(payload).map_err(|e| {
        error!(error = %e, "failed to serialize query response");
        ApiError::internal()
    })?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

pub async fn players_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    let view = state
        .reader
        .read_view()
        .map_err(|e| ApiError::from_world(e, "No players found."))?;

    let players = players_snapshot(&view);
    if players.is_empty() {
        return Err(ApiError::not_found("No players found."));
    }
    json_ok(&players)
}

pub async fn map_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    let view = state
        .reader
        .read_view()
        .map_err(|e| ApiError::from_world(e, "Map data is not available."))?;

    json_ok(&map_snapshot(&view.phase))
}

pub async fn game_state_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    // Phase flags are answered in every phase, including between raids.
    json_ok(&game_state_snapshot(&state.reader.phase()))
}

pub async fn loose_loot_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    let view = state.reader.read_view().map_err(loot_loading)?;
    let loot = loaded_loot(&view).map_err(loot_loading)?;

    let items = loose_loot_snapshot(loot);
    if items.is_empty() {
        return Err(ApiError::not_found("No loose loot found."));
    }
    json_ok(&items)
}

pub async fn containers_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    // Served regardless of the streaming container toggle.
    let containers = state
        .reader
        .read_view()
        .and_then(|view| cached_loot(&view, DataClass::Containers).map(containers_snapshot))
        .map_err(|e| ApiError::from_world(e, "Loot data is not available."))?;

    json_ok(&containers)
}

pub async fn corpses_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    let corpses = state
        .reader
        .read_view()
        .and_then(|view| cached_loot(&view, DataClass::Corpses).map(corpses_snapshot))
        .map_err(|e| ApiError::from_world(e, "Loot data is not available."))?;

    json_ok(&corpses)
}

pub async fn quests_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    let quests = state
        .reader
        .read_view()
        .and_then(|view| loaded_quests(&view).map(quest_snapshot))
        .map_err(|e| ApiError::from_world(e, "Quest items or zones data is not available."))?;

    json_ok(&quests)
}

pub async fn exfils_handler(State(state): State<Arc<AppState>>) -> QueryResult {
    let exfils = state
        .reader
        .read_view()
        .and_then(|view| loaded_exfils(&view).map(exfils_snapshot))
        .map_err(|e| ApiError::from_world(e, "No exfil points found."))?;

    if exfils.is_empty() {
        return Err(ApiError::not_found("No exfil points found."));
    }
    json_ok(&exfils)
}
