use crate::interface_adapters::http::ApiError;
use crate::interface_adapters::net::{
    containers_handler, corpses_handler, exfils_handler, game_state_handler, loose_loot_handler,
    map_handler, players_handler, push_ws_handler, quests_handler, request_reply_ws_handler,
};
use crate::interface_adapters::state::AppState;

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use std::{any::Any, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/game/players", get(players_handler))
        .route("/api/game/map", get(map_handler))
        .route("/api/game/state", get(game_state_handler))
        .route("/api/game/loot/loose", get(loose_loot_handler))
        .route("/api/game/loot/containers", get(containers_handler))
        .route("/api/game/loot/corpses", get(corpses_handler))
        .route("/api/game/loot/quests", get(quests_handler))
        .route("/api/game/exfils", get(exfils_handler))
        .route("/ws/connect", get(push_ws_handler))
        .route("/ws/connect_v2", get(request_reply_ws_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Panics become the same generic 500 body as any other internal failure.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    error!(panic = %detail, "request handler panicked");
    ApiError::internal().into_response()
}
