// Shared HTTP response types for consistent API error payloads.

use crate::domain::{DataClass, WorldError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const GAME_NOT_RUNNING: &str = "Game has ended. Waiting for new game to start.";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

/// Failure of a single query, already mapped to a client-visible status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub const fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub const fn unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub const fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }

    /// Default mapping for world read failures; endpoints override per class.
    pub fn from_world(err: WorldError, not_populated: &'static str) -> Self {
        match err {
            WorldError::Unavailable => Self::unavailable(GAME_NOT_RUNNING),
            WorldError::NotPopulated(_) => Self::not_found(not_populated),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Body for 400 responses on streaming routes that were not upgrade requests.
pub fn protocol_violation() -> Response {
    ApiError::new(StatusCode::BAD_REQUEST, "websocket upgrade required").into_response()
}

/// Maps a not-populated class to the 503 used while loose loot is loading.
pub fn loot_loading(err: WorldError) -> ApiError {
    match err {
        WorldError::NotPopulated(DataClass::LooseLoot) => {
            ApiError::unavailable("Loot data is still loading. Please try again later.")
        }
        other => ApiError::from_world(other, "Loot data is not available."),
    }
}
