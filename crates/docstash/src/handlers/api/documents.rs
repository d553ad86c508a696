//! Settings and messages HTTP handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use serde_json::Value;

use crate::handlers::envelope;
use crate::model::Settings;
use crate::server::AppState;

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Response {
    match state.stores.settings.get().await {
        Ok(settings) => envelope::ok(settings),
        Err(e) => envelope::storage_error("failed to read settings", e),
    }
}

/// PUT /api/settings
///
/// Replaces the whole settings document.
pub async fn put_settings(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejected(rejection),
    };
    let Ok(settings) = Settings::try_from(body) else {
        return envelope::bad_request("settings must be a JSON object");
    };

    match state.stores.settings.put(settings).await {
        Ok(settings) => envelope::ok(settings),
        Err(e) => envelope::storage_error("failed to save settings", e),
    }
}

/// GET /api/messages
pub async fn get_messages(State(state): State<AppState>) -> Response {
    match state.stores.messages.get().await {
        Ok(messages) => envelope::ok(messages),
        Err(e) => envelope::storage_error("failed to read messages", e),
    }
}

/// PUT /api/messages
pub async fn put_messages(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejected(rejection),
    };

    match state.stores.messages.put(body).await {
        Ok(messages) => envelope::ok(messages),
        Err(e) => envelope::storage_error("failed to save messages", e),
    }
}
