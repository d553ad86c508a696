//! User collection HTTP handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use serde_json::Value;

use crate::handlers::envelope;
use crate::model::User;
use crate::server::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Response {
    match state.stores.users.list().await {
        Ok(users) => envelope::ok(users),
        Err(e) => envelope::storage_error("failed to read users", e),
    }
}

/// GET /api/users/{id}
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.stores.users.get(&id).await {
        Ok(user) => envelope::ok(user),
        Err(e) => envelope::storage_error("failed to read users", e),
    }
}

/// PUT /api/users/{id}
///
/// Creates or replaces the user. The body must be a JSON object; it is stored
/// as given, even if its own `id` differs from the path.
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejected(rejection),
    };
    let Ok(user) = User::try_from(body) else {
        return envelope::bad_request("user must be a JSON object");
    };

    match state.stores.users.upsert(&id, user).await {
        Ok(user) => envelope::ok(user),
        Err(e) => envelope::storage_error("failed to save user", e),
    }
}

/// DELETE /api/users/{id}
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.stores.users.delete(&id).await {
        Ok(()) => envelope::success(Some("user deleted")),
        Err(e) => envelope::storage_error("failed to delete user", e),
    }
}
