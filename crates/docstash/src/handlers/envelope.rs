//! Envelope responses for the `/api` routes.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::api::Envelope;
use crate::store::StorageError;

/// 200 with `data`.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(Envelope::data(data))).into_response()
}

/// 200 without data.
pub fn success(message: Option<&str>) -> Response {
    (
        StatusCode::OK,
        Json(Envelope::<()>::success(message.map(str::to_string))),
    )
        .into_response()
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(Envelope::<()>::failure(message))).into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    failure(StatusCode::BAD_REQUEST, message)
}

pub fn not_found(message: impl Into<String>) -> Response {
    failure(StatusCode::NOT_FOUND, message)
}

pub fn internal_error(message: impl Into<String>) -> Response {
    failure(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Map a storage failure: `NotFound` is 404, anything else is logged and 500.
///
/// `context` is the client-facing message for 500s; error details stay in the log.
pub fn storage_error(context: &str, err: StorageError) -> Response {
    match err {
        StorageError::NotFound { entity_type, id } => {
            not_found(format!("{entity_type} '{id}' not found"))
        }
        other => {
            error!(error = %other, "{context}");
            internal_error(context)
        }
    }
}

/// Map a body extraction failure to 400.
pub fn rejected(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected request body");
    bad_request(rejection.body_text())
}
