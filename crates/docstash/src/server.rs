use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::email::Mailer;
use crate::handlers;
use crate::store::file::{FileMessageStore, FileSettingsStore, FileUserStore, JsonDocumentStore};
use crate::store::{MessageStore, SettingsStore, UserStore};

/// Directory under the storage root served at `/uploads`.
pub const UPLOADS_DIR: &str = "uploads";

// ============================================================================
// Stores
// ============================================================================

/// Document adapters shared by all handlers.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub messages: Arc<dyn MessageStore>,
}

impl Stores {
    /// File-backed adapters over one document store (and therefore one lock set).
    pub fn file(documents: JsonDocumentStore) -> Self {
        Self {
            users: Arc::new(FileUserStore::new(documents.clone())),
            settings: Arc::new(FileSettingsStore::new(documents.clone())),
            messages: Arc::new(FileMessageStore::new(documents)),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub mailer: Arc<dyn Mailer>,
    pub email_available: bool,
    pub data_dir: PathBuf,
}

// ============================================================================
// Server Setup
// ============================================================================

pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let uploads = ServeDir::new(state.data_dir.join(UPLOADS_DIR));

    let api_routes = Router::new()
        .route("/users", get(handlers::api::list_users))
        .route(
            "/users/{id}",
            get(handlers::api::get_user)
                .put(handlers::api::upsert_user)
                .delete(handlers::api::delete_user),
        )
        .route(
            "/settings",
            get(handlers::api::get_settings).put(handlers::api::put_settings),
        )
        .route(
            "/messages",
            get(handlers::api::get_messages).put(handlers::api::put_messages),
        )
        .route(
            "/send-verification-code",
            post(handlers::api::send_verification_code),
        )
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_seconds),
        ))
        .layer(ConcurrencyLimitLayer::new(config.max_connections));

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .with_state(state)
        .nest("/api", api_routes)
        .nest_service("/uploads", uploads)
        .layer(cors_layer(&config.cors_origins))
}

/// Permissive CORS when no origins are configured, otherwise an allow-list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
