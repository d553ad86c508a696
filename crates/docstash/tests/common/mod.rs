//! Common test utilities.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use docstash::config::ServerConfig;
use docstash::email::{DisabledMailer, EmailError, Mailer};
use docstash::server::{self, AppState, Stores};
use docstash::store::file::JsonDocumentStore;

/// Mailer that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), EmailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// A test app together with the storage root it writes to.
pub struct TestApp {
    pub router: Router,
    pub data_dir: PathBuf,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn put_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(
            Request::put(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }
}

/// Create a test app over a fresh storage root with the given mailer.
pub async fn test_app_with_mailer(mailer: Arc<dyn Mailer>, email_available: bool) -> TestApp {
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("data");

    let documents = JsonDocumentStore::new(&data_dir).with_media_dirs(["uploads/images"]);
    documents.init().await.unwrap();

    let state = AppState {
        stores: Stores::file(documents),
        mailer,
        email_available,
        data_dir: data_dir.clone(),
    };

    TestApp {
        router: server::build_app(state, &ServerConfig::default()),
        data_dir,
        _tmp: tmp,
    }
}

/// Create a test app with email delivery disabled.
pub async fn test_app() -> TestApp {
    test_app_with_mailer(Arc::new(DisabledMailer), false).await
}
