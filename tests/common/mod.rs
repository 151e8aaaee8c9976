#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use application_intake::{
    config::{BootstrapAdmin, Config, EmailConfig, LogFormat},
    database::{migrator::run_migrations, pool::create_memory_pool},
    routes,
    services::email_service::{DeliveryStatus, EmailMessage, Mailer},
    AppState,
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const ADMIN_INBOX: &str = "boss@example.com";

/// Captures every message and answers with a fixed outcome.
#[derive(Clone)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    outcome: DeliveryStatus,
}

impl RecordingMailer {
    pub fn delivering() -> Self {
        Self::with_outcome(DeliveryStatus::Delivered)
    }

    pub fn failing() -> Self {
        Self::with_outcome(DeliveryStatus::Failed("transport unavailable".into()))
    }

    fn with_outcome(outcome: DeliveryStatus) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<EmailMessage> {
        self.sent().into_iter().filter(|m| m.to == address).collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryStatus {
        self.sent.lock().unwrap().push(message.clone());
        self.outcome.clone()
    }
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        email: EmailConfig {
            api_url: None,
            api_key: String::new(),
            sender: "jobs@example.com".into(),
            admin_address: ADMIN_INBOX.into(),
            timeout: Duration::from_secs(1),
        },
        static_dir: "static".into(),
        public_rps: 1000,
        bootstrap_admin: BootstrapAdmin::default(),
        log_format: LogFormat::Pretty,
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub mailer: RecordingMailer,
}

pub async fn setup_app(mailer: RecordingMailer) -> TestApp {
    setup_app_with_config(test_config(), mailer).await
}

pub async fn setup_app_with_config(config: Config, mailer: RecordingMailer) -> TestApp {
    let pool = create_memory_pool().await.expect("pool");
    run_migrations(&pool).await.expect("migrations");

    let state = AppState::new(pool.clone(), &config, Arc::new(mailer.clone()));
    state
        .admin_service
        .ensure_bootstrap_account(&config.bootstrap_admin)
        .await
        .expect("bootstrap admin");

    TestApp {
        router: routes::router(state, &config),
        pool,
        mailer,
    }
}

impl TestApp {
    pub async fn post_json(&self, uri: &str, body: &JsonValue) -> (StatusCode, JsonValue) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, JsonValue) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, JsonValue) {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, JsonValue) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
        (status, body)
    }

    pub async fn row_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
