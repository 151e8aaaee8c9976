pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    admin_service::AdminService,
    application_service::ApplicationService,
    email_service::{HttpMailer, LogMailer, Mailer},
    notification_service::NotificationService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub application_service: ApplicationService,
    pub admin_service: AdminService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        let notification_service =
            NotificationService::new(mailer, config.email.admin_address.clone());
        let application_service =
            ApplicationService::new(pool.clone(), notification_service);
        let admin_service = AdminService::new(pool.clone(), config.bootstrap_admin.email.clone());

        Self {
            pool,
            application_service,
            admin_service,
        }
    }

    /// Picks the HTTP mailer when an endpoint is configured, the log-only one
    /// otherwise.
    pub fn from_config(pool: SqlitePool, config: &Config) -> Result<Self> {
        let mailer: Arc<dyn Mailer> = match &config.email.api_url {
            Some(url) => Arc::new(HttpMailer::new(&config.email, url.clone())?),
            None => {
                tracing::warn!("EMAIL_API_URL not set, emails will only be logged");
                Arc::new(LogMailer)
            }
        };
        Ok(Self::new(pool, config, mailer))
    }
}
