use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub email: EmailConfig,
    pub static_dir: String,
    pub public_rps: u32,
    pub bootstrap_admin: BootstrapAdmin,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Transactional email endpoint. `None` switches to the log-only mailer.
    pub api_url: Option<String>,
    pub api_key: String,
    pub sender: String,
    pub admin_address: String,
    pub timeout: Duration,
}

/// Credentials of the account created on first start when no admin exists.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: "admin123".to_string(),
        }
    }
}

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let server_address = match env::var("SERVER_ADDRESS") {
            Ok(addr) if !addr.trim().is_empty() => addr,
            _ => format!("0.0.0.0:{}", get_env_parse_or::<u16>("PORT", 3000)?),
        };

        let bootstrap_defaults = BootstrapAdmin::default();

        Ok(Self {
            server_address,
            database_url: get_env_or("DATABASE_URL", "sqlite://applications.db"),
            email: EmailConfig {
                api_url: env::var("EMAIL_API_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
                api_key: get_env_or("EMAIL_API_KEY", ""),
                sender: get_env_or("SENDER_EMAIL", "no-reply@localhost"),
                admin_address: get_env("ADMIN_EMAIL")?,
                timeout: Duration::from_secs(get_env_parse_or("EMAIL_TIMEOUT_SECS", 10)?),
            },
            static_dir: get_env_or("STATIC_DIR", "static"),
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            bootstrap_admin: BootstrapAdmin {
                username: get_env_or("BOOTSTRAP_ADMIN_USERNAME", &bootstrap_defaults.username),
                email: get_env_or("BOOTSTRAP_ADMIN_EMAIL", &bootstrap_defaults.email),
                password: get_env_or("BOOTSTRAP_ADMIN_PASSWORD", &bootstrap_defaults.password),
            },
            log_format: match env::var("LOG_FORMAT") {
                Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
