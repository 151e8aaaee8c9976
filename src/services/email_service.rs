use crate::config::EmailConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Text(String),
    Html(String),
}

/// Subject and body of a message, before it is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: EmailBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: EmailBody,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, content: EmailContent) -> Self {
        Self {
            to: to.into(),
            subject: content.subject,
            body: content.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    /// No transport configured; the message was only logged.
    Skipped,
    Failed(String),
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

/// Outbound email boundary. Implementations report the outcome instead of
/// returning an error so callers can never fail on a lost email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> DeliveryStatus;
}

#[derive(Debug, Serialize)]
struct ApiEmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// Sends through a transactional email HTTP API that accepts
/// `{from, to, subject, text | html}` with a bearer key.
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(config: &EmailConfig, api_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client for email: {}", e)))?;

        info!(api_url = %api_url, "Email delivery enabled");

        Ok(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
            sender: config.sender.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryStatus {
        let (text, html) = match &message.body {
            EmailBody::Text(t) => (Some(t.as_str()), None),
            EmailBody::Html(h) => (None, Some(h.as_str())),
        };
        let payload = ApiEmailPayload {
            from: &self.sender,
            to: [&message.to],
            subject: &message.subject,
            text,
            html,
        };

        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await;

        match res {
            Ok(resp) if resp.status().is_success() => DeliveryStatus::Delivered,
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                DeliveryStatus::Failed(format!("email API returned {}: {}", status, body))
            }
            Err(err) if err.is_timeout() => {
                DeliveryStatus::Failed(format!("email API timed out: {}", err))
            }
            Err(err) => DeliveryStatus::Failed(format!("email API request failed: {}", err)),
        }
    }
}

/// Used when no email endpoint is configured.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryStatus {
        warn!(
            recipient = %message.to,
            subject = %message.subject,
            "Email transport not configured, message not sent"
        );
        DeliveryStatus::Skipped
    }
}
