use crate::dto::application_dto::ApplyRequest;
use crate::error::{Error, Result, ValidationError};
use crate::models::application::{
    Application, ApplicationStatus, Availability, Decision, ExperienceLevel, Language,
    NewApplication,
};
use crate::services::notification_service::NotificationService;
use crate::utils::time;
use serde_json::Value as JsonValue;
use sqlx::SqlitePool;
use tracing::{info, warn};

pub const MAX_MOTIVATION_CHARS: usize = 500;

const APPLICATION_COLUMNS: &str = "id, first_name, last_name, email, experience_level, language, \
     availability, motivation, status, created_at";

#[derive(Clone)]
pub struct ApplicationService {
    pool: SqlitePool,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(pool: SqlitePool, notifications: NotificationService) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    /// Validates, stores, then notifies applicant and administrator. Only the
    /// insert can fail the call; email outcomes are logged and dropped.
    pub async fn submit(&self, request: ApplyRequest) -> Result<Application> {
        let new_application = validate_submission(request)?;
        let application = self.insert(&new_application).await?;
        info!(
            application_id = application.id,
            language = %application.language,
            "Application submitted"
        );

        let notices = self.notifications.notify_submission(&application).await;
        if !notices.applicant.is_delivered() || !notices.admin.is_delivered() {
            warn!(
                application_id = application.id,
                applicant = ?notices.applicant,
                admin = ?notices.admin,
                "Submission stored but not every notification went out"
            );
        }

        Ok(application)
    }

    pub async fn insert(&self, new_application: &NewApplication) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications
                (first_name, last_name, email, experience_level, language, availability, motivation, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(&new_application.first_name)
        .bind(&new_application.last_name)
        .bind(&new_application.email)
        .bind(new_application.experience_level.as_str())
        .bind(new_application.language.as_str())
        .bind(new_application.availability.as_str())
        .bind(&new_application.motivation)
        .bind(ApplicationStatus::Pending.as_str())
        .bind(time::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    /// Every application, newest first.
    pub async fn list(&self) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    /// Moves a pending application to approved or rejected and emails the
    /// applicant. Decided applications are left untouched and no email is sent.
    pub async fn decide(&self, id: i64, decision: Decision) -> Result<Application> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))?;

        if current.status() != Some(ApplicationStatus::Pending) {
            return Err(Error::Conflict(format!(
                "Application {} has already been {}",
                id, current.status
            )));
        }

        let target = decision.resulting_status();
        let updated = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications
            SET status = ?
            WHERE id = ? AND status = ?
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(target.as_str())
        .bind(id)
        .bind(ApplicationStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await?
        // Another request decided it between the read and the update.
        .ok_or_else(|| Error::Conflict(format!("Application {} has already been decided", id)))?;

        info!(application_id = id, decision = %decision, "Application status updated");

        let delivery = self.notifications.notify_decision(&current, decision).await;
        if !delivery.is_delivered() {
            warn!(
                application_id = id,
                decision = %decision,
                outcome = ?delivery,
                "Decision stored but applicant was not emailed"
            );
        }

        Ok(updated)
    }
}

/// Fail-fast checks in a fixed order: presence of the six required fields,
/// then experience level, language, availability, and finally email shape.
/// Enum values must match exactly; surrounding whitespace is only stripped
/// from names and email.
pub fn validate_submission(request: ApplyRequest) -> std::result::Result<NewApplication, ValidationError> {
    let first_name = required(request.first_name, "first_name")?;
    let last_name = required(request.last_name, "last_name")?;
    let email = required(request.email, "email")?;
    let experience_level = required(request.experience_level, "experience_level")?;
    let language = required(request.language, "language")?;
    let availability = required(request.availability, "availability")?;

    let experience_level: ExperienceLevel = experience_level
        .parse()
        .map_err(|_| ValidationError::InvalidEnum("experience_level"))?;
    let language: Language = language
        .parse()
        .map_err(|_| ValidationError::InvalidEnum("language"))?;
    let availability: Availability = availability
        .parse()
        .map_err(|_| ValidationError::InvalidEnum("availability"))?;

    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(NewApplication {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        email: email.trim().to_string(),
        experience_level,
        language,
        availability,
        motivation: coerce_motivation(request.motivation),
    })
}

fn required(value: Option<String>, field: &'static str) -> std::result::Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn coerce_motivation(value: Option<JsonValue>) -> String {
    let text = match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s,
        Some(other) => other.to_string(),
    };
    text.chars().take(MAX_MOTIVATION_CHARS).collect()
}
