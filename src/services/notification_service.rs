use crate::models::application::{Application, Decision};
use crate::services::email_service::{DeliveryStatus, EmailContent, EmailMessage, Mailer};
use crate::utils::{email_templates, time};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of the two independent sends that follow a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionNotices {
    pub applicant: DeliveryStatus,
    pub admin: DeliveryStatus,
}

#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    admin_address: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, admin_address: String) -> Self {
        Self {
            mailer,
            admin_address,
        }
    }

    /// Confirmation to the applicant and a heads-up to the administrator.
    /// One failing never stops the other.
    pub async fn notify_submission(&self, application: &Application) -> SubmissionNotices {
        let confirmation = email_templates::applicant_confirmation(
            &application.first_name,
            &application.last_name,
        );
        let applicant = self
            .deliver(application.id, &application.email, confirmation)
            .await;

        let notice = email_templates::admin_notification(
            &application.first_name,
            &application.last_name,
            &application.email,
            &application.language,
            &time::to_human(application.created_at),
        );
        let admin = self
            .deliver(application.id, &self.admin_address, notice)
            .await;

        SubmissionNotices { applicant, admin }
    }

    pub async fn notify_decision(
        &self,
        application: &Application,
        decision: Decision,
    ) -> DeliveryStatus {
        let content = match decision {
            Decision::Approve => {
                email_templates::approval(&application.first_name, &application.last_name)
            }
            Decision::Reject => {
                email_templates::rejection(&application.first_name, &application.last_name)
            }
        };
        self.deliver(application.id, &application.email, content).await
    }

    async fn deliver(
        &self,
        application_id: i64,
        recipient: &str,
        content: EmailContent,
    ) -> DeliveryStatus {
        let message = EmailMessage::new(recipient, content);
        let status = self.mailer.send(&message).await;
        match &status {
            DeliveryStatus::Delivered => {
                info!(application_id, recipient, subject = %message.subject, "Email sent")
            }
            DeliveryStatus::Skipped => {}
            DeliveryStatus::Failed(reason) => warn!(
                application_id,
                recipient,
                subject = %message.subject,
                reason = %reason,
                "Email delivery failed"
            ),
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email_service::{EmailBody, MockMailer};
    use chrono::TimeZone;
    use mockall::Sequence;

    fn application() -> Application {
        Application {
            id: 7,
            first_name: "Ana".into(),
            last_name: "Lee".into(),
            email: "ana@x.com".into(),
            experience_level: "No".into(),
            language: "English".into(),
            availability: "Night".into(),
            motivation: String::new(),
            status: "pending".into(),
            created_at: chrono::Utc.with_ymd_and_hms(2025, 3, 4, 14, 15, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn applicant_failure_does_not_block_admin_notice() {
        let mut mailer = MockMailer::new();
        let mut seq = Sequence::new();
        mailer
            .expect_send()
            .withf(|m| m.to == "ana@x.com" && m.subject == "Application Received")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| DeliveryStatus::Failed("smtp down".into()));
        mailer
            .expect_send()
            .withf(|m| {
                m.to == "boss@example.com"
                    && matches!(&m.body, EmailBody::Text(t) if t.contains("March 04, 2025 at 02:15 PM"))
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| DeliveryStatus::Delivered);

        let service = NotificationService::new(Arc::new(mailer), "boss@example.com".into());
        let notices = service.notify_submission(&application()).await;

        assert_eq!(notices.applicant, DeliveryStatus::Failed("smtp down".into()));
        assert_eq!(notices.admin, DeliveryStatus::Delivered);
    }

    #[tokio::test]
    async fn decision_goes_only_to_the_applicant() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|m| {
                m.to == "ana@x.com"
                    && m.subject == "Update on Your Application"
                    && matches!(m.body, EmailBody::Html(_))
            })
            .times(1)
            .returning(|_| DeliveryStatus::Delivered);

        let service = NotificationService::new(Arc::new(mailer), "boss@example.com".into());
        let status = service
            .notify_decision(&application(), Decision::Reject)
            .await;
        assert!(status.is_delivered());
    }
}
