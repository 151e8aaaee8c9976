use crate::config::{BootstrapAdmin, DEFAULT_ADMIN_EMAIL};
use crate::dto::admin_dto::ChangePasswordRequest;
use crate::error::{Error, Result, ValidationError};
use crate::models::admin::AdminAccount;
use crate::utils::{crypto, time};
use sqlx::SqlitePool;
use tracing::{info, warn};

pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AdminService {
    pool: SqlitePool,
    default_email: String,
}

impl AdminService {
    pub fn new(pool: SqlitePool, default_email: String) -> Self {
        Self {
            pool,
            default_email,
        }
    }

    /// Creates the bootstrap account when the table is empty. Returns whether
    /// an account was created.
    pub async fn ensure_bootstrap_account(&self, bootstrap: &BootstrapAdmin) -> Result<bool> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            return Ok(false);
        }

        let password_hash = crypto::hash_password(&bootstrap.password)?;
        sqlx::query(
            r#"
            INSERT INTO admins (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&bootstrap.username)
        .bind(&bootstrap.email)
        .bind(password_hash)
        .bind(time::now())
        .execute(&self.pool)
        .await?;

        info!(username = %bootstrap.username, email = %bootstrap.email, "Bootstrap admin account created");
        if bootstrap.email == DEFAULT_ADMIN_EMAIL {
            warn!("Bootstrap admin uses the default address; rotate its password before going live");
        }
        Ok(true)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let account = sqlx::query_as::<_, AdminAccount>(
            "SELECT id, username, email, password_hash, created_at FROM admins WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Unknown account and wrong password produce the same error and cost the
    /// same argon2 work.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<AdminAccount> {
        let Some(account) = self.find_by_email(email).await? else {
            crypto::verify_against_dummy(password);
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        if !crypto::verify_password(password, &account.password_hash)? {
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        Ok(account)
    }

    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<()> {
        let current = present(request.current_password, "currentPassword")?;
        let new = present(request.new_password, "newPassword")?;
        let confirm = present(request.confirm_password, "confirmPassword")?;

        if new != confirm {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }

        let email = request
            .email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| self.default_email.clone());

        let account = self.verify_credentials(email.trim(), &current).await?;

        let password_hash = crypto::hash_password(&new)?;
        sqlx::query("UPDATE admins SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(account.id)
            .execute(&self.pool)
            .await?;

        info!(admin_id = account.id, "Admin password changed");
        Ok(())
    }
}

fn present(value: Option<String>, field: &'static str) -> std::result::Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{migrator::run_migrations, pool::create_memory_pool};

    async fn service() -> AdminService {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        let service = AdminService::new(pool, DEFAULT_ADMIN_EMAIL.to_string());
        service
            .ensure_bootstrap_account(&BootstrapAdmin::default())
            .await
            .unwrap();
        service
    }

    fn request(current: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: Some(current.into()),
            new_password: Some(new.into()),
            confirm_password: Some(confirm.into()),
            email: None,
        }
    }

    async fn stored_hash(service: &AdminService) -> String {
        service
            .find_by_email(DEFAULT_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap()
            .password_hash
    }

    #[tokio::test]
    async fn bootstrap_runs_once() {
        let service = service().await;
        let created = service
            .ensure_bootstrap_account(&BootstrapAdmin::default())
            .await
            .unwrap();
        assert!(!created);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn rotation_replaces_the_hash() {
        let service = service().await;
        tokio_test::assert_ok!(
            service
                .change_password(request("admin123", "n3w-secret", "n3w-secret"))
                .await
        );

        tokio_test::assert_ok!(
            service
                .verify_credentials(DEFAULT_ADMIN_EMAIL, "n3w-secret")
                .await
        );
        tokio_test::assert_err!(
            service
                .verify_credentials(DEFAULT_ADMIN_EMAIL, "admin123")
                .await
        );
    }

    #[tokio::test]
    async fn rejected_rotations_leave_the_hash_alone() {
        let service = service().await;
        let before = stored_hash(&service).await;

        let mismatch = service
            .change_password(request("admin123", "abcdef", "abcdeg"))
            .await;
        assert!(matches!(
            mismatch,
            Err(Error::Validation(ValidationError::PasswordMismatch))
        ));

        let short = service.change_password(request("admin123", "abc", "abc")).await;
        assert!(matches!(
            short,
            Err(Error::Validation(ValidationError::PasswordTooShort { .. }))
        ));

        let wrong = service
            .change_password(request("nope", "abcdef", "abcdef"))
            .await;
        assert!(matches!(wrong, Err(Error::Unauthorized(_))));

        let missing = service
            .change_password(ChangePasswordRequest {
                current_password: Some("admin123".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(
            missing,
            Err(Error::Validation(ValidationError::MissingField("newPassword")))
        ));

        assert_eq!(stored_hash(&service).await, before);
    }

    #[tokio::test]
    async fn unknown_account_costs_a_password_check() {
        let service = service().await;
        // First miss also builds the throwaway hash.
        let _ = service.verify_credentials("ghost@x.com", "warm-up").await;

        let started = std::time::Instant::now();
        let _ = service.verify_credentials("ghost@x.com", "admin123").await;
        let unknown = started.elapsed();

        let started = std::time::Instant::now();
        let _ = service.verify_credentials(DEFAULT_ADMIN_EMAIL, "wrong").await;
        let wrong = started.elapsed();

        assert!(
            unknown * 4 >= wrong,
            "unknown account took {:?}, wrong password took {:?}",
            unknown,
            wrong
        );
    }

    #[tokio::test]
    async fn unknown_account_looks_like_wrong_password() {
        let service = service().await;
        let unknown = service.verify_credentials("ghost@x.com", "admin123").await;
        let wrong = service.verify_credentials(DEFAULT_ADMIN_EMAIL, "wrong").await;
        match (unknown, wrong) {
            (Err(Error::Unauthorized(a)), Err(Error::Unauthorized(b))) => assert_eq!(a, b),
            other => panic!("expected two Unauthorized errors, got {:?}", other),
        }
    }
}
