use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Administrator credential row. Deliberately not `Serialize`: the hash never
/// leaves the service.
#[derive(Clone, FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
