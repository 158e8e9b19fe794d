//! # User Repository
//!
//! Registration and lookup of users. Emails are unique and stored trimmed
//! and lowercased.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shrinkshield_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a user.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the email is already registered.
    pub async fn create(&self, email: &str) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: canonical_email(email),
            created_at: Utc::now(),
        };

        debug!(id = %user.id, "Creating user");

        sqlx::query("INSERT INTO users (id, email, created_at) VALUES (?1, ?2, ?3)")
            .bind(&user.id)
            .bind(&user.email)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("email", &user.email),
                other => other,
            })?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users WHERE email = ?1",
        )
        .bind(canonical_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

fn canonical_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        let user = users.create("  Shopper@Example.com ").await.unwrap();
        assert_eq!(user.email, "shopper@example.com");

        let by_id = users.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, user.email);

        let by_email = users.get_by_email("SHOPPER@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.create("a@b.co").await.unwrap();
        let err = users.create("A@B.co").await.unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "a@b.co");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.users().get_by_id("nope").await.unwrap().is_none());
    }
}
