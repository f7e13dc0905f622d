use chrono::{DateTime, Utc};
use enlist_core::{DisplayName, Email, NewUser, User, UserStore, UserStoreError};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use super::password_hashing::compute_password_hash;

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    display_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: Email::try_from(Secret::new(row.email))
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
            display_name: DisplayName::try_from(row.display_name)
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT id, email, display_name, created_at, updated_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let hashed = compute_password_hash(user.password.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let row: UserRow = sqlx::query_as(
            r#"
                INSERT INTO users (id, email, password_hash, salt, display_name, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                RETURNING id, email, display_name, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_ref().expose_secret())
        .bind(hashed.hash.expose_secret())
        .bind(&hashed.salt)
        .bind(user.display_name.as_str())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        User::try_from(row)
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

fn map_sqlx_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::UserAlreadyExists;
        }
        if db_err.code().is_some_and(|code| is_unavailable_code(&code)) {
            return UserStoreError::Unavailable(e.to_string());
        }
        return UserStoreError::UnexpectedError(e.to_string());
    }
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => UserStoreError::Unavailable(e.to_string()),
        other => UserStoreError::UnexpectedError(other.to_string()),
    }
}

/// SQLSTATE codes of a server that is shutting down, starting up, out of
/// connection slots or unreachable.
fn is_unavailable_code(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03" | "53300")
}
