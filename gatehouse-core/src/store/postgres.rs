use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::store::UserStore;
use crate::user::{User, UserStatus};

const USER_COLUMNS: &str = "id, username, email, full_name, bio, status, \
     is_verified, is_admin, friends, created_at, updated_at";

/// PostgreSQL-backed implementation of the [`UserStore`] port.
///
/// Uniqueness of username and email is enforced by unique indexes, so the
/// store remains the single authority even under concurrent signups; the
/// pre-checks in the handlers only exist for friendlier error reporting.
#[derive(Clone, Debug)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Connect a fresh pool. Connection failure is not recoverable here; the
    /// server treats it as fatal at startup.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await
            .map_err(|e| store_error("connect", e))?;

        info!("connected to PostgreSQL credential store");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, shared pools).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables and unique indexes if they do not exist yet. Safe to
    /// call repeatedly.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL,
                email TEXT NOT NULL,
                full_name TEXT,
                bio TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'offline',
                is_verified BOOLEAN NOT NULL DEFAULT FALSE,
                is_admin BOOLEAN NOT NULL DEFAULT FALSE,
                friends UUID[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(|e| store_error("create users table", e))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS users_username_key ON users (username)",
        )
        .execute(self.pool())
        .await
        .map_err(|e| store_error("create username index", e))?;

        sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)")
            .execute(self.pool())
            .await
            .map_err(|e| store_error("create email index", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_credentials (
                user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                password_hash TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(|e| store_error("create credentials table", e))?;

        Ok(())
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create_user(&self, user: &User, password_hash: &str) -> Result<()> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| store_error("begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, full_name, bio, status,
                is_verified, is_admin, friends, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.bio)
        .bind(user.status.as_str())
        .bind(user.is_verified)
        .bind(user.is_admin)
        .bind(&user.friends)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && matches!(
                    db_err.constraint(),
                    Some("users_username_key") | Some("users_email_key")
                )
            {
                return AuthError::DuplicateUser;
            }
            store_error("create user", e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_credentials (user_id, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("store password hash", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("commit transaction", e))?;

        info!("created user: {} ({})", user.username, user.id);
        Ok(())
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| store_error("get user by id", e))?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| store_error("get user by email", e))?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| store_error("get user by username", e))?;

        Ok(row.map(User::from))
    }

    async fn get_password_hash(&self, user_id: Uuid) -> Result<Option<String>> {
        let hash: Option<(String,)> = sqlx::query_as(
            "SELECT password_hash FROM user_credentials WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| store_error("get password hash", e))?;

        Ok(hash.map(|(h,)| h))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, bio = $3, status = $4,
                is_verified = $5, is_admin = $6, friends = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.bio)
        .bind(user.status.as_str())
        .bind(user.is_verified)
        .bind(user.is_admin)
        .bind(&user.friends)
        .bind(user.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| store_error("update user", e))?;

        Ok(())
    }

    async fn set_status(&self, user_id: Uuid, status: UserStatus) -> Result<()> {
        sqlx::query("UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(status.as_str())
            .execute(self.pool())
            .await
            .map_err(|e| store_error("set status", e))?;

        Ok(())
    }
}

/// Raw row shape; `status` is stored as text and mapped back onto the enum.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: Option<String>,
    bio: String,
    status: String,
    is_verified: bool,
    is_admin: bool,
    friends: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            bio: row.bio,
            status: row.status.parse().unwrap_or_default(),
            is_verified: row.is_verified,
            is_admin: row.is_admin,
            friends: row.friends,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn store_error(op: &str, err: sqlx::Error) -> AuthError {
    error!(operation = op, error = %err, "credential store operation failed");
    AuthError::StoreUnavailable(err.to_string())
}
