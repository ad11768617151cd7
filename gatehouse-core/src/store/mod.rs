//! The credential store: the persistence port and its PostgreSQL adapter.

pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::user::{User, UserStatus};

/// Persistence port for user records and credentials.
///
/// Uniqueness of `username` and `email` is a store-level invariant: the
/// backing implementation must enforce it atomically (unique indexes in the
/// PostgreSQL adapter), so two concurrent registrations for the same identity
/// cannot both succeed. Password hashes are only reachable through the
/// credential methods, never as part of a [`User`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record together with its password hash. Fails with
    /// [`crate::AuthError::DuplicateUser`] when the username or email is
    /// already taken.
    async fn create_user(&self, user: &User, password_hash: &str) -> Result<()>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Fetch the stored password hash for a user, if the user has one.
    async fn get_password_hash(&self, user_id: Uuid) -> Result<Option<String>>;

    /// Persist profile edits. The caller is responsible for bumping
    /// `updated_at`; identity fields (`id`, `username`, `email`) are not
    /// rewritten.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Flip the presence indicator, bumping `updated_at`.
    async fn set_status(&self, user_id: Uuid, status: UserStatus) -> Result<()>;
}

pub use postgres::PostgresUserStore;
