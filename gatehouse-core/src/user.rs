//! User records and authentication payloads
//!
//! This module provides the core types for account management in Gatehouse:
//! the persisted user record, the signup/login/profile payloads, and the
//! claims embedded in session tokens.
//!
//! ## Authentication Flow
//!
//! 1. **Signup**: A candidate record is validated, checked for uniqueness and
//!    persisted with an Argon2id password hash
//! 2. **Login**: Credentials are verified and a signed, one-hour session token
//!    is issued as an HTTP-only cookie
//! 3. **Session**: Subsequent requests carry the token; validation is a pure
//!    signature + expiry check and never touches the store
//!
//! ## Security
//!
//! - Passwords are hashed with Argon2id; the hash is not a field of [`User`]
//!   and can only be fetched through dedicated store methods
//! - Session tokens are HS256 JWTs signed with a server-held secret
//!
//! ## Example
//!
//! ```no_run
//! use gatehouse_core::user::{LoginRequest, SignupRequest};
//!
//! let signup = SignupRequest {
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     password: "secret1".to_string(),
//!     full_name: Some("Alice Smith".to_string()),
//! };
//!
//! let login = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: "secret1".to_string(),
//! };
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the optional full name.
pub const FULL_NAME_MAX_LEN: usize = 50;
/// Maximum length of the profile bio.
pub const BIO_MAX_LEN: usize = 150;

/// Core user record owned by the credential store
///
/// The password hash is deliberately not a field of this type, so no
/// serialization path can expose it. It lives in the `user_credentials`
/// table and is reachable only through the store's credential methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, assigned at creation and immutable
    pub id: Uuid,
    /// Unique username (trimmed, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Unique email address (trimmed, lowercased)
    pub email: String,
    /// Optional display name, at most 50 characters
    pub full_name: Option<String>,
    /// Short profile bio, at most 150 characters, defaults to empty
    pub bio: String,
    /// Presence indicator, defaults to [`UserStatus::Offline`]
    pub status: UserStatus,
    /// Whether the account's email has been verified
    pub is_verified: bool,
    /// Whether the account has administrative privileges
    pub is_admin: bool,
    /// Ids of befriended users; self-reference is not enforced
    pub friends: Vec<Uuid>,
    /// Timestamp of account creation
    pub created_at: DateTime<Utc>,
    /// Timestamp of last record update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh record from normalized signup fields with the safe
    /// defaults: empty bio, offline, unverified, non-admin, no friends.
    pub fn new(username: String, email: String, full_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            full_name,
            bio: String::new(),
            status: UserStatus::Offline,
            is_verified: false,
            is_admin: false,
            friends: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Presence indicator stored on the user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    #[default]
    Offline,
    Away,
}

impl UserStatus {
    /// Lowercase form used in the store and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Away => "away",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "away" => Ok(Self::Away),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

/// Non-sensitive projection returned by the signup and login endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// Signup request payload
///
/// # Example
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret1",
///   "fullName": "Alice Smith"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Desired username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Email address; stored trimmed and lowercased
    pub email: String,
    /// Plain text password, at least 6 characters
    pub password: String,
    /// Optional display name, at most 50 characters
    pub full_name: Option<String>,
}

impl SignupRequest {
    /// Validate the candidate against the record invariants. Length checks
    /// run on the trimmed fields, matching what gets stored.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_username(self.username.trim())?;
        validate_email(self.email.trim())?;

        if self.password.len() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }

        if let Some(full_name) = &self.full_name
            && full_name.trim().len() > FULL_NAME_MAX_LEN
        {
            return Err(ValidationError::InvalidFullName);
        }

        Ok(())
    }
}

/// Login request payload
///
/// # Example
///
/// ```json
/// {
///   "email": "alice@example.com",
///   "password": "secret1"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address used as the login identifier
    pub email: String,
    /// Plain text password (verified against the stored hash)
    pub password: String,
}

/// Request to update the authenticated user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub status: Option<UserStatus>,
}

impl ProfileUpdateRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if let Some(full_name) = &self.full_name
            && full_name.trim().len() > FULL_NAME_MAX_LEN
        {
            return Err(ValidationError::InvalidFullName);
        }

        if let Some(bio) = &self.bio
            && bio.len() > BIO_MAX_LEN
        {
            return Err(ValidationError::InvalidBio);
        }

        Ok(())
    }
}

/// Claims carried by a session token
///
/// Holds everything protected routes need for request-scoped identity, so
/// validation never has to re-touch the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Username at mint time
    pub username: String,
    /// Email at mint time
    pub email: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Expiration time (Unix epoch seconds)
    pub exp: i64,
}

/// Validation errors for user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid username: must be 3-30 characters, alphanumeric or underscore")]
    InvalidUsername,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password too short: minimum 6 characters required")]
    PasswordTooShort,

    #[error("Full name cannot exceed 50 characters")]
    InvalidFullName,

    #[error("Bio cannot exceed 150 characters")]
    InvalidBio,

    #[error("Status must be one of: online, offline, away")]
    InvalidStatus,
}

fn validate_username(username: &str) -> std::result::Result<(), ValidationError> {
    if username.len() < 3 || username.len() > 30 {
        return Err(ValidationError::InvalidUsername);
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidUsername);
    }

    Ok(())
}

fn validate_email(email: &str) -> std::result::Result<(), ValidationError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: None,
        }
    }

    #[test]
    fn new_user_defaults() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            None,
        );

        assert_eq!(user.bio, "");
        assert_eq!(user.status, UserStatus::Offline);
        assert!(!user.is_verified);
        assert!(!user.is_admin);
        assert!(user.friends.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn signup_request_validation() {
        assert!(signup("alice", "alice@example.com", "secret1").validate().is_ok());

        // Username bounds
        assert_eq!(
            signup("ab", "a@b.com", "secret1").validate(),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            signup(&"a".repeat(31), "a@b.com", "secret1").validate(),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            signup("bad name", "a@b.com", "secret1").validate(),
            Err(ValidationError::InvalidUsername)
        );

        // Email shape
        assert_eq!(
            signup("alice", "not-an-email", "secret1").validate(),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            signup("alice", "@example.com", "secret1").validate(),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            signup("alice", "alice@", "secret1").validate(),
            Err(ValidationError::InvalidEmail)
        );

        // Password floor
        assert_eq!(
            signup("alice", "alice@example.com", "short").validate(),
            Err(ValidationError::PasswordTooShort)
        );

        // Full name cap
        let mut request = signup("alice", "alice@example.com", "secret1");
        request.full_name = Some("a".repeat(51));
        assert_eq!(request.validate(), Err(ValidationError::InvalidFullName));
    }

    #[test]
    fn profile_update_validation() {
        let ok = ProfileUpdateRequest {
            full_name: Some("Alice Smith".to_string()),
            bio: Some("hello".to_string()),
            status: Some(UserStatus::Away),
        };
        assert!(ok.validate().is_ok());

        let long_bio = ProfileUpdateRequest {
            full_name: None,
            bio: Some("b".repeat(151)),
            status: None,
        };
        assert_eq!(long_bio.validate(), Err(ValidationError::InvalidBio));
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [UserStatus::Online, UserStatus::Offline, UserStatus::Away] {
            assert_eq!(status.as_str().parse::<UserStatus>(), Ok(status));
        }
        assert!("busy".parse::<UserStatus>().is_err());
    }

    #[test]
    fn public_user_has_no_sensitive_fields() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            Some("Alice".to_string()),
        );
        let value = serde_json::to_value(PublicUser::from(&user)).unwrap();
        let mut keys: Vec<&str> =
            value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["email", "fullName", "id", "username"]);
    }
}
